/*
 * ==========================================================================
 * TALON - Sharp parsing for the Talon API language
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 *
 * License:
 * This file is part of the TALON compiler front end.
 *
 * TALON is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use thiserror::Error;

use crate::ast::NodeId;
use crate::lexer::token::Token;
use crate::operators::Fixity;
use crate::span::Span;

/// Result type shared by every stage of the front end.
pub type ParseResult<T> = Result<T, TalonError>;

/// Every failure the front end can report.
///
/// All kinds are terminal for the rule that raised them, but an enclosing
/// `attempt` / `attempt_any` treats them as a local "no match" and rewinds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("unexpected end of input")]
    OutOfTokens,

    #[error("unexpected token `{found}`, expected {expected}")]
    UnexpectedToken { found: String, expected: String },

    #[error("block opened at {opened} is never closed")]
    UnclosedBlock { opened: Span },

    #[error("code after return statement")]
    CodeAfterReturn,

    #[error("a `defer` block cannot contain a return statement")]
    DeferReturn,

    #[error("unknown {fixity} operator `{symbol}`")]
    UnknownOperator { symbol: String, fixity: Fixity },

    #[error("operator `{symbol}` is already declared")]
    AlreadyDeclaredOperator { symbol: String },

    #[error("operators `{left}` and `{right}` are already related")]
    AlreadyRelated { left: String, right: String },

    #[error("unknown extension `{name}`")]
    UnknownExtension { name: String },

    #[error("extension `{name}` expects ({expected}) but was given ({found})")]
    ExtensionParameterMismatch {
        name: String,
        expected: String,
        found: String,
    },

    #[error("extension `{name}` is already registered")]
    DuplicateExtension { name: String },

    #[error("lexical category `{name}` already exists")]
    DuplicateLexicalCategory { name: String },

    #[error("unknown lexical category `{name}`")]
    UnknownLexicalCategory { name: String },

    #[error("invalid pattern for lexical category `{name}`: {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("no lexical category matches `{fragment}`")]
    LexicalError { fragment: String },

    #[error("node {parent} has {matches} children matching node {target}, expected exactly one")]
    ChildRewrite {
        parent: NodeId,
        target: NodeId,
        matches: usize,
    },

    #[error("node {id} does not exist")]
    UnknownNode { id: NodeId },

    #[error("grammar is ambiguous: {rules} all accept the same input")]
    AmbiguousGrammar { rules: String },

    #[error("invalid literal `{text}`")]
    InvalidLiteral { text: String },

    #[error("invalid parser configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("node {id} has {parents} parents, expected at most one")]
    SharedNode { id: NodeId, parents: usize },
}

impl ErrorKind {
    /// Stable diagnostic code for this kind of failure.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::OutOfTokens => "T0001",
            ErrorKind::UnexpectedToken { .. } => "T0002",
            ErrorKind::UnclosedBlock { .. } => "T0003",
            ErrorKind::CodeAfterReturn => "T0004",
            ErrorKind::DeferReturn => "T0005",
            ErrorKind::UnknownOperator { .. } => "T0006",
            ErrorKind::AlreadyDeclaredOperator { .. } => "T0007",
            ErrorKind::AlreadyRelated { .. } => "T0008",
            ErrorKind::UnknownExtension { .. } => "T0009",
            ErrorKind::ExtensionParameterMismatch { .. } => "T0010",
            ErrorKind::DuplicateExtension { .. } => "T0011",
            ErrorKind::DuplicateLexicalCategory { .. } => "T0012",
            ErrorKind::UnknownLexicalCategory { .. } => "T0013",
            ErrorKind::InvalidPattern { .. } => "T0014",
            ErrorKind::LexicalError { .. } => "T0015",
            ErrorKind::ChildRewrite { .. } => "T0016",
            ErrorKind::UnknownNode { .. } => "T0017",
            ErrorKind::AmbiguousGrammar { .. } => "T0018",
            ErrorKind::InvalidLiteral { .. } => "T0019",
            ErrorKind::InvalidConfig { .. } => "T0020",
            ErrorKind::SharedNode { .. } => "T0021",
        }
    }
}

/// A front-end failure: what went wrong, where, and optionally how to fix it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}{}", .span.map(|s| format!(" at {s}")).unwrap_or_default())]
pub struct TalonError {
    pub kind: ErrorKind,

    /// Position of the token that triggered the failure, when one exists.
    pub span: Option<Span>,

    /// Optional note / help text.
    pub help: Option<String>,
}

impl TalonError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            span: None,
            help: None,
        }
    }

    /// Attach a source position (builder-style).
    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a source position unless one is already known.
    pub fn or_at(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    /// Attach a help message to the error (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn out_of_tokens() -> Self {
        Self::new(ErrorKind::OutOfTokens)
    }

    /// `found` did not satisfy the rule that expected `expected`.
    pub fn unexpected(found: &Token, expected: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnexpectedToken {
            found: found.value.clone(),
            expected: expected.into(),
        })
        .at(found.span)
    }
}

impl From<ErrorKind> for TalonError {
    fn from(kind: ErrorKind) -> Self {
        TalonError::new(kind)
    }
}
