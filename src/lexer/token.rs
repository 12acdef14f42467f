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

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::span::Span;

/// Represents the **category of a lexical token**.
///
/// A category is identified by its *name*: two kinds compare equal when their
/// names match, so `TokenKind::Custom("Identifier".into())` is the same
/// category as `TokenKind::Identifier`. The tokenizer relies on this when
/// categories are inserted or replaced at runtime.
///
/// # Compiler Pipeline Role
/// ```text
/// Source Code → Tokenizer → TokenKind → Parse Context → AST
/// ```
#[derive(Debug, Clone, Eq)]
pub enum TokenKind {
    /// Spaces, tabs and newlines. Never emitted as a token.
    Whitespace,

    /// `3.14`
    Real,

    /// `42`
    Integer,

    /// One of the closed set in `keywords.rs`.
    Keyword,

    /// A lowercase-leading name: `value`, `to_string`.
    Identifier,

    /// An uppercase-leading name, optionally namespace-qualified:
    /// `Int`, `Geometry::Point`.
    TypeIdentifier,

    Colon,
    Comma,

    /// The `...` terminator of the legacy top-level declaration form.
    Shelf,

    Dot,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    /// Any run of operator characters: `+`, `<=`, `**`, `&&`.
    Operator,

    /// A single `=`.
    Assign,

    /// The `@` that introduces an annotation.
    Annotation,

    /// A category registered at runtime.
    Custom(String),
}

impl TokenKind {
    pub fn name(&self) -> &str {
        match self {
            TokenKind::Whitespace => "Whitespace",
            TokenKind::Real => "Real",
            TokenKind::Integer => "Integer",
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::TypeIdentifier => "TypeIdentifier",
            TokenKind::Colon => "Colon",
            TokenKind::Comma => "Comma",
            TokenKind::Shelf => "Shelf",
            TokenKind::Dot => "Dot",
            TokenKind::LParen => "LParen",
            TokenKind::RParen => "RParen",
            TokenKind::LBracket => "LBracket",
            TokenKind::RBracket => "RBracket",
            TokenKind::LBrace => "LBrace",
            TokenKind::RBrace => "RBrace",
            TokenKind::Operator => "Operator",
            TokenKind::Assign => "Assign",
            TokenKind::Annotation => "Annotation",
            TokenKind::Custom(name) => name,
        }
    }

    /// Human-readable description used in "expected ..." messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Shelf => "'...'".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::Assign => "'='".to_string(),
            TokenKind::Annotation => "'@'".to_string(),
            TokenKind::Real => "real number".to_string(),
            TokenKind::Integer => "integer".to_string(),
            TokenKind::Keyword => "keyword".to_string(),
            TokenKind::Identifier => "identifier".to_string(),
            TokenKind::TypeIdentifier => "type identifier".to_string(),
            TokenKind::Operator => "operator".to_string(),
            other => other.name().to_string(),
        }
    }
}

impl PartialEq for TokenKind {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Hash for TokenKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Represents a **single lexical token** produced by the tokenizer.
///
/// # Example Tokens
/// ```text
/// api    →  { kind: Keyword,        value: "api",   span: 0:0 }
/// Point  →  { kind: TypeIdentifier, value: "Point", span: 0:4 }
/// 42     →  { kind: Integer,        value: "42",    span: 1:8 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,

    /// The exact source text that produced this token.
    pub value: String,

    /// Where the token starts.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    pub fn is(&self, kind: &TokenKind) -> bool {
        &self.kind == kind
    }

    pub fn is_value(&self, kind: &TokenKind, value: &str) -> bool {
        self.is(kind) && self.value == value
    }
}

impl fmt::Display for Token {
    /// Prints only the lexeme: error messages should show what the user wrote.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
