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

use std::rc::Rc;

use crate::ast::{Ast, Expr, NodeId};
use crate::config::ParserConfig;
use crate::error::{ErrorKind, ParseResult, TalonError};
use crate::extensions::{ExtensionRegistry, Phase};
use crate::lexer::token::{Token, TokenKind};
use crate::mangle::{DefaultMangler, NameMangler};
use crate::operators::OperatorTable;
use crate::parser::combinators::{Parser, Rule};
use crate::span::Span;

/// The mutable state every grammar rule works against.
///
/// This structure maintains:
/// - The token sequence and a cursor into it
/// - The AST arena nodes are allocated into
/// - The operator table and extension registry (owned per parse, so
///   independent parses never share mutable state)
/// - The injected name mangler and the parser configuration
///
/// The cursor operations live in `helpers.rs` through an additional
/// `impl ParseContext` block.
pub struct ParseContext {
    /// Shared so a checkpoint is a reference-count bump; `rewind` copies on
    /// write only when it has to splice.
    pub(crate) tokens: Rc<Vec<Token>>,

    /// Index of the next unconsumed token.
    pub(crate) index: usize,

    pub(crate) ast: Ast,
    pub(crate) operators: OperatorTable,
    pub(crate) extensions: ExtensionRegistry,

    mangler: Box<dyn NameMangler>,
    config: ParserConfig,
    phase: Phase,
}

/// A saved cursor position. Restoring it undoes every consumption (and any
/// `rewind` splice) made since it was taken.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    tokens: Rc<Vec<Token>>,
    index: usize,
    phase: Phase,
}

impl ParseContext {
    /// A context over `tokens` with the built-in operators and extensions.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: Rc::new(tokens),
            index: 0,
            ast: Ast::new(),
            operators: OperatorTable::with_builtins(),
            extensions: ExtensionRegistry::with_builtins(),
            mangler: Box::new(DefaultMangler),
            config: ParserConfig::default(),
            phase: Phase::Program,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_operators(mut self, operators: OperatorTable) -> Self {
        self.operators = operators;
        self
    }

    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_mangler(mut self, mangler: impl NameMangler + 'static) -> Self {
        self.mangler = Box::new(mangler);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut self.ast
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    pub fn operators_mut(&mut self) -> &mut OperatorTable {
        &mut self.operators
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut ExtensionRegistry {
        &mut self.extensions
    }

    /// Splits the context into the arena and the (possibly grown) operator
    /// table.
    pub fn into_parts(self) -> (Ast, OperatorTable) {
        (self.ast, self.operators)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs `f` with the phase set to `phase`, restoring the previous phase
    /// afterwards whether or not `f` succeeds.
    pub fn in_phase<T>(&mut self, phase: Phase, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let previous = std::mem::replace(&mut self.phase, phase);
        let result = f(self);
        self.phase = previous;
        result
    }

    /// Normalises a namespace-qualified name through the injected mangler.
    pub fn mangle(&self, qualified: &str) -> String {
        self.mangler.mangle(qualified)
    }

    pub fn alloc(&mut self, token: Token, expr: Expr) -> NodeId {
        self.ast.alloc(token, expr)
    }

    /// Token the next node would start at: the next token, or an empty
    /// end-of-input marker positioned after the last token.
    pub fn start_token(&self) -> Token {
        match self.tokens.get(self.index) {
            Some(token) => token.clone(),
            None => {
                let span = self
                    .tokens
                    .last()
                    .map(|t| Span::new(t.span.line, t.span.column + t.value.chars().count(), t.span.offset + t.value.chars().count()))
                    .unwrap_or_default();
                Token::new(TokenKind::Custom("EndOfInput".to_string()), "", span)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Backtracking
    // -------------------------------------------------------------------------

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            tokens: Rc::clone(&self.tokens),
            index: self.index,
            phase: self.phase,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.tokens = checkpoint.tokens;
        self.index = checkpoint.index;
        self.phase = checkpoint.phase;
    }

    /// Runs `parser`; on failure the stream is restored and `None` returned.
    /// The error never escapes.
    pub fn attempt<T>(&mut self, parser: impl Parser<T>) -> Option<T> {
        let checkpoint = self.checkpoint();
        match parser.parse(self) {
            Ok(value) => Some(value),
            Err(error) => {
                log::trace!("attempt rewound at token {}: {error}", checkpoint.index);
                self.restore(checkpoint);
                None
            }
        }
    }

    /// `attempt` for a grammar rule.
    pub fn attempt_rule(&mut self, rule: &dyn Rule) -> Option<NodeId> {
        self.attempt(|ctx: &mut ParseContext| rule.parse(ctx))
    }

    /// Tries `rules` in order, each from the same starting point; the first
    /// success wins.
    ///
    /// When every rule fails the result is `Ok(None)`, unless `propagate`
    /// is set, in which case the *last* rule's error is returned.
    pub fn attempt_any(&mut self, rules: &[&dyn Rule], propagate: bool) -> ParseResult<Option<NodeId>> {
        let mut last_error = None;

        for rule in rules {
            let checkpoint = self.checkpoint();
            match rule.parse(self) {
                Ok(node) => return Ok(Some(node)),
                Err(error) => {
                    log::trace!("`{}` did not match: {error}", rule.name());
                    self.restore(checkpoint);
                    last_error = Some(error);
                }
            }
        }

        match last_error {
            Some(error) if propagate => Err(error),
            _ => Ok(None),
        }
    }

    // -------------------------------------------------------------------------
    // Top-level driver
    // -------------------------------------------------------------------------

    /// Drives `rules` until the input is exhausted.
    ///
    /// At every step exactly one rule's trigger must accept the remaining
    /// input. No match is an `UnexpectedToken` (or `OutOfTokens` when a
    /// trigger needed more lookahead than was left). Several matches mean the
    /// grammar itself is ambiguous, which is a defect in the rule set and is
    /// reported as `AmbiguousGrammar`.
    ///
    /// In permissive mode a step without exactly one match discards the
    /// current token and tries again.
    pub fn execute(&mut self, rules: &[&dyn Rule]) -> ParseResult<Vec<NodeId>> {
        let mut nodes = Vec::new();

        while self.has_more() {
            let remaining = self.remaining();
            let mut starved = false;

            let matching: Vec<&dyn Rule> = rules
                .iter()
                .copied()
                .filter(|rule| match rule.trigger(remaining) {
                    Ok(accepts) => accepts,
                    Err(_) => {
                        starved = true;
                        false
                    }
                })
                .collect();

            if matching.len() == 1 {
                let rule = matching[0];
                log::debug!("top level: `{}` at {}", rule.name(), self.peek()?.span);
                nodes.push(rule.parse(self)?);
                continue;
            }

            if self.config.permissive {
                let skipped = self.consume()?;
                log::debug!(
                    "permissive mode: discarded `{}` at {} ({} rules matched)",
                    skipped,
                    skipped.span,
                    matching.len()
                );
                continue;
            }

            let token = self.peek()?;

            if matching.is_empty() {
                if starved {
                    return Err(TalonError::out_of_tokens().at(token.span));
                }
                let expected = rules.iter().map(|r| r.name()).collect::<Vec<_>>().join(" or ");
                return Err(TalonError::unexpected(token, expected));
            }

            let names = matching.iter().map(|r| r.name()).collect::<Vec<_>>().join(", ");
            log::error!("grammar defect: rules {names} all accept `{token}`");
            return Err(TalonError::new(ErrorKind::AmbiguousGrammar { rules: names }).at(token.span));
        }

        Ok(nodes)
    }
}
