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

use crate::error::{ParseResult, TalonError};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::context::ParseContext;

impl ParseContext {
    /// Returns true while unconsumed tokens remain.
    pub fn has_more(&self) -> bool {
        self.index < self.tokens.len()
    }

    /// The unconsumed tokens, for trigger lookahead.
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.index.min(self.tokens.len())..]
    }

    /// The next token, without consuming it.
    ///
    /// # Errors
    /// `OutOfTokens` if the stream is exhausted.
    pub fn peek(&self) -> ParseResult<&Token> {
        self.peek_nth(0)
    }

    /// The token `n` positions ahead of the cursor.
    pub fn peek_nth(&self, n: usize) -> ParseResult<&Token> {
        self.tokens
            .get(self.index + n)
            .ok_or_else(TalonError::out_of_tokens)
    }

    /// Removes and returns the next token.
    pub fn consume(&mut self) -> ParseResult<Token> {
        let token = self.peek()?.clone();
        self.index += 1;
        Ok(token)
    }

    /// Checks the next token's kind without consuming it. False at the end
    /// of input.
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek().is_ok_and(|t| t.is(kind))
    }

    /// Checks the next token's kind and text without consuming it.
    pub fn check_value(&self, kind: &TokenKind, value: &str) -> bool {
        self.peek().is_ok_and(|t| t.is_value(kind, value))
    }

    pub fn check_keyword(&self, keyword: &str) -> bool {
        self.check_value(&TokenKind::Keyword, keyword)
    }

    /// Consumes the next token if it is of `kind`.
    ///
    /// # Errors
    /// - `OutOfTokens` at the end of input.
    /// - `UnexpectedToken` for any other kind.
    pub fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        self.expect_where(kind, |_| true, &kind.describe())
    }

    /// Consumes the next token if it is of `kind` and satisfies `predicate`.
    pub fn expect_where(
        &mut self,
        kind: &TokenKind,
        predicate: impl Fn(&Token) -> bool,
        expected: &str,
    ) -> ParseResult<Token> {
        self.expect_or(kind, predicate, |token| TalonError::unexpected(token, expected))
    }

    /// Like `expect_where`, raising `error(token)` instead of the default
    /// `UnexpectedToken` when the token is rejected.
    pub fn expect_or(
        &mut self,
        kind: &TokenKind,
        predicate: impl Fn(&Token) -> bool,
        error: impl FnOnce(&Token) -> TalonError,
    ) -> ParseResult<Token> {
        let token = self.peek()?;

        if !token.is(kind) || !predicate(token) {
            return Err(error(token));
        }

        self.consume()
    }

    pub fn expect_keyword(&mut self, keyword: &str) -> ParseResult<Token> {
        self.expect_where(
            &TokenKind::Keyword,
            |t| t.value == keyword,
            &format!("'{keyword}'"),
        )
    }

    /// Accepts a token of any of `kinds`. The token is only consumed when
    /// `consumes` is set.
    pub fn expect_any(&mut self, kinds: &[TokenKind], consumes: bool) -> ParseResult<Token> {
        let token = self.peek()?;

        if !kinds.iter().any(|kind| token.is(kind)) {
            let expected = kinds
                .iter()
                .map(TokenKind::describe)
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(TalonError::unexpected(token, expected));
        }

        if consumes {
            self.consume()
        } else {
            Ok(token.clone())
        }
    }

    /// Pushes `tokens` back onto the front of the stream.
    ///
    /// Rewinding the tokens that were just consumed only moves the cursor;
    /// anything else is spliced in ahead of the cursor.
    pub fn rewind(&mut self, tokens: Vec<Token>) {
        let count = tokens.len();

        if count <= self.index && self.tokens[self.index - count..self.index] == tokens[..] {
            self.index -= count;
            return;
        }

        let index = self.index;
        Rc::make_mut(&mut self.tokens).splice(index..index, tokens);
    }
}
