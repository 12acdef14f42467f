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

use crate::ast::{Expr, NodeId};
use crate::error::{ErrorKind, ParseResult, TalonError};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::combinators::{parenthesized_list, starts_with, Rule};
use crate::parser::context::ParseContext;
use crate::parser::grammar::ExpressionRule;

fn invalid_literal(token: &Token) -> TalonError {
    TalonError::new(ErrorKind::InvalidLiteral {
        text: token.value.clone(),
    })
    .at(token.span)
}

pub struct IntLiteralRule;

impl Rule for IntLiteralRule {
    fn name(&self) -> &'static str {
        "integer literal"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with(tokens, &TokenKind::Integer)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let token = ctx.expect(&TokenKind::Integer)?;
        let value = token
            .value
            .parse::<i64>()
            .map_err(|_| invalid_literal(&token))?;

        Ok(ctx.alloc(token, Expr::IntLiteral { value }))
    }
}

pub struct RealLiteralRule;

impl Rule for RealLiteralRule {
    fn name(&self) -> &'static str {
        "real literal"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with(tokens, &TokenKind::Real)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let token = ctx.expect(&TokenKind::Real)?;
        let value = token
            .value
            .parse::<f64>()
            .map_err(|_| invalid_literal(&token))?;

        Ok(ctx.alloc(token, Expr::RealLiteral { value }))
    }
}

/// `[]`, `[1, 2, x]`
pub struct ListLiteralRule;

impl Rule for ListLiteralRule {
    fn name(&self) -> &'static str {
        "list literal"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with(tokens, &TokenKind::LBracket)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let open = ctx.start_token();
        let elements = parenthesized_list(
            ctx,
            &TokenKind::LBracket,
            &TokenKind::RBracket,
            |c: &mut ParseContext| ExpressionRule.parse(c),
            &TokenKind::Comma,
        )?;

        Ok(ctx.alloc(open, Expr::ListLiteral { elements }))
    }
}
