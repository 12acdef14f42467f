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
use crate::error::ParseResult;
use crate::lexer::token::{Token, TokenKind};
use crate::operators::resolve_infix;
use crate::parser::combinators::{dispatch, lookahead, parenthesized, starts_with, Rule};
use crate::parser::context::ParseContext;
use crate::parser::grammar::{
    ConstructorCallRule, IdentifierRule, InstanceCallRule, IntLiteralRule, ListLiteralRule, RealLiteralRule,
    StaticCallRule,
};

/// An operand, optionally followed by an infix operator and the rest of the
/// expression.
///
/// Operand alternatives are tried in this order: real, integer, list,
/// constructor call, static call, instance call, identifier, parenthesized
/// expression, prefix operator. Calls come before the bare identifier so
/// `a.b()` is never cut short at `a`.
pub struct ExpressionRule;

impl ExpressionRule {
    pub fn operand(ctx: &mut ParseContext) -> ParseResult<NodeId> {
        dispatch(
            ctx,
            &[
                &RealLiteralRule,
                &IntLiteralRule,
                &ListLiteralRule,
                &ConstructorCallRule,
                &StaticCallRule,
                &InstanceCallRule,
                &IdentifierRule,
                &ParenthesizedRule,
                &UnaryRule,
            ],
            "expression",
        )
    }
}

impl Rule for ExpressionRule {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        let first = &lookahead(tokens, 1)?[0];
        Ok([
            TokenKind::Real,
            TokenKind::Integer,
            TokenKind::LBracket,
            TokenKind::TypeIdentifier,
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Operator,
        ]
        .iter()
        .any(|kind| first.is(kind)))
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let operand = Self::operand(ctx)?;

        if ctx.check(&TokenKind::Operator) {
            return resolve_infix(operand, ctx);
        }

        Ok(operand)
    }
}

/// `( expr )`
///
/// Produces the inner node itself. A binary inside parentheses is marked so
/// the precedence resolver treats it as a unit.
pub struct ParenthesizedRule;

impl Rule for ParenthesizedRule {
    fn name(&self) -> &'static str {
        "parenthesized expression"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with(tokens, &TokenKind::LParen)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let inner = parenthesized(
            ctx,
            &TokenKind::LParen,
            &TokenKind::RParen,
            |c: &mut ParseContext| ExpressionRule.parse(c),
        )?;

        if let Expr::Binary { parenthesized, .. } = &mut ctx.ast_mut().node_mut(inner)?.expr {
            *parenthesized = true;
        }

        Ok(inner)
    }
}

/// `-x`, `!done`
///
/// A prefix operator applies to the operand directly after it; `-a + b`
/// means `(-a) + b`.
pub struct UnaryRule;

impl Rule for UnaryRule {
    fn name(&self) -> &'static str {
        "prefix operation"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with(tokens, &TokenKind::Operator)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let token = ctx.expect(&TokenKind::Operator)?;
        ctx.operators()
            .prefix(&token.value)
            .map_err(|e| e.at(token.span))?;

        let operand = ExpressionRule::operand(ctx)?;
        let operator = token.value.clone();

        Ok(ctx.alloc(token, Expr::Unary { operator, operand }))
    }
}
