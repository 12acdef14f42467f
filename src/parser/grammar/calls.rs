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
use crate::parser::combinators::{parenthesized_list, starts_with_pair, Rule};
use crate::parser::context::ParseContext;
use crate::parser::grammar::{ExpressionRule, IdentifierRule, TypeIdentifierRule};

/// `(expr, expr, ...)`
fn arguments(ctx: &mut ParseContext) -> ParseResult<Vec<NodeId>> {
    parenthesized_list(
        ctx,
        &TokenKind::LParen,
        &TokenKind::RParen,
        |c: &mut ParseContext| ExpressionRule.parse(c),
        &TokenKind::Comma,
    )
}

/// `.name(args)` applied to `receiver`.
fn instance_link(ctx: &mut ParseContext, receiver: NodeId) -> ParseResult<NodeId> {
    ctx.expect(&TokenKind::Dot)?;
    let method = IdentifierRule.parse(ctx)?;
    let args = arguments(ctx)?;

    let start = ctx.ast()[receiver].token.clone();
    Ok(ctx.alloc(
        start,
        Expr::InstanceCall {
            receiver,
            method,
            args,
        },
    ))
}

/// Extends `receiver` with as many `.name(args)` links as follow it. The
/// result of each call is the receiver of the next, so the returned node is
/// the last call of the chain.
fn call_chain(ctx: &mut ParseContext, mut receiver: NodeId) -> ParseResult<NodeId> {
    while ctx.check(&TokenKind::Dot) {
        receiver = instance_link(ctx, receiver)?;
    }
    Ok(receiver)
}

/// `Point(1, 2)`
pub struct ConstructorCallRule;

impl Rule for ConstructorCallRule {
    fn name(&self) -> &'static str {
        "constructor call"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_pair(tokens, &TokenKind::TypeIdentifier, &[TokenKind::LParen])
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let start = ctx.start_token();
        let receiver = TypeIdentifierRule::named(ctx)?;
        let args = arguments(ctx)?;

        let call = ctx.alloc(start, Expr::ConstructorCall { receiver, args });
        call_chain(ctx, call)
    }
}

/// `Math.max(a, b)`
pub struct StaticCallRule;

impl Rule for StaticCallRule {
    fn name(&self) -> &'static str {
        "static call"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_pair(tokens, &TokenKind::TypeIdentifier, &[TokenKind::Dot])
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let start = ctx.start_token();
        let receiver = TypeIdentifierRule::named(ctx)?;
        ctx.expect(&TokenKind::Dot)?;
        let method = IdentifierRule.parse(ctx)?;
        let args = arguments(ctx)?;

        let call = ctx.alloc(
            start,
            Expr::StaticCall {
                receiver,
                method,
                args,
            },
        );
        call_chain(ctx, call)
    }
}

/// `point.scale(2).translate(1, 1)`
pub struct InstanceCallRule;

impl Rule for InstanceCallRule {
    fn name(&self) -> &'static str {
        "instance call"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_pair(tokens, &TokenKind::Identifier, &[TokenKind::Dot])
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let receiver = IdentifierRule.parse(ctx)?;
        let first = instance_link(ctx, receiver)?;
        call_chain(ctx, first)
    }
}
