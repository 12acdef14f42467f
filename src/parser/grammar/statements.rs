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
use crate::extensions::Phase;
use crate::lexer::keywords::{DEFER, RETURN};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::combinators::{dispatch, starts_with, starts_with_keyword, starts_with_pair, Rule};
use crate::parser::context::ParseContext;
use crate::parser::grammar::{
    AnnotationRule, ExpressionRule, IdentifierRule, InstanceCallRule, StaticCallRule, TypeIdentifierRule,
};

/// `name Type? = expr`
pub struct AssignmentRule;

impl Rule for AssignmentRule {
    fn name(&self) -> &'static str {
        "assignment"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_pair(
            tokens,
            &TokenKind::Identifier,
            &[TokenKind::Assign, TokenKind::TypeIdentifier, TokenKind::LBracket],
        )
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let start = ctx.start_token();
        let name = IdentifierRule.parse(ctx)?;

        let ty = if ctx.check(&TokenKind::Assign) {
            None
        } else {
            Some(TypeIdentifierRule.parse(ctx)?)
        };

        ctx.expect(&TokenKind::Assign)?;
        let value = ExpressionRule.parse(ctx)?;

        Ok(ctx.alloc(start, Expr::Assignment { name, ty, value }))
    }
}

/// `return expr`
pub struct ReturnRule;

impl Rule for ReturnRule {
    fn name(&self) -> &'static str {
        "return statement"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_keyword(tokens, RETURN)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let keyword = ctx.expect_keyword(RETURN)?;
        let value = ExpressionRule.parse(ctx)?;
        Ok(ctx.alloc(keyword, Expr::Return { value }))
    }
}

/// `defer { ... }`; the block may not return.
pub struct DeferRule;

impl Rule for DeferRule {
    fn name(&self) -> &'static str {
        "defer block"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_keyword(tokens, DEFER)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let keyword = ctx.expect_keyword(DEFER)?;
        let block = BlockRule.parse(ctx)?;

        if let Expr::Block { ret: Some(ret), .. } = ctx.ast().expr(block)? {
            let span = ctx.ast()[*ret].span();
            return Err(TalonError::new(ErrorKind::DeferReturn)
                .at(span)
                .with_help("move the return statement after the defer block"));
        }

        Ok(ctx.alloc(keyword, Expr::Defer { block }))
    }
}

/// Where a block's parser is between `{` and `}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    InBody,
    SawReturn,
}

/// `{ statement* (return expr)? }`
///
/// A return statement must be the last thing in the block; it is stored in
/// the block's `ret` slot rather than in `body`.
pub struct BlockRule;

impl BlockRule {
    fn statement(ctx: &mut ParseContext) -> ParseResult<NodeId> {
        dispatch(
            ctx,
            &[
                &AssignmentRule,
                &AnnotationRule,
                &DeferRule,
                &InstanceCallRule,
                &StaticCallRule,
            ],
            "statement",
        )
    }
}

impl Rule for BlockRule {
    fn name(&self) -> &'static str {
        "block"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with(tokens, &TokenKind::LBrace)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let open = ctx.expect(&TokenKind::LBrace)?;
        let opened = open.span;

        let (body, ret) = ctx.in_phase(Phase::Statement, |ctx| {
            let mut state = BlockState::InBody;
            let mut body = Vec::new();
            let mut ret = None;

            loop {
                if !ctx.has_more() {
                    return Err(TalonError::new(ErrorKind::UnclosedBlock { opened }).at(opened));
                }

                if ctx.check(&TokenKind::RBrace) {
                    ctx.consume()?;
                    return Ok((body, ret));
                }

                if state == BlockState::SawReturn {
                    let token = ctx.peek()?;
                    return Err(TalonError::new(ErrorKind::CodeAfterReturn)
                        .at(token.span)
                        .with_help("a return statement must be the last statement of its block"));
                }

                if ctx.check_keyword(RETURN) {
                    ret = Some(ReturnRule.parse(ctx)?);
                    state = BlockState::SawReturn;
                } else {
                    body.push(Self::statement(ctx)?);
                }
            }
        })?;

        Ok(ctx.alloc(open, Expr::Block { body, ret }))
    }
}
