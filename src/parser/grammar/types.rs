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
use crate::parser::combinators::{starts_with, starts_with_pair, Rule};
use crate::parser::context::ParseContext;

/// `name`
pub struct IdentifierRule;

impl Rule for IdentifierRule {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with(tokens, &TokenKind::Identifier)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let token = ctx.expect(&TokenKind::Identifier)?;
        let value = token.value.clone();
        Ok(ctx.alloc(token, Expr::Identifier { value }))
    }
}

/// `Int`, `Geo::Point`, or a list type `[T]` nested to any depth.
pub struct TypeIdentifierRule;

impl TypeIdentifierRule {
    /// A plain type name; list types are rejected.
    pub fn named(ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let token = ctx.expect(&TokenKind::TypeIdentifier)?;
        let fully_qualified = token.value.contains("::");

        let value = if fully_qualified && ctx.config().mangle_qualified_names {
            ctx.mangle(&token.value)
        } else {
            token.value.clone()
        };

        Ok(ctx.alloc(
            token,
            Expr::TypeIdentifier {
                value,
                fully_qualified,
            },
        ))
    }
}

impl Rule for TypeIdentifierRule {
    fn name(&self) -> &'static str {
        "type"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        Ok(starts_with(tokens, &TokenKind::TypeIdentifier)? || starts_with(tokens, &TokenKind::LBracket)?)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        if !ctx.check(&TokenKind::LBracket) {
            return Self::named(ctx);
        }

        let open = ctx.consume()?;
        let element = self.parse(ctx)?;
        ctx.expect(&TokenKind::RBracket)?;

        Ok(ctx.alloc(open, Expr::ListType { element }))
    }
}

/// `name Type`
pub struct PairRule;

impl Rule for PairRule {
    fn name(&self) -> &'static str {
        "name/type pair"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_pair(
            tokens,
            &TokenKind::Identifier,
            &[TokenKind::TypeIdentifier, TokenKind::LBracket],
        )
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let start = ctx.start_token();
        let name = IdentifierRule.parse(ctx)?;
        let ty = TypeIdentifierRule.parse(ctx)?;

        Ok(ctx.alloc(start, Expr::Pair { name, ty }))
    }
}
