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

use crate::ast::{Expr, NodeId, NodeKind};
use crate::error::{ErrorKind, ParseResult, TalonError};
use crate::extensions::PhaseContext;
use crate::lexer::token::{Token, TokenKind};
use crate::parser::combinators::{dispatch, parenthesized_list, starts_with, Rule};
use crate::parser::context::ParseContext;
use crate::parser::grammar::{ExpressionRule, MethodRule, SignatureRule};

fn kind_list(kinds: &[NodeKind]) -> String {
    kinds
        .iter()
        .map(NodeKind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `@Qualified.Name` or `@Qualified.Name(params)`
///
/// # Behavior
/// - The name must belong to a registered extension.
/// - Each parameter is a method, a signature or an expression, tried in
///   that order. The kinds must match what the extension declares.
/// - The extension runs immediately, before parsing continues, so any
///   operators it declares are usable right after the annotation.
///
/// For an extension without parameters, a parenthesised group that does
/// not parse as a parameter list is left alone: `@Marker (Int) f () {}`
/// annotates the method that follows.
pub struct AnnotationRule;

impl AnnotationRule {
    fn qualified_name(ctx: &mut ParseContext) -> ParseResult<String> {
        let segment_kinds = [TokenKind::TypeIdentifier, TokenKind::Identifier];
        let mut segments = vec![ctx.expect_any(&segment_kinds, true)?.value];

        while ctx.check(&TokenKind::Dot) {
            let continues = ctx
                .peek_nth(1)
                .is_ok_and(|t| segment_kinds.iter().any(|kind| t.is(kind)));
            if !continues {
                break;
            }
            ctx.consume()?;
            segments.push(ctx.consume()?.value);
        }

        Ok(segments.join("."))
    }

    fn parameter(ctx: &mut ParseContext) -> ParseResult<NodeId> {
        dispatch(
            ctx,
            &[&MethodRule, &SignatureRule, &ExpressionRule],
            "method, signature or expression",
        )
    }
}

impl Rule for AnnotationRule {
    fn name(&self) -> &'static str {
        "annotation"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with(tokens, &TokenKind::Annotation)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let at = ctx.expect(&TokenKind::Annotation)?;
        let name = Self::qualified_name(ctx)?;

        let extension = ctx.extensions().get(&name).ok_or_else(|| {
            TalonError::new(ErrorKind::UnknownExtension { name: name.clone() }).at(at.span)
        })?;

        let parameter_list = |c: &mut ParseContext| {
            parenthesized_list(
                c,
                &TokenKind::LParen,
                &TokenKind::RParen,
                Self::parameter,
                &TokenKind::Comma,
            )
        };

        let parameters = if !ctx.check(&TokenKind::LParen) {
            Vec::new()
        } else if extension.parameters().is_empty() {
            ctx.attempt(parameter_list).unwrap_or_default()
        } else {
            parameter_list(ctx)?
        };

        let found = parameters
            .iter()
            .map(|p| ctx.ast().kind(*p))
            .collect::<ParseResult<Vec<_>>>()?;

        if found != extension.parameters() {
            return Err(TalonError::new(ErrorKind::ExtensionParameterMismatch {
                name,
                expected: kind_list(extension.parameters()),
                found: kind_list(&found),
            })
            .at(at.span));
        }

        let span = at.span;
        let node = ctx.alloc(
            at,
            Expr::Annotation {
                name: name.clone(),
                parameters: parameters.clone(),
            },
        );

        let phase = ctx.phase();
        log::debug!("running extension `{name}` ({phase:?} phase) at {span}");

        let mut phase_ctx = PhaseContext::new(phase, node, &mut ctx.ast, &mut ctx.operators);
        extension
            .invoke(&mut phase_ctx, &parameters)
            .map_err(|e| e.or_at(span))?;

        Ok(node)
    }
}
