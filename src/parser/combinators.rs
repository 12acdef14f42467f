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

use crate::ast::NodeId;
use crate::error::{ParseResult, TalonError};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::context::ParseContext;

/// Anything that can consume tokens and produce a value.
pub trait Parser<T> {
    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<T>;
}

// Allow closures to be parsers
impl<T, F: Fn(&mut ParseContext) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<T> {
        self(ctx)
    }
}

/// A grammar production.
///
/// `trigger` is the cheap, non-consuming applicability test used for
/// dispatch; `parse` commits, consumes tokens and builds the node.
pub trait Rule {
    /// Name used in diagnostics and logs.
    fn name(&self) -> &'static str;

    /// Whether the rule applies to the input starting at `tokens`.
    ///
    /// # Errors
    /// `OutOfTokens` when the decision needs more lookahead than is left.
    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool>;

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId>;
}

/// The first `n` tokens of `tokens`, or `OutOfTokens`.
pub fn lookahead(tokens: &[Token], n: usize) -> ParseResult<&[Token]> {
    tokens.get(..n).ok_or_else(TalonError::out_of_tokens)
}

/// Trigger helper: the first token is of `kind`.
pub fn starts_with(tokens: &[Token], kind: &TokenKind) -> ParseResult<bool> {
    Ok(lookahead(tokens, 1)?[0].is(kind))
}

/// Trigger helper: the first token is of `first`, the second of any of
/// `second`. Only asks for the second token when the first one matches.
pub fn starts_with_pair(tokens: &[Token], first: &TokenKind, second: &[TokenKind]) -> ParseResult<bool> {
    if !starts_with(tokens, first)? {
        return Ok(false);
    }
    let next = &lookahead(tokens, 2)?[1];
    Ok(second.iter().any(|kind| next.is(kind)))
}

/// One element, then any number of `delimiter element` repetitions.
pub fn delimited<T>(ctx: &mut ParseContext, element: impl Parser<T>, delimiter: &TokenKind) -> ParseResult<Vec<T>> {
    let mut items = vec![element.parse(ctx)?];

    while ctx.check(delimiter) {
        ctx.consume()?;
        items.push(element.parse(ctx)?);
    }

    Ok(items)
}

/// `open inner close`
pub fn parenthesized<T>(
    ctx: &mut ParseContext,
    open: &TokenKind,
    close: &TokenKind,
    inner: impl Parser<T>,
) -> ParseResult<T> {
    ctx.expect(open)?;
    let value = inner.parse(ctx)?;
    ctx.expect(close)?;
    Ok(value)
}

/// `open (element (delimiter element)*)? close`; an empty group yields an
/// empty list.
pub fn parenthesized_list<T>(
    ctx: &mut ParseContext,
    open: &TokenKind,
    close: &TokenKind,
    element: impl Parser<T>,
    delimiter: &TokenKind,
) -> ParseResult<Vec<T>> {
    ctx.expect(open)?;

    if ctx.check(close) {
        ctx.consume()?;
        return Ok(Vec::new());
    }

    let items = delimited(ctx, element, delimiter)?;
    ctx.expect(close)?;
    Ok(items)
}

/// Backtracking alternation: the first rule that parses wins, otherwise the
/// last rule's error is raised.
pub fn alternation(ctx: &mut ParseContext, rules: &[&dyn Rule]) -> ParseResult<NodeId> {
    match ctx.attempt_any(rules, true)? {
        Some(node) => Ok(node),
        None => Err(TalonError::out_of_tokens()),
    }
}

/// Alternation restricted to the rules whose trigger accepts the input.
///
/// Keeps rule order (and therefore grammar priority) but reports
/// `UnexpectedToken { expected }` when no rule even applies, instead of the
/// error of whichever rule happened to be last.
pub fn dispatch(ctx: &mut ParseContext, rules: &[&dyn Rule], expected: &str) -> ParseResult<NodeId> {
    let remaining = ctx.remaining();
    let mut starved = false;

    let candidates: Vec<&dyn Rule> = rules
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

    if candidates.is_empty() {
        let token = ctx.peek()?;
        if starved {
            return Err(TalonError::out_of_tokens().at(token.span));
        }
        return Err(TalonError::unexpected(token, expected));
    }

    alternation(ctx, &candidates)
}

/// Trigger helper: the first token is the keyword `keyword`.
pub fn starts_with_keyword(tokens: &[Token], keyword: &str) -> ParseResult<bool> {
    Ok(lookahead(tokens, 1)?[0].is_value(&TokenKind::Keyword, keyword))
}
