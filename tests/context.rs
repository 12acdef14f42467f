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

//! Cursor operations, backtracking and top-level dispatch.

use talon::parser::combinators::{delimited, lookahead, parenthesized_list, Rule};
use talon::parser::grammar::{IdentifierRule, IntLiteralRule};
use talon::{tokenize, ErrorKind, NodeId, ParseContext, ParseResult, Token, TokenKind};

fn context(source: &str) -> ParseContext {
    ParseContext::new(tokenize(source).unwrap())
}

#[test]
fn peek_and_consume() {
    let mut ctx = context("a b");

    assert_eq!(ctx.peek().unwrap().value, "a");
    assert_eq!(ctx.peek_nth(1).unwrap().value, "b");
    assert_eq!(ctx.consume().unwrap().value, "a");
    assert_eq!(ctx.remaining().len(), 1);
    assert_eq!(ctx.consume().unwrap().value, "b");

    assert!(!ctx.has_more());
    assert_eq!(ctx.peek().unwrap_err().kind, ErrorKind::OutOfTokens);
    assert_eq!(ctx.consume().unwrap_err().kind, ErrorKind::OutOfTokens);
}

#[test]
fn expect_checks_kind_and_predicate() {
    let mut ctx = context("api Foo");

    let error = ctx.expect(&TokenKind::Identifier).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::UnexpectedToken { .. }));
    assert_eq!(ctx.remaining().len(), 2, "a failed expect consumes nothing");

    assert!(ctx.expect_where(&TokenKind::Keyword, |t| t.value == "type", "'type'").is_err());
    assert_eq!(ctx.expect_keyword("api").unwrap().value, "api");

    let custom = ctx
        .expect_or(&TokenKind::Identifier, |_| true, |t| {
            talon::TalonError::new(ErrorKind::InvalidLiteral { text: t.value.clone() })
        })
        .unwrap_err();
    assert_eq!(custom.kind, ErrorKind::InvalidLiteral { text: "Foo".into() });
}

#[test]
fn expect_any_can_leave_the_token_in_place() {
    let mut ctx = context("+ x");
    let kinds = [TokenKind::Identifier, TokenKind::Operator];

    assert_eq!(ctx.expect_any(&kinds, false).unwrap().value, "+");
    assert_eq!(ctx.remaining().len(), 2);
    assert_eq!(ctx.expect_any(&kinds, true).unwrap().value, "+");
    assert_eq!(ctx.remaining().len(), 1);
    assert!(ctx.expect_any(&[TokenKind::Integer], true).is_err());
}

#[test]
fn restore_undoes_consumption() {
    let mut ctx = context("a b c");
    let checkpoint = ctx.checkpoint();

    ctx.consume().unwrap();
    ctx.consume().unwrap();
    ctx.restore(checkpoint);

    assert_eq!(ctx.remaining().len(), 3);
    assert_eq!(ctx.peek().unwrap().value, "a");
}

#[test]
fn failed_attempt_restores_the_stream() {
    let mut ctx = context("a b 1");

    let result = ctx.attempt(|c: &mut ParseContext| -> ParseResult<NodeId> {
        IdentifierRule.parse(c)?;
        IdentifierRule.parse(c)?;
        IdentifierRule.parse(c)
    });

    assert!(result.is_none());
    assert_eq!(ctx.remaining().len(), 3);

    let pair = ctx.attempt(|c: &mut ParseContext| -> ParseResult<(NodeId, NodeId)> {
        let a = IdentifierRule.parse(c)?;
        let b = IdentifierRule.parse(c)?;
        Ok((a, b))
    });
    assert!(pair.is_some());
    assert_eq!(ctx.peek().unwrap().value, "1");
}

#[test]
fn attempt_any_takes_the_first_success() {
    let mut ctx = context("7");

    let rules: [&dyn Rule; 2] = [&IdentifierRule, &IntLiteralRule];
    let node = ctx.attempt_any(&rules, false).unwrap().unwrap();
    assert_eq!(ctx.ast().kind(node).unwrap(), talon::NodeKind::IntLiteral);
}

#[test]
fn attempt_any_reports_the_last_error_only_when_asked() {
    let mut ctx = context("Foo");
    let rules: [&dyn Rule; 2] = [&IdentifierRule, &IntLiteralRule];

    assert_eq!(ctx.attempt_any(&rules, false).unwrap(), None);

    let error = ctx.attempt_any(&rules, true).unwrap_err();
    let ErrorKind::UnexpectedToken { expected, .. } = error.kind else {
        panic!("expected an unexpected token");
    };
    assert_eq!(expected, "integer");
    assert_eq!(ctx.remaining().len(), 1);
}

#[test]
fn rewind_of_consumed_tokens_steps_back() {
    let mut ctx = context("a b c");
    let a = ctx.consume().unwrap();
    let b = ctx.consume().unwrap();

    ctx.rewind(vec![a, b]);

    assert_eq!(ctx.remaining().len(), 3);
    assert_eq!(ctx.peek().unwrap().value, "a");
}

#[test]
fn rewind_of_new_tokens_splices_them_in() {
    let mut ctx = context("a b");
    ctx.consume().unwrap();
    let checkpoint = ctx.checkpoint();

    let synthetic = Token::new(TokenKind::Identifier, "z", Default::default());
    ctx.rewind(vec![synthetic]);

    let values: Vec<&str> = ctx.remaining().iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["z", "b"]);

    // The checkpoint still sees the stream as it was.
    ctx.restore(checkpoint);
    assert_eq!(ctx.peek().unwrap().value, "b");
}

#[test]
fn lookahead_fails_when_short() {
    let tokens = tokenize("a").unwrap();
    assert_eq!(lookahead(&tokens, 1).unwrap().len(), 1);
    assert_eq!(lookahead(&tokens, 2).unwrap_err().kind, ErrorKind::OutOfTokens);
}

#[test]
fn delimited_and_parenthesized_lists() {
    let mut ctx = context("a, b, c");
    let items = delimited(&mut ctx, |c: &mut ParseContext| IdentifierRule.parse(c), &TokenKind::Comma).unwrap();
    assert_eq!(items.len(), 3);

    let mut ctx = context("() (1, 2)");
    let int = |c: &mut ParseContext| IntLiteralRule.parse(c);
    let empty = parenthesized_list(&mut ctx, &TokenKind::LParen, &TokenKind::RParen, int, &TokenKind::Comma).unwrap();
    let two = parenthesized_list(&mut ctx, &TokenKind::LParen, &TokenKind::RParen, int, &TokenKind::Comma).unwrap();
    assert!(empty.is_empty());
    assert_eq!(two.len(), 2);
}

/// A deliberately overlapping rule: accepts anything starting with `api`.
struct Greedy;

impl Rule for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        Ok(lookahead(tokens, 1)?[0].is_value(&TokenKind::Keyword, "api"))
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let token = ctx.consume()?;
        Ok(ctx.alloc(token, talon::Expr::IntLiteral { value: 0 }))
    }
}

/// Needs two tokens of lookahead to decide.
struct Pairwise;

impl Rule for Pairwise {
    fn name(&self) -> &'static str {
        "pairwise"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        let window = lookahead(tokens, 2)?;
        Ok(window[0].is(&TokenKind::Identifier) && window[1].is(&TokenKind::Identifier))
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let token = ctx.consume()?;
        ctx.consume()?;
        Ok(ctx.alloc(token, talon::Expr::IntLiteral { value: 2 }))
    }
}

#[test]
fn execute_reports_ambiguous_grammars() {
    let mut ctx = context("api A { }");
    let error = ctx
        .execute(&[&talon::parser::grammar::ApiRule, &Greedy])
        .unwrap_err();
    assert!(matches!(error.kind, ErrorKind::AmbiguousGrammar { .. }));
}

#[test]
fn execute_runs_to_the_end_of_input() {
    let mut ctx = context("a b c d");
    let nodes = ctx.execute(&[&Pairwise]).unwrap();
    assert_eq!(nodes.len(), 2);
}

#[test]
fn execute_reports_starved_triggers_as_out_of_tokens() {
    let mut ctx = context("a b c");
    let error = ctx.execute(&[&Pairwise]).unwrap_err();
    assert_eq!(error.kind, ErrorKind::OutOfTokens);
}
