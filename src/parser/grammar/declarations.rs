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

use std::collections::BTreeMap;

use crate::ast::{Expr, NodeId, PhaseAnnotation};
use crate::error::{ErrorKind, ParseResult, TalonError};
use crate::extensions::Phase;
use crate::lexer::keywords::{API, TYPE, WITH, WITHIN};
use crate::lexer::token::{Token, TokenKind};
use crate::parser::combinators::{
    delimited, dispatch, parenthesized_list, starts_with, starts_with_keyword, starts_with_pair, Rule,
};
use crate::parser::context::ParseContext;
use crate::parser::grammar::{AnnotationRule, BlockRule, IdentifierRule, PairRule, TypeIdentifierRule};

/// Name given to the constructor synthesized for every type with
/// properties.
pub const CONSTRUCTOR_NAME: &str = "__init__";

/// `(Receiver) name (params) (Return)`
///
/// - `(Type)` makes a static signature; `(self Type)` an instance signature
///   whose receiver pair is also the first parameter. The receiver slot holds
///   its own copy of the type.
/// - The name is an identifier or an operator symbol.
/// - The return clause is optional, and `()` means "returns nothing".
pub struct SignatureRule;

impl Rule for SignatureRule {
    fn name(&self) -> &'static str {
        "signature"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_pair(
            tokens,
            &TokenKind::LParen,
            &[TokenKind::TypeIdentifier, TokenKind::Identifier, TokenKind::LBracket],
        )
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let open = ctx.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();

        let (receiver, is_static) = if ctx.check(&TokenKind::Identifier) {
            let start = ctx.start_token();
            let name = IdentifierRule.parse(ctx)?;
            let ty = TypeIdentifierRule.parse(ctx)?;
            params.push(ctx.alloc(start, Expr::Pair { name, ty }));
            (ctx.ast_mut().duplicate(ty)?, false)
        } else {
            (TypeIdentifierRule.parse(ctx)?, true)
        };
        ctx.expect(&TokenKind::RParen)?;

        let name_token = ctx.expect_any(&[TokenKind::Identifier, TokenKind::Operator], true)?;
        let value = name_token.value.clone();
        let name = ctx.alloc(name_token, Expr::Identifier { value });

        params.extend(parenthesized_list(
            ctx,
            &TokenKind::LParen,
            &TokenKind::RParen,
            |c: &mut ParseContext| PairRule.parse(c),
            &TokenKind::Comma,
        )?);

        let return_type = if ctx.check(&TokenKind::LParen) {
            ctx.consume()?;
            if ctx.check(&TokenKind::RParen) {
                ctx.consume()?;
                None
            } else {
                let ty = TypeIdentifierRule.parse(ctx)?;
                ctx.expect(&TokenKind::RParen)?;
                Some(ty)
            }
        } else {
            None
        };

        Ok(ctx.alloc(
            open,
            Expr::Signature {
                name,
                receiver,
                params,
                return_type,
                is_static,
            },
        ))
    }
}

/// A signature followed by its block.
pub struct MethodRule;

impl Rule for MethodRule {
    fn name(&self) -> &'static str {
        "method"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        SignatureRule.trigger(tokens)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let start = ctx.start_token();
        let signature = SignatureRule.parse(ctx)?;
        let body = BlockRule.parse(ctx)?;

        Ok(ctx.alloc(start, Expr::Method { signature, body }))
    }
}

/// `type Name (prop Type, ...)? (with Trait, ...)?`
///
/// The property list may be missing entirely; a parenthesised group that
/// turns out to open a method signature is left for the method.
///
/// A type with properties gets a static `__init__` signature taking copies
/// of the properties in order and returning the type.
pub struct TypeDefRule;

impl TypeDefRule {
    /// `(Name) __init__ (properties...) (Name)`
    fn constructor(ctx: &mut ParseContext, name: NodeId, properties: &[NodeId]) -> ParseResult<NodeId> {
        let token = ctx.ast().node(name)?.token.clone();

        let receiver = ctx.ast_mut().duplicate(name)?;
        let return_type = ctx.ast_mut().duplicate(name)?;
        let init = ctx.alloc(
            token.clone(),
            Expr::Identifier {
                value: CONSTRUCTOR_NAME.to_string(),
            },
        );
        let params = properties
            .iter()
            .map(|property| ctx.ast_mut().duplicate(*property))
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(ctx.alloc(
            token,
            Expr::Signature {
                name: init,
                receiver,
                params,
                return_type: Some(return_type),
                is_static: true,
            },
        ))
    }
}

impl Rule for TypeDefRule {
    fn name(&self) -> &'static str {
        "type declaration"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_keyword(tokens, TYPE)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let keyword = ctx.expect_keyword(TYPE)?;
        let name = TypeIdentifierRule::named(ctx)?;

        let checkpoint = ctx.checkpoint();
        let properties = ctx.attempt(|c: &mut ParseContext| {
            parenthesized_list(
                c,
                &TokenKind::LParen,
                &TokenKind::RParen,
                |c: &mut ParseContext| PairRule.parse(c),
                &TokenKind::Comma,
            )
        });

        // `type Marker` followed by `(self Point) name ...`: the group opens
        // the next method's signature.
        let properties = match properties {
            Some(_) if ctx.check(&TokenKind::Identifier) || ctx.check(&TokenKind::Operator) => {
                ctx.restore(checkpoint);
                Vec::new()
            }
            Some(properties) => properties,
            None => Vec::new(),
        };

        let mut property_order = BTreeMap::new();
        for (index, property) in properties.iter().enumerate() {
            if let Expr::Pair { name, .. } = ctx.ast().expr(*property)? {
                if let Expr::Identifier { value } = ctx.ast().expr(*name)? {
                    property_order.entry(value.clone()).or_insert(index);
                }
            }
        }

        let constructor = if properties.is_empty() {
            None
        } else {
            Some(Self::constructor(ctx, name, &properties)?)
        };

        let traits = if ctx.check_keyword(WITH) {
            ctx.consume()?;
            delimited(ctx, TypeIdentifierRule::named, &TokenKind::Comma)?
        } else {
            Vec::new()
        };

        Ok(ctx.alloc(
            keyword,
            Expr::TypeDef {
                name,
                properties,
                property_order,
                constructor,
                traits,
            },
        ))
    }
}

/// `within Base`
pub struct WithinRule;

impl Rule for WithinRule {
    fn name(&self) -> &'static str {
        "within clause"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_keyword(tokens, WITHIN)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let keyword = ctx.expect_keyword(WITHIN)?;
        let api = TypeIdentifierRule::named(ctx)?;
        Ok(ctx.alloc(keyword, Expr::Within { api }))
    }
}

/// `with A with B ...`, one or more clauses.
pub struct WithRule;

impl Rule for WithRule {
    fn name(&self) -> &'static str {
        "with clause"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_keyword(tokens, WITH)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let keyword = ctx.expect_keyword(WITH)?;
        let mut apis = vec![TypeIdentifierRule::named(ctx)?];

        while ctx.check_keyword(WITH) {
            ctx.consume()?;
            apis.push(TypeIdentifierRule::named(ctx)?);
        }

        Ok(ctx.alloc(keyword, Expr::With { apis }))
    }
}

/// `api Name (within Base)? (with Other)* { declarations }`
pub struct ApiRule;

impl ApiRule {
    fn declaration(ctx: &mut ParseContext) -> ParseResult<NodeId> {
        dispatch(
            ctx,
            &[&TypeDefRule, &MethodRule, &AnnotationRule],
            "type, method or annotation",
        )
    }
}

impl Rule for ApiRule {
    fn name(&self) -> &'static str {
        "api declaration"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        starts_with_keyword(tokens, API)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let keyword = ctx.expect_keyword(API)?;
        let name = TypeIdentifierRule::named(ctx)?;

        let within = ctx.attempt_rule(&WithinRule);
        let with = ctx.attempt_rule(&WithRule);

        let open = ctx.expect(&TokenKind::LBrace)?;
        let opened = open.span;

        let body = ctx.in_phase(Phase::Declaration, |ctx| {
            let mut body = Vec::new();
            loop {
                if !ctx.has_more() {
                    return Err(TalonError::new(ErrorKind::UnclosedBlock { opened }).at(opened));
                }
                if ctx.check(&TokenKind::RBrace) {
                    ctx.consume()?;
                    return Ok(body);
                }
                body.push(Self::declaration(ctx)?);
            }
        })?;

        Ok(ctx.alloc(
            keyword,
            Expr::Api {
                name,
                within,
                with,
                body,
            },
        ))
    }
}

/// A whole source file: API declarations and program-level annotations in
/// any order.
///
/// Each program annotation is also attached to the program node, once per
/// annotation name.
pub struct ProgramRule;

impl Rule for ProgramRule {
    fn name(&self) -> &'static str {
        "program"
    }

    fn trigger(&self, tokens: &[Token]) -> ParseResult<bool> {
        Ok(starts_with(tokens, &TokenKind::Annotation)? || starts_with_keyword(tokens, API)?)
    }

    fn parse(&self, ctx: &mut ParseContext) -> ParseResult<NodeId> {
        let start = ctx.start_token();
        let nodes = ctx.in_phase(Phase::Program, |ctx| ctx.execute(&[&AnnotationRule, &ApiRule]))?;

        let mut apis = Vec::new();
        let mut annotations = Vec::new();
        for node in nodes {
            match ctx.ast().expr(node)? {
                Expr::Annotation { .. } => annotations.push(node),
                _ => apis.push(node),
            }
        }

        let program = ctx.alloc(
            start,
            Expr::Program {
                apis,
                annotations: annotations.clone(),
            },
        );

        for annotation in annotations {
            if let Expr::Annotation { name, .. } = ctx.ast().expr(annotation)? {
                let attached = PhaseAnnotation::from_node(name.clone(), annotation);
                ctx.ast_mut().annotate(program, attached)?;
            }
        }

        Ok(program)
    }
}
