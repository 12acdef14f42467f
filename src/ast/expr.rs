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
use std::fmt;

use serde::Serialize;

use crate::ast::node::NodeId;

/// Every kind of syntax node.
///
/// Children are referenced by `NodeId` into the owning `Ast`, so a rewrite
/// of one node never has to rebuild its ancestors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr {
    /// `value`
    Identifier { value: String },

    /// `Int`, `Geometry::Point`. Qualified names hold their mangled form.
    TypeIdentifier { value: String, fully_qualified: bool },

    /// `[Int]`, `[[Point]]`
    ListType { element: NodeId },

    /// `x Int`
    Pair { name: NodeId, ty: NodeId },

    IntLiteral { value: i64 },

    RealLiteral { value: f64 },

    /// `[1, 2, 3]`
    ListLiteral { elements: Vec<NodeId> },

    /// `Point(1, 2)`
    ConstructorCall { receiver: NodeId, args: Vec<NodeId> },

    /// `Math.max(1, 2)`
    StaticCall {
        receiver: NodeId,
        method: NodeId,
        args: Vec<NodeId>,
    },

    /// `point.scale(2)`; the receiver may itself be a call.
    InstanceCall {
        receiver: NodeId,
        method: NodeId,
        args: Vec<NodeId>,
    },

    /// `-x`
    Unary { operator: String, operand: NodeId },

    /// `a + b`. Parenthesized binaries are grouping boundaries and are never
    /// rotated by the precedence resolver.
    Binary {
        operator: String,
        left: NodeId,
        right: NodeId,
        parenthesized: bool,
    },

    /// `x Int = 5`, `x = 5`
    Assignment {
        name: NodeId,
        ty: Option<NodeId>,
        value: NodeId,
    },

    /// `return x`
    Return { value: NodeId },

    /// `defer { ... }`
    Defer { block: NodeId },

    /// `{ statements... return x }`
    Block { body: Vec<NodeId>, ret: Option<NodeId> },

    /// `(Receiver) name (params) (Return)` or `(self Receiver) name ...`.
    ///
    /// `receiver` is always the receiver's type. For instance signatures the
    /// named receiver pair is prepended to `params`.
    Signature {
        name: NodeId,
        receiver: NodeId,
        params: Vec<NodeId>,
        return_type: Option<NodeId>,
        is_static: bool,
    },

    /// A signature followed by a block.
    Method { signature: NodeId, body: NodeId },

    /// `type Point (x Int, y Int) with Printable`
    TypeDef {
        name: NodeId,
        properties: Vec<NodeId>,
        property_order: BTreeMap<String, usize>,
        constructor: Option<NodeId>,
        traits: Vec<NodeId>,
    },

    /// `within Base`
    Within { api: NodeId },

    /// `with A with B`
    With { apis: Vec<NodeId> },

    /// `@Operator.Infix(...)`
    Annotation { name: String, parameters: Vec<NodeId> },

    /// `api Name within? with* { ... }`
    Api {
        name: NodeId,
        within: Option<NodeId>,
        with: Option<NodeId>,
        body: Vec<NodeId>,
    },

    /// The root of a parsed source file.
    Program {
        apis: Vec<NodeId>,
        annotations: Vec<NodeId>,
    },
}

/// The field-less discriminant of `Expr`.
///
/// Extensions declare their parameter lists in terms of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Identifier,
    TypeIdentifier,
    ListType,
    Pair,
    IntLiteral,
    RealLiteral,
    ListLiteral,
    ConstructorCall,
    StaticCall,
    InstanceCall,
    Unary,
    Binary,
    Assignment,
    Return,
    Defer,
    Block,
    Signature,
    Method,
    TypeDef,
    Within,
    With,
    Annotation,
    Api,
    Program,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Identifier { .. } => NodeKind::Identifier,
            Expr::TypeIdentifier { .. } => NodeKind::TypeIdentifier,
            Expr::ListType { .. } => NodeKind::ListType,
            Expr::Pair { .. } => NodeKind::Pair,
            Expr::IntLiteral { .. } => NodeKind::IntLiteral,
            Expr::RealLiteral { .. } => NodeKind::RealLiteral,
            Expr::ListLiteral { .. } => NodeKind::ListLiteral,
            Expr::ConstructorCall { .. } => NodeKind::ConstructorCall,
            Expr::StaticCall { .. } => NodeKind::StaticCall,
            Expr::InstanceCall { .. } => NodeKind::InstanceCall,
            Expr::Unary { .. } => NodeKind::Unary,
            Expr::Binary { .. } => NodeKind::Binary,
            Expr::Assignment { .. } => NodeKind::Assignment,
            Expr::Return { .. } => NodeKind::Return,
            Expr::Defer { .. } => NodeKind::Defer,
            Expr::Block { .. } => NodeKind::Block,
            Expr::Signature { .. } => NodeKind::Signature,
            Expr::Method { .. } => NodeKind::Method,
            Expr::TypeDef { .. } => NodeKind::TypeDef,
            Expr::Within { .. } => NodeKind::Within,
            Expr::With { .. } => NodeKind::With,
            Expr::Annotation { .. } => NodeKind::Annotation,
            Expr::Api { .. } => NodeKind::Api,
            Expr::Program { .. } => NodeKind::Program,
        }
    }

    /// Child handles in source order. Mirrors `children_mut`.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Expr::Identifier { .. }
            | Expr::TypeIdentifier { .. }
            | Expr::IntLiteral { .. }
            | Expr::RealLiteral { .. } => Vec::new(),

            Expr::ListType { element } => vec![*element],
            Expr::Pair { name, ty } => vec![*name, *ty],
            Expr::ListLiteral { elements } => elements.clone(),
            Expr::ConstructorCall { receiver, args } => {
                std::iter::once(*receiver).chain(args.iter().copied()).collect()
            }
            Expr::StaticCall {
                receiver,
                method,
                args,
            }
            | Expr::InstanceCall {
                receiver,
                method,
                args,
            } => [*receiver, *method]
                .into_iter()
                .chain(args.iter().copied())
                .collect(),
            Expr::Unary { operand, .. } => vec![*operand],
            Expr::Binary { left, right, .. } => vec![*left, *right],
            Expr::Assignment { name, ty, value } => std::iter::once(*name)
                .chain(*ty)
                .chain(std::iter::once(*value))
                .collect(),
            Expr::Return { value } => vec![*value],
            Expr::Defer { block } => vec![*block],
            Expr::Block { body, ret } => body.iter().copied().chain(*ret).collect(),
            Expr::Signature {
                name,
                receiver,
                params,
                return_type,
                ..
            } => [*receiver, *name]
                .into_iter()
                .chain(params.iter().copied())
                .chain(*return_type)
                .collect(),
            Expr::Method { signature, body } => vec![*signature, *body],
            Expr::TypeDef {
                name,
                properties,
                constructor,
                traits,
                ..
            } => std::iter::once(*name)
                .chain(properties.iter().copied())
                .chain(*constructor)
                .chain(traits.iter().copied())
                .collect(),
            Expr::Within { api } => vec![*api],
            Expr::With { apis } => apis.clone(),
            Expr::Annotation { parameters, .. } => parameters.clone(),
            Expr::Api {
                name,
                within,
                with,
                body,
            } => std::iter::once(*name)
                .chain(*within)
                .chain(*with)
                .chain(body.iter().copied())
                .collect(),
            Expr::Program { apis, annotations } => {
                annotations.iter().copied().chain(apis.iter().copied()).collect()
            }
        }
    }

    pub fn has_child(&self, id: NodeId) -> bool {
        self.children().contains(&id)
    }

    /// Mutable child slots in source order; the rewrite primitive.
    pub fn children_mut(&mut self) -> Vec<&mut NodeId> {
        match self {
            Expr::Identifier { .. }
            | Expr::TypeIdentifier { .. }
            | Expr::IntLiteral { .. }
            | Expr::RealLiteral { .. } => Vec::new(),

            Expr::ListType { element } => vec![element],
            Expr::Pair { name, ty } => vec![name, ty],
            Expr::ListLiteral { elements } => elements.iter_mut().collect(),
            Expr::ConstructorCall { receiver, args } => {
                std::iter::once(receiver).chain(args.iter_mut()).collect()
            }
            Expr::StaticCall {
                receiver,
                method,
                args,
            }
            | Expr::InstanceCall {
                receiver,
                method,
                args,
            } => [receiver, method]
                .into_iter()
                .chain(args.iter_mut())
                .collect(),
            Expr::Unary { operand, .. } => vec![operand],
            Expr::Binary { left, right, .. } => vec![left, right],
            Expr::Assignment { name, ty, value } => std::iter::once(name)
                .chain(ty.as_mut())
                .chain(std::iter::once(value))
                .collect(),
            Expr::Return { value } => vec![value],
            Expr::Defer { block } => vec![block],
            Expr::Block { body, ret } => body.iter_mut().chain(ret.as_mut()).collect(),
            Expr::Signature {
                name,
                receiver,
                params,
                return_type,
                ..
            } => [receiver, name]
                .into_iter()
                .chain(params.iter_mut())
                .chain(return_type.as_mut())
                .collect(),
            Expr::Method { signature, body } => vec![signature, body],
            Expr::TypeDef {
                name,
                properties,
                constructor,
                traits,
                ..
            } => std::iter::once(name)
                .chain(properties.iter_mut())
                .chain(constructor.as_mut())
                .chain(traits.iter_mut())
                .collect(),
            Expr::Within { api } => vec![api],
            Expr::With { apis } => apis.iter_mut().collect(),
            Expr::Annotation { parameters, .. } => parameters.iter_mut().collect(),
            Expr::Api {
                name,
                within,
                with,
                body,
            } => std::iter::once(name)
                .chain(within.as_mut())
                .chain(with.as_mut())
                .chain(body.iter_mut())
                .collect(),
            Expr::Program { apis, annotations } => {
                annotations.iter_mut().chain(apis.iter_mut()).collect()
            }
        }
    }
}
