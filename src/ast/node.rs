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

use std::fmt;

use serde::Serialize;

use crate::ast::expr::{Expr, NodeKind};
use crate::lexer::token::Token;
use crate::span::Span;

/// Stable handle of a node inside its `Ast` arena.
///
/// The handle is the node's structural identity: it is assigned once at
/// construction and survives in-place rewrites of the node's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Metadata a phase extension (or the program driver) attaches to a node.
///
/// A node holds at most one annotation per `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseAnnotation {
    pub name: String,

    /// The `@Name(...)` node that produced this annotation, if any.
    pub origin: Option<NodeId>,
}

impl PhaseAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: None,
        }
    }

    pub fn from_node(name: impl Into<String>, origin: NodeId) -> Self {
        Self {
            name: name.into(),
            origin: Some(origin),
        }
    }
}

/// One syntax node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,

    /// The token the node starts at; used for diagnostics.
    pub token: Token,

    pub annotations: Vec<PhaseAnnotation>,

    pub expr: Expr,
}

impl Node {
    pub fn span(&self) -> Span {
        self.token.span
    }

    pub fn kind(&self) -> NodeKind {
        self.expr.kind()
    }

    pub fn annotation(&self, name: &str) -> Option<&PhaseAnnotation> {
        self.annotations.iter().find(|a| a.name == name)
    }
}
