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

/// Node kinds and their child layout.
pub mod expr;

/// Node identity, node metadata and phase annotations.
pub mod node;

pub use expr::{Expr, NodeKind};
pub use node::{Node, NodeId, PhaseAnnotation};

use std::ops::Index;

use serde::Serialize;

use crate::error::{ErrorKind, ParseResult, TalonError};
use crate::lexer::token::Token;

/// The arena every syntax node lives in.
///
/// Nodes are addressed by `NodeId` and never move or disappear. Rewriting a
/// subtree means pointing one child slot at a different node
/// (`replace_child`) or overwriting a slot's contents in place (`replace`).
/// Nodes built by a parse attempt that was later abandoned stay in the arena
/// unreferenced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a node and returns its identity.
    pub fn alloc(&mut self, token: Token, expr: Expr) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            token,
            annotations: Vec::new(),
            expr,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Like `get`, failing with `UnknownNode` for a foreign handle.
    pub fn node(&self, id: NodeId) -> ParseResult<&Node> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| TalonError::new(ErrorKind::UnknownNode { id }))
    }

    pub fn node_mut(&mut self, id: NodeId) -> ParseResult<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or_else(|| TalonError::new(ErrorKind::UnknownNode { id }))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn expr(&self, id: NodeId) -> ParseResult<&Expr> {
        Ok(&self.node(id)?.expr)
    }

    pub fn kind(&self, id: NodeId) -> ParseResult<NodeKind> {
        Ok(self.node(id)?.kind())
    }

    /// Direct children of a node, in source order.
    pub fn children(&self, id: NodeId) -> ParseResult<Vec<NodeId>> {
        Ok(self.node(id)?.expr.children())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Attaches a phase annotation to a node.
    ///
    /// Annotations are keyed by name: attaching a name the node already
    /// carries changes nothing. Returns whether the annotation was new.
    pub fn annotate(&mut self, id: NodeId, annotation: PhaseAnnotation) -> ParseResult<bool> {
        let node = self.node_mut(id)?;

        if node.annotation(&annotation.name).is_some() {
            return Ok(false);
        }

        node.annotations.push(annotation);
        Ok(true)
    }

    /// Points the child slot of `parent` that holds `target` at `replacement`.
    ///
    /// # Errors
    /// - `UnknownNode` if any handle is foreign to this arena.
    /// - `ChildRewrite` unless exactly one child slot holds `target`.
    pub fn replace_child(&mut self, parent: NodeId, target: NodeId, replacement: NodeId) -> ParseResult<()> {
        self.node(replacement)?;
        self.node(target)?;

        let node = self.node_mut(parent)?;
        let span = node.token.span;
        let mut slots: Vec<&mut NodeId> = node
            .expr
            .children_mut()
            .into_iter()
            .filter(|slot| **slot == target)
            .collect();

        if slots.len() != 1 {
            return Err(TalonError::new(ErrorKind::ChildRewrite {
                parent,
                target,
                matches: slots.len(),
            })
            .at(span));
        }

        *slots[0] = replacement;
        log::trace!("node {parent}: child {target} replaced by {replacement}");
        Ok(())
    }

    /// Overwrites the contents of a node, keeping its identity, token and
    /// annotations. Returns the previous contents.
    pub fn replace(&mut self, id: NodeId, expr: Expr) -> ParseResult<Expr> {
        let node = self.node_mut(id)?;
        Ok(std::mem::replace(&mut node.expr, expr))
    }

    /// The node that lists `id` as a child, if any.
    ///
    /// # Errors
    /// - `SharedNode` if more than one node lists `id`; the arena is no
    ///   longer a tree.
    pub fn find_parent(&self, id: NodeId) -> ParseResult<Option<NodeId>> {
        let parents: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|node| node.expr.has_child(id))
            .map(|node| node.id)
            .collect();

        match parents.as_slice() {
            [] => Ok(None),
            [parent] => Ok(Some(*parent)),
            _ => Err(TalonError::new(ErrorKind::SharedNode {
                id,
                parents: parents.len(),
            })),
        }
    }

    /// Allocates a copy of the subtree rooted at `id` and returns the copy's
    /// root. Annotations are not copied.
    pub fn duplicate(&mut self, id: NodeId) -> ParseResult<NodeId> {
        let node = self.node(id)?;
        let token = node.token.clone();
        let mut expr = node.expr.clone();

        for slot in expr.children_mut() {
            *slot = self.duplicate(*slot)?;
        }

        Ok(self.alloc(token, expr))
    }

    /// The whole arena as pretty-printed JSON, for debugging dumps.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
