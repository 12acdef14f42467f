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

/// The operator extensions every registry starts with.
pub mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::ast::{Ast, Expr, NodeId, NodeKind, PhaseAnnotation};
use crate::error::{ErrorKind, ParseResult, TalonError};
use crate::lexer::token::Token;
use crate::operators::{Fixity, OperatorTable, Precedence};
use crate::span::Span;

/// The grammar level an annotation was encountered at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// Top level, between API declarations.
    Program,
    /// Inside an API body, next to types and methods.
    Declaration,
    /// Inside a method or defer block.
    Statement,
}

/// A named plugin that runs while parsing, whenever `@Name(...)` is seen.
///
/// Extensions observe and reshape the syntax tree, and may grow the operator
/// table so that later source text parses differently.
pub trait PhaseExtension {
    /// The qualified name annotations refer to, e.g. `Operator.Infix`.
    fn name(&self) -> &str;

    /// The node kinds the annotation's arguments must have, in order.
    fn parameters(&self) -> &[NodeKind];

    fn invoke(&self, ctx: &mut PhaseContext<'_>, parameters: &[NodeId]) -> ParseResult<()>;
}

type ExtensionFn = dyn for<'a, 'b> Fn(&'a mut PhaseContext<'b>, &[NodeId]) -> ParseResult<()>;

/// A `PhaseExtension` assembled from a closure.
pub struct FnExtension {
    name: String,
    parameters: Vec<NodeKind>,
    body: Box<ExtensionFn>,
}

impl FnExtension {
    pub fn new(
        name: &str,
        parameters: Vec<NodeKind>,
        body: impl Fn(&mut PhaseContext<'_>, &[NodeId]) -> ParseResult<()> + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            parameters,
            body: Box::new(body),
        }
    }
}

impl PhaseExtension for FnExtension {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[NodeKind] {
        &self.parameters
    }

    fn invoke(&self, ctx: &mut PhaseContext<'_>, parameters: &[NodeId]) -> ParseResult<()> {
        (self.body)(ctx, parameters)
    }
}

/// Extensions by name.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<String, Rc<dyn PhaseExtension>>,
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.extensions.keys().collect();
        names.sort();
        f.debug_struct("ExtensionRegistry")
            .field("extensions", &names)
            .finish()
    }
}

impl ExtensionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `Operator.Infix`, `Operator.Prefix` and
    /// `Operator.Binds`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for extension in builtin::operator_extensions() {
            let name = extension.name().to_string();
            registry.extensions.insert(name, extension);
        }
        registry
    }

    /// # Errors
    /// `DuplicateExtension` if the name is taken.
    pub fn register(&mut self, extension: impl PhaseExtension + 'static) -> ParseResult<()> {
        let name = extension.name().to_string();

        if self.extensions.contains_key(&name) {
            return Err(TalonError::new(ErrorKind::DuplicateExtension { name }));
        }

        log::debug!("registered extension `{name}`");
        self.extensions.insert(name, Rc::new(extension));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn PhaseExtension>> {
        self.extensions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Everything an extension may touch while it runs.
///
/// The arena is readable in full; mutation goes through the rewrite
/// operations below, so node identity is preserved.
pub struct PhaseContext<'a> {
    phase: Phase,
    site: NodeId,
    ast: &'a mut Ast,
    operators: &'a mut OperatorTable,
}

impl<'a> PhaseContext<'a> {
    pub fn new(phase: Phase, site: NodeId, ast: &'a mut Ast, operators: &'a mut OperatorTable) -> Self {
        Self {
            phase,
            site,
            ast,
            operators,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The annotation node that triggered this invocation.
    pub fn site(&self) -> NodeId {
        self.site
    }

    /// Source position of the annotation.
    pub fn span(&self) -> Span {
        self.ast
            .get(self.site)
            .map(|node| node.span())
            .unwrap_or_default()
    }

    pub fn ast(&self) -> &Ast {
        &*self.ast
    }

    pub fn operators(&self) -> &OperatorTable {
        &*self.operators
    }

    pub fn declare_operator(&mut self, symbol: &str, fixity: Fixity) -> ParseResult<()> {
        let span = self.span();
        self.operators
            .declare(symbol, fixity)
            .map_err(|e| e.at(span))
    }

    pub fn relate_operators(&mut self, left: &str, right: &str, precedence: Precedence) -> ParseResult<()> {
        let span = self.span();
        self.operators
            .relate(left, right, precedence)
            .map_err(|e| e.at(span))
    }

    pub fn replace_child(&mut self, parent: NodeId, target: NodeId, replacement: NodeId) -> ParseResult<()> {
        self.ast.replace_child(parent, target, replacement)
    }

    pub fn replace_node(&mut self, id: NodeId, expr: Expr) -> ParseResult<Expr> {
        self.ast.replace(id, expr)
    }

    pub fn annotate(&mut self, id: NodeId, annotation: PhaseAnnotation) -> ParseResult<bool> {
        self.ast.annotate(id, annotation)
    }

    pub fn alloc(&mut self, token: Token, expr: Expr) -> NodeId {
        self.ast.alloc(token, expr)
    }

    /// The name a signature declares: an identifier or an operator symbol.
    pub fn signature_name(&self, signature: NodeId) -> ParseResult<String> {
        let name = match self.ast.expr(signature)? {
            Expr::Signature { name, .. } => *name,
            _ => {
                let kind = self.ast.kind(signature)?;
                return Err(TalonError::new(ErrorKind::ExtensionParameterMismatch {
                    name: "signature".to_string(),
                    expected: NodeKind::Signature.to_string(),
                    found: kind.to_string(),
                })
                .at(self.span()));
            }
        };

        match self.ast.expr(name)? {
            Expr::Identifier { value } => Ok(value.clone()),
            _ => Ok(self.ast.node(name)?.token.value.clone()),
        }
    }
}
