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

/// The parse context:
/// - Owns the token stream, cursor, arena and registries
/// - Checkpoints, `attempt`, `attempt_any` and the top-level `execute` loop
pub mod context;

/// Cursor helpers (`peek`, `consume`, `expect`, `rewind`, ...), implemented
/// on `ParseContext`.
pub mod helpers;

/// The `Parser` and `Rule` traits and the combinators built on them.
pub mod combinators;

/// Grammar productions, one `Rule` per construct.
pub mod grammar;

pub use combinators::{Parser, Rule};
pub use context::{Checkpoint, ParseContext};

use serde::Serialize;

use crate::ast::{Ast, NodeId};
use crate::error::{ParseResult, TalonError};
use crate::lexer::tokenize;
use crate::operators::OperatorTable;
use self::grammar::{ExpressionRule, ProgramRule, TypeIdentifierRule};

/// A successfully parsed source file.
#[derive(Debug, Clone, Serialize)]
pub struct Program {
    pub ast: Ast,

    /// The `Program` node.
    pub root: NodeId,

    /// Built-in operators plus everything the source declared.
    pub operators: OperatorTable,
}

impl ParseContext {
    /// Parses every remaining token as a program.
    pub fn parse_program(&mut self) -> ParseResult<NodeId> {
        ProgramRule.parse(self)
    }

    /// Parses one expression and requires the input to end after it.
    pub fn parse_expression(&mut self) -> ParseResult<NodeId> {
        let node = ExpressionRule.parse(self)?;
        self.expect_end()?;
        Ok(node)
    }

    /// Parses one type and requires the input to end after it.
    pub fn parse_type(&mut self) -> ParseResult<NodeId> {
        let node = TypeIdentifierRule.parse(self)?;
        self.expect_end()?;
        Ok(node)
    }

    fn expect_end(&self) -> ParseResult<()> {
        match self.peek() {
            Ok(token) => Err(TalonError::unexpected(token, "end of input")),
            Err(_) => Ok(()),
        }
    }

    /// Finishes a program parse.
    pub fn into_program(self, root: NodeId) -> Program {
        let (ast, operators) = self.into_parts();
        Program { ast, root, operators }
    }
}

/// Tokenizes and parses a whole source file with the default registries and
/// configuration.
pub fn parse(source: &str) -> ParseResult<Program> {
    let mut ctx = ParseContext::new(tokenize(source)?);
    let root = ctx.parse_program()?;
    Ok(ctx.into_program(root))
}

/// Parses a standalone expression; returns the arena and its root.
pub fn parse_expression(source: &str) -> ParseResult<(Ast, NodeId)> {
    let mut ctx = ParseContext::new(tokenize(source)?);
    let root = ctx.parse_expression()?;
    Ok((ctx.into_ast(), root))
}

/// Parses a standalone type such as `[[Geo::Point]]`.
pub fn parse_type(source: &str) -> ParseResult<(Ast, NodeId)> {
    let mut ctx = ParseContext::new(tokenize(source)?);
    let root = ctx.parse_type()?;
    Ok((ctx.into_ast(), root))
}
