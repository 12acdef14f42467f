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

//! Parsing front end for the Talon API description language.
//!
//! Source text goes through the [`lexer`] into tokens, the [`parser`] turns
//! tokens into nodes of an [`ast::Ast`] arena, the [`operators`] resolver
//! shapes binary expressions from pairwise precedence facts, and
//! [`extensions`] run while parsing whenever an `@Annotation` is seen.
//!
//! ```no_run
//! let program = talon::parse("api Shapes { type Point (x Int, y Int) }")?;
//! println!("{}", program.ast.to_json_pretty().unwrap_or_default());
//! # Ok::<(), talon::TalonError>(())
//! ```

/// Source positions.
pub mod span;

/// Error kinds, codes and the shared result type.
pub mod error;

/// Caret-style rendering of errors against their source.
pub mod diagnostics;

/// Parser configuration.
pub mod config;

/// Qualified-name mangling policy.
pub mod mangle;

/// Tokens, lexical categories and the tokenizer.
pub mod lexer;

/// The node arena.
pub mod ast;

/// The operator table and the precedence resolver.
pub mod operators;

/// Phase extensions run by annotations.
pub mod extensions;

/// Parse context, combinators and grammar rules.
pub mod parser;

pub use ast::{Ast, Expr, Node, NodeId, NodeKind, PhaseAnnotation};
pub use config::ParserConfig;
pub use diagnostics::DiagnosticPrinter;
pub use error::{ErrorKind, ParseResult, TalonError};
pub use extensions::{ExtensionRegistry, FnExtension, Phase, PhaseContext, PhaseExtension};
pub use lexer::{tokenize, LexicalCategory, Token, TokenKind, Tokenizer};
pub use mangle::{DefaultMangler, NameMangler};
pub use operators::{Fixity, Operator, OperatorTable, Precedence};
pub use parser::{parse, parse_expression, parse_type, ParseContext, Program};
pub use span::Span;
