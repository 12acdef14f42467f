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

/// Token and category definitions.
pub mod token;

/// Keywords and the built-in category table.
pub mod keywords;

/// The regex-driven, runtime-extensible tokenizer.
pub mod lexer;

pub use lexer::{LexicalCategory, Tokenizer};
pub use token::{Token, TokenKind};

use crate::error::ParseResult;

/// Tokenizes `source` with the built-in categories.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    Tokenizer::new().tokenize(source)
}
