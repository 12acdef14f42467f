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

use crate::lexer::token::TokenKind;

pub const API: &str = "api";
pub const TYPE: &str = "type";
pub const WITHIN: &str = "within";
pub const WITH: &str = "with";
pub const DEFER: &str = "defer";
pub const RETURN: &str = "return";

/// The closed keyword set. Anything else lowercase-leading is an identifier.
pub const KEYWORDS: &[&str] = &[API, TYPE, WITHIN, WITH, DEFER, RETURN];

/// Determines whether a word is a **reserved keyword**.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// The built-in lexical categories in priority order.
///
/// Order is the disambiguation rule: the first category whose pattern matches
/// at the cursor wins. `Keyword` sits before `Identifier` so `api` is never an
/// identifier, `Real` sits before `Integer` so `3.5` is one token, and `Shelf`
/// sits before `Dot`. `Operator` must precede `Assign`; its pattern never
/// matches a lone `=`.
pub(crate) fn builtin_patterns() -> Vec<(TokenKind, String)> {
    vec![
        (TokenKind::Whitespace, r"\s+".to_string()),
        (TokenKind::Real, r"[0-9]+\.[0-9]+".to_string()),
        (TokenKind::Integer, r"[0-9]+".to_string()),
        (TokenKind::Keyword, format!(r"(?:{})\b", KEYWORDS.join("|"))),
        (TokenKind::Identifier, r"[a-z_][A-Za-z0-9_]*".to_string()),
        (
            TokenKind::TypeIdentifier,
            r"[A-Z][A-Za-z0-9_]*(?:::[A-Za-z_][A-Za-z0-9_]*)*".to_string(),
        ),
        (TokenKind::Colon, r":".to_string()),
        (TokenKind::Comma, r",".to_string()),
        (TokenKind::Shelf, r"\.\.\.".to_string()),
        (TokenKind::Dot, r"\.".to_string()),
        (TokenKind::LParen, r"\(".to_string()),
        (TokenKind::RParen, r"\)".to_string()),
        (TokenKind::LBracket, r"\[".to_string()),
        (TokenKind::RBracket, r"\]".to_string()),
        (TokenKind::LBrace, r"\{".to_string()),
        (TokenKind::RBrace, r"\}".to_string()),
        (
            TokenKind::Operator,
            r"[+\-*/%<>!&|^~?][+\-*/%<>!&|^~?=]*|==+".to_string(),
        ),
        (TokenKind::Assign, r"=".to_string()),
        (TokenKind::Annotation, r"@".to_string()),
    ]
}
