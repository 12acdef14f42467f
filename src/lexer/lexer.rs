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

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ErrorKind, ParseResult, TalonError};
use crate::lexer::keywords::builtin_patterns;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The built-in categories, compiled once per process and cloned into every
/// tokenizer (`Regex` clones share the compiled program).
static BUILTIN_CATEGORIES: Lazy<Vec<LexicalCategory>> = Lazy::new(|| {
    builtin_patterns()
        .into_iter()
        .map(|(kind, pattern)| {
            let category = LexicalCategory::new(kind, &pattern)
                .expect("built-in lexical patterns are valid regular expressions");
            if category.kind == TokenKind::Whitespace {
                category.discarded()
            } else {
                category
            }
        })
        .collect()
});

/// Longest fragment quoted back to the user in a `LexicalError`.
const FRAGMENT_LIMIT: usize = 16;

/// A named lexical category and the pattern that recognises it.
#[derive(Debug, Clone)]
pub struct LexicalCategory {
    kind: TokenKind,
    source: String,
    pattern: Regex,
    discarded: bool,
}

impl LexicalCategory {
    /// Compiles `pattern` anchored at the current input position.
    pub fn new(kind: TokenKind, pattern: &str) -> ParseResult<Self> {
        let anchored = Regex::new(&format!("^(?:{pattern})")).map_err(|e| {
            TalonError::new(ErrorKind::InvalidPattern {
                name: kind.name().to_string(),
                reason: e.to_string(),
            })
        })?;

        Ok(Self {
            kind,
            source: pattern.to_string(),
            pattern: anchored,
            discarded: false,
        })
    }

    /// Matches of this category advance the position but produce no token.
    pub fn discarded(mut self) -> Self {
        self.discarded = true;
        self
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The pattern as it was written, without the anchoring wrapper.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Byte length of the match at the start of `input`. Empty matches do
    /// not count: they would never advance the cursor.
    fn match_len(&self, input: &str) -> Option<usize> {
        self.pattern
            .find(input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

/// Converts source text into an ordered sequence of tokens.
///
/// The tokenizer holds an ordered list of categories; the order is the
/// priority used to disambiguate overlapping patterns. Categories can be
/// added at runtime (`insert_before`, `insert_at`, `push`), which is how
/// extensions teach the front end new lexical forms.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    categories: Vec<LexicalCategory>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// A tokenizer with every built-in category.
    pub fn new() -> Self {
        Self {
            categories: BUILTIN_CATEGORIES.clone(),
        }
    }

    /// A tokenizer that recognises nothing until categories are added.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[LexicalCategory] {
        &self.categories
    }

    pub fn position_of(&self, kind: &TokenKind) -> Option<usize> {
        self.categories.iter().position(|c| &c.kind == kind)
    }

    /// Appends a category with the lowest priority.
    pub fn push(&mut self, category: LexicalCategory) -> ParseResult<()> {
        let index = self.categories.len();
        self.insert_at(category, index)
    }

    /// Inserts a category at `index` (clamped to the end of the list).
    ///
    /// # Errors
    /// `DuplicateLexicalCategory` if a category with the same name exists.
    pub fn insert_at(&mut self, category: LexicalCategory, index: usize) -> ParseResult<()> {
        self.ensure_unique(&category)?;

        let index = index.min(self.categories.len());
        log::debug!("lexical category `{}` inserted at {}", category.kind, index);
        self.categories.insert(index, category);
        Ok(())
    }

    /// Inserts a category directly ahead of `anchor`, giving it priority
    /// over the anchor.
    ///
    /// # Errors
    /// - `DuplicateLexicalCategory` if the new category's name exists.
    /// - `UnknownLexicalCategory` if `anchor` is not registered.
    pub fn insert_before(&mut self, category: LexicalCategory, anchor: &TokenKind) -> ParseResult<()> {
        self.ensure_unique(&category)?;

        let index = self.position_of(anchor).ok_or_else(|| {
            TalonError::new(ErrorKind::UnknownLexicalCategory {
                name: anchor.name().to_string(),
            })
        })?;

        self.insert_at(category, index)
    }

    fn ensure_unique(&self, category: &LexicalCategory) -> ParseResult<()> {
        if self.position_of(&category.kind).is_some() {
            return Err(TalonError::new(ErrorKind::DuplicateLexicalCategory {
                name: category.kind.name().to_string(),
            }));
        }
        Ok(())
    }

    /// Performs complete lexical analysis of `source`.
    ///
    /// # Behavior
    /// - The first category (in priority order) matching at the cursor wins.
    /// - Discarded categories (whitespace) advance line/column tracking but
    ///   emit nothing.
    /// - Every newline consumed increments the line and resets the column.
    ///
    /// # Errors
    /// `LexicalError` carrying the offending fragment and its position when
    /// no category matches.
    pub fn tokenize(&self, source: &str) -> ParseResult<Vec<Token>> {
        self.tokenize_with_end(source).map(|(tokens, _)| tokens)
    }

    /// Like `tokenize`, also returning the position just past the input.
    pub fn tokenize_with_end(&self, source: &str) -> ParseResult<(Vec<Token>, Span)> {
        let mut tokens = Vec::new();
        let mut cursor = 0;
        let mut span = Span::default();

        while cursor < source.len() {
            let rest = &source[cursor..];

            let Some((category, len)) = self
                .categories
                .iter()
                .find_map(|c| c.match_len(rest).map(|len| (c, len)))
            else {
                return Err(TalonError::new(ErrorKind::LexicalError {
                    fragment: fragment(rest),
                })
                .at(span));
            };

            let text = &rest[..len];

            if !category.discarded {
                tokens.push(Token::new(category.kind.clone(), text, span));
            }

            span = advance(span, text);
            cursor += len;
        }

        log::debug!(
            "tokenized {} characters into {} tokens",
            span.offset,
            tokens.len()
        );

        Ok((tokens, span))
    }
}

/// Moves `span` past `text`.
fn advance(mut span: Span, text: &str) -> Span {
    for ch in text.chars() {
        span.offset += 1;
        if ch == '\n' {
            span.line += 1;
            span.column = 0;
        } else {
            span.column += 1;
        }
    }
    span
}

/// The word at the start of `rest`, as quoted back in a lexical error.
fn fragment(rest: &str) -> String {
    let word: String = rest
        .chars()
        .take_while(|c| !c.is_whitespace())
        .take(FRAGMENT_LIMIT)
        .collect();

    if word.is_empty() {
        rest.chars().take(1).collect()
    } else {
        word
    }
}
