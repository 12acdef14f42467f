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

/// The expression algorithm that builds and rotates binary trees.
pub mod resolver;

pub use resolver::resolve_infix;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::{ErrorKind, ParseResult, TalonError};

/// Where an operator sits relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Fixity {
    Prefix,
    Infix,
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fixity::Prefix => f.write_str("prefix"),
            Fixity::Infix => f.write_str("infix"),
        }
    }
}

/// How one operator binds relative to another.
///
/// `Greater` means "binds tighter than". `Equal` is also what an undeclared
/// pair reports, and never causes a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Precedence {
    Greater,
    Lesser,
    Equal,
}

impl Precedence {
    pub fn inverse(self) -> Self {
        match self {
            Precedence::Greater => Precedence::Lesser,
            Precedence::Lesser => Precedence::Greater,
            Precedence::Equal => Precedence::Equal,
        }
    }
}

/// A declared operator and the pairwise facts known about it.
#[derive(Debug, Clone, Serialize)]
pub struct Operator {
    symbol: String,
    fixity: Fixity,
    relationships: HashMap<String, Precedence>,
}

impl Operator {
    fn new(symbol: &str, fixity: Fixity) -> Self {
        Self {
            symbol: symbol.to_string(),
            fixity,
            relationships: HashMap::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn fixity(&self) -> Fixity {
        self.fixity
    }

    /// This operator's precedence relative to `other`.
    pub fn relationship(&self, other: &str) -> Precedence {
        self.relationships
            .get(other)
            .copied()
            .unwrap_or(Precedence::Equal)
    }

    pub fn is_related_to(&self, other: &str) -> bool {
        self.relationships.contains_key(other)
    }
}

/// Infix tiers of the built-in operators, tightest first. Every operator
/// binds tighter than every operator of a later tier; operators sharing a
/// tier are left unrelated.
const BUILTIN_INFIX_TIERS: &[&[&str]] = &[
    &["*", "/", "%"],
    &["+", "-"],
    &["<", ">", "<=", ">=", "==", "!="],
    &["&&"],
    &["||"],
];

const BUILTIN_PREFIX: &[&str] = &["-", "!"];

/// Registry of operators and the relationships between them.
///
/// There is no precedence number anywhere: ordering is learned one pair at a
/// time, and relationships are write-once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperatorTable {
    prefix: HashMap<String, Operator>,
    infix: HashMap<String, Operator>,
}

impl OperatorTable {
    /// A table with no operators at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table seeded with the arithmetic, comparison and logical operators.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        table.seed_builtins();
        table
    }

    fn seed_builtins(&mut self) {
        for symbol in BUILTIN_PREFIX {
            self.prefix
                .insert(symbol.to_string(), Operator::new(symbol, Fixity::Prefix));
        }

        for tier in BUILTIN_INFIX_TIERS {
            for symbol in tier.iter() {
                self.infix
                    .insert(symbol.to_string(), Operator::new(symbol, Fixity::Infix));
            }
        }

        for (index, tighter) in BUILTIN_INFIX_TIERS.iter().enumerate() {
            for looser in &BUILTIN_INFIX_TIERS[index + 1..] {
                for a in tighter.iter() {
                    for b in looser.iter() {
                        self.record(a, b, Precedence::Greater);
                    }
                }
            }
        }
    }

    fn table(&self, fixity: Fixity) -> &HashMap<String, Operator> {
        match fixity {
            Fixity::Prefix => &self.prefix,
            Fixity::Infix => &self.infix,
        }
    }

    fn table_mut(&mut self, fixity: Fixity) -> &mut HashMap<String, Operator> {
        match fixity {
            Fixity::Prefix => &mut self.prefix,
            Fixity::Infix => &mut self.infix,
        }
    }

    /// Number of declared operators across both fixities.
    pub fn len(&self) -> usize {
        self.prefix.len() + self.infix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, symbol: &str, fixity: Fixity) -> bool {
        self.table(fixity).contains_key(symbol)
    }

    /// # Errors
    /// `UnknownOperator` if `symbol` was never declared with `fixity`.
    pub fn get(&self, symbol: &str, fixity: Fixity) -> ParseResult<&Operator> {
        self.table(fixity).get(symbol).ok_or_else(|| {
            TalonError::new(ErrorKind::UnknownOperator {
                symbol: symbol.to_string(),
                fixity,
            })
        })
    }

    pub fn infix(&self, symbol: &str) -> ParseResult<&Operator> {
        self.get(symbol, Fixity::Infix)
    }

    pub fn prefix(&self, symbol: &str) -> ParseResult<&Operator> {
        self.get(symbol, Fixity::Prefix)
    }

    /// Registers a new operator.
    ///
    /// # Errors
    /// `AlreadyDeclaredOperator` if the symbol exists with the same fixity.
    pub fn declare(&mut self, symbol: &str, fixity: Fixity) -> ParseResult<()> {
        if self.contains(symbol, fixity) {
            return Err(TalonError::new(ErrorKind::AlreadyDeclaredOperator {
                symbol: symbol.to_string(),
            }));
        }

        log::debug!("declared {fixity} operator `{symbol}`");
        self.table_mut(fixity)
            .insert(symbol.to_string(), Operator::new(symbol, fixity));
        Ok(())
    }

    /// Declares that infix `left` has `precedence` relative to infix `right`.
    /// The inverse fact is recorded for `right` at the same time.
    ///
    /// # Errors
    /// - `UnknownOperator` if either symbol is not an infix operator.
    /// - `AlreadyRelated` if the pair already has a relationship.
    pub fn relate(&mut self, left: &str, right: &str, precedence: Precedence) -> ParseResult<()> {
        let existing = self.get(left, Fixity::Infix)?.is_related_to(right);
        self.get(right, Fixity::Infix)?;

        if existing {
            return Err(TalonError::new(ErrorKind::AlreadyRelated {
                left: left.to_string(),
                right: right.to_string(),
            }));
        }

        log::debug!("operator `{left}` is {precedence:?} than `{right}`");
        self.record(left, right, precedence);
        Ok(())
    }

    fn record(&mut self, left: &str, right: &str, precedence: Precedence) {
        if let Some(op) = self.infix.get_mut(left) {
            op.relationships.insert(right.to_string(), precedence);
        }
        if let Some(op) = self.infix.get_mut(right) {
            op.relationships
                .insert(left.to_string(), precedence.inverse());
        }
    }

    /// Precedence of infix `left` relative to infix `right`; `Equal` when
    /// either is unknown or the pair was never related.
    pub fn precedence(&self, left: &str, right: &str) -> Precedence {
        self.infix
            .get(left)
            .map(|op| op.relationship(right))
            .unwrap_or(Precedence::Equal)
    }
}
