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

//! The productions of the API description language.
//!
//! Every production is a unit struct implementing `Rule`. Rules call each
//! other directly (`IdentifierRule.parse(ctx)`) and use `dispatch` where the
//! grammar offers a choice.

mod annotations;
mod calls;
mod declarations;
mod expressions;
mod literals;
mod statements;
mod types;

pub use annotations::AnnotationRule;
pub use calls::{ConstructorCallRule, InstanceCallRule, StaticCallRule};
pub use declarations::{ApiRule, MethodRule, ProgramRule, SignatureRule, TypeDefRule, WithRule, WithinRule};
pub use expressions::{ExpressionRule, ParenthesizedRule, UnaryRule};
pub use literals::{IntLiteralRule, ListLiteralRule, RealLiteralRule};
pub use statements::{AssignmentRule, BlockRule, DeferRule, ReturnRule};
pub use types::{IdentifierRule, PairRule, TypeIdentifierRule};
