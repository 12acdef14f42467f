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

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ParseResult, TalonError};

/// Knobs that change how a parse behaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Skip tokens the top-level rules cannot dispatch on instead of
    /// failing. Meant for tooling that must tolerate broken input.
    pub permissive: bool,

    /// Run `::`-qualified type names through the context's name mangler.
    pub mangle_qualified_names: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            permissive: false,
            mangle_qualified_names: true,
        }
    }
}

impl ParserConfig {
    /// The default configuration with permissive top-level recovery.
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Self::default()
        }
    }

    /// Reads a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// `InvalidConfig` for malformed JSON or unknown fields.
    pub fn from_json(text: &str) -> ParseResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            TalonError::new(ErrorKind::InvalidConfig {
                reason: e.to_string(),
            })
        })
    }
}
