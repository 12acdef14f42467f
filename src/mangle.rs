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

/// Turns a namespace-qualified name (`Geo::Point`) into the flat name the
/// rest of the toolchain uses.
pub trait NameMangler {
    fn mangle(&self, qualified: &str) -> String;
}

impl<F: Fn(&str) -> String> NameMangler for F {
    fn mangle(&self, qualified: &str) -> String {
        self(qualified)
    }
}

/// Replaces every `::` separator with `__`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMangler;

impl NameMangler for DefaultMangler {
    fn mangle(&self, qualified: &str) -> String {
        qualified.replace("::", "__")
    }
}
