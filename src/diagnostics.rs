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

use std::fmt::Write;

use crate::error::TalonError;

/// Renders compiler-style diagnostics for front-end errors.
///
/// This printer:
/// - Formats errors with file/line/column information
/// - Displays the offending source line
/// - Highlights the error position with a caret (`^`)
/// - Optionally shows the error's help text
///
/// The layout follows `rustc` and stays readable without color.
pub struct DiagnosticPrinter {
    /// Full source text the error was produced from.
    source: String,

    /// Name of the source file (e.g. `geometry.tl`), for display only.
    file_name: String,
}

impl DiagnosticPrinter {
    /// Creates a printer for one source file.
    ///
    /// # Arguments
    /// - `file_name` → The name shown in the `-->` line
    /// - `source` → The full text the error positions refer to
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }

    /// Formats `error` as a diagnostic.
    ///
    /// # Output Example
    /// ```text
    /// error[T0004]: code after return statement
    ///   --> shapes.tl:4:9
    ///    |
    ///  4 |         y = 2
    ///    |         ^
    /// help: a return statement must be the last statement of its block
    /// ```
    ///
    /// Errors without a position get only the header and file name.
    pub fn render(&self, error: &TalonError) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "error[{}]: {}", error.code(), error.kind);

        match error.span {
            Some(span) => {
                // Spans are 0-based; everything shown to a person is 1-based.
                let line_no = span.line + 1;
                let src_line = self.source.lines().nth(span.line).unwrap_or("");

                let _ = writeln!(out, "  --> {}:{}", self.file_name, span);
                let _ = writeln!(out, "   |");
                let _ = writeln!(out, "{:>3} | {}", line_no, src_line);
                let _ = writeln!(out, "   | {}^", " ".repeat(span.column));
            }
            None => {
                let _ = writeln!(out, "  --> {}", self.file_name);
            }
        }

        if let Some(help) = &error.help {
            let _ = writeln!(out, "help: {}", help);
        }

        out
    }

    /// Prints the rendered diagnostic to stderr.
    pub fn print(&self, error: &TalonError) {
        eprint!("{}", self.render(error));
    }
}
