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

//! Rendering of errors against their source text.

use talon::{parse, DiagnosticPrinter, ErrorKind, TalonError};

#[test]
fn renders_header_location_and_caret() {
    let source = "api A {\n  (A) f () {\n    return 1\n    x = 2\n  }\n}";
    let error = parse(source).unwrap_err();

    let rendered = DiagnosticPrinter::new("shapes.tl", source).render(&error);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "error[T0004]: code after return statement");
    assert_eq!(lines[1], "  --> shapes.tl:4:5");
    assert_eq!(lines[2], "   |");
    assert_eq!(lines[3], "  4 |     x = 2");
    assert_eq!(lines[4], "   |     ^");
    assert_eq!(
        lines[5],
        "help: a return statement must be the last statement of its block"
    );
}

#[test]
fn errors_without_position_render_the_file_only() {
    let error = TalonError::new(ErrorKind::OutOfTokens);
    let rendered = DiagnosticPrinter::new("empty.tl", "").render(&error);

    assert_eq!(rendered, "error[T0001]: unexpected end of input\n  --> empty.tl\n");
}

#[test]
fn display_includes_the_position() {
    let error = parse("api A {").unwrap_err();
    assert_eq!(error.to_string(), "block opened at 1:7 is never closed at 1:7");
    assert_eq!(error.code(), "T0003");
}
