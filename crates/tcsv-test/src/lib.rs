// Dweve TCSV - Typed CSV Parsing
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared test fixtures and utilities for the typed CSV crates.
//!
//! # Quick Start
//!
//! ```rust
//! use tcsv_test::{fixtures, lines, parse_lenient};
//!
//! // Well-formed inputs
//! let text = fixtures::people();
//! assert_eq!(lines(text).len(), 4);
//!
//! // Bad lines with the message each one must produce
//! for case in fixtures::errors::bad_line_samples() {
//!     let outcome = parse_lenient(case.input);
//!     assert!(outcome.had_errors, "{}", case.name);
//! }
//! ```

use tcsv_core::{CollectedDiagnostics, CsvResult, Parser, ParserConfig, Row};

/// Canonical inputs, bad-line samples and pattern maps.
pub mod fixtures;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> &'static str)>;

pub use fixtures::*;

/// Split `text` into physical lines, keeping each `\n` terminator.
pub fn lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

/// A well-formed input of `rows` data lines under an `width`-column header
/// named `c0..cN`. Cell text is `r{row}c{col}`.
pub fn generate(rows: usize, width: usize) -> String {
    let mut out = (0..width)
        .map(|c| format!("c{c}"))
        .collect::<Vec<_>>()
        .join(",");
    out.push('\n');
    for r in 0..rows {
        let line = (0..width)
            .map(|c| format!("r{r}c{c}"))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Result of a warning-mode parse.
#[derive(Debug)]
pub struct Outcome {
    pub rows: Vec<Row>,
    pub diagnostics: CollectedDiagnostics,
    pub had_errors: bool,
}

impl Outcome {
    /// Texts of every accepted row.
    pub fn texts(&self) -> Vec<Vec<&str>> {
        self.rows.iter().map(Row::texts).collect()
    }
}

/// Parse `text` in warning mode, collecting diagnostics.
///
/// Panics if the parse itself fails, which warning mode only does for errors
/// that are not bad lines.
pub fn parse_lenient(text: &str) -> Outcome {
    parse_with(text, ParserConfig::lenient())
}

/// Parse `text` with `config`, collecting diagnostics. Panics on `Err`.
pub fn parse_with(text: &str, config: ParserConfig) -> Outcome {
    let diagnostics = CollectedDiagnostics::new();
    let mut parser = Parser::new(lines(text), config)
        .expect("header should parse")
        .with_sink(Box::new(diagnostics.clone()));
    let rows = parser
        .by_ref()
        .collect::<CsvResult<Vec<_>>>()
        .expect("parse should not fail");
    Outcome {
        rows,
        diagnostics,
        had_errors: parser.had_errors(),
    }
}

/// Parse `text` in error mode, returning the first error if any.
pub fn parse_strict(text: &str) -> CsvResult<Vec<Row>> {
    Parser::new(lines(text), ParserConfig::strict())?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_keep_terminators() {
        assert_eq!(lines("a,b\n1,2"), vec!["a,b\n", "1,2"]);
        assert_eq!(lines("a\r\n"), vec!["a\r\n"]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn test_generate_shape() {
        let text = generate(3, 2);
        assert_eq!(text, "c0,c1\nr0c0,r0c1\nr1c0,r1c1\nr2c0,r2c1\n");
    }

    #[test]
    fn test_all_fixtures_parse_cleanly() {
        for (name, fixture) in fixtures::all() {
            let rows = parse_strict(fixture()).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(!rows.is_empty(), "{name} has no rows");
        }
    }

    #[test]
    fn test_bad_line_samples_report_expected_message() {
        for case in fixtures::errors::bad_line_samples() {
            let outcome = parse_lenient(case.input);
            assert!(outcome.had_errors, "{}", case.name);
            assert_eq!(
                outcome.diagnostics.messages()[0],
                case.message,
                "{}",
                case.name
            );
        }
    }
}
