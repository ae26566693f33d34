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

//! Per-column type validation.
//!
//! Each column type declared in the header maps to a regular expression. A
//! value passes when the pattern matches its text starting at the first
//! character; patterns that must cover the whole text end in `$`.
//!
//! ```rust
//! use tcsv_core::{BadLineMode, NullSink, Parser, ParserConfig, TypePatterns, TypeValidator};
//!
//! let patterns = TypePatterns::from_pairs([("int", "^[0-9]+$"), ("str", "^[a-z]+$")]).unwrap();
//! let mut validator = TypeValidator::new(patterns, BadLineMode::Warning)
//!     .with_sink(Box::new(NullSink));
//!
//! let parser = Parser::new(vec!["int,str", "12,bob", "x,bob"], ParserConfig::strict()).unwrap();
//! let rows: Vec<_> = validator.validate(parser).collect::<Result<_, _>>().unwrap();
//!
//! assert_eq!(rows.len(), 1);
//! assert!(validator.had_errors());
//! ```

use crate::config::BadLineMode;
use crate::diagnostics::{BadLineHandler, DiagnosticSink, NullSink};
use crate::error::{CsvError, CsvResult, ValidationErrorKind};
use crate::row::{Row, Value};
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Column type name to compiled pattern.
#[derive(Debug, Clone, Default)]
pub struct TypePatterns {
    patterns: HashMap<String, Regex>,
}

impl TypePatterns {
    /// An empty pattern map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already compiled pattern, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, pattern: Regex) {
        self.patterns.insert(name.into(), pattern);
    }

    /// Compile and register `pattern` for `name`.
    pub fn compile(&mut self, name: impl Into<String>, pattern: &str) -> CsvResult<()> {
        let name = name.into();
        let regex = Regex::new(pattern).map_err(|e| CsvError::pattern(name.as_str(), e.to_string()))?;
        debug!("Registered pattern '{}' for column type '{}'", pattern, name);
        self.patterns.insert(name, regex);
        Ok(())
    }

    /// Build from `(name, pattern)` pairs. Fails on the first pattern that
    /// does not compile.
    pub fn from_pairs<I, K, V>(pairs: I) -> CsvResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut patterns = Self::new();
        for (name, pattern) in pairs {
            patterns.compile(name, pattern.as_ref())?;
        }
        Ok(patterns)
    }

    /// Pattern registered for `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Regex> {
        self.patterns.get(name)
    }

    /// Number of registered column types.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// `true` when no pattern is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Checks parsed rows against [`TypePatterns`] under a [`BadLineMode`].
#[derive(Debug)]
pub struct TypeValidator {
    patterns: TypePatterns,
    handler: BadLineHandler,
}

impl TypeValidator {
    /// Check values against `patterns`, handling failures per `mode`.
    pub fn new(patterns: TypePatterns, mode: BadLineMode) -> Self {
        Self {
            patterns,
            handler: BadLineHandler::new(mode),
        }
    }

    /// Send diagnostics to `sink` instead of standard error.
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.handler.set_sink(sink);
        self
    }

    /// Drop diagnostics. `had_errors` still records them.
    pub fn without_diagnostics(self) -> Self {
        self.with_sink(Box::new(NullSink))
    }

    /// Patterns values are checked against.
    #[inline]
    pub fn patterns(&self) -> &TypePatterns {
        &self.patterns
    }

    /// `true` once at least one row was dropped in warning mode.
    #[inline]
    pub fn had_errors(&self) -> bool {
        self.handler.had_errors()
    }

    /// Wrap a row stream, yielding only rows whose every value passes.
    pub fn validate<I>(&mut self, rows: I) -> ValidatedRows<'_, I::IntoIter>
    where
        I: IntoIterator<Item = CsvResult<Row>>,
    {
        ValidatedRows {
            validator: self,
            upstream: rows.into_iter(),
            finished: false,
        }
    }

    /// Check every value of `row`.
    ///
    /// Returns `Ok(true)` when the row passes and `Ok(false)` when warning mode
    /// dropped it. In error mode the first failure is returned as `Err`.
    pub fn check_row(&mut self, row: &Row) -> CsvResult<bool> {
        let mut valid = true;
        for value in row {
            if let Err(error) = self.check_value(value) {
                valid = false;
                self.handler.handle(error)?;
            }
        }
        if !valid {
            debug!("Dropped row with invalid values");
        }
        Ok(valid)
    }

    fn check_value(&self, value: &Value) -> CsvResult<()> {
        let Some(pattern) = self.patterns.get(value.column_type()) else {
            return Err(CsvError::validation(
                ValidationErrorKind::UnknownColumnType(value.column_type().to_string()),
                value.pos(),
            ));
        };

        let text = value.text();
        match pattern.find(text) {
            Some(m) if m.start() == 0 => {
                trace!("Value '{}' matches '{}'", text, pattern.as_str());
                Ok(())
            }
            _ => Err(CsvError::validation(
                ValidationErrorKind::WrongTypeFormat {
                    value: text.to_string(),
                    pattern: pattern.as_str().to_string(),
                },
                value.pos(),
            )),
        }
    }
}

/// Iterator returned by [`TypeValidator::validate`].
///
/// Upstream errors are passed through and end the stream, as does the first
/// validation error in error mode.
#[derive(Debug)]
pub struct ValidatedRows<'a, I> {
    validator: &'a mut TypeValidator,
    upstream: I,
    finished: bool,
}

impl<I> Iterator for ValidatedRows<'_, I>
where
    I: Iterator<Item = CsvResult<Row>>,
{
    type Item = CsvResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let row = match self.upstream.next() {
                Some(Ok(row)) => row,
                Some(Err(error)) => {
                    self.finished = true;
                    return Some(Err(error));
                }
                None => {
                    self.finished = true;
                    return None;
                }
            };

            match self.validator.check_row(&row) {
                Ok(true) => return Some(Ok(row)),
                Ok(false) => continue,
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectedDiagnostics;
    use crate::lex::{SourcePos, Token};

    fn row(values: &[(&str, &str)]) -> Row {
        Row::new(
            values
                .iter()
                .enumerate()
                .map(|(i, (ty, text))| Value::new(*ty, Token::value(*text, SourcePos::new(2, i * 2 + 1))))
                .collect(),
        )
    }

    fn patterns() -> TypePatterns {
        TypePatterns::from_pairs([("int", "^[0-9]+$"), ("str", "^[a-z]+$")]).unwrap()
    }

    fn lenient() -> (TypeValidator, CollectedDiagnostics) {
        let collected = CollectedDiagnostics::new();
        let validator = TypeValidator::new(patterns(), BadLineMode::Warning)
            .with_sink(Box::new(collected.clone()));
        (validator, collected)
    }

    // ==================== Patterns ====================

    #[test]
    fn test_compile_invalid_pattern() {
        let err = TypePatterns::from_pairs([("int", "([0-9]+")]).unwrap_err();
        assert!(matches!(err, CsvError::Pattern { ref name, .. } if name == "int"));
        assert!(!err.is_bad_line());
    }

    #[test]
    fn test_insert_replaces() {
        let mut patterns = TypePatterns::new();
        patterns.insert("int", Regex::new("^a$").unwrap());
        patterns.insert("int", Regex::new("^[0-9]+$").unwrap());
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns.get("int").unwrap().as_str(), "^[0-9]+$");
        assert!(patterns.get("str").is_none());
    }

    // ==================== Checking ====================

    #[test]
    fn test_valid_row_passes() {
        let (mut validator, collected) = lenient();
        assert!(validator.check_row(&row(&[("int", "12"), ("str", "bob")])).unwrap());
        assert!(collected.is_empty());
        assert!(!validator.had_errors());
    }

    #[test]
    fn test_match_anchored_at_start_only() {
        let patterns = TypePatterns::from_pairs([("int", "[0-9]+")]).unwrap();
        let mut validator = TypeValidator::new(patterns, BadLineMode::Error);
        assert!(validator.check_row(&row(&[("int", "12abc")])).unwrap());
        assert!(validator.check_row(&row(&[("int", "abc12")])).is_err());
    }

    #[test]
    fn test_wrong_format_message() {
        let mut validator = TypeValidator::new(patterns(), BadLineMode::Error);
        let err = validator.check_row(&row(&[("int", "x"), ("str", "bob")])).unwrap_err();
        assert_eq!(
            err,
            CsvError::validation(
                ValidationErrorKind::WrongTypeFormat {
                    value: "x".to_string(),
                    pattern: "^[0-9]+$".to_string(),
                },
                SourcePos::new(2, 1),
            )
        );
    }

    #[test]
    fn test_unknown_type_reported_per_value() {
        let (mut validator, collected) = lenient();
        let ok = validator
            .check_row(&row(&[("money", "1"), ("int", "2"), ("money", "3")]))
            .unwrap();
        assert!(!ok);
        assert_eq!(
            collected.messages(),
            vec![
                "Unknown column type! 'money'".to_string(),
                "Unknown column type! 'money'".to_string(),
            ]
        );
        assert!(validator.had_errors());
    }

    #[test]
    fn test_error_mode_stops_at_first_failure() {
        let collected = CollectedDiagnostics::new();
        let mut validator = TypeValidator::new(patterns(), BadLineMode::Error)
            .with_sink(Box::new(collected.clone()));
        let err = validator.check_row(&row(&[("int", "x"), ("str", "1")])).unwrap_err();
        assert_eq!(err.column(), Some(1));
        assert!(collected.is_empty());
        assert!(!validator.had_errors());
    }

    // ==================== Stream adapter ====================

    #[test]
    fn test_validate_drops_bad_rows() {
        let (mut validator, collected) = lenient();
        let rows = vec![
            Ok(row(&[("int", "1"), ("str", "a")])),
            Ok(row(&[("int", "x"), ("str", "b")])),
            Ok(row(&[("int", "3"), ("str", "c")])),
        ];
        let passed: Vec<Row> = validator.validate(rows).collect::<CsvResult<_>>().unwrap();
        assert_eq!(passed.len(), 2);
        assert_eq!(passed[1].texts(), vec!["3", "c"]);
        assert_eq!(collected.len(), 1);
        assert!(validator.had_errors());
    }

    #[test]
    fn test_validate_passes_upstream_error_through() {
        let (mut validator, _) = lenient();
        let upstream_err = CsvError::Io("gone".to_string());
        let rows = vec![
            Ok(row(&[("int", "1")])),
            Err(upstream_err.clone()),
            Ok(row(&[("int", "2")])),
        ];
        let mut validated = validator.validate(rows);
        assert!(validated.next().unwrap().is_ok());
        assert_eq!(validated.next().unwrap().unwrap_err(), upstream_err);
        assert!(validated.next().is_none());
    }

    #[test]
    fn test_validate_error_mode_ends_stream() {
        let mut validator = TypeValidator::new(patterns(), BadLineMode::Error);
        let rows = vec![Ok(row(&[("int", "x")])), Ok(row(&[("int", "2")]))];
        let mut validated = validator.validate(rows);
        assert!(validated.next().unwrap().is_err());
        assert!(validated.next().is_none());
    }
}
