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

//! Error types for lexing, parsing and validating typed CSV.
//!
//! # Error Categories
//!
//! - **Lex errors**: an unterminated quoted value (column only)
//! - **Parse errors**: empty values and too many commas (line and column)
//! - **Validation errors**: unknown column types and values that do not match
//!   their column pattern (line and column)
//! - **Pattern errors**: a column pattern that fails to compile
//! - **I/O errors**: the line source failed
//!
//! The first three are "bad line" errors and go through the configured
//! [`BadLineMode`](crate::BadLineMode). Pattern and I/O errors always
//! propagate to the caller.
//!
//! The `Display` output of a bad-line error is the message followed by a tab
//! indented position line, which is what diagnostics print:
//!
//! ```
//! use tcsv_core::{CsvError, ParseErrorKind};
//! use tcsv_core::lex::SourcePos;
//!
//! let err = CsvError::parse(ParseErrorKind::EmptyValue, SourcePos::new(2, 3));
//! assert_eq!(err.to_string(), "Empty value!\n\tat line 2, column 3");
//! assert_eq!(err.line(), Some(2));
//! ```

use crate::lex::SourcePos;
use thiserror::Error;

/// Lexer-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A quoted value reached the end of its line (or of the input).
    #[error("Unterminated string! Did you mean to turn enable multi-line strings?")]
    UnterminatedString,
}

/// Structural failures detected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// Two separators with nothing between them.
    #[error("Empty value!")]
    EmptyValue,

    /// A comma pushed the column index past the header width.
    #[error("Too many commas in row!")]
    TooManyCommas,

    /// A value landed in a column the header does not declare.
    #[error("Could not get column type, too many commas!")]
    ColumnOverflow,
}

/// Type-pattern failures detected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    /// No pattern is registered for the column type.
    #[error("Unknown column type! '{0}'")]
    UnknownColumnType(String),

    /// The value text does not match its column pattern.
    #[error("Wrong type format! Value was '{value}' expected regex format is '{pattern}'")]
    WrongTypeFormat { value: String, pattern: String },
}

/// Errors produced by the typed CSV pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    /// Lexer error. Carries the start column of the offending value.
    #[error("{kind}\n\tat position {column}")]
    Lex { kind: LexErrorKind, column: usize },

    /// Parser error.
    #[error("{kind}\n\tat {pos}")]
    Parse { kind: ParseErrorKind, pos: SourcePos },

    /// Validator error.
    #[error("{kind}\n\tat {pos}")]
    Validation {
        kind: ValidationErrorKind,
        pos: SourcePos,
    },

    /// A column pattern failed to compile.
    #[error("Invalid pattern for column type '{name}': {message}")]
    Pattern { name: String, message: String },

    /// The line source failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl CsvError {
    /// Create a lexer error.
    #[inline]
    pub fn lex(kind: LexErrorKind, column: usize) -> Self {
        Self::Lex { kind, column }
    }

    /// Create a parser error.
    #[inline]
    pub fn parse(kind: ParseErrorKind, pos: SourcePos) -> Self {
        Self::Parse { kind, pos }
    }

    /// Create a validation error.
    #[inline]
    pub fn validation(kind: ValidationErrorKind, pos: SourcePos) -> Self {
        Self::Validation { kind, pos }
    }

    /// Create a pattern compilation error.
    pub fn pattern(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            name: name.into(),
            message: message.into(),
        }
    }

    /// The human-readable message without the position suffix.
    pub fn message(&self) -> String {
        match self {
            Self::Lex { kind, .. } => kind.to_string(),
            Self::Parse { kind, .. } => kind.to_string(),
            Self::Validation { kind, .. } => kind.to_string(),
            Self::Pattern { .. } | Self::Io(_) => self.to_string(),
        }
    }

    /// Full position, for errors that know both line and column.
    pub fn position(&self) -> Option<SourcePos> {
        match self {
            Self::Parse { pos, .. } | Self::Validation { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    /// Line number if available. Lexer errors only know their column.
    pub fn line(&self) -> Option<usize> {
        self.position().map(|pos| pos.line())
    }

    /// Column number if available.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Lex { column, .. } => Some(*column),
            _ => self.position().map(|pos| pos.column()),
        }
    }

    /// Returns `true` for errors that the bad-line policy may absorb.
    #[inline]
    pub fn is_bad_line(&self) -> bool {
        matches!(
            self,
            Self::Lex { .. } | Self::Parse { .. } | Self::Validation { .. }
        )
    }
}

impl From<std::io::Error> for CsvError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for the typed CSV pipeline.
pub type CsvResult<T> = Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    // ==================== Display tests ====================

    #[test]
    fn test_lex_error_display() {
        let err = CsvError::lex(LexErrorKind::UnterminatedString, 7);
        assert_eq!(
            err.to_string(),
            "Unterminated string! Did you mean to turn enable multi-line strings?\n\tat position 7"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = CsvError::parse(ParseErrorKind::TooManyCommas, SourcePos::new(3, 4));
        assert_eq!(err.to_string(), "Too many commas in row!\n\tat line 3, column 4");

        let err = CsvError::parse(ParseErrorKind::ColumnOverflow, SourcePos::new(1, 1));
        assert!(err
            .to_string()
            .starts_with("Could not get column type, too many commas!"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = CsvError::validation(
            ValidationErrorKind::WrongTypeFormat {
                value: "x".to_string(),
                pattern: "^[0-9]+$".to_string(),
            },
            SourcePos::new(2, 1),
        );
        assert_eq!(
            err.to_string(),
            "Wrong type format! Value was 'x' expected regex format is '^[0-9]+$'\n\tat line 2, column 1"
        );

        let err = CsvError::validation(
            ValidationErrorKind::UnknownColumnType("money".to_string()),
            SourcePos::new(5, 9),
        );
        assert_eq!(err.message(), "Unknown column type! 'money'");
    }

    // ==================== Accessor tests ====================

    #[test]
    fn test_lex_error_has_column_only() {
        let err = CsvError::lex(LexErrorKind::UnterminatedString, 12);
        assert_eq!(err.line(), None);
        assert_eq!(err.column(), Some(12));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_parse_error_position() {
        let err = CsvError::parse(ParseErrorKind::EmptyValue, SourcePos::new(8, 2));
        assert_eq!(err.position(), Some(SourcePos::new(8, 2)));
        assert_eq!(err.line(), Some(8));
        assert_eq!(err.column(), Some(2));
        assert_eq!(err.message(), "Empty value!");
    }

    #[test]
    fn test_is_bad_line() {
        assert!(CsvError::lex(LexErrorKind::UnterminatedString, 1).is_bad_line());
        assert!(CsvError::parse(ParseErrorKind::EmptyValue, SourcePos::start()).is_bad_line());
        assert!(!CsvError::pattern("int", "bad regex").is_bad_line());
        assert!(!CsvError::Io("disk gone".to_string()).is_bad_line());
    }

    #[test]
    fn test_from_io_error() {
        let err: CsvError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, CsvError::Io(ref msg) if msg.contains("missing")));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_pattern_error_display() {
        let err = CsvError::pattern("int", "unclosed group");
        let display = err.to_string();
        assert!(display.contains("'int'"));
        assert!(display.contains("unclosed group"));
    }
}
