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

//! Core lexer, parser and validator for typed CSV.
//!
//! The first line of a typed CSV file declares a column type per position.
//! Every following line is a row whose values are tagged with the type of
//! their column and, optionally, checked against a per-type pattern.
//!
//! The pipeline is pull-based and every stage is an iterator owning its
//! upstream:
//!
//! - [`lex::Lexer`] turns lines into positioned tokens,
//! - [`Parser`] turns tokens into [`Row`]s against a [`Header`],
//! - [`TypeValidator`] filters rows through [`TypePatterns`].
//!
//! Malformed lines are handled according to [`BadLineMode`]: either the
//! first one ends the stream as an `Err`, or each one is reported to a
//! [`DiagnosticSink`] and skipped.
//!
//! # Example
//!
//! ```rust
//! use tcsv_core::{BadLineMode, Parser, ParserConfig, TypePatterns, TypeValidator};
//!
//! let lines = vec!["id,name", "1,ann", "2,bob"];
//! let parser = Parser::new(lines, ParserConfig::new(BadLineMode::Error))?;
//!
//! let patterns = TypePatterns::from_pairs([("id", "^[0-9]+$"), ("name", "^[a-z]+$")])?;
//! let mut validator = TypeValidator::new(patterns, BadLineMode::Error);
//!
//! for row in validator.validate(parser) {
//!     let row = row?;
//!     assert_eq!(row.len(), 2);
//! }
//! # Ok::<(), tcsv_core::CsvError>(())
//! ```

mod config;
mod diagnostics;
mod error;
mod header;
pub mod lex;
mod parser;
mod row;
mod validator;

pub use config::{BadLineMode, ParserConfig};
pub use diagnostics::{
    CollectedDiagnostics, Diagnostic, DiagnosticSink, NullSink, StderrSink, TracingSink,
    WriterSink,
};
pub use error::{CsvError, CsvResult, LexErrorKind, ParseErrorKind, ValidationErrorKind};
pub use header::{ColumnOutOfRange, Header};
pub use parser::Parser;
pub use row::{Row, Value};
pub use validator::{TypePatterns, TypeValidator, ValidatedRows};
