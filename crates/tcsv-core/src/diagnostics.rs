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

//! Bad-line diagnostics and the sinks they are reported to.
//!
//! Under [`BadLineMode::Warning`] every dropped line or row produces one
//! [`Diagnostic`], rendered as:
//!
//! ```text
//! BAD LINE WARNING!
//! Too many commas in row!
//!     at line 3, column 4
//! ```
//!
//! Sinks decide where that text goes. [`StderrSink`] is the default;
//! [`NullSink`] is for callers that explicitly ask for no output.

use crate::config::BadLineMode;
use crate::error::{CsvError, CsvResult};
use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{debug, warn};

/// One reported bad line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    error: CsvError,
}

impl Diagnostic {
    /// Wrap a bad-line error.
    pub fn new(error: CsvError) -> Self {
        Self { error }
    }

    /// The reported error.
    #[inline]
    pub fn error(&self) -> &CsvError {
        &self.error
    }

    /// Unwrap the reported error.
    pub fn into_error(self) -> CsvError {
        self.error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BAD LINE WARNING!\n{}", self.error)
    }
}

/// Destination for diagnostics.
pub trait DiagnosticSink: Send {
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Writes each diagnostic followed by a newline to a writer.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    /// Write diagnostics to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> DiagnosticSink for WriterSink<W> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        if let Err(e) = writeln!(self.writer, "{diagnostic}") {
            debug!("Failed to write diagnostic: {}", e);
        }
    }
}

/// Writes diagnostics to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let mut stderr = io::stderr().lock();
        if let Err(e) = writeln!(stderr, "{diagnostic}") {
            debug!("Failed to write diagnostic: {}", e);
        }
    }
}

/// Emits diagnostics as `tracing` warnings with structured position fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let error = diagnostic.error();
        warn!(
            line = error.line(),
            column = error.column(),
            "BAD LINE WARNING! {}",
            error.message()
        );
    }
}

/// Discards diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: &Diagnostic) {}
}

/// Collects diagnostics into a shared list.
///
/// Clones share the same list, so a handle kept by the caller sees what the
/// parser or validator reported.
///
/// ```
/// use tcsv_core::{BadLineMode, CollectedDiagnostics, Parser, ParserConfig};
///
/// let collected = CollectedDiagnostics::new();
/// let parser = Parser::new(vec!["a,b", "1,,", "3,4"], ParserConfig::new(BadLineMode::Warning))
///     .unwrap()
///     .with_sink(Box::new(collected.clone()));
///
/// let rows: Vec<_> = parser.collect::<Result<_, _>>().unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(collected.messages(), vec!["Empty value!".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollectedDiagnostics {
    inner: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectedDiagnostics {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics reported so far.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// `true` until something is reported.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of everything reported so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.inner.lock().clone()
    }

    /// Messages (without positions) of everything reported so far.
    pub fn messages(&self) -> Vec<String> {
        self.inner
            .lock()
            .iter()
            .map(|d| d.error().message())
            .collect()
    }
}

impl DiagnosticSink for CollectedDiagnostics {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.inner.lock().push(diagnostic.clone());
    }
}

/// Applies a [`BadLineMode`] to bad-line errors. Shared by the parser and the
/// validator so both stages behave identically.
pub(crate) struct BadLineHandler {
    mode: BadLineMode,
    sink: Box<dyn DiagnosticSink>,
    had_errors: bool,
}

impl BadLineHandler {
    pub(crate) fn new(mode: BadLineMode) -> Self {
        Self {
            mode,
            sink: Box::new(StderrSink),
            had_errors: false,
        }
    }

    pub(crate) fn set_sink(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    #[inline]
    pub(crate) fn had_errors(&self) -> bool {
        self.had_errors
    }

    /// `Err` in error mode; in warning mode reports the error and returns `Ok`.
    pub(crate) fn handle(&mut self, error: CsvError) -> CsvResult<()> {
        match self.mode {
            BadLineMode::Error => Err(error),
            BadLineMode::Warning => {
                self.had_errors = true;
                self.sink.report(&Diagnostic::new(error));
                Ok(())
            }
        }
    }
}

impl fmt::Debug for BadLineHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadLineHandler")
            .field("mode", &self.mode)
            .field("had_errors", &self.had_errors)
            .finish_non_exhaustive()
    }
}
