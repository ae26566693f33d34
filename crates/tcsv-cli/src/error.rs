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

//! Structured error types for the typed CSV CLI.

use std::io;
use std::path::PathBuf;
use tcsv_core::CsvError;
use tcsv_stream::StreamError;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// ```rust,no_run
/// use tcsv_cli::error::CliError;
///
/// fn open(path: &str) -> Result<std::fs::File, CliError> {
///     std::fs::File::open(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CliError {
    /// I/O operation failed (file open or write).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The first bad line in error mode, or a fatal pipeline error.
    #[error("{0}")]
    Csv(#[from] CsvError),

    /// The parallel parser failed.
    #[error("Stream error: {0}")]
    Stream(String),

    /// The type pattern file could not be loaded.
    #[error("Invalid type patterns in '{path}': {message}")]
    Patterns {
        /// The pattern file
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// Warning mode dropped at least one line.
    #[error("'{path}' had bad lines; {accepted} rows accepted")]
    BadLines {
        /// The input file
        path: PathBuf,
        /// Rows that made it through
        accepted: usize,
    },
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a pattern file error.
    pub fn patterns(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Patterns {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<StreamError> for CliError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Csv(e) => Self::Csv(e),
            other => Self::Stream(other.to_string()),
        }
    }
}
