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

//! Error types for the streaming layer.
//!
//! # Error Categories
//!
//! - **CSV Errors**: bad lines, pattern and source errors from `tcsv-core`
//! - **I/O Errors**: problems reading the input stream
//! - **Worker Errors**: the worker pool could not be built or lost a chunk
//!
//! ```rust
//! use tcsv_stream::{ChunkConfig, ChunkedParser, StreamError};
//! use tcsv_core::ParserConfig;
//! use std::io::Cursor;
//!
//! let input = "a,b\n1,2\n3,4,5\n";
//! let parser = ChunkedParser::new(Cursor::new(input), ChunkConfig::new(ParserConfig::strict())).unwrap();
//!
//! for row in parser {
//!     match row {
//!         Ok(row) => println!("{row}"),
//!         Err(StreamError::Csv(e)) => {
//!             assert_eq!(e.line(), Some(3));
//!             break;
//!         }
//!         Err(e) => panic!("unexpected: {e}"),
//!     }
//! }
//! ```

use tcsv_core::CsvError;
use thiserror::Error;

/// Errors that can occur while streaming rows.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Error from the core pipeline.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The worker pool failed.
    #[error("Worker error: {0}")]
    Worker(String),
}

impl StreamError {
    /// Create a worker error.
    #[inline]
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker(message.into())
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Csv(e) => e.line(),
            Self::Io(_) | Self::Worker(_) => None,
        }
    }

    /// Returns `true` for errors the bad-line policy applies to.
    #[inline]
    pub fn is_bad_line(&self) -> bool {
        matches!(self, Self::Csv(e) if e.is_bad_line())
    }
}

impl From<StreamError> for CsvError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Csv(e) => e,
            StreamError::Io(e) => CsvError::from(e),
            StreamError::Worker(message) => CsvError::Io(message),
        }
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tcsv_core::lex::SourcePos;
    use tcsv_core::ParseErrorKind;

    #[test]
    fn test_csv_error_is_transparent() {
        let inner = CsvError::parse(ParseErrorKind::EmptyValue, SourcePos::new(4, 2));
        let err = StreamError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.line(), Some(4));
        assert!(err.is_bad_line());
    }

    #[test]
    fn test_io_error() {
        let err = StreamError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "short read"));
        assert!(err.to_string().contains("short read"));
        assert_eq!(err.line(), None);
        assert!(!err.is_bad_line());
    }

    #[test]
    fn test_worker_error() {
        let err = StreamError::worker("pool is gone");
        assert_eq!(err.to_string(), "Worker error: pool is gone");
    }

    #[test]
    fn test_into_csv_error() {
        let csv: CsvError = StreamError::from(io::Error::new(io::ErrorKind::Other, "boom")).into();
        assert!(matches!(csv, CsvError::Io(ref m) if m.contains("boom")));

        let csv: CsvError = StreamError::worker("lost").into();
        assert_eq!(csv, CsvError::Io("lost".to_string()));
    }
}
