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

//! Streaming and parallel front ends for typed CSV.
//!
//! # Features
//!
//! - **Buffered reading**: [`LineReader`] and [`ReaderLines`] feed a core
//!   [`Parser`](tcsv_core::Parser) straight from any `Read`
//! - **Chunked fan-out**: [`ChunkedParser`] parses fixed-size chunks on a
//!   worker pool and yields rows in input order
//!
//! # Single-threaded
//!
//! ```rust,no_run
//! use tcsv_core::{Parser, ParserConfig};
//! use tcsv_stream::ReaderLines;
//! use std::fs::File;
//!
//! let file = File::open("large.csv").unwrap();
//! let parser = Parser::from_source(ReaderLines::new(file), ParserConfig::lenient()).unwrap();
//!
//! for row in parser {
//!     println!("{}", row.unwrap());
//! }
//! ```
//!
//! # Chunked
//!
//! ```rust,no_run
//! use tcsv_core::ParserConfig;
//! use tcsv_stream::{ChunkConfig, ChunkedParser};
//! use std::fs::File;
//!
//! let file = File::open("large.csv").unwrap();
//! let config = ChunkConfig::new(ParserConfig::lenient()).chunk_size(5000);
//!
//! for row in ChunkedParser::new(file, config).unwrap() {
//!     println!("{}", row.unwrap());
//! }
//! ```

mod chunked;
mod error;
mod reader;

pub use chunked::{parse_chunked, ChunkConfig, ChunkLines, ChunkedParser, DEFAULT_CHUNK_SIZE};
pub use error::{StreamError, StreamResult};
pub use reader::{LineReader, ReaderLines, DEFAULT_BUFFER_SIZE};

/// Re-export core types for convenience.
pub use tcsv_core::{BadLineMode, ParserConfig, Row};
