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

//! Typed CSV CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **parse**: parse a typed CSV file and print accepted rows as JSON lines
//! - **validate**: parse, then check every value against a regex registered
//!   for its column type
//!
//! Both commands take `--mode error|warning`. In error mode the first bad
//! line stops the run; in warning mode bad lines are reported on standard
//! error, skipped, and the run exits non-zero after printing what survived.
//! `--parallel` switches to the chunked worker-pool parser.
//!
//! # Examples
//!
//! ```no_run
//! use tcsv_cli::cli::InputArgs;
//! use tcsv_cli::commands::validate;
//! use tcsv_core::BadLineMode;
//!
//! # fn main() -> Result<(), tcsv_cli::error::CliError> {
//! let args = InputArgs {
//!     file: "people.csv".to_string(),
//!     mode: BadLineMode::Error,
//!     multiline: false,
//!     parallel: true,
//!     chunk_size: 5000,
//!     threads: Some(4),
//!     quiet: false,
//!     tracing_diagnostics: false,
//! };
//! validate(&args, "types.json")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
