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

//! Parse command - rows of a typed CSV file as JSON lines

use super::run_to_stdout;
use crate::cli::InputArgs;
use crate::error::CliError;

/// Parse a typed CSV file and print every accepted row.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, if a line is bad in error mode,
/// or if warning mode skipped any line.
///
/// # Examples
///
/// ```no_run
/// use tcsv_cli::cli::InputArgs;
/// use tcsv_cli::commands::parse;
/// use tcsv_core::BadLineMode;
///
/// let args = InputArgs {
///     file: "people.csv".to_string(),
///     mode: BadLineMode::Warning,
///     multiline: false,
///     parallel: false,
///     chunk_size: 2000,
///     threads: None,
///     quiet: false,
///     tracing_diagnostics: false,
/// };
/// parse(&args).unwrap();
/// ```
pub fn parse(args: &InputArgs) -> Result<(), CliError> {
    run_to_stdout(args, None)
}
