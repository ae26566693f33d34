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

//! Typed CSV Command Line Interface

use clap::Parser;
use std::process::ExitCode;
use tcsv_cli::cli::Commands;
use tracing_subscriber::EnvFilter;

/// TCSV - typed CSV parsing and validation
///
/// The first line of every file declares one type per column; every later
/// line is a row whose values take the type of their column.
///
/// # Examples
///
/// ```bash
/// # Print rows, stopping at the first bad line
/// tcsv parse data.csv --mode error
///
/// # Check values against type patterns, skipping bad lines
/// tcsv validate data.csv --types types.json --mode warning
///
/// # Large files on four workers
/// tcsv parse big.csv --mode warning --parallel -j 4 --quiet
/// ```
#[derive(Parser)]
#[command(name = "tcsv")]
#[command(author, version, about = "TCSV - typed CSV parsing and validation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("tcsv_cli=info".parse().expect("valid log directive"))
                .add_directive("tcsv_core=warn".parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
