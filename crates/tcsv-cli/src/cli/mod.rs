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

//! CLI command definitions and argument parsing.
//!
//! - `parse`: parse a file and print accepted rows as JSON lines
//! - `validate`: parse, check every value against a type pattern file and
//!   print accepted rows

use crate::commands;
use crate::error::CliError;
use clap::{Args, Subcommand};
use tcsv_core::{BadLineMode, DiagnosticSink, NullSink, ParserConfig, StderrSink, TracingSink};
use tcsv_stream::{ChunkConfig, DEFAULT_CHUNK_SIZE};

/// Options shared by every command that reads a typed CSV file.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file path
    #[arg(value_name = "FILE")]
    pub file: String,

    /// What to do with a bad line: `error` stops, `warning` reports and skips
    #[arg(short, long, value_name = "MODE")]
    pub mode: BadLineMode,

    /// Allow quoted values to span lines
    #[arg(long)]
    pub multiline: bool,

    /// Parse chunks of lines on a worker pool
    #[arg(short, long)]
    pub parallel: bool,

    /// Lines per chunk in parallel mode
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Worker threads in parallel mode (defaults to available cores)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Do not print bad-line diagnostics
    #[arg(short, long, conflicts_with = "tracing_diagnostics")]
    pub quiet: bool,

    /// Emit bad-line diagnostics as log events instead of plain text
    #[arg(long)]
    pub tracing_diagnostics: bool,
}

impl InputArgs {
    /// Parser configuration from `--mode` and `--multiline`.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new(self.mode).allow_multiline_strings(self.multiline)
    }

    /// Chunked parser configuration for `--parallel`.
    pub fn chunk_config(&self) -> ChunkConfig {
        let config = ChunkConfig::new(self.parser_config()).chunk_size(self.chunk_size);
        match self.threads {
            Some(threads) => config.max_threads(threads),
            None => config,
        }
    }

    /// Sink selected by `--quiet` / `--tracing-diagnostics`.
    pub fn sink(&self) -> Box<dyn DiagnosticSink> {
        if self.quiet {
            Box::new(NullSink)
        } else if self.tracing_diagnostics {
            Box::new(TracingSink)
        } else {
            Box::new(StderrSink)
        }
    }
}

/// Top-level CLI commands.
///
/// ```no_run
/// use clap::Parser;
/// use tcsv_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a typed CSV file
    ///
    /// Prints every accepted row as a JSON object keyed by column type.
    Parse {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Parse and type-check a typed CSV file
    ///
    /// Each value is matched against the pattern registered for its column
    /// type in a JSON object such as `{"int": "^[0-9]+$"}`.
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// JSON file mapping column types to regular expressions
        #[arg(short, long, value_name = "FILE")]
        types: String,
    },
}

impl Commands {
    /// Execute the command, writing accepted rows to standard output.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - a file cannot be read
    /// - the pattern file is invalid
    /// - a line is bad in error mode
    /// - any line was dropped in warning mode
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Parse { input } => commands::parse(&input),
            Commands::Validate { input, types } => commands::validate(&input, &types),
        }
    }
}
