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

//! CLI command implementations

mod parse;
mod validate;

pub use parse::parse;
pub use validate::{load_patterns, validate};

use crate::cli::InputArgs;
use crate::error::CliError;
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tcsv_core::{CsvError, CsvResult, Parser, Row, TypeValidator};
use tcsv_stream::{ChunkedParser, ReaderLines};
use tracing::info;

/// Rows of a file, from either the single-threaded or the chunked parser.
pub enum RowSource {
    Single(Parser<ReaderLines<File>>),
    Chunked(ChunkedParser<File>),
}

impl RowSource {
    /// Open `args.file` with the parser selected by `--parallel`.
    pub fn open(args: &InputArgs) -> Result<Self, CliError> {
        let file = File::open(&args.file).map_err(|e| CliError::io_error(&args.file, e))?;

        if args.parallel {
            let parser = ChunkedParser::new(file, args.chunk_config())?.with_sink(args.sink());
            Ok(Self::Chunked(parser))
        } else {
            let parser = Parser::from_source(ReaderLines::new(file), args.parser_config())?
                .with_sink(args.sink());
            Ok(Self::Single(parser))
        }
    }

    /// `true` once the parser dropped a line in warning mode.
    pub fn had_errors(&self) -> bool {
        match self {
            Self::Single(parser) => parser.had_errors(),
            Self::Chunked(parser) => parser.had_errors(),
        }
    }
}

impl Iterator for RowSource {
    type Item = CsvResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(parser) => parser.next(),
            Self::Chunked(parser) => parser.next().map(|row| row.map_err(CsvError::from)),
        }
    }
}

/// Counts from one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub accepted: usize,
    pub had_errors: bool,
}

/// Parse `args.file`, optionally validate, and write accepted rows to `out`
/// as JSON lines.
pub fn run(
    args: &InputArgs,
    validator: Option<TypeValidator>,
    out: &mut dyn Write,
) -> Result<RunSummary, CliError> {
    let mut source = RowSource::open(args)?;
    let mut summary = RunSummary::default();

    match validator {
        Some(mut validator) => {
            for row in validator.validate(&mut source) {
                write_row(out, &row?, &args.file)?;
                summary.accepted += 1;
            }
            summary.had_errors = validator.had_errors();
        }
        None => {
            for row in &mut source {
                write_row(out, &row?, &args.file)?;
                summary.accepted += 1;
            }
        }
    }

    summary.had_errors |= source.had_errors();
    out.flush().map_err(|e| CliError::io_error("<stdout>", e))?;
    Ok(summary)
}

fn write_row(out: &mut dyn Write, row: &Row, file: &str) -> Result<(), CliError> {
    let line = serde_json::to_string(&row.to_map()).map_err(|e| {
        CliError::io_error(file, io::Error::new(io::ErrorKind::InvalidData, e))
    })?;
    writeln!(out, "{line}").map_err(|e| CliError::io_error("<stdout>", e))
}

/// Run against standard output and print a summary to standard error.
pub(crate) fn run_to_stdout(
    args: &InputArgs,
    validator: Option<TypeValidator>,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let summary = match run(args, validator, &mut out) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), args.file);
            return Err(e);
        }
    };

    info!(
        "{}: {} rows accepted, bad lines: {}",
        args.file, summary.accepted, summary.had_errors
    );

    if summary.had_errors {
        eprintln!(
            "{} {} ({} rows accepted, bad lines skipped)",
            "!".yellow().bold(),
            args.file,
            summary.accepted
        );
        return Err(CliError::BadLines {
            path: args.file.clone().into(),
            accepted: summary.accepted,
        });
    }

    eprintln!(
        "{} {} ({} rows)",
        "✓".green().bold(),
        args.file,
        summary.accepted
    );
    Ok(())
}
