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

//! Row parser with line-granular error recovery.
//!
//! The parser pulls tokens from a [`Lexer`], builds the [`Header`] from the
//! first logical line and then yields one [`Row`] per logical line.
//!
//! # Invariants
//!
//! - A separator (comma or line end) must not directly follow another
//!   separator: that is an empty value.
//! - A row never has more values than the header has columns.
//! - Values of a line that hit an error are dropped together; a row is only
//!   yielded when its whole line parsed.
//!
//! # Bad lines
//!
//! In [`BadLineMode::Error`] the first bad line is yielded as `Err` and the
//! iterator ends. In [`BadLineMode::Warning`] a diagnostic is reported, the
//! rest of the line is skipped and parsing continues on the next line.
//!
//! ```rust
//! use tcsv_core::{BadLineMode, NullSink, Parser, ParserConfig};
//!
//! let lines = vec!["id,name", "1,ann", "2,bob,extra", "3,cy"];
//! let mut parser = Parser::new(lines, ParserConfig::new(BadLineMode::Warning))
//!     .unwrap()
//!     .with_sink(Box::new(NullSink));
//!
//! let names: Vec<String> = parser
//!     .by_ref()
//!     .map(|row| row.unwrap().values()[1].text().to_string())
//!     .collect();
//!
//! assert_eq!(names, vec!["ann", "cy"]);
//! assert!(parser.had_errors());
//! ```

use crate::config::ParserConfig;
use crate::diagnostics::{BadLineHandler, DiagnosticSink, NullSink};
use crate::error::{CsvError, CsvResult, ParseErrorKind};
use crate::header::Header;
use crate::lex::{IterLines, Lexer, LineSource, SourcePos, Token, TokenKind, TokenMark};
use crate::row::{Row, Value};
use std::sync::Arc;
use tracing::{debug, trace};

/// The last two tokens seen. `current` is `None` only before the first pull.
#[derive(Debug, Default)]
struct TokenWindow {
    previous: Option<TokenMark>,
    current: Option<Token>,
}

impl TokenWindow {
    /// Slide `next` in, returning the token it replaces.
    fn shift(&mut self, next: Token) -> Option<Token> {
        let old = self.current.replace(next);
        self.previous = old.as_ref().map(Token::mark);
        old
    }

    fn current_kind(&self) -> Option<TokenKind> {
        self.current.as_ref().map(Token::kind)
    }

    /// A separator at the current position has nothing before it.
    fn previous_is_separator(&self) -> bool {
        self.previous.map_or(true, |mark| mark.kind.is_separator())
    }
}

/// Streaming typed-CSV parser.
///
/// Implements `Iterator<Item = CsvResult<Row>>`. The parser owns all of its
/// state; several parsers can share one header through [`Parser::with_header`]
/// and run on different threads.
pub struct Parser<S> {
    lexer: Lexer<S>,
    header: Arc<Header>,
    config: ParserConfig,
    handler: BadLineHandler,
    window: TokenWindow,
    values: Vec<Value>,
    column_index: usize,
    /// The current line hit an error and must be skipped.
    error_state: bool,
    /// The last pull failed in the lexer, so `window.current` is stale.
    lexer_failed: bool,
    /// A NEWLINE was consumed; pull its successor before scanning again.
    line_done: bool,
    finished: bool,
}

impl<I> Parser<IterLines<I>>
where
    I: Iterator,
    I::Item: Into<String>,
{
    /// Parse in-memory lines, reading the header from the first one.
    pub fn new<L>(lines: L, config: ParserConfig) -> CsvResult<Self>
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self::from_source(IterLines::new(lines), config)
    }

    /// Parse in-memory lines against a header obtained elsewhere.
    pub fn with_header<L>(header: Arc<Header>, lines: L, config: ParserConfig) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self::with_header_from_source(header, IterLines::new(lines), config)
    }
}

impl<S: LineSource> Parser<S> {
    /// Parse a line source, reading the header from its first logical line.
    ///
    /// A lexer error on the header line is returned regardless of the bad-line
    /// mode, since there is no schema to recover into.
    pub fn from_source(source: S, config: ParserConfig) -> CsvResult<Self> {
        let mut parser = Self::build(Arc::new(Header::default()), source, config);
        let header = parser.parse_header()?;
        debug!("Parsed header with {} columns", header.column_count());
        parser.header = Arc::new(header);
        Ok(parser)
    }

    /// Parse a line source whose lines are all data, against a shared header.
    pub fn with_header_from_source(header: Arc<Header>, source: S, config: ParserConfig) -> Self {
        Self::build(header, source, config)
    }

    fn build(header: Arc<Header>, source: S, config: ParserConfig) -> Self {
        Self {
            lexer: Lexer::new(source).allow_multiline_strings(config.allow_multiline_strings),
            header,
            config,
            handler: BadLineHandler::new(config.bad_line_mode),
            window: TokenWindow::default(),
            values: Vec::new(),
            column_index: 0,
            error_state: false,
            lexer_failed: false,
            line_done: false,
            finished: false,
        }
    }

    /// Send bad-line diagnostics to `sink` instead of standard error.
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.handler.set_sink(sink);
        self
    }

    /// Drop bad-line diagnostics. `had_errors` still records them.
    pub fn without_diagnostics(self) -> Self {
        self.with_sink(Box::new(NullSink))
    }

    /// Header every row is checked against.
    #[inline]
    pub fn header(&self) -> &Arc<Header> {
        &self.header
    }

    /// Configuration this parser was built with.
    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// `true` once at least one line was dropped in warning mode.
    #[inline]
    pub fn had_errors(&self) -> bool {
        self.handler.had_errors()
    }

    fn parse_header(&mut self) -> CsvResult<Header> {
        let mut columns = Vec::new();
        self.advance()?;
        loop {
            match self.window.current_kind() {
                Some(TokenKind::Newline) => {
                    self.line_done = true;
                    break;
                }
                Some(TokenKind::EndOfFile) | None => break,
                Some(TokenKind::Comma) => {
                    self.advance()?;
                }
                Some(TokenKind::Value) => {
                    if let Some(token) = self.advance()? {
                        columns.push(token.into_text());
                    }
                }
            }
        }
        Ok(Header::new(columns))
    }

    /// Pull the next token into the window, returning the one it replaced.
    fn advance(&mut self) -> CsvResult<Option<Token>> {
        let next = self.lexer.next_token()?;
        Ok(self.window.shift(next))
    }

    fn next_row(&mut self) -> CsvResult<Option<Row>> {
        loop {
            if self.error_state {
                self.recover()?;
            }

            match self.scan_line() {
                Ok(row) => return Ok(row),
                Err(error) => self.fail(error)?,
            }
        }
    }

    /// Scan tokens until a row is complete or the input ends.
    fn scan_line(&mut self) -> CsvResult<Option<Row>> {
        if std::mem::take(&mut self.line_done) {
            self.advance()?;
        }

        loop {
            let Some(current) = self.window.current.as_ref() else {
                self.advance()?;
                continue;
            };
            let pos = current.pos();

            match current.kind() {
                TokenKind::Comma => {
                    self.expect_value_before(pos)?;
                    self.column_index += 1;
                    if self.column_index >= self.header.column_count() {
                        return Err(CsvError::parse(ParseErrorKind::TooManyCommas, pos));
                    }
                    self.advance()?;
                }
                TokenKind::Value => {
                    let column_type = match self.header.lookup_column_type(self.column_index) {
                        Ok(column_type) => Arc::clone(column_type),
                        Err(_) => {
                            // Blame the separator that opened the extra column.
                            let culprit = self.window.previous.map_or(pos, |mark| mark.pos);
                            return Err(CsvError::parse(ParseErrorKind::ColumnOverflow, culprit));
                        }
                    };
                    if let Some(token) = self.advance()? {
                        self.values.push(Value::new(column_type, token));
                    }
                }
                TokenKind::Newline => {
                    self.expect_value_before(pos)?;
                    self.line_done = true;
                    return Ok(Some(self.take_row()));
                }
                TokenKind::EndOfFile => {
                    if self.values.is_empty() {
                        return Ok(None);
                    }
                    return Ok(Some(self.take_row()));
                }
            }
        }
    }

    fn expect_value_before(&self, pos: SourcePos) -> CsvResult<()> {
        if self.window.previous_is_separator() {
            return Err(CsvError::parse(ParseErrorKind::EmptyValue, pos));
        }
        Ok(())
    }

    fn take_row(&mut self) -> Row {
        self.column_index = 0;
        let row = Row::new(std::mem::take(&mut self.values));
        trace!("Emitting row with {} values", row.len());
        row
    }

    /// Route an error through the bad-line policy.
    fn fail(&mut self, error: CsvError) -> CsvResult<()> {
        if !error.is_bad_line() {
            return Err(error);
        }
        if matches!(error, CsvError::Lex { .. }) {
            self.lexer_failed = true;
        }
        self.error_state = true;
        self.handler.handle(error)
    }

    /// Discard tokens up to and including the next NEWLINE.
    fn recover(&mut self) -> CsvResult<()> {
        self.values.clear();
        self.column_index = 0;
        self.line_done = false;
        let mut stale = std::mem::take(&mut self.lexer_failed);

        loop {
            match self.window.current_kind() {
                Some(TokenKind::Newline) if !stale => {
                    self.line_done = true;
                    break;
                }
                Some(TokenKind::EndOfFile) => break,
                _ => {}
            }

            stale = match self.advance() {
                Ok(_) => false,
                Err(error) if error.is_bad_line() => true,
                Err(error) => return Err(error),
            };
        }

        if let Some(token) = &self.window.current {
            debug!("Recovered from bad line, resuming after line {}", token.line());
        }
        self.error_state = false;
        Ok(())
    }
}

impl<S: LineSource> Iterator for Parser<S> {
    type Item = CsvResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_row() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}
