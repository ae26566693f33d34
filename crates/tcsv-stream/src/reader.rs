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

//! Buffered line reading over any [`Read`].
//!
//! [`LineReader`] hands out physical lines with their line numbers.
//! [`ReaderLines`] adapts it into a [`LineSource`] so a core
//! [`Parser`](tcsv_core::Parser) can run directly on a file or socket.

use crate::error::{StreamError, StreamResult};
use std::io::{BufRead, BufReader, Read};
use tcsv_core::lex::LineSource;
use tcsv_core::CsvResult;

/// Default read buffer size.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Buffered line reader with line number tracking.
///
/// Handles LF and CRLF line endings. [`next_line`](Self::next_line) strips
/// the terminator; [`next_raw_line`](Self::next_raw_line) keeps it so the
/// lexer can tell whether the final line was terminated.
///
/// # Examples
///
/// ```rust
/// use tcsv_stream::LineReader;
/// use std::io::Cursor;
///
/// let input = "a,b\r\n1,2\n3,4";
/// let mut reader = LineReader::new(Cursor::new(input));
///
/// assert_eq!(reader.next_line().unwrap(), Some((1, "a,b".to_string())));
/// assert_eq!(reader.next_raw_line().unwrap(), Some((2, "1,2\n".to_string())));
/// assert_eq!(reader.next_line().unwrap(), Some((3, "3,4".to_string())));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity.max(1), reader),
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Number of the last line read, 0 before the first.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line with its terminator removed.
    pub fn next_line(&mut self) -> StreamResult<Option<(usize, String)>> {
        Ok(self.next_raw_line()?.map(|(number, mut line)| {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            (number, line)
        }))
    }

    /// Read the next line exactly as it appears in the input.
    pub fn next_raw_line(&mut self) -> StreamResult<Option<(usize, String)>> {
        self.buffer.clear();

        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.line_number += 1;
                Ok(Some((self.line_number, std::mem::take(&mut self.buffer))))
            }
            Err(e) => Err(StreamError::Io(e)),
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = StreamResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// A [`LineSource`] reading from any [`Read`].
///
/// ```rust
/// use tcsv_core::{Parser, ParserConfig};
/// use tcsv_stream::ReaderLines;
/// use std::io::Cursor;
///
/// let source = ReaderLines::new(Cursor::new("id,name\n1,ann\n"));
/// let rows: Vec<_> = Parser::from_source(source, ParserConfig::strict())
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(rows.len(), 1);
/// ```
pub struct ReaderLines<R: Read> {
    reader: LineReader<R>,
}

impl<R: Read> ReaderLines<R> {
    /// Read lines from `reader` with the default buffer size.
    pub fn new(reader: R) -> Self {
        Self::from_line_reader(LineReader::new(reader))
    }

    /// Continue from a [`LineReader`] that may already have consumed lines.
    pub fn from_line_reader(reader: LineReader<R>) -> Self {
        Self { reader }
    }

    /// Recover the underlying line reader.
    pub fn into_inner(self) -> LineReader<R> {
        self.reader
    }
}

impl<R: Read> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> CsvResult<Option<String>> {
        let line = self.reader.next_raw_line()?;
        Ok(line.map(|(_, text)| text))
    }

    /// Continues the numbering of lines already consumed from the reader.
    fn first_line(&self) -> usize {
        self.reader.line_number() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};
    use tcsv_core::{CsvError, Parser, ParserConfig};

    #[test]
    fn test_read_lines() {
        let input = "line1\nline2\nline3";
        let mut reader = LineReader::new(Cursor::new(input));

        assert_eq!(reader.next_line().unwrap(), Some((1, "line1".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((2, "line2".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((3, "line3".to_string())));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    // ==================== Empty input tests ====================

    #[test]
    fn test_empty_input() {
        let mut reader = LineReader::new(Cursor::new(""));
        assert_eq!(reader.next_line().unwrap(), None);
        assert_eq!(reader.line_number(), 0);
    }

    #[test]
    fn test_multiple_empty_lines() {
        let mut reader = LineReader::new(Cursor::new("\n\n"));
        assert_eq!(reader.next_line().unwrap(), Some((1, "".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((2, "".to_string())));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    // ==================== Line ending tests ====================

    #[test]
    fn test_raw_lines_keep_terminators() {
        let mut reader = LineReader::new(Cursor::new("a\r\nb\nc"));
        assert_eq!(reader.next_raw_line().unwrap(), Some((1, "a\r\n".to_string())));
        assert_eq!(reader.next_raw_line().unwrap(), Some((2, "b\n".to_string())));
        assert_eq!(reader.next_raw_line().unwrap(), Some((3, "c".to_string())));
    }

    #[test]
    fn test_mixed_line_endings() {
        let reader = LineReader::new(Cursor::new("l1\nl2\r\nl3"));
        let lines: Vec<_> = reader.map(Result::unwrap).map(|(_, l)| l).collect();
        assert_eq!(lines, vec!["l1", "l2", "l3"]);
    }

    #[test]
    fn test_small_capacity() {
        let mut reader = LineReader::with_capacity(Cursor::new("line1\nline2"), 1);
        assert_eq!(reader.next_line().unwrap(), Some((1, "line1".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((2, "line2".to_string())));
    }

    #[test]
    fn test_unicode_content() {
        let mut reader = LineReader::new(Cursor::new("你好,世界\n🎉"));
        assert_eq!(reader.next_line().unwrap(), Some((1, "你好,世界".to_string())));
        assert_eq!(reader.next_line().unwrap(), Some((2, "🎉".to_string())));
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let mut reader = LineReader::new(Cursor::new(vec![b'a', 0xff, b'\n']));
        assert!(matches!(reader.next_line(), Err(StreamError::Io(_))));
    }

    // ==================== Line source tests ====================

    #[test]
    fn test_reader_lines_continue_numbering() {
        let mut reader = LineReader::new(Cursor::new("skip\na,b\n"));
        reader.next_line().unwrap();
        let source = ReaderLines::from_line_reader(reader);
        assert_eq!(source.first_line(), 2);
    }

    #[test]
    fn test_parser_over_reader() {
        let source = ReaderLines::new(Cursor::new("a,b\n1,2\n3,4"));
        let rows: Vec<_> = Parser::from_source(source, ParserConfig::strict())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].texts(), vec!["3", "4"]);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_io_error_aborts_in_warning_mode() {
        let source = ReaderLines::new(FailingReader);
        let result = Parser::from_source(source, ParserConfig::lenient());
        assert!(matches!(result, Err(CsvError::Io(ref m)) if m.contains("disk on fire")));
    }
}
