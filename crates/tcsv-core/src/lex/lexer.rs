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

//! Streaming CSV lexer.
//!
//! Turns a [`LineSource`] into a forward-only sequence of positioned
//! [`Token`]s. Only one physical line is held in memory at a time.
//!
//! # Rules
//!
//! - `,` yields a COMMA token.
//! - The end of a physical line yields a NEWLINE token. A final line without a
//!   `\n` terminator ends in END_OF_FILE instead.
//! - Anything else starts a value. A `"` toggles a quoted span and is dropped
//!   from the text; inside a quoted span commas are ordinary characters. A
//!   closing quote does not end the value.
//! - A quoted span that reaches the end of its line fails with an
//!   "unterminated string" error unless multi-line strings are enabled, in
//!   which case the line break is kept in the value as `\n`.
//! - Once the input is exhausted every request yields END_OF_FILE at the
//!   same position.
//!
//! # Examples
//!
//! ```
//! use tcsv_core::lex::{Lexer, TokenKind};
//!
//! let kinds: Vec<TokenKind> = Lexer::from_lines(vec!["a,b", "1,2"])
//!     .map(|token| token.unwrap().kind())
//!     .collect();
//!
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Value,
//!         TokenKind::Comma,
//!         TokenKind::Value,
//!         TokenKind::Newline,
//!         TokenKind::Value,
//!         TokenKind::Comma,
//!         TokenKind::Value,
//!         TokenKind::EndOfFile,
//!     ]
//! );
//! ```

use super::source::{IterLines, LineSource};
use super::span::SourcePos;
use super::token::{Token, TokenKind};
use crate::error::{CsvError, CsvResult, LexErrorKind};

/// Streaming lexer over a [`LineSource`].
pub struct Lexer<S> {
    source: S,
    /// Current physical line without its terminator.
    line: Vec<char>,
    /// Whether the current line arrived with a `\n` terminator.
    terminated: bool,
    /// 0-based character index into `line`.
    index: usize,
    line_number: usize,
    allow_multiline_strings: bool,
    started: bool,
    exhausted: bool,
    /// Set once the iterator interface has handed out END_OF_FILE.
    fused: bool,
}

impl<I> Lexer<IterLines<I>>
where
    I: Iterator,
    I::Item: Into<String>,
{
    /// Lex an in-memory sequence of lines.
    pub fn from_lines<L>(lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self::new(IterLines::new(lines))
    }
}

impl<S: LineSource> Lexer<S> {
    /// Lex `source` with multi-line strings disabled.
    pub fn new(source: S) -> Self {
        let line_number = source.first_line().saturating_sub(1);
        Self {
            source,
            line: Vec::new(),
            terminated: true,
            index: 0,
            line_number,
            allow_multiline_strings: false,
            started: false,
            exhausted: false,
            fused: false,
        }
    }

    /// Let quoted values span physical lines.
    pub fn allow_multiline_strings(mut self, allow: bool) -> Self {
        self.allow_multiline_strings = allow;
        self
    }

    /// Line number of the line currently being lexed.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns `true` once the line source has run dry.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Produce the next token.
    ///
    /// After the input is exhausted this keeps returning END_OF_FILE; the
    /// caller decides when to stop. The only bad-line failure is an
    /// unterminated quoted value. I/O failures of the source are passed on.
    pub fn next_token(&mut self) -> CsvResult<Token> {
        if !self.started {
            self.started = true;
            self.advance_line()?;
        }

        if self.exhausted {
            return Ok(Token::end_of_file(self.pos()));
        }

        match self.current_char() {
            Some(',') => {
                let pos = self.pos();
                self.index += 1;
                Ok(Token::comma(pos))
            }
            Some(_) => self.scan_value(),
            None => self.end_of_line(),
        }
    }

    #[inline]
    fn pos(&self) -> SourcePos {
        SourcePos::new(self.line_number, self.index + 1)
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.line.get(self.index).copied()
    }

    fn end_of_line(&mut self) -> CsvResult<Token> {
        let pos = self.pos();
        let terminated = self.terminated;
        if self.advance_line()? || terminated {
            Ok(Token::newline(pos))
        } else {
            Ok(Token::end_of_file(pos))
        }
    }

    /// Pull the next physical line. Returns `false` when the source is empty.
    fn advance_line(&mut self) -> CsvResult<bool> {
        match self.source.next_line()? {
            Some(mut text) => {
                self.terminated = strip_terminator(&mut text);
                self.line = text.chars().collect();
                self.index = 0;
                self.line_number += 1;
                Ok(true)
            }
            None => {
                // After a terminated line the input ends at the start of the
                // next (empty) line; otherwise it ends where this line does.
                if self.terminated {
                    self.line.clear();
                    self.index = 0;
                    self.line_number += 1;
                }
                self.exhausted = true;
                Ok(false)
            }
        }
    }

    fn scan_value(&mut self) -> CsvResult<Token> {
        let start = self.pos();
        let mut text = String::new();
        let mut quoted = false;

        loop {
            match self.current_char() {
                Some('"') => {
                    quoted = !quoted;
                    self.index += 1;
                }
                Some(',') if !quoted => break,
                Some(ch) => {
                    text.push(ch);
                    self.index += 1;
                }
                None if !quoted => break,
                None => {
                    if !self.allow_multiline_strings || !self.advance_line()? {
                        return Err(CsvError::lex(
                            LexErrorKind::UnterminatedString,
                            start.column(),
                        ));
                    }
                    text.push('\n');
                }
            }
        }

        Ok(Token::value(text, start))
    }
}

/// Strip a trailing `\n` or `\r\n`, reporting whether one was present.
fn strip_terminator(text: &mut String) -> bool {
    if !text.ends_with('\n') {
        return false;
    }
    text.pop();
    if text.ends_with('\r') {
        text.pop();
    }
    true
}

impl<S: LineSource> Iterator for Lexer<S> {
    type Item = CsvResult<Token>;

    /// Yields tokens up to and including the first END_OF_FILE.
    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.kind() == TokenKind::EndOfFile => self.fused = true,
            Err(CsvError::Io(_)) => self.fused = true,
            _ => {}
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(lines: &[&str]) -> Vec<Token> {
        Lexer::from_lines(lines.iter().copied())
            .collect::<CsvResult<Vec<_>>>()
            .unwrap()
    }

    fn kinds(lines: &[&str]) -> Vec<TokenKind> {
        tokens(lines).iter().map(Token::kind).collect()
    }

    // ==================== Basic tokens ====================

    #[test]
    fn test_simple_row_positions() {
        let toks = tokens(&["a,bc"]);
        assert_eq!(toks.len(), 4);
        assert_eq!(toks[0], Token::value("a", SourcePos::new(1, 1)));
        assert_eq!(toks[1], Token::comma(SourcePos::new(1, 2)));
        assert_eq!(toks[2], Token::value("bc", SourcePos::new(1, 3)));
        assert_eq!(toks[3], Token::end_of_file(SourcePos::new(1, 5)));
    }

    #[test]
    fn test_split_lines_get_newlines_between() {
        assert_eq!(
            kinds(&["a", "b"]),
            vec![
                TokenKind::Value,
                TokenKind::Newline,
                TokenKind::Value,
                TokenKind::EndOfFile
            ]
        );
    }

    #[test]
    fn test_terminated_lines() {
        let toks = tokens(&["a,b\n", "1,2\n"]);
        let k: Vec<_> = toks.iter().map(Token::kind).collect();
        assert_eq!(
            k,
            vec![
                TokenKind::Value,
                TokenKind::Comma,
                TokenKind::Value,
                TokenKind::Newline,
                TokenKind::Value,
                TokenKind::Comma,
                TokenKind::Value,
                TokenKind::Newline,
                TokenKind::EndOfFile
            ]
        );
        assert_eq!(toks[3].pos(), SourcePos::new(1, 4));
        assert_eq!(toks[7].pos(), SourcePos::new(2, 4));
        assert_eq!(toks[8].pos(), SourcePos::new(3, 1));
    }

    #[test]
    fn test_crlf_terminator() {
        let toks = tokens(&["x\r\n", "y"]);
        assert_eq!(toks[0].text(), Some("x"));
        assert_eq!(toks[1].kind(), TokenKind::Newline);
        assert_eq!(toks[2].text(), Some("y"));
    }

    #[test]
    fn test_empty_input() {
        let toks = tokens(&[]);
        assert_eq!(toks, vec![Token::end_of_file(SourcePos::new(1, 1))]);
    }

    #[test]
    fn test_empty_line_is_bare_newline() {
        assert_eq!(
            kinds(&["", "a"]),
            vec![TokenKind::Newline, TokenKind::Value, TokenKind::EndOfFile]
        );
    }

    #[test]
    fn test_consecutive_commas() {
        let toks = tokens(&["a,,b"]);
        assert_eq!(toks[1], Token::comma(SourcePos::new(1, 2)));
        assert_eq!(toks[2], Token::comma(SourcePos::new(1, 3)));
    }

    #[test]
    fn test_whitespace_is_kept() {
        let toks = tokens(&[" a , b "]);
        assert_eq!(toks[0].text(), Some(" a "));
        assert_eq!(toks[2].text(), Some(" b "));
    }

    // ==================== Quoting ====================

    #[test]
    fn test_quoted_comma_is_content() {
        let toks = tokens(&["\"hello, world\",2"]);
        assert_eq!(toks[0], Token::value("hello, world", SourcePos::new(1, 1)));
        assert_eq!(toks[1].kind(), TokenKind::Comma);
        assert_eq!(toks[2].text(), Some("2"));
    }

    #[test]
    fn test_closing_quote_does_not_end_value() {
        let toks = tokens(&["\"ab\"cd,e"]);
        assert_eq!(toks[0].text(), Some("abcd"));
        assert_eq!(toks[1].kind(), TokenKind::Comma);
    }

    #[test]
    fn test_quotes_inside_value() {
        let toks = tokens(&["x\"y,z\"w"]);
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].text(), Some("xy,zw"));
    }

    #[test]
    fn test_empty_quoted_value() {
        let toks = tokens(&["\"\",a"]);
        assert_eq!(toks[0], Token::value("", SourcePos::new(1, 1)));
    }

    #[test]
    fn test_unterminated_string_fails() {
        let mut lexer = Lexer::from_lines(vec!["a,\"open", "next"]);
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Value);
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Comma);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err, CsvError::lex(LexErrorKind::UnterminatedString, 3));

        // The lexer resumes at the end of the failed line.
        let newline = lexer.next_token().unwrap();
        assert_eq!(newline, Token::newline(SourcePos::new(1, 8)));
        assert_eq!(lexer.next_token().unwrap().text(), Some("next"));
    }

    #[test]
    fn test_multiline_string() {
        let mut lexer =
            Lexer::from_lines(vec!["\"first", "second\",x"]).allow_multiline_strings(true);
        let value = lexer.next_token().unwrap();
        assert_eq!(value, Token::value("first\nsecond", SourcePos::new(1, 1)));
        assert_eq!(lexer.next_token().unwrap(), Token::comma(SourcePos::new(2, 8)));
        assert_eq!(lexer.next_token().unwrap().text(), Some("x"));
        assert_eq!(lexer.line_number(), 2);
    }

    #[test]
    fn test_multiline_string_keeps_terminated_lines_verbatim() {
        let mut lexer =
            Lexer::from_lines(vec!["\"a\r\n", "\n", "b\"\n"]).allow_multiline_strings(true);
        assert_eq!(lexer.next_token().unwrap().text(), Some("a\n\nb"));
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Newline);
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::EndOfFile);
    }

    #[test]
    fn test_multiline_string_unterminated_at_eof() {
        let mut lexer = Lexer::from_lines(vec!["x,\"never"]).allow_multiline_strings(true);
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert!(matches!(
            lexer.next_token(),
            Err(CsvError::Lex {
                kind: LexErrorKind::UnterminatedString,
                column: 3
            })
        ));
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::EndOfFile);
    }

    // ==================== End of input ====================

    #[test]
    fn test_eof_repeats_at_frozen_position() {
        let mut lexer = Lexer::from_lines(vec!["a"]);
        lexer.next_token().unwrap();
        let first = lexer.next_token().unwrap();
        assert_eq!(first.kind(), TokenKind::EndOfFile);
        for _ in 0..5 {
            assert_eq!(lexer.next_token().unwrap(), first);
        }
        assert!(lexer.is_exhausted());
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut lexer = Lexer::from_lines(vec!["a"]);
        assert!(lexer.next().is_some());
        assert!(matches!(lexer.next(), Some(Ok(ref t)) if t.kind() == TokenKind::EndOfFile));
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_first_line_offset() {
        let source = IterLines::new(vec!["a", "b"]).starting_at(100);
        let toks: Vec<_> = Lexer::new(source).map(Result::unwrap).collect();
        assert_eq!(toks[0].line(), 100);
        assert_eq!(toks[2].line(), 101);
    }

    #[test]
    fn test_unicode_columns_count_chars() {
        let toks = tokens(&["é,ü"]);
        assert_eq!(toks[1].column(), 2);
        assert_eq!(toks[2], Token::value("ü", SourcePos::new(1, 3)));
    }
}
