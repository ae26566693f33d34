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

//! Token model produced by the lexer.

use super::span::SourcePos;
use std::fmt;

/// The kind of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// A `,` separator.
    Comma,
    /// The boundary between two physical lines.
    Newline,
    /// A field value (quotes already removed).
    Value,
    /// End of input. Repeats forever once reached.
    EndOfFile,
}

impl TokenKind {
    /// Returns `true` for tokens that mark an empty position when they
    /// appear on both sides of a separator.
    #[inline]
    pub fn is_separator(self) -> bool {
        matches!(self, TokenKind::Comma | TokenKind::Newline)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::Newline => write!(f, "NEWLINE"),
            TokenKind::Value => write!(f, "VALUE"),
            TokenKind::EndOfFile => write!(f, "END_OF_FILE"),
        }
    }
}

/// A positioned token. Only [`TokenKind::Value`] tokens carry text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    kind: TokenKind,
    pos: SourcePos,
    text: Option<String>,
}

/// Kind and position of a token whose text is no longer needed.
///
/// The parser keeps one of these for the previous token, which is all the
/// empty-value and column-overflow checks look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMark {
    pub kind: TokenKind,
    pub pos: SourcePos,
}

impl Token {
    /// A COMMA token at `pos`.
    #[inline]
    pub fn comma(pos: SourcePos) -> Self {
        Self {
            kind: TokenKind::Comma,
            pos,
            text: None,
        }
    }

    /// A NEWLINE token at `pos`.
    #[inline]
    pub fn newline(pos: SourcePos) -> Self {
        Self {
            kind: TokenKind::Newline,
            pos,
            text: None,
        }
    }

    /// An END_OF_FILE token at `pos`.
    #[inline]
    pub fn end_of_file(pos: SourcePos) -> Self {
        Self {
            kind: TokenKind::EndOfFile,
            pos,
            text: None,
        }
    }

    /// A VALUE token holding `text`.
    #[inline]
    pub fn value(text: impl Into<String>, pos: SourcePos) -> Self {
        Self {
            kind: TokenKind::Value,
            pos,
            text: Some(text.into()),
        }
    }

    /// Kind of this token.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Position of the token's first character.
    #[inline]
    pub fn pos(&self) -> SourcePos {
        self.pos
    }

    /// 1-based line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.pos.line()
    }

    /// 1-based column.
    #[inline]
    pub fn column(&self) -> usize {
        self.pos.column()
    }

    /// Decoded text of a value token, `None` for every other kind.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Consumes the token, returning its text (empty for non-value tokens).
    pub fn into_text(self) -> String {
        self.text.unwrap_or_default()
    }

    /// Kind and position without the text.
    #[inline]
    pub fn mark(&self) -> TokenMark {
        TokenMark {
            kind: self.kind,
            pos: self.pos,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} '{}' at {}", self.kind, text, self.pos),
            None => write!(f, "{} at {}", self.kind, self.pos),
        }
    }
}
