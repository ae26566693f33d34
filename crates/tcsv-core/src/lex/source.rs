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

//! Line sources feeding the lexer.
//!
//! The lexer pulls one physical line at a time. Splitting the input into
//! lines is the source's job; a line may keep its `\n` / `\r\n` terminator or
//! arrive already stripped.

use crate::error::CsvResult;

/// A forward-only supplier of physical lines.
pub trait LineSource {
    /// Pull the next line, `Ok(None)` once the input is exhausted.
    fn next_line(&mut self) -> CsvResult<Option<String>>;

    /// Line number of the first line this source yields.
    ///
    /// Sources that hand out a slice of a larger input override this so that
    /// positions stay absolute.
    fn first_line(&self) -> usize {
        1
    }
}

impl<L: LineSource + ?Sized> LineSource for Box<L> {
    fn next_line(&mut self) -> CsvResult<Option<String>> {
        (**self).next_line()
    }

    fn first_line(&self) -> usize {
        (**self).first_line()
    }
}

/// Adapts any iterator of string-like items into a [`LineSource`].
///
/// ```
/// use tcsv_core::lex::{IterLines, LineSource};
///
/// let mut lines = IterLines::new(vec!["a,b", "1,2"]);
/// assert_eq!(lines.next_line().unwrap(), Some("a,b".to_string()));
/// assert_eq!(lines.next_line().unwrap(), Some("1,2".to_string()));
/// assert_eq!(lines.next_line().unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct IterLines<I> {
    iter: I,
    first_line: usize,
}

impl<I> IterLines<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    /// Number `lines` from 1.
    pub fn new<L>(lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: lines.into_iter(),
            first_line: 1,
        }
    }

    /// Number the lines starting at `line` instead of 1.
    pub fn starting_at(mut self, line: usize) -> Self {
        self.first_line = line.max(1);
        self
    }
}

impl<I> LineSource for IterLines<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    fn next_line(&mut self) -> CsvResult<Option<String>> {
        Ok(self.iter.next().map(Into::into))
    }

    fn first_line(&self) -> usize {
        self.first_line
    }
}
