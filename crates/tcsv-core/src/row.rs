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

//! Typed values and rows produced by the parser.

use crate::lex::{SourcePos, Token};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One cell: its declared column type plus the value token it came from.
///
/// The column type is resolved from the header position when the value is
/// parsed and never re-derived.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Value {
    column_type: Arc<str>,
    token: Token,
}

impl Value {
    /// Pair a value token with its column type.
    pub fn new(column_type: impl Into<Arc<str>>, token: Token) -> Self {
        Self {
            column_type: column_type.into(),
            token,
        }
    }

    /// Column type declared by the header for this position.
    #[inline]
    pub fn column_type(&self) -> &str {
        &self.column_type
    }

    /// Raw text of the cell, quotes removed.
    #[inline]
    pub fn text(&self) -> &str {
        self.token.text().unwrap_or_default()
    }

    /// The token this value was built from.
    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Where the value starts in the input.
    #[inline]
    pub fn pos(&self) -> SourcePos {
        self.token.pos()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} = {}]", self.column_type, self.text())
    }
}

/// The values parsed from one logical line, in header order.
///
/// A row may be narrower than the header but never wider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Wrap values already in column order.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Values in column order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Take the values out of the row.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of values, at most the header width.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` for a row without values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First value declared with `column_type`.
    pub fn get(&self, column_type: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.column_type() == column_type)
    }

    /// Raw texts in column order.
    pub fn texts(&self) -> Vec<&str> {
        self.values.iter().map(Value::text).collect()
    }

    /// Column type to text. When two columns share a type the later one wins.
    ///
    /// ```
    /// use tcsv_core::{Parser, ParserConfig, BadLineMode};
    ///
    /// let mut parser = Parser::new(vec!["id,name", "7,ann"], ParserConfig::new(BadLineMode::Error)).unwrap();
    /// let row = parser.next().unwrap().unwrap();
    /// let map = row.to_map();
    /// assert_eq!(map["id"], "7");
    /// assert_eq!(map["name"], "ann");
    /// ```
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|v| (v.column_type().to_string(), v.text().to_string()))
            .collect()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.values {
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
