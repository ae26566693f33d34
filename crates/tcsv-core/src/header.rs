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

//! Header schema: the ordered column-type declarations of the first line.

use std::sync::Arc;
use thiserror::Error;

/// A positional lookup past the declared header width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("column index {index} is out of range for a header with {count} columns")]
pub struct ColumnOutOfRange {
    pub index: usize,
    pub count: usize,
}

/// Ordered column-type declarations.
///
/// Column identity is purely positional: the Nth value of a row belongs to
/// the Nth declared type. A header is never mutated after construction and is
/// shared between parsers as `Arc<Header>`.
///
/// ```
/// use tcsv_core::Header;
///
/// let header = Header::new(["int", "str"]);
/// assert_eq!(header.column_count(), 2);
/// assert_eq!(&**header.lookup_column_type(1).unwrap(), "str");
/// assert!(header.lookup_column_type(2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    columns: Vec<Arc<str>>,
}

impl Header {
    /// Build a header from column types in declaration order.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: columns.into_iter().map(|c| Arc::from(c.as_ref())).collect(),
        }
    }

    /// Number of declared columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `true` for a header without columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column type declared at `index`; fails for every `index >= column_count()`.
    pub fn lookup_column_type(&self, index: usize) -> Result<&Arc<str>, ColumnOutOfRange> {
        self.columns.get(index).ok_or(ColumnOutOfRange {
            index,
            count: self.columns.len(),
        })
    }

    /// Declared column types.
    #[inline]
    pub fn columns(&self) -> &[Arc<str>] {
        &self.columns
    }

    /// Column types as string slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| &**c)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Header {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_range() {
        let header = Header::new(["a", "b", "c"]);
        assert_eq!(&**header.lookup_column_type(0).unwrap(), "a");
        assert_eq!(&**header.lookup_column_type(2).unwrap(), "c");
    }

    #[test]
    fn test_lookup_out_of_range() {
        let header = Header::new(["a", "b"]);
        assert_eq!(
            header.lookup_column_type(2),
            Err(ColumnOutOfRange { index: 2, count: 2 })
        );
        assert!(header.lookup_column_type(usize::MAX).is_err());
    }

    #[test]
    fn test_empty_header_rejects_everything() {
        let header = Header::default();
        assert!(header.is_empty());
        assert_eq!(header.column_count(), 0);
        assert!(header.lookup_column_type(0).is_err());
    }

    #[test]
    fn test_from_iterator_and_iter() {
        let header: Header = vec!["x".to_string(), "y".to_string()].into_iter().collect();
        assert_eq!(header.iter().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(&*header.columns()[1], "y");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = ColumnOutOfRange { index: 3, count: 2 };
        assert_eq!(
            err.to_string(),
            "column index 3 is out of range for a header with 2 columns"
        );
    }
}
