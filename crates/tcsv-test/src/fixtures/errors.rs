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

//! Bad-line samples.

/// One malformed input and what it must produce.
#[derive(Debug, Clone, Copy)]
pub struct BadLine {
    pub name: &'static str,
    pub input: &'static str,
    /// Message of the first diagnostic.
    pub message: &'static str,
    /// Line of the first diagnostic, `None` for lexer errors.
    pub line: Option<usize>,
    /// Rows that survive in warning mode.
    pub surviving_rows: usize,
}

pub const EMPTY_VALUE: &str = "Empty value!";
pub const TOO_MANY_COMMAS: &str = "Too many commas in row!";
pub const COLUMN_OVERFLOW: &str = "Could not get column type, too many commas!";
pub const UNTERMINATED: &str = "Unterminated string! Did you mean to turn enable multi-line strings?";

/// Every kind of bad line the parser detects.
pub fn bad_line_samples() -> Vec<BadLine> {
    vec![
        BadLine {
            name: "double_comma",
            input: "a,b,c\n1,,3\n4,5,6\n",
            message: EMPTY_VALUE,
            line: Some(2),
            surviving_rows: 1,
        },
        BadLine {
            name: "leading_comma",
            input: "a,b\n,1\n2,3\n",
            message: EMPTY_VALUE,
            line: Some(2),
            surviving_rows: 1,
        },
        BadLine {
            name: "trailing_comma",
            input: "a,b\n1,2\n3,\n",
            message: EMPTY_VALUE,
            line: Some(3),
            surviving_rows: 1,
        },
        BadLine {
            name: "blank_line",
            input: "a,b\n1,2\n\n3,4\n",
            message: EMPTY_VALUE,
            line: Some(3),
            surviving_rows: 2,
        },
        BadLine {
            name: "too_wide",
            input: "a,b\n1,2,3\n4,5\n",
            message: TOO_MANY_COMMAS,
            line: Some(2),
            surviving_rows: 1,
        },
        BadLine {
            name: "no_header_columns",
            input: "\nx\n",
            message: COLUMN_OVERFLOW,
            line: Some(1),
            surviving_rows: 0,
        },
        BadLine {
            name: "unterminated_quote",
            input: "a,b\n1,\"open\n2,3\n",
            message: UNTERMINATED,
            line: None,
            surviving_rows: 1,
        },
    ]
}
