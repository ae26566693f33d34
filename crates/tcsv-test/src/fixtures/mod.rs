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

//! Canonical inputs organised by category:
//!
//! - well-formed files (this module)
//! - **errors**: bad lines and the message each one must produce
//! - **patterns**: type pattern maps matching the well-formed files

pub mod errors;
pub mod patterns;

use crate::FixtureList;

/// Returns all well-formed fixtures for iteration.
pub fn all() -> FixtureList {
    vec![
        ("people", people),
        ("quoted", quoted),
        ("narrow_rows", narrow_rows),
        ("crlf", crlf),
        ("no_trailing_newline", no_trailing_newline),
    ]
}

/// Three people under an `int,str,date` header.
pub fn people() -> &'static str {
    "int,str,date\n\
     1,ann,2024-01-05\n\
     2,bob,2023-12-31\n\
     3,cy,2020-02-29\n"
}

/// Quoted values holding commas and spaces.
pub fn quoted() -> &'static str {
    "str,int\n\
     \"hello, world\",2\n\
     \"a \"b,3\n\
     plain,4\n"
}

/// Rows narrower than the header.
pub fn narrow_rows() -> &'static str {
    "int,str,str\n\
     1\n\
     2,two\n\
     3,three,drei\n"
}

/// Windows line endings.
pub fn crlf() -> &'static str {
    "int,str\r\n1,a\r\n2,b\r\n"
}

/// Last row without a terminating newline.
pub fn no_trailing_newline() -> &'static str {
    "int,str\n1,a\n2,b"
}

/// A quoted value spanning two physical lines. Only parses with multi-line
/// strings enabled.
pub fn multiline() -> &'static str {
    "str,int\n\
     \"first line\n\
     second line\",1\n\
     single,2\n"
}
