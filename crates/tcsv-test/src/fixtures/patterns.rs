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

//! Type pattern maps.

use tcsv_core::TypePatterns;

/// Patterns for the `int`, `str` and `date` column types as `(name, regex)`.
pub fn standard_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("int", "^-?[0-9]+$"),
        ("str", "^.*$"),
        ("date", "^[0-9]{4}-[0-9]{2}-[0-9]{2}$"),
    ]
}

/// [`standard_pairs`] compiled.
pub fn standard() -> TypePatterns {
    TypePatterns::from_pairs(standard_pairs()).expect("standard patterns compile")
}

/// [`standard_pairs`] as the JSON object the CLI reads.
pub fn standard_json() -> String {
    let body = standard_pairs()
        .iter()
        .map(|(name, pattern)| format!("  \"{name}\": \"{pattern}\""))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{body}\n}}\n")
}
