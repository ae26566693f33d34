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

//! Validate command - parse and type-check a typed CSV file

use super::run_to_stdout;
use crate::cli::InputArgs;
use crate::error::CliError;
use std::collections::BTreeMap;
use std::fs;
use tcsv_core::{TypePatterns, TypeValidator};
use tracing::debug;

/// Load a JSON object of `column type -> regex` into [`TypePatterns`].
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, is not a JSON object of strings,
/// or holds a pattern that does not compile.
pub fn load_patterns(path: &str) -> Result<TypePatterns, CliError> {
    let content = fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
    let pairs: BTreeMap<String, String> =
        serde_json::from_str(&content).map_err(|e| CliError::patterns(path, e.to_string()))?;
    debug!("Loaded {} type patterns from {}", pairs.len(), path);
    TypePatterns::from_pairs(pairs).map_err(|e| CliError::patterns(path, e.to_string()))
}

/// Parse a typed CSV file, check every value against the patterns in
/// `types`, and print every accepted row.
///
/// # Errors
///
/// Returns `Err` if either file cannot be read, the patterns are invalid, a
/// line or row is bad in error mode, or warning mode skipped anything.
pub fn validate(args: &InputArgs, types: &str) -> Result<(), CliError> {
    let patterns = load_patterns(types)?;
    let validator = TypeValidator::new(patterns, args.mode).with_sink(args.sink());
    run_to_stdout(args, Some(validator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_patterns() {
        let file = write_temp(r#"{"int": "^[0-9]+$", "str": "^.*$"}"#);
        let patterns = load_patterns(file.path().to_str().unwrap()).unwrap();
        assert_eq!(patterns.len(), 2);
        assert!(patterns.get("int").unwrap().is_match("42"));
    }

    #[test]
    fn test_load_patterns_not_an_object() {
        let file = write_temp("[1, 2]");
        let err = load_patterns(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CliError::Patterns { .. }));
    }

    #[test]
    fn test_load_patterns_bad_regex() {
        let file = write_temp(r#"{"int": "([0-9]"}"#);
        let err = load_patterns(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("int"));
    }

    #[test]
    fn test_load_patterns_missing_file() {
        let err = load_patterns("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
