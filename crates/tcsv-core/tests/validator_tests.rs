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

//! Parser plus validator pipelines.

use tcsv_core::{
    BadLineMode, CollectedDiagnostics, CsvError, CsvResult, Parser, ParserConfig, Row,
    TypePatterns, TypeValidator, ValidationErrorKind,
};
use tcsv_test::fixtures::{self, patterns};
use tcsv_test::lines;

fn id_name() -> TypePatterns {
    TypePatterns::from_pairs([("int", "^[0-9]+$"), ("str", "^[a-z]+$")]).unwrap()
}

fn run(text: &str, patterns: TypePatterns, mode: BadLineMode) -> (CsvResult<Vec<Row>>, bool, CollectedDiagnostics) {
    let collected = CollectedDiagnostics::new();
    let parser = Parser::new(lines(text), ParserConfig::new(mode))
        .unwrap()
        .with_sink(Box::new(collected.clone()));
    let mut validator = TypeValidator::new(patterns, mode).with_sink(Box::new(collected.clone()));
    let result = validator.validate(parser).collect();
    (result, validator.had_errors(), collected)
}

#[test]
fn test_valid_row_passes() {
    let (rows, had_errors, collected) = run("int,str\n12,bob\n", id_name(), BadLineMode::Warning);
    assert_eq!(rows.unwrap()[0].texts(), vec!["12", "bob"]);
    assert!(!had_errors);
    assert!(collected.is_empty());
}

#[test]
fn test_wrong_format_dropped_in_warning_mode() {
    let (rows, had_errors, collected) =
        run("int,str\n12,bob\nx,bob\n7,al\n", id_name(), BadLineMode::Warning);
    let rows = rows.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].texts(), vec!["7", "al"]);
    assert!(had_errors);
    assert_eq!(
        collected.messages(),
        vec!["Wrong type format! Value was 'x' expected regex format is '^[0-9]+$'".to_string()]
    );
    assert_eq!(collected.snapshot()[0].error().line(), Some(3));
}

#[test]
fn test_wrong_format_error_mode() {
    let (rows, _, _) = run("int,str\n12,bob\nx,bob\n", id_name(), BadLineMode::Error);
    let err = rows.unwrap_err();
    assert!(matches!(
        err,
        CsvError::Validation {
            kind: ValidationErrorKind::WrongTypeFormat { .. },
            ..
        }
    ));
    assert_eq!(err.column(), Some(1));
}

#[test]
fn test_unknown_type_reported_for_each_value() {
    let (rows, had_errors, collected) =
        run("money,int,money\n1,2,3\n", id_name(), BadLineMode::Warning);
    assert!(rows.unwrap().is_empty());
    assert!(had_errors);
    assert_eq!(
        collected.messages(),
        vec![
            "Unknown column type! 'money'".to_string(),
            "Unknown column type! 'money'".to_string(),
        ]
    );
}

#[test]
fn test_parse_and_validation_diagnostics_share_a_sink() {
    let (rows, _, collected) = run("int,str\n1,,\nx,y\n3,z\n", id_name(), BadLineMode::Warning);
    assert_eq!(rows.unwrap().len(), 1);
    assert_eq!(
        collected.messages(),
        vec![
            "Empty value!".to_string(),
            "Wrong type format! Value was 'x' expected regex format is '^[0-9]+$'".to_string(),
        ]
    );
}

#[test]
fn test_parse_error_passes_through_in_error_mode() {
    let (rows, had_errors, _) = run("int,str\n1,2,3\n", id_name(), BadLineMode::Error);
    assert!(matches!(rows.unwrap_err(), CsvError::Parse { .. }));
    assert!(!had_errors);
}

#[test]
fn test_standard_patterns_accept_people() {
    let (rows, had_errors, _) = run(fixtures::people(), patterns::standard(), BadLineMode::Error);
    assert_eq!(rows.unwrap().len(), 3);
    assert!(!had_errors);
}

#[test]
fn test_invalid_pattern_is_not_a_bad_line() {
    let err = TypePatterns::from_pairs([("int", "[0-9")]).unwrap_err();
    assert!(matches!(err, CsvError::Pattern { .. }));
    assert!(!err.is_bad_line());
}
