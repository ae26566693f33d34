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

//! Parser configuration and bad-line policy.

use std::fmt;
use std::str::FromStr;

/// What to do when a line (or row) is bad.
///
/// There is deliberately no `Default`: callers pick the policy at the call
/// site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BadLineMode {
    /// Surface the first bad line to the caller and stop.
    Error,
    /// Report a diagnostic, drop the line and keep going.
    Warning,
}

impl fmt::Display for BadLineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadLineMode::Error => write!(f, "error"),
            BadLineMode::Warning => write!(f, "warning"),
        }
    }
}

impl FromStr for BadLineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(BadLineMode::Error),
            "warning" | "warn" => Ok(BadLineMode::Warning),
            other => Err(format!(
                "unknown bad line mode '{other}', expected 'error' or 'warning'"
            )),
        }
    }
}

/// Options for [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```rust
/// use tcsv_core::{BadLineMode, ParserConfig};
///
/// let config = ParserConfig::new(BadLineMode::Warning).allow_multiline_strings(true);
/// assert_eq!(config.bad_line_mode, BadLineMode::Warning);
/// assert!(config.allow_multiline_strings);
///
/// let strict = ParserConfig::strict();
/// assert_eq!(strict.bad_line_mode, BadLineMode::Error);
/// assert!(!strict.allow_multiline_strings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// Policy for bad lines.
    pub bad_line_mode: BadLineMode,

    /// Let quoted values span physical lines.
    ///
    /// Default: false
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_multiline_strings: bool,
}

impl ParserConfig {
    /// Configuration with `bad_line_mode` and single-line strings.
    pub fn new(bad_line_mode: BadLineMode) -> Self {
        Self {
            bad_line_mode,
            allow_multiline_strings: false,
        }
    }

    /// Configuration that stops at the first bad line.
    pub fn strict() -> Self {
        Self::new(BadLineMode::Error)
    }

    /// Configuration that reports and skips bad lines.
    pub fn lenient() -> Self {
        Self::new(BadLineMode::Warning)
    }

    /// Let quoted values span physical lines.
    pub fn allow_multiline_strings(mut self, allow: bool) -> Self {
        self.allow_multiline_strings = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("error".parse::<BadLineMode>().unwrap(), BadLineMode::Error);
        assert_eq!("WARNING".parse::<BadLineMode>().unwrap(), BadLineMode::Warning);
        assert_eq!("warn".parse::<BadLineMode>().unwrap(), BadLineMode::Warning);
        assert!("ignore".parse::<BadLineMode>().is_err());
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [BadLineMode::Error, BadLineMode::Warning] {
            assert_eq!(mode.to_string().parse::<BadLineMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = ParserConfig::new(BadLineMode::Error);
        assert!(!config.allow_multiline_strings);
        assert_eq!(ParserConfig::lenient().bad_line_mode, BadLineMode::Warning);
    }
}
