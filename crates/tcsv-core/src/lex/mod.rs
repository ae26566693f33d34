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

//! Lexical analysis subsystem.
//!
//! # Module Structure
//!
//! - [`span`] - Source positions for diagnostics
//! - [`token`] - Token kinds and positioned tokens
//! - [`source`] - Line sources feeding the lexer
//! - [`lexer`] - The streaming lexer itself

pub mod lexer;
pub mod source;
pub mod span;
pub mod token;

pub use lexer::Lexer;
pub use source::{IterLines, LineSource};
pub use span::SourcePos;
pub use token::{Token, TokenKind, TokenMark};
