// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Cursor reader, argument types, and syntax errors for command grammars.
//!
//! This crate holds the lexical layer that the command dispatcher builds on:
//!
//! - [`StringReader`]: a cheap-to-clone cursor over the input with helpers
//!   for integers, floats, booleans, and quoted or unquoted strings
//! - [`ArgumentType`]: the plug point for typed argument parsers, plus the
//!   built-in catalogue ([`boolean`], [`integer`], [`float`], [`word`],
//!   [`string`], [`greedy_string`])
//! - [`SyntaxError`]: one error family with a closed [`ErrorKind`]
//!   catalogue, carrying the input and cursor for caret diagnostics
//!
//! # Quick Start
//!
//! ```
//! use cmdtree_reader::{ErrorKind, StringReader};
//!
//! let mut reader = StringReader::new("\"hello\\nworld\"");
//! let err = reader.read_quoted_string().unwrap_err();
//! assert_eq!(err.kind(), &ErrorKind::InvalidEscape { character: 'n' });
//! assert_eq!(err.cursor(), Some(7));
//! ```

mod arguments;
mod error;
mod range;
mod reader;

pub use arguments::{
    boolean, float, float_range, greedy_string, integer, integer_range, string, word,
    ArgumentType, ArgumentValue, BoolArgument, FloatArgument, IntegerArgument, StringArgument,
    StringKind,
};
pub use error::{ErrorKind, SyntaxError};
pub use range::{context_snippet, diagnostic_context, locate, StringRange};
pub use reader::StringReader;
