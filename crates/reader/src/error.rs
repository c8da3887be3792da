// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Positioned syntax errors raised while reading and dispatching commands.

use std::sync::Arc;

use thiserror::Error;

use crate::range::{context_snippet, diagnostic_context, StringRange};
use crate::reader::StringReader;

/// Number of input characters shown before the cursor in error messages.
const CONTEXT_AMOUNT: usize = 10;

/// The closed catalogue of syntax error kinds.
///
/// Lexical kinds come from [`StringReader`] and argument types; structural
/// kinds come from the parse engine and dispatcher. The `Display` output of a
/// kind is its user-facing message, without position information.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("Float must not be less than {min}, found {found}")]
    FloatTooLow { found: f64, min: f64 },

    #[error("Float must not be more than {max}, found {found}")]
    FloatTooHigh { found: f64, max: f64 },

    #[error("Integer must not be less than {min}, found {found}")]
    IntegerTooLow { found: i32, min: i32 },

    #[error("Integer must not be more than {max}, found {found}")]
    IntegerTooHigh { found: i32, max: i32 },

    #[error("Expected literal {expected}")]
    LiteralIncorrect { expected: String },

    #[error("Expected quote to start a string")]
    ExpectedStartOfQuote,

    #[error("Unclosed quoted string")]
    ExpectedEndOfQuote,

    #[error("Invalid escape sequence '{character}' in quoted string")]
    InvalidEscape { character: char },

    #[error("Invalid bool, expected true or false but found '{value}'")]
    InvalidBool { value: String },

    #[error("Invalid integer '{value}'")]
    InvalidInt { value: String },

    #[error("Expected integer")]
    ExpectedInt,

    #[error("Invalid float '{value}'")]
    InvalidFloat { value: String },

    #[error("Expected float")]
    ExpectedFloat,

    #[error("Expected bool")]
    ExpectedBool,

    #[error("Expected '{symbol}'")]
    ExpectedSymbol { symbol: char },

    #[error("Unknown command")]
    UnknownCommand,

    #[error("Incorrect argument for command")]
    UnknownArgument,

    #[error("Expected whitespace to end one argument, but found trailing data")]
    ExpectedArgumentSeparator,

    #[error("Could not parse command: {message}")]
    ParseException { message: String },
}

impl ErrorKind {
    /// True for kinds raised by the parse engine or dispatcher rather than
    /// by the reader.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ErrorKind::UnknownCommand
                | ErrorKind::UnknownArgument
                | ErrorKind::ExpectedArgumentSeparator
                | ErrorKind::ParseException { .. }
        )
    }
}

/// A syntax error with optional input context.
///
/// Errors created with [`SyntaxError::with_context`] remember the input and
/// the cursor at which the problem was found, which is what makes caret
/// diagnostics possible.
///
/// # Examples
///
/// ```
/// use cmdtree_reader::{ErrorKind, StringReader};
///
/// let mut reader = StringReader::new("foo");
/// let err = reader.read_int().unwrap_err();
/// assert_eq!(err.kind(), &ErrorKind::ExpectedInt);
/// assert_eq!(err.cursor(), Some(0));
/// assert_eq!(err.to_string(), "Expected integer at position 0: <--[HERE]");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}{}", self.position_suffix())]
pub struct SyntaxError {
    kind: ErrorKind,
    input: Option<Arc<str>>,
    cursor: Option<usize>,
}

impl SyntaxError {
    /// Create an error without position information.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            input: None,
            cursor: None,
        }
    }

    /// Create an error pointing at the reader's current cursor.
    pub fn with_context(kind: ErrorKind, reader: &StringReader) -> Self {
        Self {
            kind,
            input: Some(reader.shared_string()),
            cursor: Some(reader.cursor()),
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The input the error was raised against, if known.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Byte offset into [`input`](Self::input) where the problem was detected.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The message without position information.
    pub fn raw_message(&self) -> String {
        self.kind.to_string()
    }

    /// Up to ten characters of input leading to the cursor, followed by a
    /// `<--[HERE]` marker.
    pub fn marker_context(&self) -> Option<String> {
        let (input, cursor) = self.position()?;
        let cursor = cursor.min(input.len());
        let before = input.get(..cursor).unwrap_or(input);
        let skipped = before.chars().count().saturating_sub(CONTEXT_AMOUNT);

        let mut out = String::new();
        if skipped > 0 {
            out.push_str("...");
        }
        out.extend(before.chars().skip(skipped));
        out.push_str("<--[HERE]");
        Some(out)
    }

    /// Caret snippet of the input around the cursor, or `None` without context.
    ///
    /// ```text
    /// foo bar
    ///     ^
    /// ```
    pub fn context(&self, context_chars: usize) -> Option<String> {
        let (input, cursor) = self.position()?;
        Some(context_snippet(input, StringRange::at(cursor), context_chars))
    }

    /// Rich line/column diagnostic, or `None` without context.
    pub fn diagnostic(&self) -> Option<String> {
        let (input, cursor) = self.position()?;
        Some(diagnostic_context(
            input,
            StringRange::at(cursor),
            &self.raw_message(),
        ))
    }

    fn position(&self) -> Option<(&str, usize)> {
        Some((self.input.as_deref()?, self.cursor?))
    }

    // " at position N: ...<--[HERE]", or nothing without context.
    fn position_suffix(&self) -> String {
        match (self.marker_context(), self.cursor) {
            (Some(context), Some(cursor)) => format!(" at position {cursor}: {context}"),
            _ => String::new(),
        }
    }
}

impl From<ErrorKind> for SyntaxError {
    fn from(kind: ErrorKind) -> Self {
        SyntaxError::new(kind)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
