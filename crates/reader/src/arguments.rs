// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pluggable argument value parsers.
//!
//! An [`ArgumentType`] turns the text under a reader's cursor into a typed
//! value. The dispatcher only relies on this contract; the built-in types
//! below cover booleans, bounded numbers, and the three string shapes.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{ErrorKind, SyntaxError};
use crate::reader::StringReader;

/// A parsed argument value, shared between contexts.
pub type ArgumentValue = Arc<dyn Any + Send + Sync>;

/// Parser for one kind of argument value.
///
/// Implementations should leave the reader at the end of the consumed token
/// on success and return a positioned [`SyntaxError`] on failure. Errors
/// without context are re-pointed at the start of the argument by the parse
/// engine.
pub trait ArgumentType: fmt::Debug + Send + Sync {
    fn parse(&self, reader: &mut StringReader) -> Result<ArgumentValue, SyntaxError>;

    /// Sample inputs this type accepts.
    fn examples(&self) -> &'static [&'static str] {
        &[]
    }
}

/// `true` or `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolArgument;

impl ArgumentType for BoolArgument {
    fn parse(&self, reader: &mut StringReader) -> Result<ArgumentValue, SyntaxError> {
        Ok(Arc::new(reader.read_boolean()?))
    }

    fn examples(&self) -> &'static [&'static str] {
        &["true", "false"]
    }
}

/// A 32-bit integer within `[minimum, maximum]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerArgument {
    minimum: i32,
    maximum: i32,
}

impl IntegerArgument {
    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }
}

impl Default for IntegerArgument {
    fn default() -> Self {
        Self {
            minimum: i32::MIN,
            maximum: i32::MAX,
        }
    }
}

impl ArgumentType for IntegerArgument {
    fn parse(&self, reader: &mut StringReader) -> Result<ArgumentValue, SyntaxError> {
        let start = reader.cursor();
        let found = reader.read_int()?;
        if found < self.minimum {
            reader.set_cursor(start);
            return Err(SyntaxError::with_context(
                ErrorKind::IntegerTooLow {
                    found,
                    min: self.minimum,
                },
                reader,
            ));
        }
        if found > self.maximum {
            reader.set_cursor(start);
            return Err(SyntaxError::with_context(
                ErrorKind::IntegerTooHigh {
                    found,
                    max: self.maximum,
                },
                reader,
            ));
        }
        Ok(Arc::new(found))
    }

    fn examples(&self) -> &'static [&'static str] {
        &["0", "123", "-123"]
    }
}

/// A finite float within `[minimum, maximum]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatArgument {
    minimum: f64,
    maximum: f64,
}

impl FloatArgument {
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }
}

impl Default for FloatArgument {
    fn default() -> Self {
        Self {
            minimum: f64::MIN,
            maximum: f64::MAX,
        }
    }
}

impl ArgumentType for FloatArgument {
    fn parse(&self, reader: &mut StringReader) -> Result<ArgumentValue, SyntaxError> {
        let start = reader.cursor();
        let found = reader.read_float()?;
        if found < self.minimum {
            reader.set_cursor(start);
            return Err(SyntaxError::with_context(
                ErrorKind::FloatTooLow {
                    found,
                    min: self.minimum,
                },
                reader,
            ));
        }
        if found > self.maximum {
            reader.set_cursor(start);
            return Err(SyntaxError::with_context(
                ErrorKind::FloatTooHigh {
                    found,
                    max: self.maximum,
                },
                reader,
            ));
        }
        Ok(Arc::new(found))
    }

    fn examples(&self) -> &'static [&'static str] {
        &["0", "1.2", ".5", "-1", "-.5", "-1234.56"]
    }
}

/// How much input a [`StringArgument`] consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKind {
    /// One unquoted token.
    SingleWord,
    /// One unquoted token, or a quoted phrase that may contain spaces.
    QuotablePhrase,
    /// Everything up to the end of input.
    GreedyPhrase,
}

/// A string argument; values are `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringArgument {
    kind: StringKind,
}

impl StringArgument {
    pub fn kind(&self) -> StringKind {
        self.kind
    }
}

impl ArgumentType for StringArgument {
    fn parse(&self, reader: &mut StringReader) -> Result<ArgumentValue, SyntaxError> {
        let value = match self.kind {
            StringKind::SingleWord => reader.read_unquoted_string().to_string(),
            StringKind::QuotablePhrase => reader.read_string()?,
            StringKind::GreedyPhrase => {
                let text = reader.remaining().to_string();
                reader.set_cursor(reader.total_len());
                text
            }
        };
        Ok(Arc::new(value))
    }

    fn examples(&self) -> &'static [&'static str] {
        match self.kind {
            StringKind::SingleWord => &["word", "words_with_underscores"],
            StringKind::QuotablePhrase => &["\"quoted phrase\"", "word", "\"\""],
            StringKind::GreedyPhrase => &["word", "words with spaces", "\"and symbols\""],
        }
    }
}

/// Boolean argument.
pub fn boolean() -> BoolArgument {
    BoolArgument
}

/// Integer argument over the full `i32` range.
pub fn integer() -> IntegerArgument {
    IntegerArgument::default()
}

/// Integer argument bounded to `[min, max]`.
pub fn integer_range(min: i32, max: i32) -> IntegerArgument {
    IntegerArgument {
        minimum: min,
        maximum: max,
    }
}

/// Float argument over all finite values.
pub fn float() -> FloatArgument {
    FloatArgument::default()
}

/// Float argument bounded to `[min, max]`.
pub fn float_range(min: f64, max: f64) -> FloatArgument {
    FloatArgument {
        minimum: min,
        maximum: max,
    }
}

/// Single unquoted word.
pub fn word() -> StringArgument {
    StringArgument {
        kind: StringKind::SingleWord,
    }
}

/// Word or quoted phrase.
pub fn string() -> StringArgument {
    StringArgument {
        kind: StringKind::QuotablePhrase,
    }
}

/// Rest of the input, verbatim.
pub fn greedy_string() -> StringArgument {
    StringArgument {
        kind: StringKind::GreedyPhrase,
    }
}

#[cfg(test)]
#[path = "arguments_tests.rs"]
mod tests;
