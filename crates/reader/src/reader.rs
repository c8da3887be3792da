// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cursor reader over command input.
//!
//! [`StringReader`] is a positional view over an input string. Cloning a
//! reader is cheap (the input is shared), which is what lets the parse engine
//! hand every speculative branch its own reader.

use std::sync::Arc;

use crate::error::{ErrorKind, SyntaxError};

const SYNTAX_ESCAPE: char = '\\';
const SYNTAX_DOUBLE_QUOTE: char = '"';
const SYNTAX_SINGLE_QUOTE: char = '\'';

/// Positional reader over an input string.
///
/// The cursor is a byte offset. Lexical helpers leave the cursor after the
/// consumed token on success; on failure the returned [`SyntaxError`] points
/// at the start of the offending token.
///
/// # Examples
///
/// ```
/// use cmdtree_reader::StringReader;
///
/// let mut reader = StringReader::new("give 64 'golden apple'");
/// assert_eq!(reader.read_unquoted_string(), "give");
/// reader.skip();
/// assert_eq!(reader.read_int()?, 64);
/// reader.skip();
/// assert_eq!(reader.read_string()?, "golden apple");
/// assert!(!reader.can_read());
/// # Ok::<(), cmdtree_reader::SyntaxError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringReader {
    string: Arc<str>,
    cursor: usize,
}

impl StringReader {
    pub fn new(input: impl Into<Arc<str>>) -> Self {
        Self {
            string: input.into(),
            cursor: 0,
        }
    }

    /// Create a reader already positioned at `cursor`.
    pub fn with_cursor(input: impl Into<Arc<str>>, cursor: usize) -> Self {
        let mut reader = Self::new(input);
        reader.set_cursor(cursor);
        reader
    }

    /// The full input.
    pub fn string(&self) -> &str {
        &self.string
    }

    pub(crate) fn shared_string(&self) -> Arc<str> {
        Arc::clone(&self.string)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the input and snapped back onto a char
    /// boundary.
    pub fn set_cursor(&mut self, cursor: usize) {
        let mut cursor = cursor.min(self.string.len());
        while !self.string.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    pub fn remaining_len(&self) -> usize {
        self.string.len() - self.cursor
    }

    pub fn total_len(&self) -> usize {
        self.string.len()
    }

    /// Everything before the cursor.
    pub fn read_str(&self) -> &str {
        &self.string[..self.cursor]
    }

    /// Everything from the cursor on.
    pub fn remaining(&self) -> &str {
        &self.string[self.cursor..]
    }

    /// True if at least one more byte is available.
    pub fn can_read(&self) -> bool {
        self.can_read_n(1)
    }

    /// True if at least `length` more bytes are available.
    pub fn can_read_n(&self, length: usize) -> bool {
        self.cursor + length <= self.string.len()
    }

    /// The character under the cursor.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// The character `offset` bytes past the cursor.
    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.string.get(self.cursor + offset..)?.chars().next()
    }

    /// Consume and return the character under the cursor.
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Step past the character under the cursor.
    pub fn skip(&mut self) {
        let _ = self.read();
    }

    pub fn is_allowed_number(c: char) -> bool {
        c.is_ascii_digit() || c == '.' || c == '-'
    }

    pub fn is_allowed_in_unquoted_string(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
    }

    pub fn is_quoted_string_start(c: char) -> bool {
        c == SYNTAX_DOUBLE_QUOTE || c == SYNTAX_SINGLE_QUOTE
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.skip();
        }
    }

    /// Read a 32-bit integer made of digits and an optional leading `-`.
    pub fn read_int(&mut self) -> Result<i32, SyntaxError> {
        let start = self.cursor;
        let number = self.scan_number();
        if number.is_empty() {
            return Err(SyntaxError::with_context(ErrorKind::ExpectedInt, self));
        }
        match number.parse::<i32>() {
            Ok(value) => Ok(value),
            Err(_) => {
                let value = number.to_string();
                self.cursor = start;
                Err(SyntaxError::with_context(
                    ErrorKind::InvalidInt { value },
                    self,
                ))
            }
        }
    }

    /// Read a finite floating point number.
    pub fn read_float(&mut self) -> Result<f64, SyntaxError> {
        let start = self.cursor;
        let number = self.scan_number();
        if number.is_empty() {
            return Err(SyntaxError::with_context(ErrorKind::ExpectedFloat, self));
        }
        match number.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => {
                let value = number.to_string();
                self.cursor = start;
                Err(SyntaxError::with_context(
                    ErrorKind::InvalidFloat { value },
                    self,
                ))
            }
        }
    }

    /// Read a run of unquoted-string characters; may be empty.
    pub fn read_unquoted_string(&mut self) -> &str {
        let start = self.cursor;
        while self.peek().is_some_and(Self::is_allowed_in_unquoted_string) {
            self.skip();
        }
        &self.string[start..self.cursor]
    }

    /// Read a `"`- or `'`-delimited string, resolving escapes.
    ///
    /// At end of input this returns an empty string.
    pub fn read_quoted_string(&mut self) -> Result<String, SyntaxError> {
        let Some(next) = self.peek() else {
            return Ok(String::new());
        };
        if !Self::is_quoted_string_start(next) {
            return Err(SyntaxError::with_context(
                ErrorKind::ExpectedStartOfQuote,
                self,
            ));
        }
        self.skip();
        self.read_string_until(next)
    }

    /// Read up to (and past) `terminator`.
    ///
    /// A backslash escapes the terminator or another backslash; escaping any
    /// other character is an error pointing at that character.
    pub fn read_string_until(&mut self, terminator: char) -> Result<String, SyntaxError> {
        let mut result = String::new();
        let mut escaped = false;
        while let Some(c) = self.read() {
            if escaped {
                if c == terminator || c == SYNTAX_ESCAPE {
                    result.push(c);
                    escaped = false;
                } else {
                    self.cursor -= c.len_utf8();
                    return Err(SyntaxError::with_context(
                        ErrorKind::InvalidEscape { character: c },
                        self,
                    ));
                }
            } else if c == SYNTAX_ESCAPE {
                escaped = true;
            } else if c == terminator {
                return Ok(result);
            } else {
                result.push(c);
            }
        }
        Err(SyntaxError::with_context(ErrorKind::ExpectedEndOfQuote, self))
    }

    /// Read a quoted string if one starts here, otherwise an unquoted one.
    pub fn read_string(&mut self) -> Result<String, SyntaxError> {
        match self.peek() {
            None => Ok(String::new()),
            Some(next) if Self::is_quoted_string_start(next) => {
                self.skip();
                self.read_string_until(next)
            }
            Some(_) => Ok(self.read_unquoted_string().to_string()),
        }
    }

    /// Read the literal token `true` or `false`.
    pub fn read_boolean(&mut self) -> Result<bool, SyntaxError> {
        let start = self.cursor;
        let value = self.read_string()?;
        match value.as_str() {
            "" => Err(SyntaxError::with_context(ErrorKind::ExpectedBool, self)),
            "true" => Ok(true),
            "false" => Ok(false),
            _ => {
                self.cursor = start;
                Err(SyntaxError::with_context(
                    ErrorKind::InvalidBool { value },
                    self,
                ))
            }
        }
    }

    /// Consume `c` or fail without moving.
    pub fn expect(&mut self, c: char) -> Result<(), SyntaxError> {
        if self.peek() != Some(c) {
            return Err(SyntaxError::with_context(
                ErrorKind::ExpectedSymbol { symbol: c },
                self,
            ));
        }
        self.skip();
        Ok(())
    }

    // Advance over number characters, returning the scanned text.
    fn scan_number(&mut self) -> &str {
        let start = self.cursor;
        while self.peek().is_some_and(Self::is_allowed_number) {
            self.skip();
        }
        &self.string[start..self.cursor]
    }
}

impl From<&str> for StringReader {
    fn from(input: &str) -> Self {
        StringReader::new(input)
    }
}

impl From<String> for StringReader {
    fn from(input: String) -> Self {
        StringReader::new(input)
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
