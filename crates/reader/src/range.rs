// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte ranges over command input and caret-style rendering helpers.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the command input.
///
/// Ranges record what each matched node or argument consumed, so that a
/// caller can slice the original input back out of a parse.
///
/// # Examples
///
/// ```
/// use cmdtree_reader::StringRange;
///
/// let range = StringRange::between(4, 7);
/// assert_eq!(range.get("foo bar baz"), "bar");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StringRange {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl StringRange {
    /// Create an empty range at a position.
    #[inline]
    pub fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Create a range from start to end byte positions.
    #[inline]
    pub fn between(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range start must not exceed end");
        Self { start, end }
    }

    /// Smallest range covering both `a` and `b`.
    #[inline]
    pub fn encompassing(a: StringRange, b: StringRange) -> Self {
        Self {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }

    /// Length of the range in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the range covers no input.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Extract the covered text from `input`.
    ///
    /// Returns an empty string if the range is out of bounds or not on
    /// UTF-8 character boundaries.
    #[inline]
    pub fn get<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start..self.end).unwrap_or("")
    }
}

/// Render a one-line snippet of `input` with carets under `range`.
///
/// `context_chars` characters are shown on each side of the range start.
///
/// ```text
/// foo bar baz
///     ^^^
/// ```
pub fn context_snippet(input: &str, range: StringRange, context_chars: usize) -> String {
    let anchor = floor_char_boundary(input, range.start);

    let start = input[..anchor]
        .char_indices()
        .rev()
        .take(context_chars)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(anchor);

    let end = input[anchor..]
        .char_indices()
        .take(context_chars + 1)
        .last()
        .map(|(i, c)| anchor + i + c.len_utf8())
        .unwrap_or(input.len());

    let snippet = &input[start..end];
    let caret_pos = input[start..anchor].chars().count();
    let caret_len = range.len().max(1);

    format!(
        "{}\n{}{}",
        snippet,
        " ".repeat(caret_pos),
        "^".repeat(caret_len)
    )
}

/// Locate a position in `source`, returning (line_number, column, line_content).
///
/// Line numbers are 1-indexed, columns are 0-indexed character counts.
pub fn locate(source: &str, pos: usize) -> (usize, usize, &str) {
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, ch) in source.char_indices() {
        if i >= pos {
            break;
        }
        if ch == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let effective = floor_char_boundary(source, pos).max(line_start);
    let col = source[line_start..effective].chars().count();

    (line_num, col, &source[line_start..line_end])
}

/// Render a rustc-style diagnostic pointing at `range`.
///
/// ```text
/// error: Unknown command
///   --> line 1, column 5
///    |
///  1 | foo bar
///    |     ^
/// ```
pub fn diagnostic_context(source: &str, range: StringRange, message: &str) -> String {
    let (line_num, col, line_content) = locate(source, range.start);
    let range_len = range.len().max(1);

    format!(
        "error: {}\n  --> line {}, column {}\n   |\n{:>3} | {}\n   | {}{}",
        message,
        line_num,
        col + 1,
        line_num,
        line_content,
        " ".repeat(col),
        "^".repeat(range_len)
    )
}

// Clamp `pos` to the input and step back onto a char boundary.
fn floor_char_boundary(input: &str, pos: usize) -> usize {
    let mut pos = pos.min(input.len());
    while !input.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
