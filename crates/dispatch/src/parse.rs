// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backtracking parse engine.
//!
//! [`parse_nodes`] walks the tree depth first. Every candidate child gets its
//! own copy of the context and reader, so a failing branch leaves nothing
//! behind except an entry in the error list. Of the branches that succeed,
//! the best one is kept: full consumption first, then no recorded errors,
//! then registration order.

use std::fmt;
use std::sync::Arc;

use cmdtree_reader::{ErrorKind, StringRange, StringReader, SyntaxError};
use tracing::trace;

use crate::context::{CommandContextBuilder, ParsedArgument};
use crate::node::{CommandNode, NodeKind, NodeRef, ARGUMENT_SEPARATOR};

/// Outcome of a parse: the best context found, the reader where it stopped,
/// and the errors raised by branches that failed at that level.
///
/// Parsing never fails outright. Unconsumed input in [`reader`](Self::reader)
/// signals that the input did not fully match.
#[derive(Clone)]
pub struct ParseResults<S> {
    context: CommandContextBuilder<S>,
    reader: StringReader,
    exceptions: Vec<(NodeRef<S>, SyntaxError)>,
}

impl<S> ParseResults<S> {
    pub fn context(&self) -> &CommandContextBuilder<S> {
        &self.context
    }

    pub fn reader(&self) -> &StringReader {
        &self.reader
    }

    /// Errors from failed branches, keyed by the node that failed.
    pub fn exceptions(&self) -> &[(NodeRef<S>, SyntaxError)] {
        &self.exceptions
    }

    /// True when the whole input was consumed.
    pub fn is_complete(&self) -> bool {
        !self.reader.can_read()
    }
}

impl<S> fmt::Debug for ParseResults<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exceptions: Vec<_> = self
            .exceptions
            .iter()
            .map(|(node, err)| format!("{node}: {err}"))
            .collect();
        f.debug_struct("ParseResults")
            .field("context", &self.context)
            .field("reader", &self.reader)
            .field("exceptions", &exceptions)
            .finish()
    }
}

/// Match `node`'s children against `original`, starting from `context_so_far`.
pub(crate) fn parse_nodes<S: Clone>(
    node: &CommandNode<S>,
    original: &StringReader,
    context_so_far: &CommandContextBuilder<S>,
) -> ParseResults<S> {
    let source = context_so_far.source();
    let mut errors = Vec::new();
    let mut potentials = Vec::new();

    for child in node.relevant_nodes(original) {
        if !child.can_use(source) {
            continue;
        }
        let mut context = context_so_far.copy();
        let mut reader = original.clone();
        trace!(node = %child, cursor = reader.cursor(), "trying branch");

        if let Err(e) = parse_child(&child, &mut reader, &mut context) {
            trace!(node = %child, error = %e, "branch failed");
            errors.push((child, e));
            continue;
        }

        context.with_command(child.command());
        let redirect = child.redirect();
        let needed = if redirect.is_some() { 1 } else { 2 };
        if !reader.can_read_n(needed) {
            potentials.push(ParseResults {
                context,
                reader,
                exceptions: Vec::new(),
            });
            continue;
        }

        reader.skip();
        if let Some(target) = redirect {
            let child_context =
                CommandContextBuilder::new(source.clone(), Arc::clone(&target), reader.cursor());
            let parsed = parse_nodes(&target, &reader, &child_context);
            context.with_child(parsed.context);
            return ParseResults {
                context,
                reader: parsed.reader,
                exceptions: parsed.exceptions,
            };
        }
        potentials.push(parse_nodes(&child, &reader, &context));
    }

    // min_by_key keeps the first of equally ranked potentials
    potentials
        .into_iter()
        .min_by_key(|p| (p.reader.can_read(), !p.exceptions.is_empty()))
        .unwrap_or_else(|| ParseResults {
            context: context_so_far.copy(),
            reader: original.clone(),
            exceptions: errors,
        })
}

// Match a single node at the cursor and check the separator after it.
fn parse_child<S: Clone>(
    child: &NodeRef<S>,
    reader: &mut StringReader,
    context: &mut CommandContextBuilder<S>,
) -> Result<(), SyntaxError> {
    let start = reader.cursor();
    match child.kind() {
        NodeKind::Root => {}
        NodeKind::Literal(literal) => {
            let Some(end) = match_literal(reader, literal) else {
                return Err(SyntaxError::with_context(
                    ErrorKind::LiteralIncorrect {
                        expected: literal.clone(),
                    },
                    reader,
                ));
            };
            reader.set_cursor(end);
            context.with_node(Arc::clone(child), StringRange::between(start, end));
        }
        NodeKind::Argument { name, parser } => {
            let result = match parser.parse(reader) {
                Ok(result) => result,
                Err(e) if e.cursor().is_some() => return Err(e),
                Err(e) => {
                    reader.set_cursor(start);
                    return Err(SyntaxError::with_context(
                        ErrorKind::ParseException {
                            message: e.raw_message(),
                        },
                        reader,
                    ));
                }
            };
            let parsed = ParsedArgument::new(start, reader.cursor(), result);
            let range = parsed.range();
            context.with_argument(name.clone(), parsed);
            context.with_node(Arc::clone(child), range);
        }
    }

    if reader.peek().is_some_and(|c| c != ARGUMENT_SEPARATOR) {
        return Err(SyntaxError::with_context(
            ErrorKind::ExpectedArgumentSeparator,
            reader,
        ));
    }
    Ok(())
}

// End offset of `literal` if it is the whole token at the cursor.
fn match_literal(reader: &StringReader, literal: &str) -> Option<usize> {
    let rest = reader.remaining().strip_prefix(literal)?;
    match rest.chars().next() {
        None | Some(ARGUMENT_SEPARATOR) => Some(reader.cursor() + literal.len()),
        Some(_) => None,
    }
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
