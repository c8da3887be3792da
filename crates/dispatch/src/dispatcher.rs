// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatcher: registration, parsing, and execution against one tree.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use cmdtree_reader::{ErrorKind, StringReader, SyntaxError};
use tracing::debug;

use crate::builder::ArgumentBuilder;
use crate::chain::ContextChain;
use crate::consumer::{NoopConsumer, ResultConsumer};
use crate::context::CommandContextBuilder;
use crate::error::{BuildError, CommandError};
use crate::node::{CommandNode, NodeRef};
use crate::parse::{parse_nodes, ParseResults};

/// Owns a command tree and runs input against it.
///
/// Registration takes `&mut self`, and the tree offers no other way to add
/// nodes, so it cannot overlap a parse or execute on the same dispatcher.
/// Parsing and execution only read the tree.
///
/// Several dispatchers may share one tree through [`Dispatcher::with_root`].
/// The tree is freed once the last handle to its root is dropped.
///
/// # Examples
///
/// ```
/// use cmdtree_dispatch::{argument, literal, Dispatcher};
/// use cmdtree_reader::integer;
///
/// let mut dispatcher = Dispatcher::<i32>::new();
/// let root = dispatcher.root().clone();
/// dispatcher.register(literal("run").executes(|ctx| Ok(*ctx.source())))?;
/// dispatcher.register(literal("add").then(
///     argument("value", integer()).redirect_with(&root, |ctx| {
///         Ok(ctx.source() + ctx.get_integer("value")?)
///     }),
/// ))?;
///
/// assert_eq!(dispatcher.execute_input("add 5 add 6 run", 2)?, 13);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Dispatcher<S> {
    root: NodeRef<S>,
    consumer: Arc<dyn ResultConsumer<S>>,
}

impl<S: Clone + 'static> Dispatcher<S> {
    /// A dispatcher over a fresh, empty tree.
    pub fn new() -> Self {
        Self::with_root(CommandNode::root())
    }

    /// A dispatcher over an existing tree.
    pub fn with_root(root: NodeRef<S>) -> Self {
        Self {
            root,
            consumer: Arc::new(NoopConsumer),
        }
    }

    /// Set the completion observer.
    pub fn consumer(mut self, consumer: impl ResultConsumer<S> + 'static) -> Self {
        self.set_consumer(consumer);
        self
    }

    pub fn set_consumer(&mut self, consumer: impl ResultConsumer<S> + 'static) {
        self.consumer = Arc::new(consumer);
    }

    pub fn root(&self) -> &NodeRef<S> {
        &self.root
    }

    /// Build `command` and merge it into the root.
    ///
    /// Returns the node as it now lives in the tree, so the result can serve
    /// as a redirect target even when the registration merged into an
    /// existing node.
    pub fn register(&mut self, command: ArgumentBuilder<S>) -> Result<NodeRef<S>, BuildError> {
        let node = command.build()?;
        self.root.add_child(Arc::clone(&node))?;
        debug!(command = node.name(), "registered command");
        Ok(self.root.child(node.name()).unwrap_or(node))
    }

    /// Parse `input` for `source`. Never fails; inspect the result.
    pub fn parse(&self, input: &str, source: S) -> ParseResults<S> {
        self.parse_reader(StringReader::new(input), source)
    }

    /// Parse from an already positioned reader.
    pub fn parse_reader(&self, reader: StringReader, source: S) -> ParseResults<S> {
        let context = CommandContextBuilder::new(source, Arc::clone(&self.root), reader.cursor());
        let results = parse_nodes(&self.root, &reader, &context);
        debug!(
            input = reader.string(),
            cursor = results.reader().cursor(),
            errors = results.exceptions().len(),
            "parsed command"
        );
        results
    }

    /// Execute a parse result.
    ///
    /// Unconsumed input fails with the single branch error if there was
    /// exactly one, otherwise with *unknown command* (nothing matched) or
    /// *unknown argument* (a prefix matched).
    pub fn execute(&self, parse: &ParseResults<S>) -> Result<i32, CommandError> {
        let reader = parse.reader();
        if reader.can_read() {
            if let [(_, e)] = parse.exceptions() {
                return Err(e.clone().into());
            }
            let kind = if parse.context().range().is_empty() {
                ErrorKind::UnknownCommand
            } else {
                ErrorKind::UnknownArgument
            };
            return Err(SyntaxError::with_context(kind, reader).into());
        }

        let original = parse.context().build(reader.string());
        let chain = match ContextChain::try_flatten(&original) {
            Ok(chain) => chain,
            Err(e) => {
                debug!(error = %e, "parsed command is not executable");
                self.consumer.on_command_complete(&original, false, 0);
                return Err(SyntaxError::with_context(ErrorKind::UnknownCommand, reader).into());
            }
        };
        chain.execute_all(original.source().clone(), &*self.consumer)
    }

    /// Parse and execute in one step.
    pub fn execute_input(&self, input: &str, source: S) -> Result<i32, CommandError> {
        self.execute(&self.parse(input, source))
    }

    /// Names from the root down to `target`, or empty if it is not in the
    /// tree. Redirects are not followed.
    pub fn path(&self, target: &NodeRef<S>) -> Vec<String> {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        if Self::find_path(&self.root, target, &mut path, &mut visited) {
            path
        } else {
            Vec::new()
        }
    }

    fn find_path(
        node: &NodeRef<S>,
        target: &NodeRef<S>,
        path: &mut Vec<String>,
        visited: &mut HashSet<*const CommandNode<S>>,
    ) -> bool {
        for child in node.children() {
            if !visited.insert(Arc::as_ptr(&child)) {
                continue;
            }
            path.push(child.name().to_string());
            if Arc::ptr_eq(&child, target) || Self::find_path(&child, target, path, visited) {
                return true;
            }
            path.pop();
        }
        false
    }

    /// Follow child names from the root.
    pub fn find_node(&self, path: &[&str]) -> Option<NodeRef<S>> {
        let mut node = Arc::clone(&self.root);
        for name in path {
            node = node.child(name)?;
        }
        Some(node)
    }

    /// Every executable path below `node`, as usage strings.
    ///
    /// With `restricted`, nodes `source` cannot use are left out. A redirect
    /// to the root is written `...`; any other redirect as `-> target`.
    pub fn all_usage(&self, node: &NodeRef<S>, source: &S, restricted: bool) -> Vec<String> {
        let mut result = Vec::new();
        self.collect_usage(node, source, &mut result, "", restricted);
        result
    }

    fn collect_usage(
        &self,
        node: &NodeRef<S>,
        source: &S,
        result: &mut Vec<String>,
        prefix: &str,
        restricted: bool,
    ) {
        if restricted && !node.can_use(source) {
            return;
        }
        if node.has_command() {
            result.push(prefix.to_string());
        }
        if let Some(redirect) = node.redirect() {
            let target = if Arc::ptr_eq(&redirect, &self.root) {
                "...".to_string()
            } else {
                format!("-> {}", redirect.usage_text())
            };
            if prefix.is_empty() {
                result.push(format!("{} {target}", node.usage_text()));
            } else {
                result.push(format!("{prefix} {target}"));
            }
            return;
        }
        for child in node.children() {
            let usage = if prefix.is_empty() {
                child.usage_text()
            } else {
                format!("{prefix} {}", child.usage_text())
            };
            self.collect_usage(&child, source, result, &usage, restricted);
        }
    }
}

impl<S: Clone + 'static> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
