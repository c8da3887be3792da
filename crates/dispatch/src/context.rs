// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parse contexts.
//!
//! A [`CommandContextBuilder`] accumulates what one parse branch has matched:
//! the nodes and their ranges, captured argument values, the terminal
//! command, and (after a redirect) a nested builder for the target subtree.
//! The parse engine clones the builder at every branch point so a failing
//! sibling never touches its parent's state.
//!
//! [`CommandContext`] is the immutable snapshot handed to command handlers
//! and redirect modifiers.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use cmdtree_reader::{ArgumentValue, StringRange};
use indexmap::IndexMap;

use crate::error::CommandError;
use crate::node::{Command, NodeRef, RedirectModifier};

/// A captured argument value and the input range it was parsed from.
#[derive(Clone)]
pub struct ParsedArgument {
    range: StringRange,
    result: ArgumentValue,
}

impl ParsedArgument {
    pub fn new(start: usize, end: usize, result: ArgumentValue) -> Self {
        Self {
            range: StringRange::between(start, end),
            result,
        }
    }

    pub fn range(&self) -> StringRange {
        self.range
    }

    pub fn result(&self) -> &ArgumentValue {
        &self.result
    }
}

impl fmt::Debug for ParsedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedArgument")
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

/// A matched node and the input range it consumed.
#[derive(Clone)]
pub struct ParsedCommandNode<S> {
    node: NodeRef<S>,
    range: StringRange,
}

impl<S> ParsedCommandNode<S> {
    pub fn node(&self) -> &NodeRef<S> {
        &self.node
    }

    pub fn range(&self) -> StringRange {
        self.range
    }
}

impl<S> fmt::Debug for ParsedCommandNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}..{}", self.node, self.range.start, self.range.end)
    }
}

/// Mutable accumulator for one parse branch.
#[derive(Clone)]
pub struct CommandContextBuilder<S> {
    source: S,
    root_node: NodeRef<S>,
    arguments: IndexMap<String, ParsedArgument>,
    nodes: Vec<ParsedCommandNode<S>>,
    range: StringRange,
    command: Option<Command<S>>,
    child: Option<Box<CommandContextBuilder<S>>>,
    modifier: Option<RedirectModifier<S>>,
    forks: bool,
}

impl<S: Clone> CommandContextBuilder<S> {
    /// Start a context anchored at `root_node`, with an empty range at `start`.
    pub fn new(source: S, root_node: NodeRef<S>, start: usize) -> Self {
        Self {
            source,
            root_node,
            arguments: IndexMap::new(),
            nodes: Vec::new(),
            range: StringRange::at(start),
            command: None,
            child: None,
            modifier: None,
            forks: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn with_source(&mut self, source: S) -> &mut Self {
        self.source = source;
        self
    }

    pub fn root_node(&self) -> &NodeRef<S> {
        &self.root_node
    }

    pub fn arguments(&self) -> &IndexMap<String, ParsedArgument> {
        &self.arguments
    }

    pub fn with_argument(&mut self, name: impl Into<String>, argument: ParsedArgument) -> &mut Self {
        self.arguments.insert(name.into(), argument);
        self
    }

    pub fn nodes(&self) -> &[ParsedCommandNode<S>] {
        &self.nodes
    }

    /// Record a matched node, widening the context range to cover it.
    ///
    /// The redirect modifier and fork flag follow the most recent node.
    pub fn with_node(&mut self, node: NodeRef<S>, range: StringRange) -> &mut Self {
        self.range = StringRange::encompassing(self.range, range);
        self.modifier = node.redirect_modifier().cloned();
        self.forks = node.is_fork();
        self.nodes.push(ParsedCommandNode { node, range });
        self
    }

    pub fn range(&self) -> StringRange {
        self.range
    }

    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    pub fn with_command(&mut self, command: Option<Command<S>>) -> &mut Self {
        self.command = command;
        self
    }

    pub fn child(&self) -> Option<&CommandContextBuilder<S>> {
        self.child.as_deref()
    }

    pub fn with_child(&mut self, child: CommandContextBuilder<S>) -> &mut Self {
        self.child = Some(Box::new(child));
        self
    }

    /// The deepest builder in the redirect chain.
    pub fn last_child(&self) -> &CommandContextBuilder<S> {
        let mut result = self;
        while let Some(child) = result.child() {
            result = child;
        }
        result
    }

    pub fn is_forked(&self) -> bool {
        self.forks
    }

    /// Independent copy for a speculative branch.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Freeze into an immutable context over `input`.
    pub fn build(&self, input: &str) -> CommandContext<S> {
        self.build_shared(Arc::from(input))
    }

    fn build_shared(&self, input: Arc<str>) -> CommandContext<S> {
        CommandContext {
            source: self.source.clone(),
            child: self
                .child
                .as_ref()
                .map(|child| Arc::new(child.build_shared(Arc::clone(&input)))),
            input,
            arguments: Arc::new(self.arguments.clone()),
            command: self.command.clone(),
            root_node: Arc::clone(&self.root_node),
            nodes: self.nodes.clone().into(),
            range: self.range,
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }
}

impl<S> fmt::Debug for CommandContextBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContextBuilder")
            .field("root_node", &self.root_node.to_string())
            .field("nodes", &self.nodes)
            .field("range", &self.range)
            .field("command", &self.command.is_some())
            .field("child", &self.child)
            .field("forks", &self.forks)
            .finish_non_exhaustive()
    }
}

/// Everything matched along one parse path, bound to a source.
#[derive(Clone)]
pub struct CommandContext<S> {
    source: S,
    input: Arc<str>,
    arguments: Arc<IndexMap<String, ParsedArgument>>,
    command: Option<Command<S>>,
    root_node: NodeRef<S>,
    nodes: Arc<[ParsedCommandNode<S>]>,
    range: StringRange,
    child: Option<Arc<CommandContext<S>>>,
    modifier: Option<RedirectModifier<S>>,
    forks: bool,
}

impl<S: Clone> CommandContext<S> {
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The full input this context was parsed from.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn root_node(&self) -> &NodeRef<S> {
        &self.root_node
    }

    pub fn nodes(&self) -> &[ParsedCommandNode<S>] {
        &self.nodes
    }

    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn range(&self) -> StringRange {
        self.range
    }

    pub fn child(&self) -> Option<&CommandContext<S>> {
        self.child.as_deref()
    }

    /// The deepest context in the redirect chain.
    pub fn last_child(&self) -> &CommandContext<S> {
        let mut result = self;
        while let Some(child) = result.child() {
            result = child;
        }
        result
    }

    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    pub fn redirect_modifier(&self) -> Option<&RedirectModifier<S>> {
        self.modifier.as_ref()
    }

    pub fn is_forked(&self) -> bool {
        self.forks
    }

    /// The same context bound to another source.
    pub fn copy_for(&self, source: S) -> Self {
        Self {
            source,
            ..self.clone()
        }
    }

    pub fn parsed_argument(&self, name: &str) -> Option<&ParsedArgument> {
        self.arguments.get(name)
    }

    /// Typed lookup of a captured argument.
    pub fn argument<T: Any + Clone>(&self, name: &str) -> Result<T, CommandError> {
        let parsed = self
            .arguments
            .get(name)
            .ok_or_else(|| CommandError::NoSuchArgument {
                name: name.to_string(),
            })?;
        parsed
            .result()
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| CommandError::ArgumentType {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn get_integer(&self, name: &str) -> Result<i32, CommandError> {
        self.argument(name)
    }

    pub fn get_float(&self, name: &str) -> Result<f64, CommandError> {
        self.argument(name)
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, CommandError> {
        self.argument(name)
    }

    pub fn get_string(&self, name: &str) -> Result<String, CommandError> {
        self.argument(name)
    }
}

impl<S: fmt::Debug> fmt::Debug for CommandContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("source", &self.source)
            .field("input", &self.input)
            .field("nodes", &self.nodes)
            .field("range", &self.range)
            .field("command", &self.command.is_some())
            .field("child", &self.child)
            .field("forks", &self.forks)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
