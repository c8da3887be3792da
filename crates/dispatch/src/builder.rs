// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fluent construction of command nodes.
//!
//! ```
//! use cmdtree_dispatch::{argument, literal, Dispatcher};
//! use cmdtree_reader::integer;
//!
//! let mut dispatcher = Dispatcher::<()>::new();
//! dispatcher.register(
//!     literal("give").then(
//!         argument("count", integer()).executes(|ctx| ctx.get_integer("count")),
//!     ),
//! )?;
//! assert_eq!(dispatcher.execute_input("give 3", ())?, 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Configuration mistakes (a redirect on a node with children, children on a
//! redirected node) do not interrupt the chain; the first one is reported by
//! [`ArgumentBuilder::build`].

use std::sync::Arc;

use cmdtree_reader::ArgumentType;

use crate::context::CommandContext;
use crate::error::{BuildError, CommandError};
use crate::node::{
    Command, CommandNode, NodeKind, NodeRef, RedirectModifier, Requirement,
};

/// Builder for a literal or argument node.
pub struct ArgumentBuilder<S> {
    kind: NodeKind,
    arguments: NodeRef<S>,
    command: Option<Command<S>>,
    requirement: Requirement<S>,
    target: Option<NodeRef<S>>,
    modifier: Option<RedirectModifier<S>>,
    forks: bool,
    error: Option<BuildError>,
}

/// Start a literal node matching `literal` exactly.
pub fn literal<S: 'static>(literal: impl Into<String>) -> ArgumentBuilder<S> {
    ArgumentBuilder::new(NodeKind::Literal(literal.into()))
}

/// Start an argument node named `name`, parsed by `parser`.
pub fn argument<S: 'static>(
    name: impl Into<String>,
    parser: impl ArgumentType + 'static,
) -> ArgumentBuilder<S> {
    ArgumentBuilder::new(NodeKind::Argument {
        name: name.into(),
        parser: Arc::new(parser),
    })
}

impl<S: 'static> ArgumentBuilder<S> {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            arguments: CommandNode::root(),
            command: None,
            requirement: Arc::new(|_: &S| true),
            target: None,
            modifier: None,
            forks: false,
            error: None,
        }
    }

    /// Add a subordinate node built from `child`.
    pub fn then(self, child: ArgumentBuilder<S>) -> Self {
        match child.build() {
            Ok(node) => self.then_node(node),
            Err(e) => self.fail(e),
        }
    }

    /// Add an already built node as a child.
    pub fn then_node(mut self, node: NodeRef<S>) -> Self {
        if self.target.is_some() {
            let err = BuildError::ChildOnRedirect {
                node: self.name().to_string(),
            };
            return self.fail(err);
        }
        if let Err(e) = self.arguments.add_child(node) {
            self = self.fail(e);
        }
        self
    }

    /// Attach the terminal command.
    pub fn executes<F>(mut self, command: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> Result<i32, CommandError> + Send + Sync + 'static,
    {
        self.command = Some(Arc::new(command));
        self
    }

    /// Gate visibility of the node on the caller's source.
    pub fn requires<F>(mut self, requirement: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.requirement = Arc::new(requirement);
        self
    }

    /// Continue parsing in `target` once this node matches.
    pub fn redirect(self, target: &NodeRef<S>) -> Self {
        self.forward(target, None, false)
    }

    /// Redirect to `target`, transforming the source with `modifier`.
    ///
    /// Outside fork mode the modifier must yield exactly one source.
    pub fn redirect_with<F>(self, target: &NodeRef<S>, modifier: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> Result<S, CommandError> + Send + Sync + 'static,
    {
        let modifier: RedirectModifier<S> =
            Arc::new(move |ctx: &CommandContext<S>| Ok(vec![modifier(ctx)?]));
        self.forward(target, Some(modifier), false)
    }

    /// Redirect to `target`, running the rest of the chain once per source
    /// produced by `modifier`, with failures isolated per source.
    pub fn fork<F>(self, target: &NodeRef<S>, modifier: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> Result<Vec<S>, CommandError> + Send + Sync + 'static,
    {
        self.forward(target, Some(Arc::new(modifier)), true)
    }

    /// General form of [`redirect`](Self::redirect) and [`fork`](Self::fork).
    pub fn forward(
        mut self,
        target: &NodeRef<S>,
        modifier: Option<RedirectModifier<S>>,
        fork: bool,
    ) -> Self {
        if self.arguments.has_children() {
            let err = BuildError::RedirectWithChildren {
                node: self.name().to_string(),
            };
            return self.fail(err);
        }
        self.target = Some(Arc::clone(target));
        self.modifier = modifier;
        self.forks = fork;
        self
    }

    /// Literal text or argument name of the node being built.
    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Root => "",
            NodeKind::Literal(literal) => literal,
            NodeKind::Argument { name, .. } => name,
        }
    }

    /// Children added so far.
    pub fn arguments(&self) -> Vec<NodeRef<S>> {
        self.arguments.children()
    }

    pub fn redirect_target(&self) -> Option<&NodeRef<S>> {
        self.target.as_ref()
    }

    pub fn is_fork(&self) -> bool {
        self.forks
    }

    /// Produce the node, or the first configuration error hit while building.
    pub fn build(self) -> Result<NodeRef<S>, BuildError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let node = Arc::new(CommandNode::new(
            self.kind,
            self.command,
            self.requirement,
            self.target,
            self.modifier,
            self.forks,
        ));
        for child in self.arguments.children() {
            node.add_child(child)?;
        }
        Ok(node)
    }

    fn fail(mut self, error: BuildError) -> Self {
        self.error.get_or_insert(error);
        self
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
