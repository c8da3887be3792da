// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The command node tree.
//!
//! A grammar is a tree of [`CommandNode`]s. Every node is one of three
//! [`NodeKind`]s: the root, a literal keyword, or a typed argument. Nodes are
//! shared through [`NodeRef`]. Redirects hold their target weakly, so a
//! redirect back to an ancestor (including the root itself) does not keep the
//! tree alive: the tree lives exactly as long as someone holds its root.

use std::fmt;
use std::sync::{Arc, Weak};

use cmdtree_reader::{ArgumentType, StringReader};
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::context::CommandContext;
use crate::error::{BuildError, CommandError};

/// The only character that separates tokens.
pub const ARGUMENT_SEPARATOR: char = ' ';

/// Terminal handler invoked with a fully bound context.
pub type Command<S> =
    Arc<dyn Fn(&CommandContext<S>) -> Result<i32, CommandError> + Send + Sync>;

/// Visibility gate evaluated against the caller's source.
pub type Requirement<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// Maps one source to the sources the rest of a redirect chain runs with.
pub type RedirectModifier<S> =
    Arc<dyn Fn(&CommandContext<S>) -> Result<Vec<S>, CommandError> + Send + Sync>;

/// Shared handle to a node.
pub type NodeRef<S> = Arc<CommandNode<S>>;

/// The closed set of node variants.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Tree root; its name is the empty string.
    Root,
    /// Matches one fixed keyword.
    Literal(String),
    /// Matches a value parsed by an [`ArgumentType`].
    Argument {
        name: String,
        parser: Arc<dyn ArgumentType>,
    },
}

/// One grammar node.
///
/// Everything except the children and the command is fixed at build time.
/// Children and command change only through merge-on-insert when a command
/// is registered, which needs exclusive access to the dispatcher.
///
/// A redirect target must be kept alive by its own tree or by the caller. A
/// target that has been dropped reads as no redirect.
pub struct CommandNode<S> {
    kind: NodeKind,
    requirement: Requirement<S>,
    redirect: Option<Weak<CommandNode<S>>>,
    modifier: Option<RedirectModifier<S>>,
    forks: bool,
    state: RwLock<NodeState<S>>,
}

struct NodeState<S> {
    children: IndexMap<String, NodeRef<S>>,
    literals: IndexMap<String, NodeRef<S>>,
    arguments: IndexMap<String, NodeRef<S>>,
    command: Option<Command<S>>,
}

impl<S> Default for NodeState<S> {
    fn default() -> Self {
        Self {
            children: IndexMap::new(),
            literals: IndexMap::new(),
            arguments: IndexMap::new(),
            command: None,
        }
    }
}

impl<S: 'static> CommandNode<S> {
    /// A fresh, empty root.
    pub fn root() -> NodeRef<S> {
        Arc::new(Self::new(
            NodeKind::Root,
            None,
            Arc::new(|_: &S| true),
            None,
            None,
            false,
        ))
    }
}

impl<S> CommandNode<S> {
    pub(crate) fn new(
        kind: NodeKind,
        command: Option<Command<S>>,
        requirement: Requirement<S>,
        redirect: Option<NodeRef<S>>,
        modifier: Option<RedirectModifier<S>>,
        forks: bool,
    ) -> Self {
        Self {
            kind,
            requirement,
            redirect: redirect.as_ref().map(Arc::downgrade),
            modifier,
            forks,
            state: RwLock::new(NodeState {
                command,
                ..NodeState::default()
            }),
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Literal text, argument name, or `""` for the root.
    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Root => "",
            NodeKind::Literal(literal) => literal,
            NodeKind::Argument { name, .. } => name,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    pub fn is_argument(&self) -> bool {
        matches!(self.kind, NodeKind::Argument { .. })
    }

    /// How this node is written in usage listings.
    pub fn usage_text(&self) -> String {
        match &self.kind {
            NodeKind::Root => String::new(),
            NodeKind::Literal(literal) => literal.clone(),
            NodeKind::Argument { name, .. } => format!("<{name}>"),
        }
    }

    pub fn command(&self) -> Option<Command<S>> {
        self.state.read().command.clone()
    }

    pub fn has_command(&self) -> bool {
        self.state.read().command.is_some()
    }

    /// Snapshot of the children in insertion order.
    pub fn children(&self) -> Vec<NodeRef<S>> {
        self.state.read().children.values().cloned().collect()
    }

    pub fn child(&self, name: &str) -> Option<NodeRef<S>> {
        self.state.read().children.get(name).cloned()
    }

    pub fn has_children(&self) -> bool {
        !self.state.read().children.is_empty()
    }

    pub fn redirect(&self) -> Option<NodeRef<S>> {
        self.redirect.as_ref().and_then(Weak::upgrade)
    }

    pub fn redirect_modifier(&self) -> Option<&RedirectModifier<S>> {
        self.modifier.as_ref()
    }

    pub fn requirement(&self) -> &Requirement<S> {
        &self.requirement
    }

    pub fn is_fork(&self) -> bool {
        self.forks
    }

    pub fn can_use(&self, source: &S) -> bool {
        (self.requirement)(source)
    }

    /// Insert `node` as a child, merging into an existing child of the same
    /// name.
    ///
    /// On a name collision the incoming command (if any) replaces the
    /// existing one and the incoming grandchildren are merged recursively.
    /// This is how separate registrations sharing a prefix compose.
    pub(crate) fn add_child(&self, node: NodeRef<S>) -> Result<(), BuildError> {
        if node.is_root() {
            return Err(BuildError::RootAsChild);
        }

        let existing = self.child(node.name());
        let Some(existing) = existing else {
            let mut state = self.state.write();
            let name = node.name().to_string();
            match node.kind {
                NodeKind::Literal(_) => {
                    state.literals.insert(name.clone(), Arc::clone(&node));
                }
                NodeKind::Argument { .. } => {
                    state.arguments.insert(name.clone(), Arc::clone(&node));
                }
                NodeKind::Root => {}
            }
            state.children.insert(name, node);
            return Ok(());
        };

        if Arc::ptr_eq(&existing, &node) {
            return Ok(());
        }
        if let Some(command) = node.command() {
            existing.state.write().command = Some(command);
        }
        for grandchild in node.children() {
            existing.add_child(grandchild)?;
        }
        Ok(())
    }

    /// Children worth trying for the token under the reader's cursor.
    ///
    /// An exact literal match for the token wins outright; otherwise every
    /// argument child is a candidate, in insertion order.
    pub fn relevant_nodes(&self, reader: &StringReader) -> Vec<NodeRef<S>> {
        let state = self.state.read();
        if !state.literals.is_empty() {
            let token = reader
                .remaining()
                .split(ARGUMENT_SEPARATOR)
                .next()
                .unwrap_or_default();
            if let Some(literal) = state.literals.get(token) {
                return vec![Arc::clone(literal)];
            }
        }
        state.arguments.values().cloned().collect()
    }
}

impl<S> fmt::Debug for CommandNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("CommandNode")
            .field("kind", &self.kind)
            .field("children", &state.children.keys().collect::<Vec<_>>())
            .field("command", &state.command.is_some())
            .field("redirect", &self.redirect().map(|r| r.usage_text()))
            .field("forks", &self.forks)
            .finish()
    }
}

impl<S> fmt::Display for CommandNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Root => write!(f, "<root>"),
            NodeKind::Literal(literal) => write!(f, "<literal {literal}>"),
            NodeKind::Argument { name, parser } => write!(f, "<argument {name}:{parser:?}>"),
        }
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
