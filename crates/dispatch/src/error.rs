// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tree construction and command execution.

use cmdtree_reader::SyntaxError;
use thiserror::Error;

/// Errors surfaced by [`Dispatcher::execute`](crate::Dispatcher::execute),
/// command handlers, and redirect modifiers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    /// The input did not match the grammar, or a handler raised a syntax error.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A command handler or modifier reported a failure of its own.
    #[error("{message}")]
    Failed {
        /// Handler-defined description.
        message: String,
    },

    /// A handler asked for an argument the matched path did not capture.
    #[error("no such argument '{name}' exists on this command")]
    NoSuchArgument { name: String },

    /// A handler asked for an argument as the wrong type.
    #[error("argument '{name}' is not a {expected}")]
    ArgumentType {
        name: String,
        expected: &'static str,
    },
}

impl CommandError {
    /// Shorthand for [`CommandError::Failed`].
    pub fn failed(message: impl Into<String>) -> Self {
        CommandError::Failed {
            message: message.into(),
        }
    }

    /// The syntax error inside, if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            CommandError::Syntax(e) => Some(e),
            _ => None,
        }
    }
}

/// Grammar configuration errors raised while building the node tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("cannot forward node '{node}' that already has children")]
    RedirectWithChildren { node: String },

    #[error("cannot add children to redirected node '{node}'")]
    ChildOnRedirect { node: String },

    #[error("cannot add a root node as a child of another node")]
    RootAsChild,
}

/// Failure to flatten a context into a [`ContextChain`](crate::ContextChain).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
    #[error("last command in chain must be executable")]
    NotExecutable,
}
