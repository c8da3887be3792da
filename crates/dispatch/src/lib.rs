// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Command tree dispatch.
//!
//! Commands are registered as a tree of literal keywords and typed
//! arguments. Input is matched against the tree by a backtracking parser
//! that prefers exact literals over arguments and full matches over partial
//! ones, then executed through any redirects and forks it passed.
//!
//! - [`literal`] / [`argument`]: build grammar nodes fluently
//! - [`Dispatcher`]: register, parse, execute
//! - [`ParseResults`]: what a parse matched and where it stopped
//! - [`CommandContext`]: what a handler sees
//! - [`ContextChain`]: the redirect stages behind one execution
//! - [`ResultConsumer`]: per-invocation completion notifications
//!
//! # Quick Start
//!
//! ```
//! use cmdtree_dispatch::{argument, literal, Dispatcher};
//! use cmdtree_reader::{integer_range, word};
//!
//! let mut dispatcher = Dispatcher::<String>::new();
//! dispatcher.register(
//!     literal("give").then(
//!         argument("item", word()).then(
//!             argument("count", integer_range(1, 64)).executes(|ctx| {
//!                 let item = ctx.get_string("item")?;
//!                 assert_eq!(item, "apple");
//!                 ctx.get_integer("count")
//!             }),
//!         ),
//!     ),
//! )?;
//!
//! assert_eq!(dispatcher.execute_input("give apple 12", "steve".into())?, 12);
//!
//! let err = dispatcher.execute_input("give apple 99", "steve".into()).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Integer must not be more than 64, found 99 at position 11: ...ive apple <--[HERE]"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod chain;
mod consumer;
mod context;
mod dispatcher;
mod error;
mod node;
mod parse;

pub use builder::{argument, literal, ArgumentBuilder};
pub use chain::{ContextChain, Stage};
pub use consumer::{NoopConsumer, ResultConsumer};
pub use context::{CommandContext, CommandContextBuilder, ParsedArgument, ParsedCommandNode};
pub use dispatcher::Dispatcher;
pub use error::{BuildError, ChainError, CommandError};
pub use node::{
    Command, CommandNode, NodeKind, NodeRef, RedirectModifier, Requirement, ARGUMENT_SEPARATOR,
};
pub use parse::ParseResults;
