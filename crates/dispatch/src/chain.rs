// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flattened redirect chains and their execution.
//!
//! A parsed [`CommandContext`] links one context per redirect boundary
//! through its `child`. [`ContextChain::try_flatten`] turns that linked form
//! into an owned sequence of modifier stages followed by one executable
//! stage, which [`ContextChain::execute_all`] then runs against a source.

use tracing::{debug, warn};

use crate::consumer::ResultConsumer;
use crate::context::CommandContext;
use crate::error::{ChainError, CommandError};
use crate::node::Command;

/// What the head of a chain does when run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Transform the source set through a redirect modifier.
    Modify,
    /// Run the terminal command.
    Execute,
}

/// Modifier stages plus the terminal executable context.
///
/// The executable stage always carries a command; a chain cannot be built
/// otherwise.
#[derive(Clone)]
pub struct ContextChain<S> {
    modifiers: Vec<CommandContext<S>>,
    executable: CommandContext<S>,
    command: Command<S>,
}

impl<S: Clone> ContextChain<S> {
    /// Flatten `root` along its child links.
    pub fn try_flatten(root: &CommandContext<S>) -> Result<Self, ChainError> {
        let mut modifiers = Vec::new();
        let mut current = root;
        while let Some(child) = current.child() {
            modifiers.push(current.clone());
            current = child;
        }
        let command = current.command().cloned().ok_or(ChainError::NotExecutable)?;
        Ok(Self {
            modifiers,
            executable: current.clone(),
            command,
        })
    }

    pub fn modifiers(&self) -> &[CommandContext<S>] {
        &self.modifiers
    }

    pub fn executable(&self) -> &CommandContext<S> {
        &self.executable
    }

    pub fn stage(&self) -> Stage {
        if self.modifiers.is_empty() {
            Stage::Execute
        } else {
            Stage::Modify
        }
    }

    /// The context the head stage runs with.
    pub fn top_context(&self) -> &CommandContext<S> {
        self.modifiers.first().unwrap_or(&self.executable)
    }

    /// The chain without its head stage, or `None` at the executable stage.
    pub fn next_stage(&self) -> Option<Self> {
        let (_, rest) = self.modifiers.split_first()?;
        Some(Self {
            modifiers: rest.to_vec(),
            executable: self.executable.clone(),
            command: self.command.clone(),
        })
    }

    /// Run the whole chain starting from `source`.
    ///
    /// Outside fork mode the result is the command's own return value and
    /// any failure propagates. Once a forking stage is reached, every
    /// failure is reported to `consumer` and isolated to its source, and the
    /// result is the number of successful command invocations.
    pub fn execute_all(
        &self,
        source: S,
        consumer: &dyn ResultConsumer<S>,
    ) -> Result<i32, CommandError> {
        if self.modifiers.is_empty() {
            return self.run_executable(source, consumer, false);
        }

        let mut forked_mode = false;
        let mut current_sources = vec![source];
        for (index, stage) in self.modifiers.iter().enumerate() {
            forked_mode |= stage.is_forked();
            debug!(
                stage = index,
                sources = current_sources.len(),
                forked = forked_mode,
                "running modifier stage"
            );

            let mut next_sources = Vec::new();
            for source in current_sources {
                next_sources.extend(Self::run_modifier(stage, source, consumer, forked_mode)?);
            }
            if next_sources.is_empty() {
                debug!(stage = index, "no sources left after modifier stage");
                return Ok(0);
            }
            current_sources = next_sources;
        }

        let mut result = 0i32;
        for source in current_sources {
            let outcome = self.run_executable(source, consumer, forked_mode)?;
            result = result.saturating_add(outcome);
        }
        Ok(result)
    }

    /// Apply one stage's modifier to `source`.
    ///
    /// A stage without a modifier passes the source through unchanged.
    pub fn run_modifier(
        stage: &CommandContext<S>,
        source: S,
        consumer: &dyn ResultConsumer<S>,
        forked_mode: bool,
    ) -> Result<Vec<S>, CommandError> {
        let Some(modifier) = stage.redirect_modifier() else {
            return Ok(vec![source]);
        };
        let bound = stage.copy_for(source);
        match modifier(&bound) {
            Ok(sources) => Ok(sources),
            Err(e) => {
                consumer.on_command_complete(&bound, false, 0);
                if forked_mode {
                    warn!(error = %e, "redirect modifier failed for forked source");
                    Ok(Vec::new())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Run the terminal command bound to `source`.
    ///
    /// In fork mode a success counts as 1 and a failure as 0.
    pub fn run_executable(
        &self,
        source: S,
        consumer: &dyn ResultConsumer<S>,
        forked_mode: bool,
    ) -> Result<i32, CommandError> {
        let bound = self.executable.copy_for(source);
        match (self.command)(&bound) {
            Ok(result) => {
                consumer.on_command_complete(&bound, true, result);
                Ok(if forked_mode { 1 } else { result })
            }
            Err(e) => {
                consumer.on_command_complete(&bound, false, 0);
                if forked_mode {
                    warn!(error = %e, "command failed for forked source");
                    Ok(0)
                } else {
                    Err(e)
                }
            }
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for ContextChain<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextChain")
            .field("modifiers", &self.modifiers)
            .field("executable", &self.executable)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
