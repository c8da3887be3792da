// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion observers.

use crate::context::CommandContext;

/// Observer notified once per terminal command attempt.
///
/// `success` is false when the command, or a modifier ahead of it, failed;
/// `result` is then 0.
pub trait ResultConsumer<S>: Send + Sync {
    fn on_command_complete(&self, context: &CommandContext<S>, success: bool, result: i32);
}

/// Consumer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopConsumer;

impl<S> ResultConsumer<S> for NoopConsumer {
    fn on_command_complete(&self, _context: &CommandContext<S>, _success: bool, _result: i32) {}
}

impl<S, F> ResultConsumer<S> for F
where
    F: Fn(&CommandContext<S>, bool, i32) + Send + Sync,
{
    fn on_command_complete(&self, context: &CommandContext<S>, success: bool, result: i32) {
        self(context, success, result)
    }
}
