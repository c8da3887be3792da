//! Forking redirects: one execution per produced source.

use std::sync::Arc;

use cmdtree_dispatch::{literal, CommandError, Dispatcher};
use parking_lot::Mutex;

use crate::prelude::{Completion, Recorder};

// `split` forks to the root with sources 10, 20, 30 unless the source is 0,
// `none` forks to nothing, `broken` fails its modifier, `run` returns the
// source and rejects odd ones, `shift` adds one to the source.
fn forking() -> (Dispatcher<i32>, Arc<Mutex<Vec<Completion<i32>>>>) {
    let (recorder, calls) = Recorder::new();
    let mut dispatcher = Dispatcher::<i32>::new().consumer(recorder);
    let root = Arc::clone(dispatcher.root());
    dispatcher
        .register(literal("split").fork(&root, |ctx| {
            if *ctx.source() == 0 {
                Ok(Vec::new())
            } else {
                Ok(vec![10, 20, 30])
            }
        }))
        .unwrap();
    dispatcher
        .register(literal("none").fork(&root, |_| Ok(Vec::new())))
        .unwrap();
    dispatcher
        .register(literal("broken").fork(&root, |_| Err(CommandError::failed("no targets"))))
        .unwrap();
    dispatcher
        .register(literal("shift").redirect_with(&root, |ctx| Ok(ctx.source() + 1)))
        .unwrap();
    dispatcher
        .register(literal("run").executes(|ctx| {
            let source = *ctx.source();
            if source % 2 == 0 {
                Ok(source)
            } else {
                Err(CommandError::failed("odd source"))
            }
        }))
        .unwrap();
    (dispatcher, calls)
}

#[test]
fn result_counts_successful_invocations() {
    let (dispatcher, calls) = forking();
    assert_eq!(dispatcher.execute_input("split run", 1).unwrap(), 3);
    similar_asserts::assert_eq!(
        *calls.lock(),
        vec![(10, true, 10), (20, true, 20), (30, true, 30)]
    );
}

#[test]
fn failures_after_a_fork_are_isolated() {
    let (dispatcher, calls) = forking();
    assert_eq!(dispatcher.execute_input("split shift run", 1).unwrap(), 0);
    similar_asserts::assert_eq!(
        *calls.lock(),
        vec![(11, false, 0), (21, false, 0), (31, false, 0)]
    );
}

#[test]
fn fork_mode_is_sticky_through_later_redirects() {
    let (dispatcher, calls) = forking();
    assert_eq!(
        dispatcher.execute_input("split shift shift run", 1).unwrap(),
        3
    );
    assert_eq!(calls.lock().len(), 3);
}

#[yare::parameterized(
    fork_to_nothing     = { "none run", 4 },
    conditional_nothing = { "split run", 0 },
)]
fn empty_source_set_returns_zero(input: &str, source: i32) {
    let (dispatcher, calls) = forking();
    assert_eq!(dispatcher.execute_input(input, source).unwrap(), 0);
    assert!(calls.lock().is_empty());
}

#[test]
fn failed_fork_modifier_is_reported_not_raised() {
    let (dispatcher, calls) = forking();
    assert_eq!(dispatcher.execute_input("broken run", 2).unwrap(), 0);
    similar_asserts::assert_eq!(*calls.lock(), vec![(2, false, 0)]);
}

#[test]
fn errors_before_a_fork_still_propagate() {
    let (dispatcher, calls) = forking();
    let err = dispatcher.execute_input("run", 3).unwrap_err();
    assert_eq!(err, CommandError::failed("odd source"));
    similar_asserts::assert_eq!(*calls.lock(), vec![(3, false, 0)]);
}
