//! Redirects back into the tree and source modifiers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cmdtree_dispatch::{argument, literal, CommandError, Dispatcher};
use cmdtree_reader::{integer, ErrorKind, StringRange};

use crate::prelude::{arithmetic, syntax_error, Recorder};

#[yare::parameterized(
    one_hop          = { "add 5 run", 1, 6 },
    two_hops         = { "add 5 add 6 run", 2, 13 },
    plain_redirect   = { "blank run", 7, 7 },
    mixed            = { "blank add 3 blank run", 0, 3 },
    negative         = { "add -4 run", 1, -3 },
)]
fn modifiers_rewrite_the_source(input: &str, source: i32, expected: i32) {
    assert_eq!(arithmetic().execute_input(input, source).unwrap(), expected);
}

#[test]
fn child_context_starts_after_the_redirect() {
    let dispatcher = arithmetic();
    let input = "add 5 run";
    let parse = dispatcher.parse(input, 0);
    let top = parse.context();
    assert_eq!(top.range(), StringRange::between(0, 5));
    assert!(top.command().is_none());

    let child = top.child().unwrap();
    assert_eq!(child.range().get(input), "run");
    assert!(child.command().is_some());
    assert!(Arc::ptr_eq(child.root_node(), dispatcher.root()));
}

#[yare::parameterized(
    nothing_after      = { "add 5", 5 },
    only_trailing_space = { "add 5 ", 6 },
    redirect_to_root   = { "blank", 5 },
)]
fn dangling_redirect_is_unknown_command(input: &str, cursor: usize) {
    let err = syntax_error(&arithmetic(), input, 0);
    assert_eq!(err.kind(), &ErrorKind::UnknownCommand);
    assert_eq!(err.cursor(), Some(cursor));
}

#[test]
fn failed_modifier_propagates_and_notifies() {
    let (recorder, calls) = Recorder::new();
    let mut dispatcher = Dispatcher::<i32>::new().consumer(recorder);
    let root = Arc::clone(dispatcher.root());
    dispatcher
        .register(literal("deny").redirect_with(&root, |_| Err(CommandError::failed("denied"))))
        .unwrap();
    dispatcher
        .register(literal("run").executes(|ctx| Ok(*ctx.source())))
        .unwrap();

    let err = dispatcher.execute_input("deny run", 9).unwrap_err();
    assert_eq!(err, CommandError::failed("denied"));
    assert_eq!(*calls.lock(), vec![(9, false, 0)]);
}

#[test]
fn redirect_to_subtree_reuses_its_commands() {
    let mut dispatcher = Dispatcher::<i32>::new();
    let actual = dispatcher
        .register(literal("actual").then(literal("sub").executes(|_| Ok(42))))
        .unwrap();
    dispatcher.register(literal("alias").redirect(&actual)).unwrap();

    assert_eq!(dispatcher.execute_input("alias sub", 0).unwrap(), 42);
    assert_eq!(
        dispatcher.all_usage(dispatcher.root(), &0, false),
        ["actual sub", "alias -> actual"]
    );
}

#[yare::parameterized(
    redirect_first = { true },
    redirect_last  = { false },
)]
fn matched_redirect_stops_the_sibling_scan(redirect_first: bool) {
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    let mut dispatcher = Dispatcher::<i32>::new();
    let root = Arc::clone(dispatcher.root());
    let via_redirect = argument("a", integer()).redirect(&root);
    let direct = argument("b", integer()).then(literal("x").executes(move |_| {
        flag.store(true, Ordering::SeqCst);
        Ok(1)
    }));
    let go = if redirect_first {
        literal("go").then(via_redirect).then(direct)
    } else {
        literal("go").then(direct).then(via_redirect)
    };
    dispatcher.register(go).unwrap();

    let err = syntax_error(&dispatcher, "go 5 x", 0);
    assert_eq!(err.kind(), &ErrorKind::UnknownArgument);
    assert_eq!(err.cursor(), Some(5));
    assert!(!ran.load(Ordering::SeqCst));
}
