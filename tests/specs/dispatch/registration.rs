//! Registering commands and merging shared prefixes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cmdtree_dispatch::{literal, Dispatcher};

#[test]
fn single_literal_invokes_handler_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher
        .register(literal("foo").executes(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(42)
        }))
        .unwrap();

    assert_eq!(dispatcher.execute_input("foo", ()).unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn shared_prefix_merges_into_one_node() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut dispatcher = Dispatcher::<()>::new();
    for sub in ["foo", "bar"] {
        let counter = Arc::clone(&calls);
        dispatcher
            .register(literal("base").then(literal(sub).executes(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(1)
            })))
            .unwrap();
    }

    let base = dispatcher.find_node(&["base"]).unwrap();
    let children: Vec<String> = base.children().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(children, ["foo", "bar"]);
    assert_eq!(dispatcher.root().children().len(), 1);

    dispatcher.execute_input("base foo", ()).unwrap();
    dispatcher.execute_input("base bar", ()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn later_registration_replaces_command() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher.register(literal("foo").executes(|_| Ok(1))).unwrap();
    dispatcher.register(literal("foo").executes(|_| Ok(2))).unwrap();
    assert_eq!(dispatcher.execute_input("foo", ()).unwrap(), 2);
}

#[test]
fn paths_and_usage_reflect_the_tree() {
    let mut dispatcher = Dispatcher::<()>::new();
    let root = Arc::clone(dispatcher.root());
    let leaf = dispatcher
        .register(literal("config").then(literal("reload").executes(|_| Ok(0))))
        .unwrap()
        .child("reload")
        .unwrap();
    dispatcher.register(literal("again").redirect(&root)).unwrap();

    assert_eq!(dispatcher.path(&leaf), ["config", "reload"]);
    assert_eq!(
        dispatcher.all_usage(dispatcher.root(), &(), true),
        ["config reload", "again ..."]
    );
}

#[test]
fn dispatchers_sharing_a_root_outlive_each_other() {
    let mut first = Dispatcher::<i32>::new();
    first
        .register(literal("run").executes(|ctx| Ok(*ctx.source())))
        .unwrap();
    let second = Dispatcher::with_root(Arc::clone(first.root()));

    drop(first);
    assert_eq!(second.execute_input("run", 7).unwrap(), 7);
}
