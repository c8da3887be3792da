//! Structural errors surfaced by execute.

use cmdtree_dispatch::{argument, literal, Dispatcher};
use cmdtree_reader::{integer, ErrorKind, StringReader};

use crate::prelude::syntax_error;

fn grammar() -> Dispatcher<u8> {
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register(
            literal("foo")
                .executes(|_| Ok(1))
                .then(literal("bar").executes(|_| Ok(2))),
        )
        .unwrap();
    dispatcher
        .register(literal("admin").requires(|level| *level >= 4).executes(|_| Ok(3)))
        .unwrap();
    dispatcher
        .register(literal("set").then(argument("n", integer()).executes(|ctx| ctx.get_integer("n"))))
        .unwrap();
    dispatcher
}

#[yare::parameterized(
    nothing_matches   = { "nope", ErrorKind::UnknownCommand, 0 },
    bad_subcommand    = { "foo baz", ErrorKind::UnknownArgument, 4 },
    gated_for_source  = { "admin", ErrorKind::UnknownCommand, 0 },
    only_prefix       = { "set", ErrorKind::UnknownCommand, 3 },
    lexical_error     = { "set x", ErrorKind::ExpectedInt, 4 },
    glued_token       = { "set 5x", ErrorKind::ExpectedArgumentSeparator, 5 },
)]
fn failures_point_at_the_problem(input: &str, kind: ErrorKind, cursor: usize) {
    let err = syntax_error(&grammar(), input, 0);
    assert_eq!(err.kind(), &kind);
    assert_eq!(err.cursor(), Some(cursor));
    assert_eq!(err.input(), Some(input));
}

#[test]
fn requirement_passes_for_privileged_source() {
    assert_eq!(grammar().execute_input("admin", 4).unwrap(), 3);
}

#[test]
fn parse_never_fails_and_flags_leftover_input() {
    let dispatcher = grammar();
    for input in ["", " ", "foo  bar", "foo bar baz", "set -", "\"", "é", "set 99999999999"] {
        let parse = dispatcher.parse(input, 0);
        assert!(parse.reader().cursor() <= input.len());
        if parse.reader().can_read() {
            assert!(dispatcher.execute(&parse).is_err(), "{input:?}");
        }
    }
}

#[test]
fn parse_from_positioned_reader() {
    let dispatcher = grammar();
    let parse = dispatcher.parse_reader(StringReader::with_cursor("/foo bar", 1), 0);
    assert_eq!(dispatcher.execute(&parse).unwrap(), 2);
}
