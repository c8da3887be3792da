//! Choosing between sibling branches that both match.

use cmdtree_dispatch::{argument, literal, Dispatcher};
use cmdtree_reader::{greedy_string, integer, word, ErrorKind};

use crate::prelude::syntax_error;

fn siblings() -> Dispatcher<()> {
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register(
            literal("pick")
                .then(literal("all").executes(|_| Ok(1)))
                .then(argument("name", word()).executes(|_| Ok(2)))
                .then(argument("other", word()).executes(|_| Ok(3))),
        )
        .unwrap();
    dispatcher
        .register(
            literal("count")
                .then(
                    argument("n", integer())
                        .then(literal("end").executes(|_| Ok(4)))
                        .then(argument("m", integer()).executes(|_| Ok(5))),
                )
                .then(argument("rest", greedy_string()).executes(|_| Ok(6))),
        )
        .unwrap();
    dispatcher
        .register(
            literal("mode")
                .then(argument("a", integer()).then(argument("m", integer()).executes(|_| Ok(7))))
                .then(argument("b", word()).then(literal("end").executes(|_| Ok(8)))),
        )
        .unwrap();
    dispatcher
}

#[yare::parameterized(
    literal_beats_arguments   = { "pick all", 1 },
    first_registered_argument = { "pick any", 2 },
    both_full_first_wins      = { "count 5 end", 4 },
    nested_argument           = { "count 5 6", 5 },
    full_beats_partial        = { "count 5 more words", 6 },
    first_of_two_partials     = { "mode 5 6", 7 },
    only_full_branch          = { "mode x end", 8 },
)]
fn best_branch_runs(input: &str, expected: i32) {
    assert_eq!(siblings().execute_input(input, ()).unwrap(), expected);
}

#[test]
fn clean_partial_beats_partial_with_errors() {
    // `a` fails on "zzz" as an integer, `b` stops without an error
    let err = syntax_error(&siblings(), "mode 5 zzz", ());
    assert_eq!(err.kind(), &ErrorKind::UnknownArgument);
    assert_eq!(err.cursor(), Some(7));
}

#[test]
fn parsed_arguments_come_from_the_winning_branch() {
    let dispatcher = siblings();
    let parse = dispatcher.parse("count 5 more words", ());
    let names: Vec<&str> = parse.context().arguments().keys().map(String::as_str).collect();
    assert_eq!(names, ["rest"]);
}
