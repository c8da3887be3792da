//! Rendering syntax errors for people.

use std::sync::Arc;

use cmdtree_dispatch::{argument, literal, Dispatcher};
use cmdtree_reader::{
    integer_range, locate, word, ArgumentType, ArgumentValue, ErrorKind, StringReader, SyntaxError,
};

use crate::prelude::syntax_error;

/// Hex colour component; reports errors without position.
#[derive(Debug)]
struct Hex;

impl ArgumentType for Hex {
    fn parse(&self, reader: &mut StringReader) -> Result<ArgumentValue, SyntaxError> {
        let token = reader.read_unquoted_string().to_string();
        match i32::from_str_radix(&token, 16) {
            Ok(value) => Ok(Arc::new(value)),
            Err(_) => Err(SyntaxError::new(ErrorKind::InvalidInt { value: token })),
        }
    }
}

fn grammar() -> Dispatcher<()> {
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .register(
            literal("give").then(
                argument("item", word())
                    .then(argument("count", integer_range(1, 64)).executes(|ctx| ctx.get_integer("count"))),
            ),
        )
        .unwrap();
    dispatcher
        .register(literal("color").then(argument("value", Hex).executes(|ctx| ctx.get_integer("value"))))
        .unwrap();
    dispatcher
}

#[yare::parameterized(
    unknown_command = { "nope", "Unknown command at position 0: <--[HERE]" },
    incomplete_command = { "give", "Unknown command at position 4: give<--[HERE]" },
    out_of_range = {
        "give apple 99",
        "Integer must not be more than 64, found 99 at position 11: ...ive apple <--[HERE]"
    },
    plugin_error_is_positioned = {
        "color zz",
        "Could not parse command: Invalid integer 'zz' at position 6: color <--[HERE]"
    },
)]
fn messages_carry_a_marker(input: &str, expected: &str) {
    assert_eq!(syntax_error(&grammar(), input, ()).to_string(), expected);
}

#[test]
fn plugin_value_reaches_the_handler() {
    assert_eq!(grammar().execute_input("color ff", ()).unwrap(), 255);
}

#[test]
fn caret_snippet_points_at_the_cursor() {
    let err = syntax_error(&grammar(), "give apple 99", ());
    assert_eq!(err.context(5).unwrap(), "pple 99\n     ^");
}

#[test]
fn diagnostic_names_line_and_column() {
    let err = syntax_error(&grammar(), "give apple 99", ());
    assert_eq!(
        err.diagnostic().unwrap(),
        "error: Integer must not be more than 64, found 99\n  --> line 1, column 12\n   |\n  1 | give apple 99\n   |            ^"
    );
}

#[test]
fn errors_without_input_have_no_marker() {
    let err = SyntaxError::new(ErrorKind::ExpectedBool);
    assert_eq!(err.to_string(), "Expected bool");
    assert!(err.context(5).is_none());
    assert!(err.diagnostic().is_none());
}

#[test]
fn positions_map_to_lines() {
    assert_eq!(locate("say hi\nsay bye", 11), (2, 4, "say bye"));
}
