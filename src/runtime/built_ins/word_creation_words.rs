use crate::{
    add_native_word,
    lang::tokenizing::TokenList,
    runtime::{
        error::{self, ErrorKind, script_error, script_error_str},
        interpreter::Interpreter,
    },
};

/// Start and finish the definition of a new word.  The name and the body are pulled from the token
/// stream up to and including the closing `;`, so the dispatch loop resumes after the definition.
/// The body is kept as written, words it refers to are looked up each time it is expanded.
///
/// Signature: ` -- `
fn word_define(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = match interpreter.next_token() {
        Some(token) if !token.is_definition_end() => token,
        _ => {
            return script_error_str(
                interpreter,
                ErrorKind::MalformedDefinition,
                "Found ':' without a name for the new word.",
            );
        }
    };

    if name.is_number() {
        return script_error(
            interpreter,
            ErrorKind::InvalidRedefinition,
            format!("Numbers cannot be redefined, found '{}'.", name),
        );
    }

    let mut body = TokenList::new();

    loop {
        match interpreter.next_token() {
            Some(token) if token.is_definition_end() => break,
            Some(token) => body.push(token),
            None => {
                return script_error(
                    interpreter,
                    ErrorKind::MalformedDefinition,
                    format!("Definition of '{}' is missing it's closing ';'.", name),
                );
            }
        }
    }

    interpreter.define_word(name, body)
}

/// A `;` is only meaningful as the end of a definition, which `:` consumes itself.
fn word_end_definition(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    script_error_str(
        interpreter,
        ErrorKind::MalformedDefinition,
        "Found ';' without a matching ':'.",
    )
}

/// Register the words used to create new words.
pub fn register_word_creation_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        ":",
        word_define,
        "Define a new word from the tokens up to the next ;",
        " -- "
    );

    add_native_word!(
        interpreter,
        ";",
        word_end_definition,
        "End a word definition.",
        " -- "
    );
}
