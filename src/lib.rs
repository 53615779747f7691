/// Module for managing source code locations and the turning of source lines into tokens.
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;

use runtime::{
    built_ins::register_built_in_words,
    error,
    interpreter::{CodeManagement, forth_interpreter::ForthInterpreter},
};

/// The path tag given to programs that are handed to the interpreter as bare lines.
pub const INPUT_PATH: &str = "<input>";

/// Evaluate a complete program from a fresh interpreter and return the final contents of the data
/// stack, bottom to top.
///
/// Every call builds its own stack and dictionary, so running the same program twice always gives
/// the same result.
pub fn evaluate<S: AsRef<str>>(lines: &[S]) -> error::Result<Vec<i64>> {
    let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();
    let mut interpreter = ForthInterpreter::new();

    register_built_in_words(&mut interpreter);
    interpreter.process_lines(INPUT_PATH, &lines)?;

    Ok(interpreter.into_stack())
}
