use crate::{
    add_native_word,
    runtime::{
        error::{self, ErrorKind, script_error_str},
        interpreter::Interpreter,
    },
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = match interpreter.stack().last().copied() {
        Some(value) => value,
        None => {
            return script_error_str(
                interpreter,
                ErrorKind::InsufficientOperands,
                "Can't dup without an argument.",
            );
        }
    };

    interpreter.push(value);

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.stack().is_empty() {
        return script_error_str(
            interpreter,
            ErrorKind::InsufficientOperands,
            "Can't drop if there is no argument.",
        );
    }

    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.stack().len() < 2 {
        return script_error_str(
            interpreter,
            ErrorKind::InsufficientOperands,
            "Can't swap unless there are at least two values.",
        );
    }

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Make a copy of the second value and push it on top.
///
/// Signature: `a b -- a b a`
fn word_over(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let len = interpreter.stack().len();

    if len < 2 {
        return script_error_str(
            interpreter,
            ErrorKind::InsufficientOperands,
            "Can't copy with over unless there are at least two values.",
        );
    }

    let a = interpreter.stack()[len - 2];
    interpreter.push(a);

    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "dup",
        word_dup,
        "Duplicate the top value on the data stack.",
        "value -- value value"
    );

    add_native_word!(
        interpreter,
        "drop",
        word_drop,
        "Discard the top value on the data stack.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        "swap",
        word_swap,
        "Swap the top 2 values on the data stack.",
        "a b -- b a"
    );

    add_native_word!(
        interpreter,
        "over",
        word_over,
        "Copy the second value to the top of the data stack.",
        "a b -- a b a"
    );
}
