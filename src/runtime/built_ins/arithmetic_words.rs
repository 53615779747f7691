use crate::{
    add_native_word,
    runtime::{
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// The arithmetic words insist on exactly two values being on the stack.  Check that before
/// anything is popped so a failing word leaves the stack as it found it.
fn check_binary_operands(interpreter: &mut dyn Interpreter, word: &str) -> error::Result<()> {
    let depth = interpreter.stack().len();

    if depth != 2 {
        return script_error(
            interpreter,
            ErrorKind::InsufficientOperands,
            format!(
                "Found a single '{}' with {} value(s) on the stack, it needs exactly 2.",
                word, depth
            ),
        );
    }

    Ok(())
}

/// Pop the top two values, returning them in push order.  The depth must already be checked.
fn pop_pair(interpreter: &mut dyn Interpreter) -> error::Result<(i64, i64)> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    Ok((a, b))
}

/// Check and pop the operands for a binary word.
fn pop_binary_operands(interpreter: &mut dyn Interpreter, word: &str) -> error::Result<(i64, i64)> {
    check_binary_operands(interpreter, word)?;
    pop_pair(interpreter)
}

/// Apply a checked operation, reporting an overflow as an error instead of wrapping.
fn push_checked(
    interpreter: &mut dyn Interpreter,
    word: &str,
    a: i64,
    b: i64,
    result: Option<i64>,
) -> error::Result<()> {
    match result {
        Some(value) => {
            interpreter.push(value);
            Ok(())
        }

        None => script_error(
            interpreter,
            ErrorKind::IntegerOverflow,
            format!("Result of {} {} {} does not fit in a 64-bit integer.", a, word, b),
        ),
    }
}

/// Add the top two values.
///
/// Signature: `a b -- a+b`
fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (a, b) = pop_binary_operands(interpreter, "+")?;
    push_checked(interpreter, "+", a, b, a.checked_add(b))
}

/// Subtract the top value from the one below it.
///
/// Signature: `a b -- a-b`
fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (a, b) = pop_binary_operands(interpreter, "-")?;
    push_checked(interpreter, "-", a, b, a.checked_sub(b))
}

/// Signature: `a b -- a*b`
fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let (a, b) = pop_binary_operands(interpreter, "*")?;
    push_checked(interpreter, "*", a, b, a.checked_mul(b))
}

/// Integer division, truncating towards zero.
///
/// Signature: `a b -- a/b`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    check_binary_operands(interpreter, "/")?;

    if interpreter.stack().last() == Some(&0) {
        return script_error(
            interpreter,
            ErrorKind::DivisionByZero,
            "Can't divide by zero!".to_string(),
        );
    }

    let (a, b) = pop_pair(interpreter)?;
    push_checked(interpreter, "/", a, b, a.checked_div(b))
}

/// Register the arithmetic words.
pub fn register_arithmetic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "+",
        word_add,
        "Add the two values on the stack.",
        "a b -- sum"
    );

    add_native_word!(
        interpreter,
        "-",
        word_subtract,
        "Subtract the top value from the one below it.",
        "a b -- difference"
    );

    add_native_word!(
        interpreter,
        "*",
        word_multiply,
        "Multiply the two values on the stack.",
        "a b -- product"
    );

    add_native_word!(
        interpreter,
        "/",
        word_divide,
        "Divide the lower value by the top value, truncating the result.",
        "a b -- quotient"
    );
}
