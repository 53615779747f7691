use crate::{lang::source_location::SourceLocation, runtime::interpreter::CallStack};
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

use super::interpreter::Interpreter;

pub type Result<T> = std::result::Result<T, ScriptError>;

/// The category of a failure.  Every one of these is fatal to the running program.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ErrorKind {
    /// A word needed more values on the stack than were available.
    InsufficientOperands,

    /// The `/` word was asked to divide by zero.
    DivisionByZero,

    /// The token is not a number, a user defined word, or a built-in word.
    UnknownWord,

    /// A definition tried to use a number as the new word's name.
    InvalidRedefinition,

    /// A `: name ... ;` definition was incomplete, or a `;` was found on it's own.
    MalformedDefinition,

    /// The result of an arithmetic word does not fit in a 64-bit integer.
    IntegerOverflow,

    /// User defined words expanded into each other deeper than the configured limit.
    ExpansionDepthExceeded,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let text = match self {
            ErrorKind::InsufficientOperands => "insufficient operands",
            ErrorKind::DivisionByZero => "division by zero",
            ErrorKind::UnknownWord => "unknown word",
            ErrorKind::InvalidRedefinition => "invalid redefinition",
            ErrorKind::MalformedDefinition => "malformed definition",
            ErrorKind::IntegerOverflow => "integer overflow",
            ErrorKind::ExpansionDepthExceeded => "expansion depth exceeded",
        };

        write!(f, "{}", text)
    }
}

/// Any error that occurs during the execution of a Forth program.
#[derive(Clone)]
pub struct ScriptError {
    /// What kind of failure this is.
    kind: ErrorKind,

    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,

    /// The user defined words being expanded at the time of the error, if available.
    call_stack: Option<CallStack>,
}

impl Error for ScriptError {}

/// Pretty print the ScriptError for reporting the error that occurred within the Forth program.
impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.error)?,
            None => write!(f, "{}", self.error)?,
        }

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev() {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}

impl Debug for ScriptError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self)
    }
}

impl ScriptError {
    /// Create a new ScriptError.
    pub fn new(
        kind: ErrorKind,
        location: Option<SourceLocation>,
        error: String,
        call_stack: Option<CallStack>,
    ) -> ScriptError {
        ScriptError {
            kind,
            location,
            error,
            call_stack,
        }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(
        kind: ErrorKind,
        location: Option<SourceLocation>,
        error: String,
        call_stack: Option<CallStack>,
    ) -> Result<T> {
        Err(ScriptError::new(kind, location, error, call_stack))
    }

    /// The category of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation> {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String {
        &self.error
    }

    /// If available, the user word call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack> {
        &self.call_stack
    }
}

/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// interpreter's current location and call stack.
pub fn script_error<T>(
    interpreter: &dyn Interpreter,
    kind: ErrorKind,
    message: String,
) -> Result<T> {
    let location = interpreter.current_location().clone();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(kind, location, message, Some(call_stack))
}

pub fn script_error_str<T>(
    interpreter: &dyn Interpreter,
    kind: ErrorKind,
    message: &str,
) -> Result<T> {
    script_error(interpreter, kind, message.to_string())
}
