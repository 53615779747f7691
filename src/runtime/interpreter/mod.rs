use crate::{
    lang::{
        source_location::SourceLocation,
        tokenizing::{Token, TokenList},
    },
    runtime::{
        config::InterpreterConfig,
        data_structures::dictionary::{Dictionary, WordInfo},
        error,
    },
};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

pub mod forth_interpreter;

/// A call stack item is a record of the expanding user word's name and the location within the
/// original source code from which it was invoked.  This items are read-only and the fields are
/// accessed by member functions.
#[derive(Clone, Debug)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    /// Where in the source code was the execution of this word found?
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    // The name of the word being executed.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this word can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location(), self.word())
    }
}

/// Type to represent a call stack.  This is a stack of user words currently being expanded by the
/// interpreter.  This is used to help track errors and provide a stack trace to the user.
pub type CallStack = Vec<CallItem>;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Vec<i64>;

/// Trait for managing the interpreter's data stack.  Intended to be called by the built-in words.
pub trait InterpreterStack {
    /// What has the maximum depth the stack as reached so far?
    fn stack_max_depth(&self) -> usize;

    /// Use to examine the full data stack when required.  Words check the depth through here before
    /// popping anything so that a failing word leaves the stack untouched.
    fn stack(&self) -> &ValueStack;

    /// Push a value onto the stack.  This is the primary way of sending values to words.
    fn push(&mut self, value: i64);

    /// Pop a value from the stack.  This is the primary way of receiving outputs from words.  If
    /// the stack is empty an insufficient operands error is returned.
    fn pop(&mut self) -> error::Result<i64>;
}

/// Trait for managing and executing the incoming source code token stream.
pub trait CodeManagement {
    /// Take the next token from the token stream currently being processed.  This advances the
    /// cursor of that stream, so a word that consumes tokens this way causes them to be skipped by
    /// the dispatch loop.  Returns None at the end of the stream.
    fn next_token(&mut self) -> Option<Token>;

    /// Run a list of tokens through the dispatch loop, left to right, stopping at the first error.
    /// User words found along the way are expanded in place before the loop moves on.
    fn process_tokens(&mut self, tokens: Rc<TokenList>) -> error::Result<()>;

    /// Tokenize and run an ordered list of source lines.
    ///
    /// The path parameter is used to represent the source code in things like call stacks and error
    /// reporting.
    fn process_lines(&mut self, path: &str, lines: &[&str]) -> error::Result<()>;

    /// Tokenize and run an in memory source string, each new line being treated as a line break.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;
}

/// Definition of a word handler function.  This is the function that is called when a built-in word
/// is to be executed.  Can be a lambda, a callable object or a Rust function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Information about a native word handler.  Once created it's fields are read-only and accessed by
/// member methods.
#[derive(Clone)]
pub struct WordHandlerInfo {
    name: String,
    handler: Rc<WordHandler>,
    description: String,
    signature: String,
}

impl WordHandlerInfo {
    /// Create a new WordHandlerInfo instance.
    pub fn new(
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    ) -> WordHandlerInfo {
        WordHandlerInfo {
            name,
            handler,
            description,
            signature,
        }
    }

    /// The name of the word itself.
    pub fn name(&self) -> &String {
        &self.name
    }

    /// The Handler function for the word.
    pub fn handler(&self) -> Rc<WordHandler> {
        self.handler.clone()
    }

    /// A simple description of the word.
    pub fn description(&self) -> &String {
        &self.description
    }

    /// The stack signature of the word.
    pub fn signature(&self) -> &String {
        &self.signature
    }
}

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        $interpreter.add_native_word(
            $name.to_string(),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// If currently set, this represents the location of the token being executed in the original
    /// Forth source code.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Register a native word.  The name is matched without regard to case.
    fn add_native_word(
        &mut self,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    );

    /// Find a native word by it's case folded name.
    fn find_native_word(&self, name: &str) -> Option<&WordHandlerInfo>;

    /// Add or replace a user defined word in the dictionary.  The name token must not be a number.
    fn define_word(&mut self, name: Token, body: TokenList) -> error::Result<()>;

    /// Find a user defined word in the interpreter's dictionary by name.
    fn find_word(&self, name: &str) -> Option<&WordInfo>;

    /// The current user word call stack.
    fn call_stack(&self) -> &CallStack;

    /// Push a new name and location onto the call stack.  This information is used to help track
    /// errors reported by the interpreter.
    fn call_stack_push(&mut self, name: String, location: SourceLocation);

    /// Pop the last name and location from the call stack.
    fn call_stack_pop(&mut self);
}

/// Core interpreter trait.
///
/// This trait brings together the traits that define the core functionality of the interpreter:
/// managing the data stack, processing the token stream, and managing and executing words.
pub trait Interpreter: InterpreterStack + CodeManagement + WordManagement {
    /// The limits this interpreter was created with.
    fn config(&self) -> &InterpreterConfig;

    /// The current word dictionary of user words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;
}
