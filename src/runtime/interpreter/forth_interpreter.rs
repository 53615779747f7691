use crate::{
    lang::{
        source_location::SourceLocation,
        tokenizing::{
            Token, TokenList, fold_case, parse_integer, tokenize_from_lines, tokenize_from_source,
        },
    },
    runtime::{
        config::InterpreterConfig,
        data_structures::dictionary::{Dictionary, WordInfo},
        error::{self, ErrorKind, script_error, script_error_str},
        interpreter::{
            CallItem, CallStack, CodeManagement, Interpreter, InterpreterStack, ValueStack,
            WordHandler, WordHandlerInfo, WordManagement,
        },
    },
};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};
use tracing::{debug, trace};

/// A token stream being processed along with the cursor into it.  The top level program and each
/// user word being expanded get their own stream.
struct TokenStream {
    tokens: Rc<TokenList>,
    cursor: usize,

    /// Set when the stream is the body of a user word, which has an entry on the call stack.
    expands_word: bool,
}

impl TokenStream {
    fn new(tokens: Rc<TokenList>, expands_word: bool) -> TokenStream {
        TokenStream {
            tokens,
            cursor: 0,
            expands_word,
        }
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();

        if token.is_some() {
            self.cursor += 1;
        }

        token
    }
}

/// The core interpreter implementation for the Forth language.
///
/// The stack and dictionary are owned by the interpreter, so a fresh instance is a fresh program.
pub struct ForthInterpreter {
    /// The limits applied while running code.
    config: InterpreterConfig,

    /// The maximum depth of the data stack during execution.
    max_depth: usize,

    /// The data stack used by the interpreter.
    stack: ValueStack,

    /// The location of the token currently being executed.
    current_location: Option<SourceLocation>,

    /// The user words currently being expanded.
    call_stack: CallStack,

    /// The dictionary of user defined words.
    dictionary: Dictionary,

    /// The built-in words, keyed by their case folded names.
    native_words: HashMap<String, WordHandlerInfo>,

    /// The stack of token streams being processed, the innermost expansion on top.
    streams: Vec<TokenStream>,
}

impl Default for ForthInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// List the built-in words with their signatures, followed by the user defined words.
impl Display for ForthInterpreter {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut natives: Vec<&WordHandlerInfo> = self.native_words.values().collect();
        natives.sort_by(|a, b| a.name().cmp(b.name()));

        let name_width = natives.iter().map(|w| w.name().len()).max().unwrap_or(0);
        let signature_width = natives.iter().map(|w| w.signature().len()).max().unwrap_or(0);

        writeln!(f, "{} built-in words.", natives.len())?;

        for word in natives {
            writeln!(
                f,
                "{:name_width$}  ( {:signature_width$} )  --  {}",
                word.name(),
                word.signature(),
                word.description()
            )?;
        }

        writeln!(f)?;
        write!(f, "{}", self.dictionary)
    }
}

impl Interpreter for ForthInterpreter {
    fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

impl InterpreterStack for ForthInterpreter {
    fn stack_max_depth(&self) -> usize {
        self.max_depth
    }

    fn stack(&self) -> &ValueStack {
        &self.stack
    }

    fn push(&mut self, value: i64) {
        self.stack.push(value);

        if self.stack.len() > self.max_depth {
            self.max_depth = self.stack.len();
        }
    }

    fn pop(&mut self) -> error::Result<i64> {
        match self.stack.pop() {
            Some(value) => Ok(value),
            None => script_error_str(self, ErrorKind::InsufficientOperands, "Stack underflow."),
        }
    }
}

impl CodeManagement for ForthInterpreter {
    fn next_token(&mut self) -> Option<Token> {
        self.streams.last_mut()?.next()
    }

    fn process_tokens(&mut self, tokens: Rc<TokenList>) -> error::Result<()> {
        let base = self.streams.len();
        let calls = self.call_stack.len();

        self.streams.push(TokenStream::new(tokens, false));

        let result = self.process_streams(base);

        // On failure the expansions above the base are abandoned along with their call items.
        self.streams.truncate(base);
        self.call_stack.truncate(calls);

        result
    }

    fn process_lines(&mut self, path: &str, lines: &[&str]) -> error::Result<()> {
        let tokens = tokenize_from_lines(path, lines);
        self.process_program(tokens)
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()> {
        let tokens = tokenize_from_source(path, source);
        self.process_program(tokens)
    }
}

impl WordManagement for ForthInterpreter {
    fn current_location(&self) -> &Option<SourceLocation> {
        &self.current_location
    }

    fn add_native_word(
        &mut self,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    ) {
        let key = fold_case(&name);
        let info = WordHandlerInfo::new(name, handler, description, signature);

        let _ = self.native_words.insert(key, info);
    }

    fn find_native_word(&self, name: &str) -> Option<&WordHandlerInfo> {
        self.native_words.get(name)
    }

    fn define_word(&mut self, name: Token, body: TokenList) -> error::Result<()> {
        if name.is_number() {
            return script_error(
                self,
                ErrorKind::InvalidRedefinition,
                format!("Numbers cannot be redefined, found '{}'.", name),
            );
        }

        let info = WordInfo::new(name.location().clone(), name.normalized(), body);

        debug!(
            target: "forth::interpreter",
            word = %info.name,
            length = info.body.len(),
            "Defining word."
        );

        if let Some(replaced) = self.dictionary.insert(info) {
            debug!(
                target: "forth::interpreter",
                word = %replaced.name,
                previous = %replaced.location,
                "Replaced an earlier definition."
            );
        }

        Ok(())
    }

    fn find_word(&self, name: &str) -> Option<&WordInfo> {
        self.dictionary.try_get(name)
    }

    fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    fn call_stack_push(&mut self, name: String, location: SourceLocation) {
        self.call_stack.push(CallItem::new(name, location));
    }

    fn call_stack_pop(&mut self) {
        let _ = self.call_stack.pop();
    }
}

impl ForthInterpreter {
    /// Create a new interpreter with the default configuration and no words registered.  Use
    /// `register_built_in_words` to add the standard words.
    pub fn new() -> ForthInterpreter {
        ForthInterpreter::with_config(InterpreterConfig::default())
    }

    /// Create a new interpreter with explicit limits.
    pub fn with_config(config: InterpreterConfig) -> ForthInterpreter {
        ForthInterpreter {
            config,
            max_depth: 0,
            stack: ValueStack::new(),
            current_location: None,
            call_stack: CallStack::new(),
            dictionary: Dictionary::new(),
            native_words: HashMap::new(),
            streams: Vec::new(),
        }
    }

    /// Consume the interpreter returning the data stack, bottom to top.
    pub fn into_stack(self) -> ValueStack {
        self.stack
    }

    /// Run a complete top level program, logging the failure if there is one.
    fn process_program(&mut self, tokens: TokenList) -> error::Result<()> {
        let result = self.process_tokens(Rc::new(tokens));

        if let Err(error) = &result {
            debug!(
                target: "forth::interpreter",
                kind = %error.kind(),
                error = %error.error(),
                "Program failed."
            );
        }

        result
    }

    /// Pull tokens from the top stream and execute them until every stream above the base runs dry
    /// or a word fails.  Expanding a user word pushes it's body as a new stream rather than
    /// recursing, so the nesting depth costs heap instead of native stack.
    fn process_streams(&mut self, base: usize) -> error::Result<()> {
        while self.streams.len() > base {
            match self.next_token() {
                Some(token) => self.execute_token(&token)?,
                None => self.finish_stream(),
            }
        }

        Ok(())
    }

    /// Drop the exhausted top stream, and it's call item if it was a user word's body.
    fn finish_stream(&mut self) {
        if let Some(stream) = self.streams.pop()
            && stream.expands_word
        {
            self.call_stack_pop();
        }
    }

    /// Start expanding a user word by pushing it's body as the new top stream.
    fn expand_word(
        &mut self,
        name: String,
        location: SourceLocation,
        body: Rc<TokenList>,
    ) -> error::Result<()> {
        if self.call_stack.len() >= self.config.max_expansion_depth {
            return script_error(
                self,
                ErrorKind::ExpansionDepthExceeded,
                format!(
                    "Expanding '{}' exceeded the maximum depth of {}.",
                    name, self.config.max_expansion_depth
                ),
            );
        }

        self.call_stack_push(name, location);
        self.streams.push(TokenStream::new(body, true));

        Ok(())
    }

    /// Classify and execute a single token.  Numbers come first, then user words, then the
    /// built-in words.
    fn execute_token(&mut self, token: &Token) -> error::Result<()> {
        self.current_location = Some(token.location().clone());

        trace!(target: "forth::interpreter", token = %token, depth = self.stack.len(), "Dispatch.");

        if let Some(value) = parse_integer(token.text()) {
            self.push(value);
            return Ok(());
        }

        let name = token.normalized();

        if let Some(word) = self.find_word(&name) {
            let body = word.body.clone();
            return self.expand_word(name, token.location().clone(), body);
        }

        if let Some(word) = self.find_native_word(&name) {
            let handler = word.handler();
            return handler(self as &mut dyn Interpreter);
        }

        script_error(
            self,
            ErrorKind::UnknownWord,
            format!("Unrecognized word '{}'.", token),
        )
    }
}
