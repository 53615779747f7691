/// Words that do integer arithmetic.
pub mod arithmetic_words;

/// Words that manipulate the data stack.
pub mod stack_words;

/// Words that create new words.
pub mod word_creation_words;

use crate::runtime::{
    built_ins::{
        arithmetic_words::register_arithmetic_words, stack_words::register_stack_words,
        word_creation_words::register_word_creation_words,
    },
    interpreter::Interpreter,
};

/// Called to register all of the built-in words of the language.
pub fn register_built_in_words(interpreter: &mut dyn Interpreter) {
    register_arithmetic_words(interpreter);
    register_stack_words(interpreter);
    register_word_creation_words(interpreter);
}
