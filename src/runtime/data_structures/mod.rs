/// The dictionary module provides the word dictionary of user defined words.
pub mod dictionary;
