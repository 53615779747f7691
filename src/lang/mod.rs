/// Module for tracking where in the original source code a token was found.
pub mod source_location;

/// Module for managing the turning of the source lines into a list of tokens for further
/// processing.
pub mod tokenizing;
