use lazy_static::lazy_static;
use std::env::var;
use tracing::warn;

/// Environment variable that overrides the maximum user word expansion depth.
pub const MAX_EXPANSION_DEPTH_VAR: &str = "FORTH_MAX_EXPANSION_DEPTH";

/// How many user defined words may be expanded inside each other before the program is stopped.
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 256;

lazy_static! {
    // The environment is only consulted once per process.
    static ref DEFAULT_CONFIG: InterpreterConfig = InterpreterConfig::from_env();
}

/// Limits applied to every evaluation run by an interpreter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InterpreterConfig {
    /// The maximum nesting of user word expansions.  Words that refer to themselves hit this limit
    /// rather than exhausting the native stack.
    pub max_expansion_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        *DEFAULT_CONFIG
    }
}

impl InterpreterConfig {
    /// Create a configuration with an explicit expansion limit, ignoring the environment.
    pub fn new(max_expansion_depth: usize) -> InterpreterConfig {
        InterpreterConfig {
            max_expansion_depth,
        }
    }

    /// Build the configuration from the environment, falling back to the built-in defaults for
    /// anything that is missing or can not be used.
    pub fn from_env() -> InterpreterConfig {
        let max_expansion_depth = match var(MAX_EXPANSION_DEPTH_VAR) {
            Ok(text) => parse_depth(&text).unwrap_or_else(|| {
                warn!(
                    target: "forth::config",
                    value = %text,
                    "Ignoring {}, expected a positive integer.",
                    MAX_EXPANSION_DEPTH_VAR
                );
                DEFAULT_MAX_EXPANSION_DEPTH
            }),

            Err(_) => DEFAULT_MAX_EXPANSION_DEPTH,
        };

        InterpreterConfig::new(max_expansion_depth)
    }
}

/// A usable depth is a positive integer.
fn parse_depth(text: &str) -> Option<usize> {
    match text.trim().parse::<usize>() {
        Ok(depth) if depth > 0 => Some(depth),
        _ => None,
    }
}
