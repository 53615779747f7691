use crate::lang::source_location::SourceLocation;
use std::fmt::{self, Debug, Display, Formatter};

/// A token is a simple unit of the language.  The text is kept exactly as it was found in the
/// source, deciding whether it is a number or a word is left to the interpreter at dispatch time.
///
/// The token also holds the location in the original source code where it was found.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    location: SourceLocation,
    text: String,
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

/// Make sure that the tokens are nicely printable for error messages.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// For debugging we include the original location of the token as well.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

impl Token {
    /// Create a new token found at the given location.
    pub fn new(location: SourceLocation, text: String) -> Token {
        Token { location, text }
    }

    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The token's text exactly as it appeared in the source.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The case folded form of the token used for looking up words.
    pub fn normalized(&self) -> String {
        fold_case(&self.text)
    }

    /// Check if the token is an integer literal.
    pub fn is_number(&self) -> bool {
        parse_integer(&self.text).is_some()
    }

    /// Check if the token closes a word definition.
    pub fn is_definition_end(&self) -> bool {
        self.text == ";"
    }
}

/// The one case folding used for word names, both when classifying tokens and when registering
/// words.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Attempt to convert the text into a base 10 integer literal.  An optional leading sign is
/// allowed, everything else must be a digit.
pub fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    text.parse().ok()
}

/// Split a single line of source on space characters, appending the tokens found to the list.
/// Runs of spaces produce no empty tokens.
fn tokenize_line(path: &str, line_number: usize, line: &str, token_list: &mut TokenList) {
    let mut column = 1;

    for fragment in line.split(' ') {
        if !fragment.is_empty() {
            let location = SourceLocation::new_from_info(path, line_number, column);
            token_list.push(Token::new(location, fragment.to_string()));
        }

        // Step over the fragment and the space that ended it.
        column += fragment.chars().count() + 1;
    }
}

/// Tokenize an ordered list of source lines into one flat list of tokens, keeping the line order.
pub fn tokenize_from_lines<S: AsRef<str>>(path: &str, lines: &[S]) -> TokenList {
    let mut token_list = TokenList::new();

    for (index, line) in lines.iter().enumerate() {
        tokenize_line(path, index + 1, line.as_ref(), &mut token_list);
    }

    token_list
}

/// Tokenize the source code from a string, treating every new line as a line boundary.
pub fn tokenize_from_source(path: &str, source: &str) -> TokenList {
    let lines: Vec<&str> = source.lines().collect();
    tokenize_from_lines(path, &lines)
}
