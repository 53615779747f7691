impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

use crate::lang::{source_location::SourceLocation, tokenizing::TokenList};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// The information stored in the dictionary for each user defined word.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WordInfo {
    /// The location in the source code where the word was defined.
    pub location: SourceLocation,

    /// The name of the word, case folded.
    pub name: String,

    /// The tokens captured between the name and the closing `;`.  Shared so that expanding the
    /// word doesn't need to copy the body.
    pub body: Rc<TokenList>,
}

impl WordInfo {
    pub fn new(location: SourceLocation, name: String, body: TokenList) -> WordInfo {
        WordInfo {
            location,
            name,
            body: Rc::new(body),
        }
    }
}

/// The dictionary of user defined words.  Words are only ever added or replaced, never removed.
/// Names are stored and looked up exactly as given, the interpreter case folds them beforehand.
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

/// Pretty print the dictionary, one word per line in name order along with it's body.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let max_size = self.words.keys().map(|name| name.len()).max().unwrap_or(0);

        writeln!(formatter, "{} words defined.", self.words.len())?;

        let mut names: Vec<&String> = self.words.keys().collect();
        names.sort();

        for name in names {
            let body: Vec<String> = self.words[name].body.iter().map(|t| t.to_string()).collect();
            writeln!(formatter, "{:width$}  --  {}", name, body.join(" "), width = max_size)?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
        }
    }

    /// Insert a word into the dictionary, replacing any prior word of the same name.  The replaced
    /// word, if any, is returned.
    pub fn insert(&mut self, info: WordInfo) -> Option<WordInfo> {
        self.words.insert(info.name.clone(), info)
    }

    /// Try to get a word from the dictionary.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    /// How many words have been defined.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::tokenizing::tokenize_from_lines;

    fn word(name: &str, body: &str) -> WordInfo {
        WordInfo::new(
            SourceLocation::new(),
            name.to_string(),
            tokenize_from_lines("<test>", &[body]),
        )
    }

    #[test]
    fn lookups_use_the_name_as_given() {
        let mut dictionary = Dictionary::new();
        let _ = dictionary.insert(word("twice", "dup +"));

        assert!(dictionary.try_get("twice").is_some());
        assert!(dictionary.try_get("TWICE").is_none());
        assert!(dictionary.try_get("thrice").is_none());
    }

    #[test]
    fn redefinition_replaces_the_body() {
        let mut dictionary = Dictionary::new();

        assert!(dictionary.insert(word("foo", "1")).is_none());
        let replaced = dictionary.insert(word("foo", "2 3"));

        assert_eq!(replaced.map(|info| info.body.len()), Some(1));
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.try_get("foo").map(|info| info.body.len()), Some(2));
    }

    #[test]
    fn listing_shows_words_in_order() {
        let mut dictionary = Dictionary::new();
        let _ = dictionary.insert(word("b", "2"));
        let _ = dictionary.insert(word("a", "1 +"));

        assert_eq!(dictionary.to_string(), "2 words defined.\na  --  1 +\nb  --  2\n");
    }
}
