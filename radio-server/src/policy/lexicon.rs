//! Profanity lexicon.

use std::collections::HashSet;
use std::path::Path;

/// Bundled word list, used when no override file is configured.
const DEFAULT_WORDLIST: &str = include_str!("../../data/profanity_wordlist.txt");

/// Error loading a word list file.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("word list {path} has no entries")]
    Empty { path: String },
}

/// An immutable set of profane words and phrases.
///
/// Matching is per word: text is lowercased, split into words, and common
/// character substitutions (`$` for `s`, `3` for `e`, ...) are folded
/// before lookup. Phrases match runs of consecutive words.
#[derive(Debug, Clone)]
pub struct ProfanityLexicon {
    entries: HashSet<String>,
    /// Longest entry, in words.
    max_words: usize,
}

impl ProfanityLexicon {
    /// The bundled word list.
    pub fn bundled() -> Self {
        Self::parse(DEFAULT_WORDLIST)
    }

    /// Load a newline-separated word list; `#` starts a comment line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let lexicon = Self::parse(&text);
        if lexicon.is_empty() {
            return Err(LexiconError::Empty {
                path: path.display().to_string(),
            });
        }
        Ok(lexicon)
    }

    /// Parse word list text.
    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Build from individual entries.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries = HashSet::new();
        let mut max_words = 0;

        for word in words {
            let tokens = tokenize(word);
            if tokens.is_empty() {
                continue;
            }
            max_words = max_words.max(tokens.len());
            entries.insert(tokens.join(" "));
        }

        Self { entries, max_words }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any word or phrase of `text` is in the lexicon.
    pub fn is_profane(&self, text: &str) -> bool {
        let tokens = tokenize(text);

        (1..=self.max_words.min(tokens.len())).any(|width| {
            tokens
                .windows(width)
                .any(|window| self.entries.contains(&window.join(" ")))
        })
    }
}

/// Characters that may stand in for letters inside a word.
fn is_substitute(c: char) -> bool {
    matches!(c, '@' | '$' | '!')
}

fn fold(c: char) -> char {
    match c {
        '@' | '4' => 'a',
        '3' => 'e',
        '0' => 'o',
        '$' | '5' => 's',
        '7' => 't',
        '1' | '!' => 'i',
        other => other,
    }
}

/// Strip substitutes that end a word, and a leading `!`; those are
/// punctuation rather than letters.
fn trim_substitutes(word: &str) -> &str {
    word.trim_end_matches(is_substitute).trim_start_matches('!')
}

/// Split into lowercase words with substitutions folded.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || is_substitute(c)))
        .map(trim_substitutes)
        .filter(|word| !word.is_empty())
        .map(|word| word.chars().flat_map(char::to_lowercase).map(fold).collect())
        .collect()
}
