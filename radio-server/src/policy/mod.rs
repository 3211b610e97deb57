//! Content policy.
//!
//! Free text (station names, search queries) is translated into a
//! reference language and then checked against a profanity lexicon that
//! is loaded once at startup and never changes.

mod lexicon;
mod translate;

use std::sync::Arc;

pub use lexicon::{LexiconError, ProfanityLexicon};
pub use translate::{
    GoogleTranslator, TranslateError, Translator, TranslatorConfig, parse_translation,
};

use crate::domain::ResolveError;

/// Translate-then-check profanity filter.
#[derive(Clone)]
pub struct ContentPolicy {
    lexicon: Arc<ProfanityLexicon>,
    translator: Arc<dyn Translator>,
}

impl ContentPolicy {
    pub fn new(lexicon: Arc<ProfanityLexicon>, translator: Arc<dyn Translator>) -> Self {
        Self {
            lexicon,
            translator,
        }
    }

    /// Reject `text` if its translation is profane.
    ///
    /// A failed translation is reported as an upstream failure; the text is
    /// neither accepted nor rejected.
    pub async fn check(&self, text: &str) -> Result<(), ResolveError> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let translated = self.translator.translate(text).await?;

        if self.lexicon.is_profane(&translated) {
            return Err(ResolveError::ContentRejected(format!(
                "{text:?} (translated {translated:?})"
            )));
        }

        Ok(())
    }
}
