//! Deterministic text normalization.
//!
//! Stages, always applied in this order:
//!
//! 1. lowercase
//! 2. strip markup/noise: HTML-like tags, URLs, numeric runs
//! 3. fold to printable ASCII (diacritics collapse to base letters, the rest is dropped)
//! 4. strip punctuation (alphanumerics and whitespace survive)
//! 5. canonicalize whitespace
//! 6. tokenize
//! 7. drop stopwords and tokens of length <= 1
//! 8. stem
//!
//! [`Normalizer::clean`] stops after stage 5 and yields readable text;
//! [`Normalizer::normalize`] runs all eight and yields the index tokens.
//! Cleaning is a projection: cleaning already-clean text is a no-op.

use lazy_static::lazy_static;
use regex::Regex;
use tantivy::tokenizer::{TextAnalyzer, TokenStream};

use docbridge_core::config::NormalizerSettings;
use docbridge_core::traits::{IdentityStemmer, Stemmer};

use crate::tantivy_utils::{build_ascii_folder, build_word_analyzer, default_stopwords, EnglishStemmer};

lazy_static! {
    static ref TAG_PATTERN: Regex = Regex::new(r"<.*?>").expect("tag pattern");
    static ref URL_PATTERN: Regex = Regex::new(r"https?://\S+|www\.\S+").expect("url pattern");
    // Any Unicode number, so superscripts and fractions cannot fold back into ASCII digits later.
    static ref NUMBER_PATTERN: Regex = Regex::new(r"\p{N}+").expect("number pattern");
}

/// Stage 1.
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Stage 2. Tags and URLs become a space so neighbouring words stay apart.
pub fn strip_noise(text: &str) -> String {
    let text = TAG_PATTERN.replace_all(text, " ");
    let text = URL_PATTERN.replace_all(&text, " ");
    NUMBER_PATTERN.replace_all(&text, "").into_owned()
}

/// Stage 3. Output contains printable ASCII only; any whitespace becomes a space.
pub fn fold_to_ascii(text: &str) -> String {
    let mut folder = build_ascii_folder();
    let folded = {
        let mut stream = folder.token_stream(text);
        if stream.advance() { stream.token().text.clone() } else { String::new() }
    };
    folded
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if c.is_ascii_graphic() {
                Some(c.to_ascii_lowercase())
            } else {
                None
            }
        })
        .collect()
}

/// Stage 4.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace()).collect()
}

/// Stage 5.
pub fn canonicalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

enum StemStage {
    English(EnglishStemmer),
    Custom(Box<dyn Stemmer>),
}

pub struct Normalizer {
    words: TextAnalyzer,
    stemmer: StemStage,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_settings(&NormalizerSettings::default())
    }
}

impl Normalizer {
    pub fn from_settings(settings: &NormalizerSettings) -> Self {
        let stopwords = settings.stopwords.clone().unwrap_or_else(default_stopwords);
        let stemmer = if settings.stemming {
            StemStage::English(EnglishStemmer::default())
        } else {
            StemStage::Custom(Box::new(IdentityStemmer))
        };
        Self { words: build_word_analyzer(&stopwords), stemmer }
    }

    /// Replace the stemming stage with another implementation.
    pub fn with_stemmer(mut self, stemmer: Box<dyn Stemmer>) -> Self {
        self.stemmer = StemStage::Custom(stemmer);
        self
    }

    /// Stages 1-5.
    pub fn clean(&self, text: &str) -> String {
        let text = lowercase(text);
        let text = strip_noise(&text);
        let text = fold_to_ascii(&text);
        let text = strip_punctuation(&text);
        canonicalize_whitespace(&text)
    }

    /// Stages 1-8. Empty or all-noise input yields an empty sequence.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean(text);
        let tokens = self.tokenize(&cleaned);
        match &self.stemmer {
            StemStage::English(stemmer) => stemmer.stem_all(&tokens),
            StemStage::Custom(stemmer) => tokens.iter().map(|t| stemmer.stem(t)).collect(),
        }
    }

    /// Stages 6-7 over already-clean text.
    fn tokenize(&self, cleaned: &str) -> Vec<String> {
        let mut analyzer = self.words.clone();
        let mut stream = analyzer.token_stream(cleaned);
        let mut tokens = Vec::new();
        while stream.advance() {
            let token = &stream.token().text;
            if token.chars().count() > 1 {
                tokens.push(token.clone());
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_yields_no_tokens() {
        let normalizer = Normalizer::default();
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("   \n\t ").is_empty());
        assert_eq!(normalizer.clean(""), "");
    }

    #[test]
    fn noise_is_removed_before_tokenizing() {
        let normalizer = Normalizer::default();
        let cleaned = normalizer.clean("<p>Visit https://example.com/a?b=1 or www.example.org today</p> 2024");
        assert_eq!(cleaned, "visit or today");
    }

    #[test]
    fn tags_do_not_glue_words() {
        assert_eq!(Normalizer::default().clean("solar<br>power"), "solar power");
    }

    #[test]
    fn diacritics_fold_to_base_letters() {
        assert_eq!(Normalizer::default().clean("Crème Brûlée — naïve café"), "creme brulee naive cafe");
    }

    #[test]
    fn superscripts_do_not_leave_digits() {
        assert_eq!(Normalizer::default().clean("x² + ½"), "x");
    }

    #[test]
    fn punctuation_is_stripped_inside_words() {
        assert_eq!(Normalizer::default().clean("Don't stop-believing!"), "dont stopbelieving");
    }

    #[test]
    fn full_pipeline_filters_and_stems() {
        let normalizer = Normalizer::default();
        let tokens = normalizer.normalize("The runners were running quickly through the gardens, a b c.");
        assert_eq!(tokens, vec!["runner", "run", "quick", "garden"]);
    }

    #[test]
    fn custom_stemmer_replaces_stage_eight() {
        let normalizer = Normalizer::default().with_stemmer(Box::new(IdentityStemmer));
        assert_eq!(normalizer.normalize("Running gardens"), vec!["running", "gardens"]);
    }

    #[test]
    fn disabled_stemming_keeps_words_whole() {
        let settings = NormalizerSettings { stemming: false, ..NormalizerSettings::default() };
        let normalizer = Normalizer::from_settings(&settings);
        assert_eq!(normalizer.normalize("The runners were running"), vec!["runners", "running"]);
    }

    #[test]
    fn custom_stopwords_replace_the_default_list() {
        let settings = NormalizerSettings { stopwords: Some(vec!["solar".to_string()]), stemming: false, ..NormalizerSettings::default() };
        let normalizer = Normalizer::from_settings(&settings);
        assert_eq!(normalizer.normalize("the solar panel"), vec!["the", "panel"]);
    }
}
