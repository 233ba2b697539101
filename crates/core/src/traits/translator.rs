//! Name translation strategies
//!
//! A translator joins a property's words into the key looked up in the
//! property source. Translators are pure: the same words always give the
//! same key.

use crate::property::Word;

/// Joins property words into a source lookup key
pub trait NameTranslator: Send + Sync {
    fn translate(&self, words: &[Word]) -> String;
}

/// Join words with `separator`, in order, without changing case
pub fn join_words(words: &[Word], separator: &str) -> String {
    words
        .iter()
        .map(Word::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Default translator: `engine-threshold`
#[derive(Debug, Default, Clone, Copy)]
pub struct HyphenatedNameTranslator;

impl NameTranslator for HyphenatedNameTranslator {
    fn translate(&self, words: &[Word]) -> String {
        join_words(words, "-")
    }
}

/// `engine.threshold`
#[derive(Debug, Default, Clone, Copy)]
pub struct DottedNameTranslator;

impl NameTranslator for DottedNameTranslator {
    fn translate(&self, words: &[Word]) -> String {
        join_words(words, ".")
    }
}

/// `engine_threshold`
#[derive(Debug, Default, Clone, Copy)]
pub struct UnderscoredNameTranslator;

impl NameTranslator for UnderscoredNameTranslator {
    fn translate(&self, words: &[Word]) -> String {
        join_words(words, "_")
    }
}

/// Environment variable style: `ENGINE_THRESHOLD`
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvironmentNameTranslator;

impl NameTranslator for EnvironmentNameTranslator {
    fn translate(&self, words: &[Word]) -> String {
        join_words(words, "_").to_uppercase()
    }
}
