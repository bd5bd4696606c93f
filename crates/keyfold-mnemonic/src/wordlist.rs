//! Fixed BIP-39 wordlists with O(1) membership and ordinal lookup.
//!
//! The word data is the standard compiled-in BIP-39 asset (2048 words
//! per language, ordered); it is never loaded from untrusted input.
//! Each [`Wordlist`] keeps the ordered slice for iteration and checksum
//! decoding, plus a hash map from word to ordinal for constant-time
//! membership tests.
//!
//! The repository is read-only after construction and therefore
//! thread-safe by construction.

use std::collections::HashMap;

use bip39::Language;
use keyfold_types::{KeyfoldError, Result};

/// Language tag of the default wordlist.
pub const DEFAULT_LANGUAGE: &str = "english";

/// Number of words in every BIP-39 wordlist.
pub const WORDLIST_LEN: usize = 2048;

// ---------------------------------------------------------------------------
// Wordlist
// ---------------------------------------------------------------------------

/// An immutable, ordered 2048-word list for one language.
#[derive(Debug)]
pub struct Wordlist {
    tag: &'static str,
    words: &'static [&'static str; WORDLIST_LEN],
    ordinals: HashMap<&'static str, u16>,
}

impl Wordlist {
    fn new(tag: &'static str, language: Language) -> Self {
        let words = language.word_list();
        let ordinals = words
            .iter()
            .enumerate()
            .map(|(i, word)| (*word, i as u16))
            .collect();
        Self {
            tag,
            words,
            ordinals,
        }
    }

    /// Returns the language tag of this list.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the words in their fixed load order.
    pub fn words(&self) -> &'static [&'static str] {
        self.words
    }

    /// Returns `true` if `word` belongs to this list. O(1).
    pub fn contains(&self, word: &str) -> bool {
        self.ordinals.contains_key(word)
    }

    /// Returns the ordinal position of `word`, used by checksum
    /// decoding. Never exposed to presentation logic.
    pub fn ordinal(&self, word: &str) -> Option<u16> {
        self.ordinals.get(word).copied()
    }

    /// Returns the word at `ordinal`.
    pub fn word(&self, ordinal: u16) -> Option<&'static str> {
        self.words.get(ordinal as usize).copied()
    }
}

// ---------------------------------------------------------------------------
// WordlistRepository
// ---------------------------------------------------------------------------

/// Read-only collection of all supported wordlists, keyed by tag.
pub struct WordlistRepository {
    lists: Vec<Wordlist>,
}

impl WordlistRepository {
    /// Loads every supported language.
    pub fn new() -> Self {
        Self {
            lists: vec![
                Wordlist::new("english", Language::English),
                Wordlist::new("french", Language::French),
                Wordlist::new("italian", Language::Italian),
                Wordlist::new("spanish", Language::Spanish),
            ],
        }
    }

    /// Returns the wordlist for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyfoldError::UnknownLanguage`] for unrecognized tags.
    pub fn load(&self, tag: &str) -> Result<&Wordlist> {
        self.lists
            .iter()
            .find(|list| list.tag == tag)
            .ok_or_else(|| KeyfoldError::UnknownLanguage {
                tag: tag.to_string(),
            })
    }

    /// Returns `true` if `word` belongs to the list tagged `tag`.
    ///
    /// An unrecognized tag yields `false` rather than an error; callers
    /// that need to distinguish use [`load`](Self::load).
    pub fn contains(&self, tag: &str, word: &str) -> bool {
        self.load(tag).map(|list| list.contains(word)).unwrap_or(false)
    }

    /// Returns the default ("english") wordlist.
    pub fn default_list(&self) -> &Wordlist {
        // The english list is always the first entry.
        &self.lists[0]
    }
}

impl Default for WordlistRepository {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_list_has_2048_unique_words() {
        let repo = WordlistRepository::new();
        for tag in ["english", "french", "italian", "spanish"] {
            let list = repo.load(tag).expect("known tag");
            assert_eq!(list.words().len(), WORDLIST_LEN);
            assert_eq!(list.ordinals.len(), WORDLIST_LEN, "{tag} has duplicates");
        }
    }

    #[test]
    fn unknown_tag_fails_load() {
        let repo = WordlistRepository::new();
        let err = repo.load("klingon").unwrap_err();
        assert!(matches!(
            err,
            KeyfoldError::UnknownLanguage { tag } if tag == "klingon"
        ));
    }

    #[test]
    fn contains_is_consistent_with_ordinal() {
        let repo = WordlistRepository::new();
        let english = repo.default_list();
        assert!(english.contains("abandon"));
        assert_eq!(english.ordinal("abandon"), Some(0));
        assert_eq!(english.word(0), Some("abandon"));
        assert!(!english.contains("notaword"));
        assert_eq!(english.ordinal("notaword"), None);
    }

    #[test]
    fn contains_with_unknown_tag_is_false() {
        let repo = WordlistRepository::new();
        assert!(!repo.contains("klingon", "abandon"));
        assert!(repo.contains("english", "abandon"));
    }

    #[test]
    fn default_list_is_english() {
        let repo = WordlistRepository::new();
        assert_eq!(repo.default_list().tag(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn ordinal_roundtrip_across_the_list() {
        let repo = WordlistRepository::new();
        let english = repo.default_list();
        for ordinal in [0u16, 1, 1024, 2047] {
            let word = english.word(ordinal).expect("in range");
            assert_eq!(english.ordinal(word), Some(ordinal));
        }
        assert_eq!(english.word(2048), None);
    }
}
