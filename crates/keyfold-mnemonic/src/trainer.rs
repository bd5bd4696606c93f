//! Interactive recovery-phrase training sessions.
//!
//! A [`PassphraseTrainer`] drills the user on remembering the words of
//! a freshly generated phrase: the caller supplies the expected words,
//! the user types each one, and the trainer tracks per-word
//! correctness while offering autosuggest for the word being typed.
//!
//! Trainer state holds recovery-phrase words in memory; everything is
//! zeroized when the session is dropped.

use keyfold_types::{KeyfoldError, Result};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::suggest::suggest;
use crate::wordlist::Wordlist;

// ---------------------------------------------------------------------------
// TrainerWord
// ---------------------------------------------------------------------------

/// One slot of the drill: the expected word and what the user typed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TrainerWord {
    expected: String,
    user_value: String,
    #[zeroize(skip)]
    position: usize,
}

impl TrainerWord {
    /// Case-sensitive comparison of the user's input with the
    /// expected word.
    pub fn is_correct(&self) -> bool {
        self.user_value == self.expected
    }

    /// Returns what the user typed so far.
    pub fn user_value(&self) -> &str {
        &self.user_value
    }

    /// Returns this word's position in the phrase.
    pub fn position(&self) -> usize {
        self.position
    }
}

// ---------------------------------------------------------------------------
// SuggestionSelected
// ---------------------------------------------------------------------------

/// A structured "the user picked a suggestion" message.
///
/// The presentation layer translates its focus-transfer events into
/// this before calling [`PassphraseTrainer::accept_suggestion`]; the
/// trainer never parses UI element names.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SuggestionSelected {
    /// Index of the phrase word being edited.
    pub word_index: usize,
    /// Index into the current suggestion list.
    pub slot: usize,
}

// ---------------------------------------------------------------------------
// PassphraseTrainer
// ---------------------------------------------------------------------------

/// A bounded drill session over the words of one recovery phrase.
///
/// The word set is fixed at construction; only user values mutate.
/// Suggestions are transient — recomputed on every keystroke and
/// cleared once consumed.
pub struct PassphraseTrainer<'a> {
    words: Vec<TrainerWord>,
    suggestions: Vec<&'static str>,
    wordlist: &'a Wordlist,
}

impl<'a> PassphraseTrainer<'a> {
    /// Starts a session for `expected` words, suggesting from
    /// `wordlist`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyfoldError::TrainerError`] when no words are
    /// supplied — a session with nothing to drill is aborted rather
    /// than presented empty.
    pub fn new(expected: Vec<String>, wordlist: &'a Wordlist) -> Result<Self> {
        if expected.is_empty() {
            return Err(KeyfoldError::TrainerError {
                reason: "a training session needs at least one word".into(),
            });
        }

        let words = expected
            .into_iter()
            .enumerate()
            .map(|(position, expected)| TrainerWord {
                expected,
                user_value: String::new(),
                position,
            })
            .collect();

        Ok(Self {
            words,
            suggestions: Vec::new(),
            wordlist,
        })
    }

    /// Records what the user typed for the word at `index` and
    /// refreshes the suggestion list from it.
    ///
    /// An out-of-range index is ignored; the input originates from
    /// untrusted UI events.
    pub fn set_user_value(&mut self, index: usize, value: &str) {
        let Some(word) = self.words.get_mut(index) else {
            return;
        };

        word.user_value.zeroize();
        word.user_value = value.to_string();
        self.suggestions = suggest(value, self.wordlist);
    }

    /// Applies a selected suggestion to the word it was offered for
    /// and clears the suggestion list.
    ///
    /// Out-of-range indices are ignored.
    pub fn accept_suggestion(&mut self, selection: SuggestionSelected) {
        let Some(candidate) = self.suggestions.get(selection.slot).copied() else {
            return;
        };
        let Some(word) = self.words.get_mut(selection.word_index) else {
            return;
        };

        word.user_value.zeroize();
        word.user_value = candidate.to_string();
        self.suggestions.clear();
    }

    /// Returns `true` when every word was typed correctly.
    pub fn all_correct(&self) -> bool {
        self.words.iter().all(TrainerWord::is_correct)
    }

    /// Ends the session, reporting whether the drill succeeded.
    ///
    /// No further mutation is expected after this call.
    pub fn finish(&self) -> bool {
        self.all_correct()
    }

    /// Returns the drill words in phrase order.
    pub fn words(&self) -> &[TrainerWord] {
        &self.words
    }

    /// Returns the current suggestions for the word being typed.
    pub fn suggestions(&self) -> &[&'static str] {
        &self.suggestions
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
