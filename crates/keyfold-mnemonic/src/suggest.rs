//! Typing-aware word suggestion and language disambiguation.
//!
//! Suggestions are only offered while the user is visibly typing the
//! last word of the phrase by hand. [`suggest_on_edit`] compares the
//! previous and current phrase to tell "one more character of the same
//! word" apart from pastes, deletions, and word boundaries, and stays
//! silent for everything but manual single-character edits.
//!
//! [`WordlistDetector`] resolves which language's list to suggest from
//! when the user's UI language differs from english: the first
//! completed word that belongs to exactly one of the two candidate
//! lists locks the session to that list.

use crate::wordlist::{Wordlist, WordlistRepository};

/// Minimum prefix length before suggestions are offered. A single
/// character matches too much of the list to be useful.
pub const MIN_PREFIX_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Prefix suggestion
// ---------------------------------------------------------------------------

/// Returns every word in `wordlist` starting with `prefix`, in the
/// list's native order.
///
/// Matching is case-sensitive. Prefixes shorter than
/// [`MIN_PREFIX_LEN`] characters yield no suggestions.
pub fn suggest(prefix: &str, wordlist: &Wordlist) -> Vec<&'static str> {
    if prefix.chars().count() < MIN_PREFIX_LEN {
        return Vec::new();
    }

    wordlist
        .words()
        .iter()
        .copied()
        .filter(|word| word.starts_with(prefix))
        .collect()
}

// ---------------------------------------------------------------------------
// Edit-aware suggestion
// ---------------------------------------------------------------------------

/// Suggests completions only when `current` differs from `previous` by
/// a single manual keystroke in the final, in-progress word.
///
/// # Policy
///
/// 1. Token counts differ → a word boundary was crossed; no
///    suggestions (the word just completed is not in progress).
/// 2. Any token before the last changed → not an in-progress edit; no
///    suggestions.
/// 3. The last words must differ by exactly one character in length,
///    the current one must be at least 2 characters, and one must be a
///    substring of the other. This admits one inserted or deleted
///    character anywhere in the word while rejecting pastes and
///    wholesale replacements.
/// 4. Eligible edits delegate to [`suggest`] with the current last
///    word.
pub fn suggest_on_edit(
    previous: &str,
    current: &str,
    wordlist: &Wordlist,
) -> Vec<&'static str> {
    let mut previous_words: Vec<&str> = previous.split(' ').collect();
    let mut current_words: Vec<&str> = current.split(' ').collect();

    if previous_words.len() != current_words.len() {
        return Vec::new();
    }

    // split(' ') yields at least one token, so both pops succeed.
    let (Some(a), Some(b)) = (previous_words.pop(), current_words.pop()) else {
        return Vec::new();
    };

    if previous_words != current_words {
        return Vec::new();
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a.abs_diff(len_b) == 1 && len_b > 1 && (a.contains(b) || b.contains(a)) {
        suggest(b, wordlist)
    } else {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Language disambiguation
// ---------------------------------------------------------------------------

/// Per-session language lock for suggestion sources.
///
/// Created once per entry session with the user's UI language as hint.
/// Feed it the completed words (everything but the token currently
/// being typed); the first word that belongs to exactly one of the
/// default and hinted lists decides the session's wordlist. The
/// decision is made at most once and never reconsidered.
///
/// Until a decision is made — or when the hint is absent, unrecognized,
/// or equal to the default — the default list is returned.
pub struct WordlistDetector<'a> {
    default: &'a Wordlist,
    hinted: Option<&'a Wordlist>,
    locked: Option<&'a Wordlist>,
}

impl<'a> WordlistDetector<'a> {
    /// Creates a detector for one entry session.
    ///
    /// An unrecognized `language_hint` is treated as absent; phrase
    /// entry must keep working regardless of the UI language setting.
    pub fn new(repository: &'a WordlistRepository, language_hint: Option<&str>) -> Self {
        let default = repository.default_list();
        let hinted = language_hint
            .and_then(|tag| repository.load(tag).ok())
            .filter(|list| list.tag() != default.tag());
        Self {
            default,
            hinted,
            locked: None,
        }
    }

    /// Returns the wordlist suggestions should come from, given the
    /// completed words of the in-progress phrase.
    pub fn detect(&mut self, completed_words: &[&str]) -> &'a Wordlist {
        if let Some(list) = self.locked {
            return list;
        }

        let Some(hinted) = self.hinted else {
            return self.default;
        };

        if completed_words.len() < 2 {
            return self.default;
        }

        for word in completed_words {
            if self.default.contains(word) && !hinted.contains(word) {
                self.locked = Some(self.default);
                return self.default;
            }
            if hinted.contains(word) && !self.default.contains(word) {
                self.locked = Some(hinted);
                return hinted;
            }
        }

        self.default
    }

    /// Returns `true` once the session is locked to one list.
    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> WordlistRepository {
        WordlistRepository::new()
    }

    #[test]
    fn suggest_matches_prefix_in_list_order() {
        let repo = repo();
        let english = repo.default_list();
        // The english list is alphabetical; "ab" matches its first
        // ten entries exactly.
        let suggestions = suggest("ab", english);
        assert_eq!(
            suggestions,
            vec![
                "abandon", "ability", "able", "about", "above", "absent", "absorb",
                "abstract", "absurd", "abuse",
            ]
        );
    }

    #[test]
    fn suggest_single_character_is_silent() {
        let repo = repo();
        assert!(suggest("a", repo.default_list()).is_empty());
        assert!(suggest("", repo.default_list()).is_empty());
    }

    #[test]
    fn suggest_is_case_sensitive() {
        let repo = repo();
        assert!(suggest("Ab", repo.default_list()).is_empty());
    }

    #[test]
    fn suggest_unmatched_prefix_is_empty() {
        let repo = repo();
        assert!(suggest("xx", repo.default_list()).is_empty());
    }

    #[test]
    fn edit_one_appended_character_suggests() {
        let repo = repo();
        let english = repo.default_list();
        let suggestions = suggest_on_edit("hello wor", "hello worl", english);
        assert_eq!(suggestions, suggest("worl", english));
        assert_eq!(suggestions, vec!["world"]);
    }

    #[test]
    fn edit_one_deleted_character_suggests() {
        let repo = repo();
        let english = repo.default_list();
        let suggestions = suggest_on_edit("hello worl", "hello wor", english);
        assert_eq!(suggestions, suggest("wor", english));
    }

    #[test]
    fn edit_character_inserted_mid_word_suggests() {
        let repo = repo();
        let english = repo.default_list();
        // "wrd" -> "word": not a substring pair, rejected.
        assert!(suggest_on_edit("a wrd", "a word", english).is_empty());
        // "wod" -> "word" is also not a substring pair; only true
        // insertions that keep one string inside the other pass, e.g.
        // "ord" -> "word".
        let suggestions = suggest_on_edit("a ord", "a word", english);
        assert_eq!(suggestions, suggest("word", english));
    }

    #[test]
    fn edit_unrelated_replacement_is_silent() {
        let repo = repo();
        assert!(suggest_on_edit("hello wor", "hello xyz", repo.default_list()).is_empty());
    }

    #[test]
    fn edit_word_boundary_is_silent() {
        let repo = repo();
        assert!(suggest_on_edit("a b", "a b c", repo.default_list()).is_empty());
        assert!(suggest_on_edit("a b c", "a b", repo.default_list()).is_empty());
    }

    #[test]
    fn edit_changed_prefix_word_is_silent() {
        let repo = repo();
        assert!(suggest_on_edit("abc wor", "abd worl", repo.default_list()).is_empty());
    }

    #[test]
    fn edit_paste_is_silent() {
        let repo = repo();
        assert!(suggest_on_edit("hello w", "hello world", repo.default_list()).is_empty());
    }

    #[test]
    fn edit_below_min_length_is_silent() {
        let repo = repo();
        // len(b) == 1 even though the delta is a single character.
        assert!(suggest_on_edit("a wo", "a w", repo.default_list()).is_empty());
    }

    // -- Language detection -------------------------------------------------

    /// First word of the hinted list that the default list lacks.
    fn only_in<'a>(list: &'a Wordlist, other: &Wordlist) -> &'static str {
        list.words()
            .iter()
            .copied()
            .find(|word| !other.contains(word))
            .expect("lists differ")
    }

    /// First word both lists share, if any.
    fn shared(list: &Wordlist, other: &Wordlist) -> Option<&'static str> {
        list.words().iter().copied().find(|word| other.contains(word))
    }

    #[test]
    fn no_hint_always_default() {
        let repo = repo();
        let mut detector = WordlistDetector::new(&repo, None);
        let words = ["zebra", "zoo", "wave"];
        assert_eq!(detector.detect(&words).tag(), "english");
        assert!(!detector.is_locked());
    }

    #[test]
    fn english_hint_behaves_like_no_hint() {
        let repo = repo();
        let mut detector = WordlistDetector::new(&repo, Some("english"));
        assert_eq!(detector.detect(&["zebra", "zoo"]).tag(), "english");
        assert!(!detector.is_locked());
    }

    #[test]
    fn unrecognized_hint_behaves_like_no_hint() {
        let repo = repo();
        let mut detector = WordlistDetector::new(&repo, Some("klingon"));
        assert_eq!(detector.detect(&["zebra", "zoo"]).tag(), "english");
        assert!(!detector.is_locked());
    }

    #[test]
    fn hinted_only_word_locks_hinted() {
        let repo = repo();
        let french = repo.load("french").expect("french");
        let french_only = only_in(french, repo.default_list());

        let mut detector = WordlistDetector::new(&repo, Some("french"));
        let words = [french_only, french_only];
        assert_eq!(detector.detect(&words).tag(), "french");
        assert!(detector.is_locked());
    }

    #[test]
    fn default_only_word_locks_default() {
        let repo = repo();
        let french = repo.load("french").expect("french");
        let english_only = only_in(repo.default_list(), french);

        let mut detector = WordlistDetector::new(&repo, Some("french"));
        let words = [english_only, english_only];
        assert_eq!(detector.detect(&words).tag(), "english");
        assert!(detector.is_locked());
    }

    #[test]
    fn lock_is_one_shot_and_sticky() {
        let repo = repo();
        let french = repo.load("french").expect("french");
        let french_only = only_in(french, repo.default_list());
        let english_only = only_in(repo.default_list(), french);

        let mut detector = WordlistDetector::new(&repo, Some("french"));
        let first = [french_only, french_only];
        assert_eq!(detector.detect(&first).tag(), "french");

        // A later word matching the opposite heuristic must not
        // re-open the decision.
        let second = [french_only, english_only];
        assert_eq!(detector.detect(&second).tag(), "french");
        assert!(detector.is_locked());
    }

    #[test]
    fn single_completed_word_does_not_lock() {
        let repo = repo();
        let french = repo.load("french").expect("french");
        let french_only = only_in(french, repo.default_list());

        let mut detector = WordlistDetector::new(&repo, Some("french"));
        assert_eq!(detector.detect(&[french_only]).tag(), "english");
        assert!(!detector.is_locked());
    }

    #[test]
    fn ambiguous_words_do_not_lock() {
        let repo = repo();
        let french = repo.load("french").expect("french");
        let Some(common) = shared(repo.default_list(), french) else {
            // Lists may be fully disjoint; nothing to check then.
            return;
        };

        let mut detector = WordlistDetector::new(&repo, Some("french"));
        let words = [common, common];
        assert_eq!(detector.detect(&words).tag(), "english");
        assert!(!detector.is_locked());
    }
}
