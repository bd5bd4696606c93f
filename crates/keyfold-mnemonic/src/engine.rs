//! Checksum validation of 12-word recovery phrases.
//!
//! Implements the BIP-39 decoding side for 12-word (128-bit entropy)
//! phrases:
//!
//! 1. Each word maps to its 11-bit ordinal in the wordlist.
//! 2. The 132 bits split into 128 entropy bits + 4 checksum bits.
//! 3. The checksum must equal the top 4 bits of `SHA-256(entropy)`.
//!
//! Validation is dual-path: when the caller supplies a language hint,
//! the hinted list is tried first and the default english list serves
//! as a fallback. This accommodates users whose declared UI language
//! differs from their phrase's source language.
//!
//! Reference: <https://github.com/bitcoin/bips/blob/master/bip-0039.mediawiki>

use keyfold_types::{KeyfoldError, Result};
use sha2::{Digest, Sha256};

use crate::wordlist::{Wordlist, WordlistRepository};

/// Number of words in a recovery phrase.
pub const PHRASE_WORD_COUNT: usize = 12;

/// Bits encoded per word (2048 = 2^11).
const BITS_PER_WORD: usize = 11;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates a recovery phrase candidate.
///
/// # Checks performed
///
/// 1. Splitting on single spaces yields exactly 12 tokens.
/// 2. If `language_hint` is given and recognized, the full BIP-39
///    checksum is verified against that language's list.
/// 3. If the hinted check fails — or no usable hint was given — the
///    checksum is verified against the default english list.
///
/// Succeeds if either path validates.
///
/// # Errors
///
/// - [`KeyfoldError::WordCountError`] when the token count is not 12.
/// - [`KeyfoldError::ChecksumError`] when no allowed list validates.
pub fn validate_phrase(
    repository: &WordlistRepository,
    candidate: &str,
    language_hint: Option<&str>,
) -> Result<()> {
    let words: Vec<&str> = candidate.split(' ').collect();

    if words.len() != PHRASE_WORD_COUNT {
        return Err(KeyfoldError::WordCountError { count: words.len() });
    }

    if let Some(tag) = language_hint {
        // An unrecognized hint is not fatal here; policy falls back to
        // the default list below.
        if let Ok(list) = repository.load(tag) {
            if checksum_valid(&words, list) {
                return Ok(());
            }
        }
    }

    if checksum_valid(&words, repository.default_list()) {
        return Ok(());
    }

    Err(KeyfoldError::ChecksumError)
}

/// Verifies the BIP-39 checksum of `words` against one wordlist.
///
/// Returns `false` when any word is not in the list or the recomputed
/// checksum differs from the encoded one.
fn checksum_valid(words: &[&str], list: &Wordlist) -> bool {
    // Reconstruct the full bit sequence from 11-bit word ordinals.
    let mut bits = Vec::with_capacity(words.len() * BITS_PER_WORD);
    for word in words {
        let Some(ordinal) = list.ordinal(word) else {
            return false;
        };
        for j in (0..BITS_PER_WORD).rev() {
            bits.push(((ordinal >> j) & 1) as u8);
        }
    }

    // 33 bits per 32-bit entropy group: 1/33 of the bits are checksum.
    let checksum_bits = bits.len() / 33;
    let entropy_bits = bits.len() - checksum_bits;

    let mut entropy = vec![0u8; entropy_bits / 8];
    for (i, bit) in bits[..entropy_bits].iter().enumerate() {
        if *bit == 1 {
            entropy[i / 8] |= 1 << (7 - (i % 8));
        }
    }

    let mut provided: u8 = 0;
    for bit in &bits[entropy_bits..] {
        provided = (provided << 1) | bit;
    }

    let expected = Sha256::digest(&entropy)[0] >> (8 - checksum_bits);
    provided == expected
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
