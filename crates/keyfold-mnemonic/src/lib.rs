//! Recovery-phrase (BIP-39 mnemonic) logic for the Keyfold wallet core.
//!
//! This crate is the **sole** location for mnemonic handling. It backs
//! the phrase entry and verification flows of the presentation layer:
//!
//! - [`wordlist`] — fixed per-language 2048-word lists with O(1) lookup
//! - [`engine`] — checksum validation of 12-word recovery phrases
//! - [`suggest`] — typing-aware autosuggest and language disambiguation
//! - [`trainer`] — interactive "remember your phrase" drill sessions
//!
//! Everything here is synchronous and pure; nothing blocks or awaits.

pub mod engine;
pub mod suggest;
pub mod trainer;
pub mod wordlist;
