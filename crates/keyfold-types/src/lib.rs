//! Core shared types for the Keyfold wallet core.
//!
//! This crate defines all fundamental types used across the workspace.
//! No other crate should define shared types — everything lives here.

pub mod config;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ProfileId
// ---------------------------------------------------------------------------

/// Unique identifier of a [`Profile`].
///
/// Generated by the store on every `profile_add`; never derived from
/// profile content and never reused.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Generates a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProfileId {
    type Err = KeyfoldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|e| KeyfoldError::InvalidIdentifier {
            reason: format!("invalid profile id: {e}"),
        })?;
        Ok(Self(uuid))
    }
}

// ---------------------------------------------------------------------------
// NetworkId
// ---------------------------------------------------------------------------

/// Unique identifier of a [`Network`].
///
/// Identical in structure to a [`ProfileId`] but semantically refers to
/// a chain parameter set rather than a user profile.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NetworkId(Uuid);

impl NetworkId {
    /// Generates a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NetworkId {
    type Err = KeyfoldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|e| KeyfoldError::InvalidIdentifier {
            reason: format!("invalid network id: {e}"),
        })?;
        Ok(Self(uuid))
    }
}

// ---------------------------------------------------------------------------
// ContactId
// ---------------------------------------------------------------------------

/// Unique identifier of a [`Contact`] within a profile's address book.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Generates a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContactId {
    type Err = KeyfoldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(|e| KeyfoldError::InvalidIdentifier {
            reason: format!("invalid contact id: {e}"),
        })?;
        Ok(Self(uuid))
    }
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// A wallet entry owned by a profile, keyed by its chain address.
///
/// The address is the natural key within a profile's wallet map; two
/// wallets with the same address in one profile are the same wallet.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Chain address; unique within the owning profile.
    pub address: String,
    /// Optional user-facing label.
    pub label: Option<String>,
    /// Last known balance in the chain's smallest unit.
    pub balance: u64,
    /// `true` when imported by address only (no recovery phrase known).
    pub is_watch_only: bool,
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

/// An address-book entry owned by a profile.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-generated identifier; assigned on `contact_add`.
    pub id: ContactId,
    /// Display name.
    pub name: String,
    /// Chain address of the contact.
    pub address: String,
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// A chain parameter set a profile can operate against.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// Store-generated identifier; assigned on `network_add` or seeding.
    pub id: NetworkId,
    /// Short network name ("mainnet", "devnet", ...).
    pub name: String,
    /// Token name.
    pub token: String,
    /// Token symbol used in balance display.
    pub symbol: String,
    /// Address version byte of this chain.
    pub version: u8,
    /// Base URL of the block explorer for this chain.
    pub explorer: String,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// A user profile: the top-level unit of the data store.
///
/// A profile owns its wallets and contacts exclusively and references
/// exactly one [`Network`] by id. The referenced network must resolve
/// whenever the profile is active; a dangling reference leaves the
/// active network unset.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Store-generated identifier; assigned on `profile_add`.
    pub id: ProfileId,
    /// Display name of the profile.
    pub name: String,
    /// The network this profile operates against.
    pub network_id: NetworkId,
    /// Wallets keyed by chain address.
    #[serde(default)]
    pub wallets: HashMap<String, Wallet>,
    /// Contacts keyed by their generated identifier.
    #[serde(default)]
    pub contacts: HashMap<ContactId, Contact>,
}

impl Profile {
    /// Creates an empty profile draft for `profile_add`.
    ///
    /// The id is a placeholder; the store replaces it with a freshly
    /// generated one when the draft is added.
    pub fn draft(name: impl Into<String>, network_id: NetworkId) -> Self {
        Self {
            id: ProfileId::generate(),
            name: name.into(),
            network_id,
            wallets: HashMap::new(),
            contacts: HashMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// WalletEvent
// ---------------------------------------------------------------------------

/// Notifications broadcast by the store when wallets change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WalletEvent {
    /// A wallet address was added to a profile for the first time.
    Created {
        /// The newly created wallet.
        wallet: Wallet,
    },
    /// An existing wallet was overwritten via an upsert with
    /// notification requested.
    Updated {
        /// The wallet after the update.
        wallet: Wallet,
    },
}

// ---------------------------------------------------------------------------
// KeyfoldError
// ---------------------------------------------------------------------------

/// Central error type for the Keyfold core.
///
/// All crates in the workspace convert their internal errors into
/// variants of this enum, ensuring a unified error handling surface.
#[derive(Debug, Error)]
pub enum KeyfoldError {
    /// A requested wordlist language tag is not recognized.
    #[error("unknown wordlist language: {tag}")]
    UnknownLanguage {
        /// The unrecognized language tag.
        tag: String,
    },

    /// A mnemonic candidate does not have exactly 12 words.
    #[error("mnemonic must be 12 words, got {count}")]
    WordCountError {
        /// The number of words actually found.
        count: usize,
    },

    /// A mnemonic candidate failed BIP-39 checksum validation against
    /// every wordlist the validation policy allows.
    #[error("mnemonic checksum validation failed")]
    ChecksumError,

    /// A trainer session could not be constructed or driven.
    #[error("trainer error: {reason}")]
    TrainerError {
        /// Human-readable description of the trainer failure.
        reason: String,
    },

    /// A persistence gateway operation failed. The store never retries;
    /// retry policy belongs to the orchestration layer.
    #[error("persistence failed: {reason}")]
    PersistenceError {
        /// Human-readable description of the persistence failure.
        reason: String,
    },

    /// An entity identifier could not be parsed.
    #[error("invalid identifier: {reason}")]
    InvalidIdentifier {
        /// Human-readable description of the parse failure.
        reason: String,
    },

    /// A configuration value is invalid or missing.
    #[error("config error: {reason}")]
    ConfigError {
        /// Human-readable description of the configuration problem.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Result alias
// ---------------------------------------------------------------------------

/// Convenience result type using [`KeyfoldError`].
pub type Result<T> = std::result::Result<T, KeyfoldError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_id_roundtrip_string() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let id = ProfileId::generate();
        let s = id.to_string();
        let parsed: ProfileId = s.parse()?;
        assert_eq!(id, parsed);
        Ok(())
    }

    #[test]
    fn profile_id_rejects_garbage() {
        let result: std::result::Result<ProfileId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn network_id_roundtrip_string() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let id = NetworkId::generate();
        let parsed: NetworkId = id.to_string().parse()?;
        assert_eq!(id, parsed);
        Ok(())
    }

    #[test]
    fn contact_id_roundtrip_string() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let id = ContactId::generate();
        let parsed: ContactId = id.to_string().parse()?;
        assert_eq!(id, parsed);
        Ok(())
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(ProfileId::generate(), ProfileId::generate());
        assert_ne!(NetworkId::generate(), NetworkId::generate());
        assert_ne!(ContactId::generate(), ContactId::generate());
    }

    #[test]
    fn profile_serde_json_roundtrip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut profile = Profile::draft("main", NetworkId::generate());
        profile.wallets.insert(
            "AaBbCc".into(),
            Wallet {
                address: "AaBbCc".into(),
                label: Some("savings".into()),
                balance: 150_000_000,
                is_watch_only: false,
            },
        );
        let contact_id = ContactId::generate();
        profile.contacts.insert(
            contact_id,
            Contact {
                id: contact_id,
                name: "Bob".into(),
                address: "DdEeFf".into(),
            },
        );

        let json = serde_json::to_string(&profile)?;
        let parsed: Profile = serde_json::from_str(&json)?;
        assert_eq!(profile, parsed);
        Ok(())
    }

    #[test]
    fn profile_tolerates_missing_collections() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        // Older snapshots may lack the collection fields entirely.
        let json = format!(
            r#"{{"id":"{}","name":"main","network_id":"{}"}}"#,
            ProfileId::generate(),
            NetworkId::generate(),
        );
        let parsed: Profile = serde_json::from_str(&json)?;
        assert!(parsed.wallets.is_empty());
        assert!(parsed.contacts.is_empty());
        Ok(())
    }

    #[test]
    fn network_serde_json_roundtrip() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let network = Network {
            id: NetworkId::generate(),
            name: "devnet".into(),
            token: "DKEY".into(),
            symbol: "DK".into(),
            version: 30,
            explorer: "https://dexplorer.keyfold.io".into(),
        };
        let json = serde_json::to_string(&network)?;
        let parsed: Network = serde_json::from_str(&json)?;
        assert_eq!(network, parsed);
        Ok(())
    }

    #[test]
    fn error_display_contains_context() {
        let err = KeyfoldError::WordCountError { count: 3 };
        assert!(err.to_string().contains('3'));

        let err = KeyfoldError::UnknownLanguage {
            tag: "klingon".into(),
        };
        assert!(err.to_string().contains("klingon"));
    }
}
