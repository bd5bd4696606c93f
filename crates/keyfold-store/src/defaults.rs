//! Built-in network parameter sets.
//!
//! An empty store seeds itself from these on first load so the
//! application always has at least one network to sign in against.

use keyfold_types::{Network, NetworkId};

/// Returns the built-in default networks.
///
/// Each call generates fresh identifiers; the seed is persisted once
/// and reread afterwards, so defaults are only materialized on the
/// first run.
pub fn default_networks() -> Vec<Network> {
    vec![
        Network {
            id: NetworkId::generate(),
            name: "mainnet".into(),
            token: "KEY".into(),
            symbol: "K".into(),
            version: 23,
            explorer: "https://explorer.keyfold.io".into(),
        },
        Network {
            id: NetworkId::generate(),
            name: "devnet".into(),
            token: "DKEY".into(),
            symbol: "DK".into(),
            version: 30,
            explorer: "https://dexplorer.keyfold.io".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_not_empty() {
        assert!(!default_networks().is_empty());
    }

    #[test]
    fn defaults_have_distinct_ids() {
        let networks = default_networks();
        for (i, a) in networks.iter().enumerate() {
            for b in &networks[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn defaults_include_mainnet_and_devnet() {
        let names: Vec<String> = default_networks().into_iter().map(|n| n.name).collect();
        assert!(names.contains(&"mainnet".to_string()));
        assert!(names.contains(&"devnet".to_string()));
    }
}
