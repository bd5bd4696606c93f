//! The multi-profile data store and its observable active selection.
//!
//! [`ProfileStore`] owns the profiles and networks collections,
//! enforces uniqueness and referential invariants, and persists every
//! mutation as a full-collection snapshot through the
//! [`PersistenceGateway`] before returning (write-through).
//!
//! # Mutation model
//!
//! Every mutation is a read-modify-persist cycle guarded by one
//! `tokio::sync::Mutex` per top-level collection, held across the
//! persistence await. Two mutations of the same collection therefore
//! never interleave mid-cycle.
//!
//! # Active selection
//!
//! At most one profile and one network are active at a time,
//! process-wide. Both are `tokio::sync::watch` channels with
//! replay-latest semantics: a new subscriber immediately observes the
//! current value (initially `None`) and every later change in order.
//! Wallet created/updated notifications use a `broadcast` channel
//! without replay.

use std::collections::HashMap;
use std::sync::Arc;

use keyfold_mnemonic::engine::validate_phrase;
use keyfold_mnemonic::wordlist::WordlistRepository;
use keyfold_types::config::StoreConfig;
use keyfold_types::{
    Contact, ContactId, Network, NetworkId, Profile, ProfileId, Result, Wallet, WalletEvent,
};
use tokio::sync::{broadcast, watch, Mutex};

use crate::defaults::default_networks;
use crate::gateway::{
    decode_snapshot, encode_snapshot, NetworksSnapshot, PersistenceGateway, ProfilesSnapshot,
    STORAGE_NETWORKS, STORAGE_PROFILES,
};

// ---------------------------------------------------------------------------
// ProfileStore
// ---------------------------------------------------------------------------

/// Owner of the profiles and networks collections.
///
/// Constructed once at process start and passed by handle to every
/// consumer; there is no ambient global instance.
pub struct ProfileStore {
    gateway: Arc<dyn PersistenceGateway>,
    wordlists: WordlistRepository,
    config: StoreConfig,

    profiles: Mutex<HashMap<ProfileId, Profile>>,
    networks: Mutex<HashMap<NetworkId, Network>>,

    active_profile: watch::Sender<Option<Profile>>,
    active_network: watch::Sender<Option<Network>>,
    wallet_events: broadcast::Sender<WalletEvent>,
}

impl ProfileStore {
    /// Creates a store over `gateway`.
    ///
    /// Collections start empty; call [`load`](Self::load) to populate
    /// them from persisted snapshots (seeding default networks on
    /// first run).
    ///
    /// # Errors
    ///
    /// Returns [`keyfold_types::KeyfoldError::ConfigError`] when
    /// `config` fails validation.
    pub fn new(gateway: Arc<dyn PersistenceGateway>, config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let (active_profile, _) = watch::channel(None);
        let (active_network, _) = watch::channel(None);
        let (wallet_events, _) = broadcast::channel(config.event_capacity);

        Ok(Self {
            gateway,
            wordlists: WordlistRepository::new(),
            config,
            profiles: Mutex::new(HashMap::new()),
            networks: Mutex::new(HashMap::new()),
            active_profile,
            active_network,
            wallet_events,
        })
    }

    /// Loads both collections from their persisted snapshots.
    pub async fn load(&self) -> Result<()> {
        self.profiles_load().await?;
        self.networks_load().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Profiles
    // -----------------------------------------------------------------------

    /// Reads the persisted profiles snapshot into memory and returns
    /// it. An absent snapshot yields an empty collection.
    pub async fn profiles_load(&self) -> Result<HashMap<ProfileId, Profile>> {
        let mut profiles = self.profiles.lock().await;

        if let Some(blob) = self.gateway.get(STORAGE_PROFILES).await? {
            let snapshot: ProfilesSnapshot = decode_snapshot(&blob)?;
            *profiles = snapshot.profiles;
        } else {
            profiles.clear();
        }

        tracing::debug!(count = profiles.len(), "loaded profiles");
        Ok(profiles.clone())
    }

    /// Adds a profile, assigning it a freshly generated identifier.
    ///
    /// Returns the stored profile, id included.
    pub async fn profile_add(&self, draft: Profile) -> Result<Profile> {
        let mut profiles = self.profiles.lock().await;

        let mut profile = draft;
        profile.id = ProfileId::generate();
        profiles.insert(profile.id, profile.clone());

        self.persist_profiles(&profiles).await?;
        tracing::info!(profile = %profile.id, "profile added");
        Ok(profile)
    }

    /// Returns a copy of the profile with `id`, if it exists.
    pub async fn profile_get(&self, id: ProfileId) -> Option<Profile> {
        self.profiles.lock().await.get(&id).cloned()
    }

    /// Removes the profile with `id`. Removing an unknown profile is a
    /// no-op that still persists the (unchanged) collection.
    pub async fn profile_remove(&self, id: ProfileId) -> Result<()> {
        let mut profiles = self.profiles.lock().await;

        if profiles.remove(&id).is_some() {
            tracing::info!(profile = %id, "profile removed");
        }

        self.persist_profiles(&profiles).await
    }

    // -----------------------------------------------------------------------
    // Networks
    // -----------------------------------------------------------------------

    /// Reads the persisted networks snapshot into memory and returns
    /// it.
    ///
    /// On first run — no snapshot, or an empty one — the collection is
    /// seeded from the built-in defaults, each assigned a fresh
    /// identifier, and the seed is persisted before returning. The
    /// store is therefore never empty after this call.
    pub async fn networks_load(&self) -> Result<HashMap<NetworkId, Network>> {
        let mut networks = self.networks.lock().await;

        let persisted: Option<NetworksSnapshot> = match self.gateway.get(STORAGE_NETWORKS).await? {
            Some(blob) => Some(decode_snapshot(&blob)?),
            None => None,
        };

        match persisted {
            Some(snapshot) if !snapshot.networks.is_empty() => {
                *networks = snapshot.networks;
            }
            _ => {
                networks.clear();
                for network in default_networks() {
                    networks.insert(network.id, network);
                }
                self.persist_networks(&networks).await?;
                tracing::info!(count = networks.len(), "seeded default networks");
            }
        }

        Ok(networks.clone())
    }

    /// Adds a network, assigning it a freshly generated identifier.
    pub async fn network_add(&self, draft: Network) -> Result<Network> {
        let mut networks = self.networks.lock().await;

        let mut network = draft;
        network.id = NetworkId::generate();
        networks.insert(network.id, network.clone());

        self.persist_networks(&networks).await?;
        tracing::info!(network = %network.id, "network added");
        Ok(network)
    }

    /// Returns a copy of the network with `id`, if it exists.
    pub async fn network_get(&self, id: NetworkId) -> Option<Network> {
        self.networks.lock().await.get(&id).cloned()
    }

    /// Replaces the network stored under `id`. The entity's own id
    /// field is forced to `id`; an id can never change through update.
    pub async fn network_update(&self, id: NetworkId, network: Network) -> Result<()> {
        let mut networks = self.networks.lock().await;

        let mut network = network;
        network.id = id;
        networks.insert(id, network);

        self.persist_networks(&networks).await
    }

    /// Removes the network with `id`. Profiles referencing it are left
    /// untouched; their reference dangles until reselection (see
    /// [`select_profile`](Self::select_profile)).
    pub async fn network_remove(&self, id: NetworkId) -> Result<()> {
        let mut networks = self.networks.lock().await;

        if networks.remove(&id).is_some() {
            tracing::info!(network = %id, "network removed");
        }

        self.persist_networks(&networks).await
    }

    // -----------------------------------------------------------------------
    // Wallets
    // -----------------------------------------------------------------------

    /// Returns a copy of the wallet at `address` in the given profile
    /// (or the active profile when `profile_id` is `None`).
    pub async fn wallet_get(&self, profile_id: Option<ProfileId>, address: &str) -> Option<Wallet> {
        let profile_id = profile_id.or_else(|| self.active_profile_id())?;
        let profiles = self.profiles.lock().await;
        profiles.get(&profile_id)?.wallets.get(address).cloned()
    }

    /// Adds a wallet to a profile, keyed by its address.
    ///
    /// A previously unseen address emits a [`WalletEvent::Created`]
    /// notification; re-adding an existing address upserts without
    /// one. Either way the collection is persisted. Unknown or
    /// unresolved profiles make this a no-op.
    pub async fn wallet_add(&self, profile_id: Option<ProfileId>, wallet: Wallet) -> Result<()> {
        let Some(profile_id) = profile_id.or_else(|| self.active_profile_id()) else {
            return Ok(());
        };

        let mut profiles = self.profiles.lock().await;
        let Some(profile) = profiles.get_mut(&profile_id) else {
            tracing::debug!(profile = %profile_id, "wallet_add on unknown profile ignored");
            return Ok(());
        };

        let created = !profile.wallets.contains_key(&wallet.address);
        profile.wallets.insert(wallet.address.clone(), wallet.clone());

        self.persist_profiles(&profiles).await?;

        if created {
            tracing::info!(profile = %profile_id, address = %wallet.address, "wallet created");
            let _ = self.wallet_events.send(WalletEvent::Created { wallet });
        }
        Ok(())
    }

    /// Upserts a wallet into a profile, keyed by its address.
    ///
    /// With `notify` set, subscribers receive a
    /// [`WalletEvent::Updated`] notification. Unknown or unresolved
    /// profiles make this a no-op.
    pub async fn wallet_save(
        &self,
        profile_id: Option<ProfileId>,
        wallet: Wallet,
        notify: bool,
    ) -> Result<()> {
        let Some(profile_id) = profile_id.or_else(|| self.active_profile_id()) else {
            return Ok(());
        };

        let mut profiles = self.profiles.lock().await;
        let Some(profile) = profiles.get_mut(&profile_id) else {
            tracing::debug!(profile = %profile_id, "wallet_save on unknown profile ignored");
            return Ok(());
        };

        profile.wallets.insert(wallet.address.clone(), wallet.clone());
        self.persist_profiles(&profiles).await?;

        if notify {
            let _ = self.wallet_events.send(WalletEvent::Updated { wallet });
        }
        Ok(())
    }

    /// Imports a wallet from a recovery phrase.
    ///
    /// # Steps
    ///
    /// 1. Validate the phrase (12 words, BIP-39 checksum) against the
    ///    hinted language with english fallback. The hint defaults to
    ///    the configured UI wordlist language.
    /// 2. Add the wallet under `address` via
    ///    [`wallet_add`](Self::wallet_add).
    ///
    /// Address derivation from the phrase is chain crypto and happens
    /// outside this core; the caller supplies the derived address.
    ///
    /// # Errors
    ///
    /// Validation failures ([`keyfold_types::KeyfoldError::WordCountError`],
    /// [`keyfold_types::KeyfoldError::ChecksumError`]) surface to the
    /// caller; nothing is stored in that case.
    pub async fn wallet_import(
        &self,
        profile_id: Option<ProfileId>,
        address: &str,
        passphrase: &str,
        language_hint: Option<&str>,
    ) -> Result<Wallet> {
        let hint = language_hint.or(self.config.wordlist_language.as_deref());
        validate_phrase(&self.wordlists, passphrase, hint)?;

        let wallet = Wallet {
            address: address.to_string(),
            label: None,
            balance: 0,
            is_watch_only: false,
        };
        self.wallet_add(profile_id, wallet.clone()).await?;
        Ok(wallet)
    }

    // -----------------------------------------------------------------------
    // Contacts
    // -----------------------------------------------------------------------

    /// Adds a contact to a profile, assigning it a freshly generated
    /// identifier. Returns `Ok(None)` when the profile is unknown.
    pub async fn contact_add(
        &self,
        profile_id: ProfileId,
        draft: Contact,
    ) -> Result<Option<Contact>> {
        let mut profiles = self.profiles.lock().await;
        let Some(profile) = profiles.get_mut(&profile_id) else {
            tracing::debug!(profile = %profile_id, "contact_add on unknown profile ignored");
            return Ok(None);
        };

        let mut contact = draft;
        contact.id = ContactId::generate();
        profile.contacts.insert(contact.id, contact.clone());

        self.persist_profiles(&profiles).await?;
        Ok(Some(contact))
    }

    /// Returns a copy of a contact, if profile and contact exist.
    pub async fn contact_get(
        &self,
        profile_id: ProfileId,
        contact_id: ContactId,
    ) -> Option<Contact> {
        let profiles = self.profiles.lock().await;
        profiles.get(&profile_id)?.contacts.get(&contact_id).cloned()
    }

    /// Removes a contact from a profile. Unknown profile or contact is
    /// a no-op; the collection is persisted either way.
    pub async fn contact_remove(&self, profile_id: ProfileId, contact_id: ContactId) -> Result<()> {
        let mut profiles = self.profiles.lock().await;

        if let Some(profile) = profiles.get_mut(&profile_id) {
            profile.contacts.remove(&contact_id);
        }

        self.persist_profiles(&profiles).await
    }

    // -----------------------------------------------------------------------
    // Active selection
    // -----------------------------------------------------------------------

    /// Activates the profile with `id` and resolves its referenced
    /// network as the active network.
    ///
    /// An unknown profile id leaves the selection unchanged. A profile
    /// whose network reference does not resolve becomes active with an
    /// unset active network; callers detect `None` and prompt
    /// reselection.
    pub async fn select_profile(&self, id: ProfileId) {
        let profiles = self.profiles.lock().await;
        let Some(profile) = profiles.get(&id) else {
            tracing::debug!(profile = %id, "select_profile on unknown profile ignored");
            return;
        };

        let network = self.networks.lock().await.get(&profile.network_id).cloned();
        if network.is_none() {
            tracing::warn!(
                profile = %id,
                network = %profile.network_id,
                "active profile references a missing network"
            );
        }

        self.active_profile.send_replace(Some(profile.clone()));
        self.active_network.send_replace(network);
        tracing::info!(profile = %id, "profile selected");
    }

    /// Clears both active slots. Used on sign-out.
    pub fn clear_active(&self) {
        self.active_profile.send_replace(None);
        self.active_network.send_replace(None);
        tracing::info!("active selection cleared");
    }

    /// Returns the currently active profile, if any.
    pub fn active_profile(&self) -> Option<Profile> {
        self.active_profile.borrow().clone()
    }

    /// Returns the currently active network, if any.
    pub fn active_network(&self) -> Option<Network> {
        self.active_network.borrow().clone()
    }

    /// Subscribes to active-profile changes. The receiver immediately
    /// observes the current value.
    pub fn subscribe_active_profile(&self) -> watch::Receiver<Option<Profile>> {
        self.active_profile.subscribe()
    }

    /// Subscribes to active-network changes. The receiver immediately
    /// observes the current value.
    pub fn subscribe_active_network(&self) -> watch::Receiver<Option<Network>> {
        self.active_network.subscribe()
    }

    /// Subscribes to wallet created/updated notifications. No replay;
    /// only events after subscription are observed.
    pub fn subscribe_wallet_events(&self) -> broadcast::Receiver<WalletEvent> {
        self.wallet_events.subscribe()
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn active_profile_id(&self) -> Option<ProfileId> {
        self.active_profile.borrow().as_ref().map(|profile| profile.id)
    }

    /// Writes the profiles snapshot through the gateway.
    async fn persist_profiles(&self, profiles: &HashMap<ProfileId, Profile>) -> Result<()> {
        let snapshot = ProfilesSnapshot {
            profiles: profiles.clone(),
        };
        self.gateway
            .set(STORAGE_PROFILES, encode_snapshot(&snapshot)?)
            .await
    }

    /// Writes the networks snapshot through the gateway.
    async fn persist_networks(&self, networks: &HashMap<NetworkId, Network>) -> Result<()> {
        let snapshot = NetworksSnapshot {
            networks: networks.clone(),
        };
        self.gateway
            .set(STORAGE_NETWORKS, encode_snapshot(&snapshot)?)
            .await
    }
}
