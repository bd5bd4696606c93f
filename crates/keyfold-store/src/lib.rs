//! Persistent multi-profile data store for the Keyfold wallet core.
//!
//! - [`gateway`] — the abstract key-value persistence seam and the
//!   snapshot records written through it
//! - [`defaults`] — built-in network parameter sets used to seed an
//!   empty store
//! - [`store`] — the [`ProfileStore`](store::ProfileStore) itself:
//!   profiles, networks, wallets, contacts, and the observable active
//!   selection

pub mod defaults;
pub mod gateway;
pub mod store;
