//! Authentication module for managing session credentials.
//!
//! This module provides:
//! - `CredentialStore`: the get/set/erase capability the request client
//!   reads tokens through, with memory, file and keyring backends
//! - `Navigator`: where the application sends the user after login/teardown
//! - `guard`: the admin-only login policy and account signup
//!
//! The request client never owns tokens; it reads them from the store
//! before every request and writes them only after login or refresh.

pub mod credentials;
pub mod guard;
pub mod navigator;
pub mod session;
pub mod storage;

pub use credentials::KeyringStore;
pub use guard::{login_admin, signup, AdminLoginError, NewAccount};
pub use navigator::{Destination, Navigator, RecordingNavigator};
pub use session::{FileStore, SessionData};
pub use storage::{open_store, CredentialKey, CredentialStore, MemoryStore};
