//! Core library for yume-admin.
//!
//! Provides the session-aware API client, credential storage, the admin
//! login policy, backend models and the order-board computations shared by
//! every front-end of the Yume admin console.

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod utils;

pub use api::{ApiError, RequestDescriptor, ResponseOutcome, SessionClient};
pub use auth::{CredentialKey, CredentialStore, Destination, Navigator};
pub use config::Config;
