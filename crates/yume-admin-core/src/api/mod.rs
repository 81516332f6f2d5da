//! REST client module for the Yume backend.
//!
//! This module provides the `SessionClient` for talking to the Yume API:
//! every request carries the stored bearer token, and a rejected token is
//! refreshed once before the session is given up on.
//!
//! Resource calls (orders, dishes, users) are implemented on `SessionClient`
//! in their own files and all go through [`SessionClient::send`].

pub mod client;
pub mod dishes;
pub mod error;
pub mod orders;
pub mod outcome;
pub mod request;
pub mod users;

pub use client::{LoginResponse, SessionClient};
pub use error::ApiError;
pub use outcome::{ResponseBody, ResponseOutcome};
pub use request::{FilePart, MultipartForm, RequestBody, RequestDescriptor};
