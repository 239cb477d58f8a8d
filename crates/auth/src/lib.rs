//! `workact-auth` — static allow-list authorization.
//!
//! This crate is intentionally decoupled from the chat transport and storage.

pub mod authorize;

pub use authorize::{authorize, AllowList, Authorizer, AuthzError};
