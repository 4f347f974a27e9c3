//! Request extractors that run before handlers.
//!
//! - [`auth::RequireApiKey`] -- Checks the optional static bearer token.

pub mod auth;
