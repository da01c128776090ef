//! REST clients for the managed backend that owns profiles and sessions
//!
//! The backend exposes PostgREST-style table access under `/rest/v1` and the
//! signed-in user under `/auth/v1/user`. Every request carries the project
//! API key in the `apikey` header; user-scoped requests add the session's
//! bearer token.

pub mod rest_identity;
pub mod rest_store;

pub use rest_identity::RestIdentityProvider;
pub use rest_store::RestProfileStore;

#[cfg(test)]
mod tests;
