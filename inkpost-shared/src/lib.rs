//! # Inkpost Shared Library
//!
//! This crate contains the domain types and business logic shared by the
//! Inkpost API server and its tests.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing and token issue/verify primitives
//! - `models`: domain records (users, articles)
//! - `store`: repository traits plus their Postgres and in-memory backends
//! - `db`: PostgreSQL connection pool helper

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the Inkpost shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
