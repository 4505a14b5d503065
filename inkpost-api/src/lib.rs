//! # Inkpost API Server Library
//!
//! Core functionality for the Inkpost API server.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `routes`: API route handlers
//! - `ws`: websocket board client registry

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod ws;
