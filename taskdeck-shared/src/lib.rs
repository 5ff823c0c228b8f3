//! # TaskDeck Shared Library
//!
//! This crate contains the types and business logic shared between the
//! TaskDeck API server and the TaskDeck client library.
//!
//! ## Module Organization
//!
//! - `models`: User and task records plus their store-backed operations
//! - `auth`: JWT sessions, password hashing, and the request auth context
//! - `store`: Injectable storage backends and the mutation-serializing store

pub mod auth;
pub mod models;
pub mod store;

/// Current version of the TaskDeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
