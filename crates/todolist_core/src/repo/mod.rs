//! Repository contracts and SQLite implementations for both stores.
//!
//! # Responsibility
//! - `item_repo`: the flat home-list collection.
//! - `list_repo`: named lists with embedded item sequences.
//!
//! # Invariants
//! - Write paths validate items before any SQL mutation.
//! - Repositories only accept connections migrated by `db::open_db*`.

pub mod item_repo;
pub mod list_repo;
