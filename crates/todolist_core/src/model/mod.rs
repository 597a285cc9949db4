//! Domain model for the home list and named lists.
//!
//! # Invariants
//! - Every item carries a stable, non-nil `ItemId`.
//! - Named list names are stored in capitalized form.

pub mod item;
pub mod todo_list;
