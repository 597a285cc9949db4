//! Use-case services over the item and list repositories.
//!
//! # Responsibility
//! - Map each page/form operation onto repository calls.
//! - Keep the HTTP layer free of storage details.

pub mod todo_service;
