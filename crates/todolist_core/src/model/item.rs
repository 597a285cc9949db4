//! To-do item model and the default seed items.
//!
//! # Invariants
//! - `id` is a non-nil UUID and is never reused for another item.
//! - `name` is trimmed and never blank.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a to-do item.
pub type ItemId = Uuid;

/// Text of the three items every new list starts with.
pub const DEFAULT_ITEM_NAMES: [&str; 3] = [
    "Welcome to your ToDoList!",
    "Hit the + button to add new items.",
    "← Hit this to mark an item as completed. This will also delete the item from the list to reduce clutter.",
];

/// Validation failures for [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemValidationError {
    NilId,
    BlankName,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "item id must not be nil"),
            Self::BlankName => write!(f, "item name must not be blank"),
        }
    }
}

impl Error for ItemValidationError {}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawItem")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

#[derive(Deserialize)]
struct RawItem {
    id: ItemId,
    name: String,
}

impl TryFrom<RawItem> for Item {
    type Error = ItemValidationError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        Item::with_id(raw.id, raw.name)
    }
}

impl Item {
    /// Creates an item with a freshly generated id.
    ///
    /// # Errors
    /// - [`ItemValidationError::BlankName`] when `name` is empty after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, ItemValidationError> {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates an item with a caller-provided id, e.g. when loading from storage.
    pub fn with_id(id: ItemId, name: impl Into<String>) -> Result<Self, ItemValidationError> {
        let item = Self {
            id,
            name: name.into().trim().to_string(),
        };
        item.validate()?;
        Ok(item)
    }

    /// Re-checks invariants on a value that may have been mutated in place.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.id.is_nil() {
            return Err(ItemValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(ItemValidationError::BlankName);
        }
        Ok(())
    }
}

/// Builds the three seed items, each with a fresh id.
pub fn default_items() -> Vec<Item> {
    DEFAULT_ITEM_NAMES
        .iter()
        .map(|name| Item {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
        })
        .collect()
}
