//! Named lists and list-name normalization.

use crate::model::item::Item;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label of the home list. Its items live in the flat item store.
pub const HOME_LIST_NAME: &str = "To-Do List";

/// Stable identifier of a named list.
pub type ListId = Uuid;

/// A user-named list with its embedded items in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    pub items: Vec<Item>,
}

impl TodoList {
    /// Creates an empty list with a fresh id. `name` is stored as given.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
        }
    }
}

/// Which store a form submission addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTarget {
    Home,
    Named(String),
}

impl ListTarget {
    /// Resolves a list label taken from a submitted form.
    ///
    /// Only the exact home label maps to [`ListTarget::Home`]; any other value
    /// is looked up as a named list without further normalization.
    pub fn from_label(label: &str) -> Self {
        if label == HOME_LIST_NAME {
            Self::Home
        } else {
            Self::Named(label.to_string())
        }
    }

    /// The label rendered for this list.
    pub fn label(&self) -> &str {
        match self {
            Self::Home => HOME_LIST_NAME,
            Self::Named(name) => name.as_str(),
        }
    }
}

/// Normalizes a list name taken from a URL path segment.
///
/// The first character is upper-cased and the remainder lower-cased, so
/// `newlist`, `NEWLIST` and `Newlist` all address `Newlist`.
pub fn capitalize_list_name(raw: &str) -> String {
    let mut chars = raw.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str().to_lowercase();
    first.to_uppercase().chain(rest.chars()).collect()
}

#[cfg(test)]
mod tests {
    use super::{capitalize_list_name, ListTarget, HOME_LIST_NAME};

    #[test]
    fn capitalize_normalizes_case() {
        assert_eq!(capitalize_list_name("newlist"), "Newlist");
        assert_eq!(capitalize_list_name("NEWLIST"), "Newlist");
        assert_eq!(capitalize_list_name("work stuff"), "Work stuff");
        assert_eq!(capitalize_list_name("élan"), "Élan");
        assert_eq!(capitalize_list_name(""), "");
    }

    #[test]
    fn only_exact_home_label_targets_home() {
        assert_eq!(ListTarget::from_label(HOME_LIST_NAME), ListTarget::Home);
        assert_eq!(
            ListTarget::from_label("To-do list"),
            ListTarget::Named("To-do list".to_string())
        );
        assert_eq!(ListTarget::from_label("Work").label(), "Work");
    }
}
