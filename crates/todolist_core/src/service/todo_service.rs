//! To-do list use-case service.
//!
//! # Responsibility
//! - Serve the home and named list views, seeding defaults where needed.
//! - Route item additions and deletions to the right store.
//!
//! # Invariants
//! - An empty home list is seeded before it is ever rendered.
//! - A named list is created on first visit and the caller is redirected
//!   instead of rendering the freshly written list.
//! - Item text never appears in log events.

use crate::model::item::{default_items, Item, ItemId};
use crate::model::todo_list::{capitalize_list_name, ListTarget, HOME_LIST_NAME};
use crate::repo::item_repo::{ItemRepository, RepoResult};
use crate::repo::list_repo::{ListLookup, ListRepository};
use log::{debug, info};

/// Data needed to render one list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub list_name: String,
    pub items: Vec<Item>,
}

/// Result of a view request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Render the page.
    Render(ListPage),
    /// The store was just written; send the client back to this list.
    Redirect(ListTarget),
}

/// Use-case service for the home list and named lists.
pub struct TodoService<I: ItemRepository, L: ListRepository> {
    items: I,
    lists: L,
}

impl<I: ItemRepository, L: ListRepository> TodoService<I, L> {
    pub fn new(items: I, lists: L) -> Self {
        Self { items, lists }
    }

    /// Home list view.
    ///
    /// Seeds the three default items and asks for a redirect when the home
    /// collection is empty.
    pub fn home_view(&self) -> RepoResult<ListView> {
        let items = self.items.list_items()?;
        if !items.is_empty() {
            return Ok(ListView::Render(ListPage {
                list_name: HOME_LIST_NAME.to_string(),
                items,
            }));
        }

        let seeded = self.items.seed_if_empty(&default_items())?;
        info!("event=home_seed module=service status=ok seeded={seeded}");
        Ok(ListView::Redirect(ListTarget::Home))
    }

    /// Named list view for a raw URL path segment.
    ///
    /// The segment is capitalized first, so differently-cased paths share one
    /// list. A missing list is created with the default items.
    pub fn named_list_view(&self, raw_name: &str) -> RepoResult<ListView> {
        let name = capitalize_list_name(raw_name);
        if let Some(list) = self.lists.find_by_name(&name)? {
            return Ok(ListView::Render(ListPage {
                list_name: list.name,
                items: list.items,
            }));
        }

        let lookup = self.lists.create_or_fetch(&name, &default_items())?;
        info!(
            "event=list_create module=service status=ok created={}",
            lookup.was_created()
        );
        Ok(ListView::Redirect(ListTarget::Named(lookup.into_list().name)))
    }

    /// Adds a new item to the list labelled `list_label`.
    ///
    /// Returns the list the client should be sent back to.
    ///
    /// # Errors
    /// - `RepoError::Validation` when `item_name` is blank.
    /// - `RepoError::ListNotFound` when a named list does not exist.
    pub fn add_item(&self, item_name: &str, list_label: &str) -> RepoResult<ListTarget> {
        let item = Item::new(item_name)?;
        let target = ListTarget::from_label(list_label);
        match &target {
            ListTarget::Home => {
                self.items.insert_item(&item)?;
            }
            ListTarget::Named(name) => self.lists.push_item(name, &item)?,
        }
        debug!(
            "event=item_add module=service status=ok target={}",
            target_kind(&target)
        );
        Ok(target)
    }

    /// Deletes item `item_id` from the list labelled `list_label`.
    ///
    /// Deleting an item that is already gone is not an error.
    pub fn delete_item(&self, item_id: ItemId, list_label: &str) -> RepoResult<ListTarget> {
        let target = ListTarget::from_label(list_label);
        let removed = match &target {
            ListTarget::Home => self.items.remove_item(item_id)?,
            ListTarget::Named(name) => self.lists.pull_item(name, item_id)?,
        };
        debug!(
            "event=item_delete module=service status=ok target={} removed={removed}",
            target_kind(&target)
        );
        Ok(target)
    }
}

fn target_kind(target: &ListTarget) -> &'static str {
    match target {
        ListTarget::Home => "home",
        ListTarget::Named(_) => "named",
    }
}
