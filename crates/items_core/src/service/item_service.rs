//! Item use-case service.
//!
//! # Invariants
//! - Clients never choose `id`, `created_at`, or `updated_at`.
//! - Service APIs never bypass repository validation.

use crate::model::item::{self, Item, ItemId};
use crate::model::payload::{ItemPatch, NewItem};
use crate::repo::item_repo::{ItemRepository, RepoResult};

/// Use-case wrapper for item CRUD operations.
pub struct ItemService<R: ItemRepository> {
    repo: R,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an item from a client payload.
    ///
    /// # Contract
    /// - Generates a fresh v4 `id`.
    /// - Sets `created_at == updated_at == now`.
    pub fn create_item(&self, payload: NewItem) -> RepoResult<Item> {
        let item = Item::new(payload.title, payload.description, payload.status);
        self.repo.create_item(&item)
    }

    pub fn list_items(&self) -> RepoResult<Vec<Item>> {
        self.repo.list_items()
    }

    pub fn get_item(&self, id: ItemId) -> RepoResult<Item> {
        self.repo.get_item(id)
    }

    /// Applies an update payload to an already fetched item and persists it.
    ///
    /// # Contract
    /// - `title` and `description` are overwritten, even with empty strings.
    /// - `status`, `id`, and `created_at` are kept.
    /// - `updated_at` moves strictly forward.
    pub fn apply_patch(&self, mut current: Item, patch: ItemPatch) -> RepoResult<Item> {
        current.title = patch.title;
        current.description = patch.description;
        current.touch(item::now());
        self.repo.update_item(&current)
    }

    pub fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        self.repo.delete_item(id)
    }
}
