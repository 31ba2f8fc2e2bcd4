//! Shared in-memory document store fixture for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;
use weeklog_core::store::StoreResult;
use weeklog_core::{
    Block, BlockContent, BlockRef, DocumentStore, NewBlock, ProjectRegistry, RegistryEntry,
    StoreError,
};

struct StoredBlock {
    id: BlockRef,
    content: BlockContent,
}

/// Single-threaded fake of the document store and project registry.
///
/// Every known location holds an ordered child list; `has_children` is
/// derived from stored state at list time. Locations can be marked failing
/// to exercise error isolation.
#[derive(Default)]
pub struct InMemoryStore {
    children: RefCell<HashMap<String, Vec<StoredBlock>>>,
    registry: RefCell<HashMap<String, Vec<RegistryEntry>>>,
    failing: RefCell<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint_ref() -> BlockRef {
        BlockRef::new(Uuid::new_v4().to_string())
    }

    /// Registers an empty appendable page and returns its ref.
    pub fn add_page(&self) -> BlockRef {
        let page = Self::mint_ref();
        self.children
            .borrow_mut()
            .insert(page.as_str().to_string(), Vec::new());
        page
    }

    /// Adds a checklist block under `parent` and returns its ref.
    pub fn add_todo(&self, parent: &BlockRef, text: &str, checked: bool) -> BlockRef {
        self.add_block(
            parent,
            BlockContent::Todo {
                text: text.to_string(),
                checked,
            },
        )
    }

    /// Adds a transparent container (toggle / plain list item) under
    /// `parent` and returns its ref.
    pub fn add_container(&self, parent: &BlockRef) -> BlockRef {
        self.add_block(parent, BlockContent::Container)
    }

    /// Adds a non-actionable block (heading, paragraph) under `parent`.
    pub fn add_other(&self, parent: &BlockRef) -> BlockRef {
        self.add_block(parent, BlockContent::Other)
    }

    fn add_block(&self, parent: &BlockRef, content: BlockContent) -> BlockRef {
        let id = Self::mint_ref();
        let mut children = self.children.borrow_mut();
        children
            .entry(parent.as_str().to_string())
            .or_default()
            .push(StoredBlock {
                id: id.clone(),
                content,
            });
        children.insert(id.as_str().to_string(), Vec::new());
        id
    }

    /// Registers a registry row under `registry_ref` and returns the ref of
    /// its (empty) destination page.
    pub fn add_project(&self, registry_ref: &BlockRef, title: &str) -> BlockRef {
        let destination = self.add_page();
        self.registry
            .borrow_mut()
            .entry(registry_ref.as_str().to_string())
            .or_default()
            .push(RegistryEntry {
                id: destination.clone(),
                title: title.to_string(),
            });
        destination
    }

    /// Creates an (initially empty) registry location.
    pub fn add_registry(&self) -> BlockRef {
        let registry = Self::mint_ref();
        self.registry
            .borrow_mut()
            .insert(registry.as_str().to_string(), Vec::new());
        registry
    }

    /// Makes every call touching `location` fail with a transport error.
    pub fn fail_on(&self, location: &BlockRef) {
        self.failing
            .borrow_mut()
            .insert(location.as_str().to_string());
    }

    /// Snapshot of the blocks stored under `location`, for assertions.
    pub fn blocks_under(&self, location: &BlockRef) -> Vec<Block> {
        self.list_children(location)
            .expect("fixture location should list")
    }

    fn check_failing(&self, location: &BlockRef) -> StoreResult<()> {
        if self.failing.borrow().contains(location.as_str()) {
            return Err(StoreError::Transport(format!(
                "injected failure for {location}"
            )));
        }
        Ok(())
    }
}

impl DocumentStore for InMemoryStore {
    fn list_children(&self, location: &BlockRef) -> StoreResult<Vec<Block>> {
        self.check_failing(location)?;
        let children = self.children.borrow();
        let Some(stored) = children.get(location.as_str()) else {
            return Err(StoreError::UnknownRef(location.clone()));
        };
        Ok(stored
            .iter()
            .map(|block| Block {
                id: block.id.clone(),
                content: block.content.clone(),
                has_children: children
                    .get(block.id.as_str())
                    .is_some_and(|nested| !nested.is_empty()),
            })
            .collect())
    }

    fn append_children(&self, location: &BlockRef, blocks: Vec<NewBlock>) -> StoreResult<()> {
        self.check_failing(location)?;
        if !self.children.borrow().contains_key(location.as_str()) {
            return Err(StoreError::UnknownRef(location.clone()));
        }
        for block in blocks {
            let id = self.add_todo(location, &block.text, block.checked);
            if !block.children.is_empty() {
                self.append_children(&id, block.children)?;
            }
        }
        Ok(())
    }
}

impl ProjectRegistry for InMemoryStore {
    fn list_entries(&self, registry: &BlockRef) -> StoreResult<Vec<RegistryEntry>> {
        self.check_failing(registry)?;
        let rows = self.registry.borrow();
        let Some(entries) = rows.get(registry.as_str()) else {
            return Err(StoreError::UnknownRef(registry.clone()));
        };
        Ok(entries.clone())
    }
}
