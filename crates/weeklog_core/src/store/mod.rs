//! Document store and project registry capability contracts.
//!
//! # Responsibility
//! - Define the read/append/registry seams the core consumes.
//! - Keep vendor transport details outside the core crate.
//!
//! # Invariants
//! - `append_children` is additive only; it never replaces existing content.
//! - An unknown ref is distinguishable from a transport failure.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod block;

pub use block::{Block, BlockContent, BlockRef, NewBlock, RegistryEntry};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure talking to the document store or project registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced location does not exist or is not accessible.
    UnknownRef(BlockRef),
    /// The remote capability could not be reached or returned malformed data.
    Transport(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRef(location) => write!(f, "unknown block ref: {location}"),
            Self::Transport(message) => write!(f, "store transport failure: {message}"),
        }
    }
}

impl Error for StoreError {}

/// Blocking read/append access to the nested block hierarchy.
pub trait DocumentStore {
    /// Lists the ordered direct children of `location`.
    fn list_children(&self, location: &BlockRef) -> StoreResult<Vec<Block>>;

    /// Appends `blocks` (with their embedded children) after the existing
    /// content of `location`.
    fn append_children(&self, location: &BlockRef, blocks: Vec<NewBlock>) -> StoreResult<()>;
}

/// Blocking enumeration of the project registry.
pub trait ProjectRegistry {
    /// Lists every registry row in registry order.
    fn list_entries(&self, registry: &BlockRef) -> StoreResult<Vec<RegistryEntry>>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn list_children(&self, location: &BlockRef) -> StoreResult<Vec<Block>> {
        (**self).list_children(location)
    }

    fn append_children(&self, location: &BlockRef, blocks: Vec<NewBlock>) -> StoreResult<()> {
        (**self).append_children(location, blocks)
    }
}

impl<R: ProjectRegistry + ?Sized> ProjectRegistry for &R {
    fn list_entries(&self, registry: &BlockRef) -> StoreResult<Vec<RegistryEntry>> {
        (**self).list_entries(registry)
    }
}
