//! Block descriptors exchanged with the remote document store.
//!
//! # Responsibility
//! - Give the loosely-typed remote block hierarchy a closed, typed shape.
//!
//! # Invariants
//! - `BlockRef` is opaque to the core; it is never parsed or compared for
//!   content identity.
//! - `BlockContent` is a closed variant set so the container-transparency
//!   boundary can match exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque location identifier inside the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockRef(pub String);

impl BlockRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BlockRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed payload of one remote block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    /// An actionable checklist line.
    Todo { text: String, checked: bool },
    /// A transparent nesting structure (toggle, plain bullet item). Only its
    /// actionable descendants matter to the core.
    Container,
    /// Anything else (headings, paragraphs, dividers). Skipped entirely.
    Other,
}

/// One block descriptor as listed by the document-read capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockRef,
    pub content: BlockContent,
    /// Whether a further `list_children` call would return nested blocks.
    pub has_children: bool,
}

impl Block {
    pub fn todo(id: BlockRef, text: impl Into<String>, checked: bool, has_children: bool) -> Self {
        Self {
            id,
            content: BlockContent::Todo {
                text: text.into(),
                checked,
            },
            has_children,
        }
    }

    pub fn container(id: BlockRef, has_children: bool) -> Self {
        Self {
            id,
            content: BlockContent::Container,
            has_children,
        }
    }

    pub fn other(id: BlockRef) -> Self {
        Self {
            id,
            content: BlockContent::Other,
            has_children: false,
        }
    }
}

/// Append form of a checklist block, children embedded in the same call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlock {
    pub text: String,
    pub checked: bool,
    pub children: Vec<NewBlock>,
}

/// One row of the project registry as listed by the registry capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Destination location for appended todos. In the remote store a
    /// registry row doubles as an appendable page.
    pub id: BlockRef,
    /// Raw title text, display convention `[prefix] Name` included.
    pub title: String,
}
