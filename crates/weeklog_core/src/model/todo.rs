//! Todo item domain model.
//!
//! # Responsibility
//! - Represent one actionable line fetched from the daily log.
//! - Derive the routing prefix from raw text exactly once, at construction.
//!
//! # Invariants
//! - `prefix` is a deterministic function of `text` (marker grammar).
//! - `children` are exclusively owned; the structure is a tree, never a graph.
//! - `text` is never mutated; the stripped form is a derived view.

use crate::model::marker;
use crate::store::block::{BlockRef, NewBlock};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One actionable line from a daily todo tree.
///
/// The model lives only for the duration of one run; the remote document
/// store stays the durable source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Raw display string as authored, marker included.
    pub text: String,
    /// Completion state read from the source at fetch time.
    pub completed: bool,
    /// Calendar day of the daily list this item was fetched from.
    pub date: NaiveDate,
    /// Routing code extracted from `text`; `None` when unmarked.
    pub prefix: Option<String>,
    /// Ordered sub-tasks. Insertion order is significant and survives
    /// serialization.
    #[serde(default)]
    pub children: Vec<TodoItem>,
    /// Originating block location, used only for append corrections, never
    /// for content identity.
    #[serde(default)]
    pub source_ref: Option<BlockRef>,
}

impl TodoItem {
    /// Creates an item and derives its routing prefix from `text`.
    pub fn new(text: impl Into<String>, completed: bool, date: NaiveDate) -> Self {
        let text = text.into();
        let prefix = marker::extract_prefix(&text).map(str::to_string);
        Self {
            text,
            completed,
            date,
            prefix,
            children: Vec::new(),
            source_ref: None,
        }
    }

    /// Creates an item carrying its originating block location.
    pub fn with_source(
        text: impl Into<String>,
        completed: bool,
        date: NaiveDate,
        source_ref: BlockRef,
    ) -> Self {
        let mut item = Self::new(text, completed, date);
        item.source_ref = Some(source_ref);
        item
    }

    /// Display form of `text` with the marker token stripped.
    ///
    /// Pure derived view; `text` itself is never rewritten.
    pub fn text_without_prefix(&self) -> &str {
        marker::strip_marker(&self.text)
    }

    /// Converts this item (and its subtree) into the store append form.
    ///
    /// The marker is stripped from the destination text; children are
    /// embedded as nested blocks in order.
    pub fn to_block(&self) -> NewBlock {
        NewBlock {
            text: self.text_without_prefix().to_string(),
            checked: self.completed,
            children: self.children.iter().map(TodoItem::to_block).collect(),
        }
    }
}
