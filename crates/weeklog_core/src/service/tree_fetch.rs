//! Daily tree retrieval and container flattening.
//!
//! # Responsibility
//! - Turn the remote nested block hierarchy into `TodoItem` trees.
//! - Apply container transparency at arbitrary depth.
//!
//! # Invariants
//! - Traversal is iterative over an explicit frame stack; depth of the
//!   remote hierarchy never grows the call stack.
//! - Source order is preserved through flattening.
//! - A failed child fetch aborts the whole call; there are no partial
//!   results.

use crate::model::marker;
use crate::model::todo::TodoItem;
use crate::store::{Block, BlockContent, BlockRef, DocumentStore, StoreResult};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Where a finished frame's items attach once its blocks are exhausted.
enum Attach {
    /// Children of an actionable item; the item is emitted when they finish.
    Todo(TodoItem),
    /// A transparent container; its items are promoted to the parent level.
    Container,
}

struct Frame {
    blocks: std::vec::IntoIter<Block>,
    items: Vec<TodoItem>,
    attach: Attach,
}

/// Fetches the daily log and flattens it into top-level todo items.
///
/// The store keeps one shared daily-log location for all days; `date` is
/// metadata attached to the resulting items, not a lookup key. Actionable
/// blocks become items (their nested children fetched under them in order);
/// toggle and plain-list containers are transparent at any depth; anything
/// else is skipped.
pub fn fetch_day<S: DocumentStore + ?Sized>(
    store: &S,
    daily_log: &BlockRef,
    date: NaiveDate,
) -> StoreResult<Vec<TodoItem>> {
    let mut root_blocks = store.list_children(daily_log)?.into_iter();
    let mut root_items: Vec<TodoItem> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        let next = match stack.last_mut() {
            Some(frame) => frame.blocks.next(),
            None => root_blocks.next(),
        };

        match next {
            Some(block) => match block.content {
                BlockContent::Todo { text, checked } => {
                    let item = TodoItem::with_source(text, checked, date, block.id.clone());
                    if block.has_children {
                        let blocks = store.list_children(&block.id)?.into_iter();
                        stack.push(Frame {
                            blocks,
                            items: Vec::new(),
                            attach: Attach::Todo(item),
                        });
                    } else {
                        sink(&mut stack, &mut root_items).push(item);
                    }
                }
                BlockContent::Container => {
                    // Childless containers flatten to nothing.
                    if block.has_children {
                        let blocks = store.list_children(&block.id)?.into_iter();
                        stack.push(Frame {
                            blocks,
                            items: Vec::new(),
                            attach: Attach::Container,
                        });
                    }
                }
                BlockContent::Other => {}
            },
            None => match stack.pop() {
                Some(Frame { items, attach, .. }) => {
                    let target = sink(&mut stack, &mut root_items);
                    match attach {
                        Attach::Todo(mut item) => {
                            item.children = items;
                            target.push(item);
                        }
                        Attach::Container => target.extend(items),
                    }
                }
                None => break,
            },
        }
    }

    Ok(root_items)
}

/// Collects the marker-stripped display text of every actionable block
/// reachable under `location`, honoring the same container-transparency rule
/// as [`fetch_day`]. Used as the duplicate set by the sync engine.
pub fn existing_display_texts<S: DocumentStore + ?Sized>(
    store: &S,
    location: &BlockRef,
) -> StoreResult<HashSet<String>> {
    let mut texts = HashSet::new();
    let mut pending: Vec<BlockRef> = vec![location.clone()];

    while let Some(current) = pending.pop() {
        for block in store.list_children(&current)? {
            match block.content {
                BlockContent::Todo { text, .. } => {
                    texts.insert(marker::strip_marker(&text).to_string());
                    if block.has_children {
                        pending.push(block.id);
                    }
                }
                BlockContent::Container => {
                    if block.has_children {
                        pending.push(block.id);
                    }
                }
                BlockContent::Other => {}
            }
        }
    }

    Ok(texts)
}

fn sink<'a>(stack: &'a mut [Frame], root: &'a mut Vec<TodoItem>) -> &'a mut Vec<TodoItem> {
    match stack.last_mut() {
        Some(frame) => &mut frame.items,
        None => root,
    }
}
