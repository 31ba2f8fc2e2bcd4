//! Domain model for daily todo trees and calendar weeks.
//!
//! # Responsibility
//! - Define the canonical todo item shape consumed by sync and review.
//! - Keep the marker grammar and week arithmetic pure and dependency-free.
//!
//! # Invariants
//! - `TodoItem::prefix` is always derived from `text` by the marker grammar.
//! - `WeekRange` is always Monday-aligned and exactly seven days long.

pub mod marker;
pub mod todo;
pub mod week;
