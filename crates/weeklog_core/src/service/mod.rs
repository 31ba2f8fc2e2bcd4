//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store capabilities into sync and weekly-review operations.
//! - Keep CLI/report layers decoupled from block traversal details.

pub mod directory;
pub mod review_service;
pub mod sync_service;
pub mod tree_fetch;
