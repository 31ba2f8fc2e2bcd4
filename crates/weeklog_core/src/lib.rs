//! Core domain logic for the weeklog weekly-review workflow.
//! This crate is the single source of truth for marker grammar, week
//! arithmetic, daily-tree traversal, idempotent project sync and weekly
//! aggregation. Remote transports (document store, registry, mail) plug in
//! behind the `store` traits.

pub mod config;
pub mod logging;
pub mod model;
pub mod report;
pub mod service;
pub mod store;

pub use config::{Config, ConfigError, LoggingConfig, ReportConfig, StoreConfig};
pub use logging::{default_log_level, init_logging};
pub use model::marker::{extract_prefix, strip_marker};
pub use model::todo::TodoItem;
pub use model::week::{
    current_week, last_week, next_week, week_after, week_before, week_of, WeekRange,
};
pub use report::{format_draft, render_weekly_report, EmailDraft};
pub use service::directory::{ProjectDirectory, ProjectEntry};
pub use service::review_service::{ReviewService, WeeklyRollup};
pub use service::sync_service::{SyncError, SyncFailure, SyncReport, SyncService};
pub use service::tree_fetch::fetch_day;
pub use store::{
    Block, BlockContent, BlockRef, DocumentStore, NewBlock, ProjectRegistry, RegistryEntry,
    StoreError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
