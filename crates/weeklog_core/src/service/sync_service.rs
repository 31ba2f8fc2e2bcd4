//! Idempotent daily-todo sync engine.
//!
//! # Responsibility
//! - Route marked top-level items from the daily log to their project
//!   destinations.
//! - Deduplicate against content already present at each destination.
//!
//! # Invariants
//! - Re-running over an unchanged source appends nothing.
//! - One destination's failure never aborts the other destinations.
//! - The project directory is scanned at most once per service lifetime.

use crate::model::todo::TodoItem;
use crate::service::directory::{ProjectDirectory, ProjectEntry};
use crate::service::tree_fetch;
use crate::store::{BlockRef, DocumentStore, ProjectRegistry, StoreError};
use chrono::NaiveDate;
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Non-isolated sync failures: the ones that abort a whole `sync_day` call.
#[derive(Debug)]
pub enum SyncError {
    /// The daily log itself could not be fetched.
    DailyFetch(StoreError),
    /// The one-time registry scan failed.
    DirectoryScan(StoreError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DailyFetch(err) => write!(f, "failed to fetch daily log: {err}"),
            Self::DirectoryScan(err) => write!(f, "failed to scan project registry: {err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DailyFetch(err) | Self::DirectoryScan(err) => Some(err),
        }
    }
}

/// One destination that failed while the rest of the sync completed.
#[derive(Debug)]
pub struct SyncFailure {
    pub project: String,
    pub error: StoreError,
}

/// Outcome of one `sync_day` run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Appended item count per project name. Destinations with zero new
    /// items are omitted.
    pub appended: BTreeMap<String, usize>,
    /// Per-destination failures, isolated from the successful ones.
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn total_appended(&self) -> usize {
        self.appended.values().sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Sync engine over a document store and a project registry.
pub struct SyncService<S: DocumentStore, R: ProjectRegistry> {
    store: S,
    registry: R,
    daily_log: BlockRef,
    registry_ref: BlockRef,
    /// Lazily built on first use, then immutable for the service lifetime.
    directory: OnceCell<ProjectDirectory>,
}

impl<S: DocumentStore, R: ProjectRegistry> SyncService<S, R> {
    pub fn new(store: S, registry: R, daily_log: BlockRef, registry_ref: BlockRef) -> Self {
        Self {
            store,
            registry,
            daily_log,
            registry_ref,
            directory: OnceCell::new(),
        }
    }

    /// The process-lifetime routing directory, scanned on first access.
    pub fn directory(&self) -> Result<&ProjectDirectory, SyncError> {
        self.directory.get_or_try_init(|| {
            ProjectDirectory::scan(&self.registry, &self.registry_ref)
                .map_err(SyncError::DirectoryScan)
        })
    }

    /// Routes the day's marked items to their projects, appending only items
    /// not already present at each destination.
    pub fn sync_day(&self, date: NaiveDate) -> Result<SyncReport, SyncError> {
        let items = tree_fetch::fetch_day(&self.store, &self.daily_log, date)
            .map_err(SyncError::DailyFetch)?;
        let directory = self.directory()?;

        // Group by prefix in fetch order. Only items surfaced by the
        // top-level scan are routable; a nested child never routes itself.
        let mut grouped: Vec<(&ProjectEntry, Vec<TodoItem>)> = Vec::new();
        for item in items {
            let Some(prefix) = item.prefix.as_deref() else {
                continue;
            };
            let Some(entry) = directory.resolve(prefix) else {
                // Routing miss: excluded, not an error.
                debug!(
                    "event=routing_miss module=sync status=skipped prefix={prefix} date={date}"
                );
                continue;
            };
            match grouped.iter_mut().find(|(e, _)| e.prefix == entry.prefix) {
                Some((_, bucket)) => bucket.push(item),
                None => grouped.push((entry, vec![item])),
            }
        }

        let mut report = SyncReport::default();
        for (entry, todos) in grouped {
            let project = entry.display_name();
            match append_new_items(&self.store, entry, &todos) {
                Ok(0) => {
                    debug!(
                        "event=sync_destination module=sync status=noop project={project} date={date}"
                    );
                }
                Ok(count) => {
                    info!(
                        "event=sync_destination module=sync status=ok project={project} appended={count} date={date}"
                    );
                    report.appended.insert(project.to_string(), count);
                }
                Err(error) => {
                    warn!(
                        "event=sync_destination module=sync status=error project={project} error={error}"
                    );
                    report.failures.push(SyncFailure {
                        project: project.to_string(),
                        error,
                    });
                }
            }
        }

        Ok(report)
    }
}

/// Appends the candidates whose stripped text is not yet present at the
/// destination. Returns the number actually appended.
fn append_new_items<S: DocumentStore + ?Sized>(
    store: &S,
    entry: &ProjectEntry,
    todos: &[TodoItem],
) -> Result<usize, StoreError> {
    let existing = tree_fetch::existing_display_texts(store, &entry.destination)?;

    let new_items: Vec<&TodoItem> = todos
        .iter()
        .filter(|todo| !existing.contains(todo.text_without_prefix()))
        .collect();
    if new_items.is_empty() {
        return Ok(0);
    }

    let blocks = new_items.iter().map(|todo| todo.to_block()).collect();
    store.append_children(&entry.destination, blocks)?;
    Ok(new_items.len())
}
