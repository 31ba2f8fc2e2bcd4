//! Weekly aggregation over daily todo trees.
//!
//! # Responsibility
//! - Merge the seven daily trees of a week into a per-prefix rollup.
//!
//! # Invariants
//! - Days are fetched in week order; item order within a group follows the
//!   day-by-day concatenation.
//! - Only completed, marked items participate.

use crate::model::todo::TodoItem;
use crate::model::week::{week_of, WeekRange};
use crate::service::tree_fetch;
use crate::store::{BlockRef, DocumentStore, StoreResult};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;

/// Completed, marked items of one week, grouped by routing prefix.
///
/// This rollup, together with its `week`, is the whole input contract of
/// report rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRollup {
    pub week: WeekRange,
    pub by_prefix: BTreeMap<String, Vec<TodoItem>>,
}

impl WeeklyRollup {
    pub fn total_items(&self) -> usize {
        self.by_prefix.values().map(Vec::len).sum()
    }

    pub fn project_count(&self) -> usize {
        self.by_prefix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_prefix.is_empty()
    }
}

/// Weekly review aggregator over the daily log.
pub struct ReviewService<S: DocumentStore> {
    store: S,
    daily_log: BlockRef,
}

impl<S: DocumentStore> ReviewService<S> {
    pub fn new(store: S, daily_log: BlockRef) -> Self {
        Self { store, daily_log }
    }

    /// Fetches all seven days of `week` and groups the completed, marked
    /// items by prefix.
    ///
    /// Any day's fetch failure aborts the whole aggregation.
    pub fn aggregate_week(&self, week: WeekRange) -> StoreResult<WeeklyRollup> {
        let mut by_prefix: BTreeMap<String, Vec<TodoItem>> = BTreeMap::new();

        for day in week.days() {
            for item in tree_fetch::fetch_day(&self.store, &self.daily_log, day)? {
                if !item.completed {
                    continue;
                }
                let Some(prefix) = item.prefix.clone() else {
                    continue;
                };
                by_prefix.entry(prefix).or_default().push(item);
            }
        }

        let rollup = WeeklyRollup { week, by_prefix };
        info!(
            "event=weekly_rollup module=review status=ok week={} projects={} items={}",
            rollup.week,
            rollup.project_count(),
            rollup.total_items()
        );
        Ok(rollup)
    }

    /// Aggregates the week containing `date`, normalizing to its Monday.
    pub fn aggregate_week_starting(&self, date: NaiveDate) -> StoreResult<WeeklyRollup> {
        self.aggregate_week(week_of(date))
    }
}
