//! Prefix-to-project routing directory.
//!
//! # Responsibility
//! - Scan the project registry once and map routing prefixes to
//!   destinations.
//!
//! # Invariants
//! - Registry titles without a marker are not addressable by sync.
//! - Duplicate prefixes resolve first-registration-wins and are logged,
//!   never fatal.

use crate::model::marker;
use crate::store::{BlockRef, ProjectRegistry, StoreResult};
use log::{info, warn};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// One sync destination keyed by its routing prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Routing code, unique within the directory.
    pub prefix: String,
    /// Registry title verbatim, bracket convention included.
    pub name: String,
    /// Append target for synced items.
    pub destination: BlockRef,
}

impl ProjectEntry {
    /// Project name with the bracket convention stripped, used wherever the
    /// project is reported to a human.
    pub fn display_name(&self) -> &str {
        marker::strip_marker(&self.name)
    }
}

/// Immutable prefix → project mapping built from one registry scan.
///
/// The directory is never re-queried within a run; registry changes require
/// a fresh process.
#[derive(Debug, Default)]
pub struct ProjectDirectory {
    entries: BTreeMap<String, ProjectEntry>,
}

impl ProjectDirectory {
    /// Scans every registry row and keeps those whose title carries a
    /// marker. Later rows with an already-seen prefix are ignored.
    pub fn scan<R: ProjectRegistry + ?Sized>(
        registry: &R,
        registry_ref: &BlockRef,
    ) -> StoreResult<Self> {
        let mut entries = BTreeMap::new();

        for row in registry.list_entries(registry_ref)? {
            let Some(prefix) = marker::extract_prefix(&row.title) else {
                continue;
            };
            match entries.entry(prefix.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(ProjectEntry {
                        prefix: prefix.to_string(),
                        name: row.title,
                        destination: row.id,
                    });
                }
                Entry::Occupied(existing) => {
                    warn!(
                        "event=duplicate_prefix module=directory status=skipped prefix={} kept={} dropped={}",
                        prefix,
                        existing.get().destination,
                        row.id
                    );
                }
            }
        }

        info!(
            "event=directory_scan module=directory status=ok projects={}",
            entries.len()
        );
        Ok(Self { entries })
    }

    /// Resolves one routing prefix. Case-sensitive.
    pub fn resolve(&self, prefix: &str) -> Option<&ProjectEntry> {
        self.entries.get(prefix)
    }

    /// All addressable projects, keyed by prefix.
    pub fn all(&self) -> &BTreeMap<String, ProjectEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectDirectory;
    use crate::store::{BlockRef, ProjectRegistry, RegistryEntry, StoreResult};

    struct FixedRegistry {
        rows: Vec<RegistryEntry>,
    }

    impl ProjectRegistry for FixedRegistry {
        fn list_entries(&self, _registry: &BlockRef) -> StoreResult<Vec<RegistryEntry>> {
            Ok(self.rows.clone())
        }
    }

    fn row(id: &str, title: &str) -> RegistryEntry {
        RegistryEntry {
            id: BlockRef::new(id),
            title: title.to_string(),
        }
    }

    #[test]
    fn scan_keeps_marked_titles_only() {
        let registry = FixedRegistry {
            rows: vec![
                row("p1", "[ops] Ops Project"),
                row("p2", "Unmarked notes page"),
                row("p3", "[web] Website"),
            ],
        };

        let directory =
            ProjectDirectory::scan(&registry, &BlockRef::new("registry")).expect("scan succeeds");
        assert_eq!(directory.len(), 2);
        let ops = directory.resolve("ops").expect("ops resolves");
        assert_eq!(ops.name, "[ops] Ops Project");
        assert_eq!(ops.display_name(), "Ops Project");
        assert_eq!(ops.destination, BlockRef::new("p1"));
        assert!(directory.resolve("notes").is_none());
    }

    #[test]
    fn duplicate_prefix_is_first_registration_wins() {
        let registry = FixedRegistry {
            rows: vec![row("first", "[ops] Original"), row("second", "[ops] Imposter")],
        };

        let directory =
            ProjectDirectory::scan(&registry, &BlockRef::new("registry")).expect("scan succeeds");
        assert_eq!(directory.len(), 1);
        let ops = directory.resolve("ops").expect("ops resolves");
        assert_eq!(ops.destination, BlockRef::new("first"));
    }

    #[test]
    fn resolution_is_case_sensitive() {
        let registry = FixedRegistry {
            rows: vec![row("p1", "[Ops] Capitalized")],
        };

        let directory =
            ProjectDirectory::scan(&registry, &BlockRef::new("registry")).expect("scan succeeds");
        assert!(directory.resolve("Ops").is_some());
        assert!(directory.resolve("ops").is_none());
    }
}
