//! In-memory unit registry
//!
//! Holds the most recent snapshot of units reported by the service manager.
//! The snapshot is replaced wholesale on every successful refresh; records
//! are never patched field-by-field, so a reader can never observe a mix of
//! stale and fresh state for one unit.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One service-manager unit as reported by `systemctl list-units`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Unique unit name (e.g. "sshd.service")
    pub name: String,
    /// Load state ("loaded", "not-found", "masked", ...)
    pub load_state: String,
    /// High-level activation state ("active", "inactive", "failed", ...)
    pub active_state: String,
    /// Low-level state ("running", "dead", "exited", ...)
    pub sub_state: String,
    /// Free-text description from the unit file
    pub description: String,
}

impl UnitRecord {
    /// Whether the unit is currently active (used for list styling and
    /// the CLI status column).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active_state == "active"
    }

    /// Whether the unit is in a failed state.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.active_state == "failed"
    }
}

/// Ordered mapping from unit name to unit record.
///
/// Ordering is the manager-reported order, which keeps scroll behavior
/// deterministic across refreshes. Created empty at session start and
/// replaced in full by [`UnitRegistry::replace`]; nothing else mutates it.
#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: Vec<UnitRecord>,
    index: HashMap<String, usize>,
    version: u64,
}

impl UnitRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a fresh snapshot, replacing every held record.
    ///
    /// Duplicate names keep the first occurrence's index entry; the record
    /// list itself is stored exactly as reported.
    pub fn replace(&mut self, new_units: Vec<UnitRecord>) {
        let mut index = HashMap::with_capacity(new_units.len());
        for (i, unit) in new_units.iter().enumerate() {
            index.entry(unit.name.clone()).or_insert(i);
        }
        self.units = new_units;
        self.index = index;
        self.version = self.version.wrapping_add(1);
    }

    /// Look up a single unit by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnitRecord> {
        self.index.get(name).map(|&i| &self.units[i])
    }

    /// All units in manager-reported order.
    #[must_use]
    pub fn all(&self) -> &[UnitRecord] {
        &self.units
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Snapshot version, bumped on every replace. Consumers holding a
    /// derived view compare versions to decide whether to recompute.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::unit;
    use pretty_assertions::assert_eq;

    #[test]
    fn replace_swaps_snapshot_wholesale() {
        let mut registry = UnitRegistry::new();
        registry.replace(vec![
            unit("a.service", "active", "running"),
            unit("b.service", "inactive", "dead"),
        ]);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("a.service").is_some());

        // A refresh that drops a unit must not leave any trace of it behind
        registry.replace(vec![unit("b.service", "active", "running")]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("a.service").is_none());
        assert_eq!(
            registry.get("b.service").map(|u| u.active_state.as_str()),
            Some("active")
        );
    }

    #[test]
    fn replace_preserves_manager_order() {
        let mut registry = UnitRegistry::new();
        registry.replace(vec![
            unit("zeta.service", "active", "running"),
            unit("alpha.service", "inactive", "dead"),
            unit("mid.service", "active", "running"),
        ]);
        let names: Vec<&str> = registry.all().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["zeta.service", "alpha.service", "mid.service"]);
    }

    #[test]
    fn version_bumps_on_every_replace() {
        let mut registry = UnitRegistry::new();
        let v0 = registry.version();
        registry.replace(Vec::new());
        assert_ne!(registry.version(), v0);
        let v1 = registry.version();
        registry.replace(vec![unit("a.service", "active", "running")]);
        assert_ne!(registry.version(), v1);
    }

    #[test]
    fn get_returns_none_for_unknown_name() {
        let registry = UnitRegistry::new();
        assert!(registry.get("nope.service").is_none());
    }

    #[test]
    fn duplicate_names_resolve_to_first_occurrence() {
        let mut registry = UnitRegistry::new();
        let mut second = unit("dup.service", "inactive", "dead");
        second.description = "second".to_string();
        registry.replace(vec![unit("dup.service", "active", "running"), second]);
        assert_eq!(
            registry.get("dup.service").map(|u| u.active_state.as_str()),
            Some("active")
        );
    }
}
