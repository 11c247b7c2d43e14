//! Per-cell optimization toggles.

use std::collections::HashMap;

use netpulse_common::models::{CellKey, OptimizationFlag, OptimizationFlags};

/// Maps each cell to its active remediation toggles.
///
/// A cell gets an entry on its first toggle; absence means both flags off.
/// Entries are never removed.
#[derive(Debug, Default)]
pub struct OptimizationStore {
    flags: HashMap<CellKey, OptimizationFlags>,
}

impl OptimizationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CellKey) -> OptimizationFlags {
        self.flags.get(key).copied().unwrap_or_default()
    }

    /// Flip one flag on `key` and return the resulting pair.
    pub fn toggle(&mut self, key: &CellKey, flag: OptimizationFlag) -> OptimizationFlags {
        let entry = self.flags.entry(key.clone()).or_default();
        entry.toggle(flag);
        *entry
    }

    /// Number of cells that have been toggled at least once.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_reads_as_all_off() {
        let store = OptimizationStore::new();
        assert_eq!(
            store.get(&CellKey::new("Facebook", "APAC")),
            OptimizationFlags {
                hardware_acceleration: false,
                qos_optimization: false,
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn first_toggle_creates_entry_with_only_that_flag() {
        let mut store = OptimizationStore::new();
        let key = CellKey::new("Workplace", "EU-West");
        let flags = store.toggle(&key, OptimizationFlag::HardwareAcceleration);
        assert!(flags.hardware_acceleration);
        assert!(!flags.qos_optimization);
        assert_eq!(store.get(&key), flags);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn double_toggle_restores_original() {
        let mut store = OptimizationStore::new();
        let key = CellKey::new("Messenger", "NA-West");
        store.toggle(&key, OptimizationFlag::QosOptimization);
        let before = store.get(&key);
        store.toggle(&key, OptimizationFlag::HardwareAcceleration);
        let after = store.toggle(&key, OptimizationFlag::HardwareAcceleration);
        assert_eq!(after, before);
    }

    #[test]
    fn toggles_are_per_cell() {
        let mut store = OptimizationStore::new();
        let a = CellKey::new("Instagram", "APAC");
        let b = CellKey::new("Instagram", "LATAM");
        store.toggle(&a, OptimizationFlag::QosOptimization);
        assert_eq!(store.get(&b), OptimizationFlags::default());
    }
}
