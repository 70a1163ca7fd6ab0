//! Live setting registry for the preview session.
//!
//! A preview session holds setting edits in memory before they are ever
//! persisted server-side. The [`SettingRegistry`] trait is the read-only
//! iteration surface the snapshot code consumes; [`CustomizeSettings`] is
//! the in-memory implementation applications register their settings with.
//!
//! Iteration order is the lexicographic order of setting ids, so two
//! snapshots of the same state encode identically.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;

/// Read-only access to the live settings of a customization session.
///
/// Implementations are externally owned; the interception layer only ever
/// reads through this trait and never caches what it sees, since setting
/// values can change between any two requests.
pub trait SettingRegistry: Send + Sync {
    /// Visit every registered setting, in id order, with its current
    /// in-memory value.
    fn each(&self, visit: &mut dyn FnMut(&str, &Value));

    /// Current in-memory value of a single setting.
    fn get(&self, id: &str) -> Option<Value>;
}

/// In-memory setting registry.
///
/// `set` replaces the live value, so any snapshot taken afterwards observes
/// the edit. Values are arbitrary JSON.
#[derive(Debug, Default)]
pub struct CustomizeSettings {
    values: RwLock<BTreeMap<String, Value>>,
}

impl CustomizeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the live value of a setting.
    pub fn set(&self, id: impl Into<String>, value: Value) {
        self.values.write().insert(id.into(), value);
    }

    /// Remove a setting, returning its last live value.
    pub fn remove(&self, id: &str) -> Option<Value> {
        self.values.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl SettingRegistry for CustomizeSettings {
    fn each(&self, visit: &mut dyn FnMut(&str, &Value)) {
        for (id, value) in self.values.read().iter() {
            visit(id, value);
        }
    }

    fn get(&self, id: &str) -> Option<Value> {
        self.values.read().get(id).cloned()
    }
}
