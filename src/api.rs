//! REST API client registry: resource collections, models, and add
//! observers.
//!
//! The registry stands in for the generic resource-API client subsystem the
//! preview session cooperates with. It serves two purposes here:
//!
//! - a readiness signal: a session refuses to attach until at least one
//!   collection and one model are registered ([`RestApiRegistry::is_initialized`]),
//!   checked once at construction and never polled afterwards;
//! - new-item observation: collections expose an explicit
//!   [`ResourceCollection::on_add`] subscription instead of requiring
//!   callers to patch shared constructors.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Callback type for new-item notification.
///
/// Called with the added model after it has been stored in the collection.
pub type AddCallback = Arc<dyn Fn(&Value) + Send + Sync>;

/// A named collection of resource models.
///
/// Observers registered through [`on_add`](Self::on_add) are notified in
/// registration order each time a model is added.
pub struct ResourceCollection {
    name: String,
    items: RwLock<Vec<Value>>,
    observers: RwLock<Vec<AddCallback>>,
}

impl std::fmt::Debug for ResourceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCollection")
            .field("name", &self.name)
            .field("items", &self.items.read().len())
            .field("observers", &self.observers.read().len())
            .finish()
    }
}

impl ResourceCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: RwLock::new(Vec::new()),
            observers: RwLock::new(Vec::new()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribe to new-item events.
    pub fn on_add<F>(&self, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.observers.write().push(Arc::new(callback));
    }

    /// Add a model to the collection and notify observers.
    ///
    /// Observers run on the calling thread, outside the collection lock, so
    /// a callback may read the collection it observes.
    pub fn add(&self, model: Value) {
        self.items.write().push(model.clone());
        let observers: Vec<AddCallback> = self.observers.read().clone();
        for observer in observers {
            observer(&model);
        }
    }

    pub fn items(&self) -> Vec<Value> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

/// Registry of resource collections and model kinds.
#[derive(Debug, Default)]
pub struct RestApiRegistry {
    collections: RwLock<BTreeMap<String, Arc<ResourceCollection>>>,
    models: RwLock<BTreeSet<String>>,
}

impl RestApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection, creating it if needed, and return a handle.
    pub fn register_collection(&self, name: impl Into<String>) -> Arc<ResourceCollection> {
        let name = name.into();
        self.collections
            .write()
            .entry(name.clone())
            .or_insert_with(|| Arc::new(ResourceCollection::new(name)))
            .clone()
    }

    /// Register a model kind by name.
    pub fn register_model(&self, name: impl Into<String>) {
        self.models.write().insert(name.into());
    }

    pub fn collection(&self, name: &str) -> Option<Arc<ResourceCollection>> {
        self.collections.read().get(name).cloned()
    }

    /// All registered collections, in name order.
    pub fn collections(&self) -> Vec<Arc<ResourceCollection>> {
        self.collections.read().values().cloned().collect()
    }

    /// Whether the API subsystem has finished registering its schema.
    ///
    /// True once at least one collection and one model exist. A session
    /// checks this once at attach time; attaching against an empty registry
    /// is a configuration error.
    pub fn is_initialized(&self) -> bool {
        !self.collections.read().is_empty() && !self.models.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    #[test]
    fn test_registry_readiness() {
        let api = RestApiRegistry::new();
        assert!(!api.is_initialized());

        api.register_collection("posts");
        assert!(!api.is_initialized());

        api.register_model("post");
        assert!(api.is_initialized());
    }

    #[test]
    fn test_register_collection_is_idempotent() {
        let api = RestApiRegistry::new();
        let first = api.register_collection("posts");
        let second = api.register_collection("posts");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(api.collections().len(), 1);
    }

    #[test]
    fn test_on_add_observers_run_in_registration_order() {
        let collection = ResourceCollection::new("posts");
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            collection.on_add(move |model| {
                seen.lock().push((tag, model.clone()));
            });
        }

        collection.add(json!({"id": 7}));
        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("first", json!({"id": 7})));
        assert_eq!(seen[1], ("second", json!({"id": 7})));
    }

    #[test]
    fn test_observer_may_read_collection() {
        let collection = Arc::new(ResourceCollection::new("posts"));
        let inner = collection.clone();
        let observed_len = Arc::new(Mutex::new(0));
        let observed = observed_len.clone();
        collection.on_add(move |_| {
            *observed.lock() = inner.len();
        });

        collection.add(json!({"id": 1}));
        assert_eq!(*observed_len.lock(), 1);
    }
}
