//! Application registry.
//!
//! # Responsibilities
//! - Map each application name to exactly one datastore descriptor
//! - Replace descriptors wholesale on re-registration (no stale fields)
//! - Distinguish "never registered" from "registered but unconnected"
//!
//! # Design Decisions
//! - Backed by a concurrent map: registration may be parallelized to hide
//!   slow connection establishment, and request handlers read entries while
//!   later applications are still registering

use dashmap::DashMap;
use thiserror::Error;

use crate::datastore::descriptor::DatastoreDescriptor;

/// Lookup of an application that was never registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("application '{app}' is not registered")]
pub struct AppNotRegistered {
    pub app: String,
}

/// Application-name-keyed store of datastore descriptors.
#[derive(Debug, Default)]
pub struct Registry {
    entries: DashMap<String, DatastoreDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the descriptor for `app`, replacing any previous entry
    /// entirely. Fields and connection handle never carry over.
    pub fn insert(&self, app: &str, descriptor: DatastoreDescriptor) {
        self.entries.insert(app.to_string(), descriptor);
    }

    /// Fetch a copy of the descriptor for `app`.
    pub fn get(&self, app: &str) -> Result<DatastoreDescriptor, AppNotRegistered> {
        self.entries
            .get(app)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppNotRegistered {
                app: app.to_string(),
            })
    }

    /// True when `app` has a registered descriptor.
    pub fn contains(&self, app: &str) -> bool {
        self.entries.contains_key(app)
    }

    /// Names of all registered applications.
    pub fn apps(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
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
    use super::*;

    fn descriptor(driver: &str, path: Option<&str>) -> DatastoreDescriptor {
        let mut d = DatastoreDescriptor::default();
        d.driver = Some(driver.to_string());
        d.path = path.map(str::to_owned);
        d
    }

    #[test]
    fn test_unregistered_lookup() {
        let registry = Registry::new();
        let err = registry.get("shop").unwrap_err();
        assert_eq!(err.app, "shop");
    }

    #[test]
    fn test_insert_and_get() {
        let registry = Registry::new();
        registry.insert("shop", descriptor("sqlite3", Some("shop.db")));
        let d = registry.get("shop").unwrap();
        assert_eq!(d.driver.as_deref(), Some("sqlite3"));
        assert!(registry.contains("shop"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reinsert_replaces_all_fields() {
        let registry = Registry::new();
        let mut first = descriptor("sqlite3", Some("old.db"));
        first.server = Some("db.internal".into());
        registry.insert("shop", first);

        // second registration omits server and path; neither may survive
        registry.insert("shop", descriptor("sqlite3", None));
        let d = registry.get("shop").unwrap();
        assert_eq!(d.server, None);
        assert_eq!(d.path, None);
        assert_eq!(registry.len(), 1);
    }
}
