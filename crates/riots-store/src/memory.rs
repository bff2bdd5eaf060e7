use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, HashSet},
};

use crate::{
    error::{StoreError, StoreResult},
    traits::{CacheInvalidator, ObjectStore, PutOptions},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub options: PutOptions,
}

/// In-process [`ObjectStore`] that records every write.
#[derive(Default)]
pub struct MemoryStore {
    objects: RefCell<BTreeMap<String, StoredObject>>,
    failing_lookups: RefCell<HashSet<String>>,
    puts: Cell<usize>,
    lookups: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every existence check of `key` fail as if the backend were unreachable.
    pub fn fail_lookup(&self, key: impl Into<String>) {
        self.failing_lookups.borrow_mut().insert(key.into());
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.borrow().keys().cloned().collect()
    }

    /// Number of successful `put` calls so far.
    pub fn put_count(&self) -> usize {
        self.puts.get()
    }

    /// Number of `exists` calls so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.get()
    }
}

impl ObjectStore for MemoryStore {
    fn exists(&self, key: &str) -> StoreResult<bool> {
        self.lookups.set(self.lookups.get() + 1);
        if self.failing_lookups.borrow().contains(key) {
            return Err(StoreError::Lookup {
                key: key.to_string(),
                message: "simulated outage".to_string(),
            });
        }
        Ok(self.objects.borrow().contains_key(key))
    }

    fn put(&self, key: &str, body: Vec<u8>, options: &PutOptions) -> StoreResult<()> {
        self.objects.borrow_mut().insert(
            key.to_string(),
            StoredObject {
                body,
                options: options.clone(),
            },
        );
        self.puts.set(self.puts.get() + 1);
        Ok(())
    }
}

/// In-process [`CacheInvalidator`] that records each request.
#[derive(Default)]
pub struct MemoryInvalidator {
    requests: RefCell<Vec<(Vec<String>, String)>>,
}

impl MemoryInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(paths, caller_reference)` pairs, oldest first.
    pub fn requests(&self) -> Vec<(Vec<String>, String)> {
        self.requests.borrow().clone()
    }
}

impl CacheInvalidator for MemoryInvalidator {
    fn invalidate(&self, paths: &[String], caller_reference: &str) -> StoreResult<String> {
        let mut requests = self.requests.borrow_mut();
        requests.push((paths.to_vec(), caller_reference.to_string()));
        Ok(format!("I{}", requests.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_exists() {
        let store = MemoryStore::new();
        assert!(!store.exists("1.0.0/").unwrap());

        store
            .put("1.0.0/index.html", b"<html>".to_vec(), &PutOptions::public("text/html"))
            .unwrap();

        assert!(store.exists("1.0.0/index.html").unwrap());
        assert!(!store.exists("1.0.0/").unwrap());
        assert_eq!(store.put_count(), 1);
        assert_eq!(store.lookup_count(), 3);

        let object = store.get("1.0.0/index.html").unwrap();
        assert_eq!(object.options.content_type.as_deref(), Some("text/html"));
        assert!(object.options.public_read);
    }

    #[test]
    fn test_fail_lookup() {
        let store = MemoryStore::new();
        store.fail_lookup("1.0.0/");
        assert!(matches!(
            store.exists("1.0.0/"),
            Err(StoreError::Lookup { .. })
        ));
        assert!(!store.exists("1.1.0/").unwrap());
    }

    #[test]
    fn test_memory_invalidator_records_requests() {
        let cdn = MemoryInvalidator::new();
        let paths = vec!["/".to_string(), "/index.html".to_string()];
        assert_eq!(cdn.invalidate(&paths, "ref-1").unwrap(), "I1");
        assert_eq!(cdn.invalidate(&paths, "ref-2").unwrap(), "I2");
        assert_eq!(cdn.requests()[1], (paths, "ref-2".to_string()));
    }
}
