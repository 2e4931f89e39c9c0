use crate::{Database, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// In-memory database implementation using BTreeMap
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    data: Arc<RwLock<BTreeMap<Vec<u8>, Vec<u8>>>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl Database for MemoryDatabase {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.data.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
        let data = self.data.read();
        Ok(data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_database_basic() {
        let db = MemoryDatabase::new();

        db.put(b"key1", b"value1").unwrap();
        assert_eq!(db.get(b"key1").unwrap(), Some(b"value1".to_vec()));

        db.put(b"key1", b"value2").unwrap();
        assert_eq!(db.get(b"key1").unwrap(), Some(b"value2".to_vec()));

        db.delete(b"key1").unwrap();
        assert_eq!(db.get(b"key1").unwrap(), None);
        assert!(db.is_empty());
    }

    #[test]
    fn test_keys_with_prefix() {
        let db = MemoryDatabase::new();

        db.put(b"prefix1", b"1").unwrap();
        db.put(b"prefix2", b"2").unwrap();
        db.put(b"other", b"3").unwrap();
        db.put(b"prefix3", b"4").unwrap();
        db.put(b"q", b"5").unwrap();

        let keys = db.keys_with_prefix(b"prefix").unwrap();
        assert_eq!(keys, vec![b"prefix1".to_vec(), b"prefix2".to_vec(), b"prefix3".to_vec()]);
        assert_eq!(db.len(), 5);
    }

    #[test]
    fn test_clones_share_state() {
        let db = MemoryDatabase::new();
        let other = db.clone();

        db.put(b"key", b"value").unwrap();
        assert!(other.contains(b"key").unwrap());

        other.clear();
        assert!(!db.contains(b"key").unwrap());
    }
}
