use rocksdb::{Direction, IteratorMode, Options, DB};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::{Database, Result, StorageError};

pub struct RocksDatabase {
    db: Arc<DB>,
}

impl RocksDatabase {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        opts.set_bytes_per_sync(1024 * 1024);

        let db = DB::open(&opts, path.as_ref()).map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        info!(path = %path.as_ref().display(), "Opened RocksDB database");

        Ok(Self { db: Arc::new(db) })
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush().map_err(|e| StorageError::DatabaseError(e.to_string()))
    }
}

impl Database for RocksDatabase {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.db.get(key).map_err(|e| StorageError::DatabaseError(e.to_string()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db.put(key, value).map_err(|e| StorageError::DatabaseError(e.to_string()))
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.db.delete(key).map_err(|e| StorageError::DatabaseError(e.to_string()))
    }

    fn keys_with_prefix(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>> {
        let mut keys = Vec::new();
        for item in self.db.iterator(IteratorMode::From(prefix, Direction::Forward)) {
            let (key, _) = item.map_err(|e| StorageError::DatabaseError(e.to_string()))?;
            if !key.starts_with(prefix) {
                break;
            }
            keys.push(key.to_vec());
        }
        Ok(keys)
    }
}
