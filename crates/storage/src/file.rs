//! A small durable backend: the whole key space is kept in memory and
//! rewritten to a JSON file after every mutation.

use crate::{Database, Result, StorageError};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type Snapshot = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileDatabase {
    path: PathBuf,
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl FileDatabase {
    /// Open the database at `path`, creating an empty one if the file does not exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let snapshot: Snapshot = serde_json::from_reader(reader)
                .map_err(|e| StorageError::SerializationError(e.to_string()))?;
            decode_snapshot(snapshot)?
        } else {
            BTreeMap::new()
        };

        info!(path = %path.display(), entries = data.len(), "Opened file database");
        Ok(Self { path, data: RwLock::new(data) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<()> {
        let temp_path = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let snapshot: Snapshot = data
            .iter()
            .map(|(k, v)| (hex::encode(k), hex::encode(v)))
            .collect();

        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        fs::rename(&temp_path, &self.path)?;
        debug!(path = %self.path.display(), entries = data.len(), "Persisted file database");
        Ok(())
    }
}

fn decode_snapshot(snapshot: Snapshot) -> Result<BTreeMap<Vec<u8>, Vec<u8>>> {
    snapshot
        .into_iter()
        .map(|(k, v)| {
            let key = hex::decode(&k).map_err(|e| StorageError::InvalidData(format!("key {}: {}", k, e)))?;
            let value = hex::decode(&v).map_err(|e| StorageError::InvalidData(format!("value of {}: {}", k, e)))?;
            Ok((key, value))
        })
        .collect()
}

impl Database for FileDatabase {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    // The write lock is held across the file rewrite so snapshots land in mutation order.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut data = self.data.write();
        let previous = data.insert(key.to_vec(), value.to_vec());
        if let Err(e) = self.persist(&data) {
            match previous {
                Some(v) => data.insert(key.to_vec(), v),
                None => data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        let mut data = self.data.write();
        if let Some(previous) = data.remove(key) {
            if let Err(e) = self.persist(&data) {
                data.insert(key.to_vec(), previous);
                return Err(e);
            }
        }
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
