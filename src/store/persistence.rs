use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};

use crate::models::apartment::{ApartmentRecord, RecordId};

pub const DEFAULT_STORAGE_KEY: &str = "la-apt-calculator-data";

/// External key-value storage holding serialized blobs.
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, blob: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_entry(mut self, key: &str, blob: &str) -> MemoryStore {
        self.entries.insert(key.to_string(), blob.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<()> {
        self.entries.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Key-value pairs kept as one JSON object in a file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> FileStore {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            warn!("Overwriting unreadable storage file: {:?}", err);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), blob.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        // Write then rename so a failed save never truncates the previous contents.
        let tmp_path = self.path.with_extension("tmp");
        let json = serde_json::to_vec_pretty(&entries)?;
        fs::write(&tmp_path, json)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

pub fn encode_records(records: &[ApartmentRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parses a stored list. Empty lists and repeated ids are rejected.
pub fn decode_records(blob: &str) -> Result<Vec<ApartmentRecord>> {
    let records: Vec<ApartmentRecord> =
        serde_json::from_str(blob).context("stored record list is malformed")?;
    if records.is_empty() {
        bail!("stored record list is empty");
    }

    let mut ids: HashSet<RecordId> = HashSet::new();
    if let Some(duplicate) = records.iter().find(|r| !ids.insert(r.id())) {
        return Err(anyhow!("stored record list repeats id {}", duplicate.id()));
    }
    Ok(records)
}

/// Loads the saved list, or a single blank record when nothing usable is stored.
pub fn load_records(store: &impl KeyValueStore, key: &str) -> Vec<ApartmentRecord> {
    let loaded = store
        .load(key)
        .and_then(|blob| blob.map(|b| decode_records(&b)).transpose());

    match loaded {
        Ok(Some(records)) => {
            info!("Loaded {} records from '{}'", records.len(), key);
            records
        }
        Ok(None) => {
            info!("Nothing stored under '{}', starting fresh", key);
            vec![ApartmentRecord::blank(RecordId::generate())]
        }
        Err(err) => {
            warn!("Discarding stored records under '{}': {:?}", key, err);
            vec![ApartmentRecord::blank(RecordId::generate())]
        }
    }
}

/// Best-effort save. Failures are logged and reported as `false`, never raised.
pub fn save_records(
    store: &mut impl KeyValueStore,
    key: &str,
    records: &[ApartmentRecord],
) -> bool {
    match encode_records(records).and_then(|blob| store.save(key, &blob)) {
        Ok(()) => {
            debug!("Saved {} records under '{}'", records.len(), key);
            true
        }
        Err(err) => {
            warn!("Failed to save records under '{}': {:?}", key, err);
            false
        }
    }
}
