use std::collections::HashSet;

use log::{debug, warn};

use crate::models::{
    apartment::{ApartmentRecord, RecordId},
    categories::FieldKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// The id is not (or no longer) in the store.
    MissingRecord,
    /// The key is outside every known field set. Nothing was changed.
    UnknownField,
}

/// Owns the ordered list of apartment records. Readers only ever get shared borrows.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<ApartmentRecord>,
    auto_insert_blank: bool,
}

impl RecordStore {
    /// A store holding one blank record.
    pub fn new() -> RecordStore {
        RecordStore {
            records: vec![ApartmentRecord::blank(RecordId::generate())],
            auto_insert_blank: true,
        }
    }

    /// Builds a store from loaded records. Later duplicates of an id are dropped and an
    /// empty list becomes one blank record.
    pub fn from_records(records: Vec<ApartmentRecord>) -> RecordStore {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert(record.id()) {
                unique.push(record);
            } else {
                warn!("Dropping record with duplicate id {}", record.id());
            }
        }

        let mut store = RecordStore {
            records: unique,
            auto_insert_blank: true,
        };
        if store.records.is_empty() {
            store.push_blank();
        }
        store
    }

    /// Whether removing the last record leaves a fresh blank one behind.
    pub fn with_auto_insert_blank(mut self, auto_insert_blank: bool) -> RecordStore {
        self.auto_insert_blank = auto_insert_blank;
        self
    }

    pub fn records(&self) -> &[ApartmentRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&ApartmentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a blank record with a fresh id.
    pub fn create(&mut self) -> &ApartmentRecord {
        self.push_blank()
    }

    /// Sets one field, routing the raw key to costs, move-in fees or metadata.
    pub fn update(
        &mut self,
        id: RecordId,
        field_key: &str,
        value: impl Into<String>,
    ) -> UpdateOutcome {
        match field_key.parse::<FieldKey>() {
            Ok(key) => self.update_field(id, key, value),
            Err(err) => {
                warn!("Ignoring update of record {}: {}", id, err);
                UpdateOutcome::UnknownField
            }
        }
    }

    pub fn update_field(
        &mut self,
        id: RecordId,
        key: FieldKey,
        value: impl Into<String>,
    ) -> UpdateOutcome {
        match self.records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                record.set_field(key, value);
                debug!("Updated '{}' on record {}", key.key(), id);
                UpdateOutcome::Applied
            }
            None => {
                debug!("Update of '{}' on missing record {}", key.key(), id);
                UpdateOutcome::MissingRecord
            }
        }
    }

    /// Deletes one record. Returns false when the id is unknown.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            debug!("Remove of missing record {}", id);
            return false;
        }

        debug!("Removed record {}", id);
        if self.records.is_empty() && self.auto_insert_blank {
            self.push_blank();
        }
        true
    }

    /// Drops every record and starts over with a single blank one.
    pub fn reset(&mut self) {
        self.records.clear();
        self.push_blank();
        debug!("Store reset");
    }

    fn push_blank(&mut self) -> &ApartmentRecord {
        let id = self.fresh_id();
        self.records.push(ApartmentRecord::blank(id));
        &self.records[self.records.len() - 1]
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = RecordId::generate();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        RecordStore::new()
    }
}
