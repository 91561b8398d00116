use crate::{
    config::Config,
    models::apartment::{ApartmentRecord, RecordId},
    store::{
        persistence::{load_records, save_records, KeyValueStore},
        records::{RecordStore, UpdateOutcome},
    },
};

use super::comparison::Overview;

/// The record store wired to its persistence backend: loaded once on open, saved after
/// every change.
pub struct Workspace<S: KeyValueStore> {
    store: RecordStore,
    backend: S,
    key: String,
}

impl<S: KeyValueStore> Workspace<S> {
    pub fn open(backend: S, key: impl Into<String>) -> Workspace<S> {
        let key = key.into();
        let store = RecordStore::from_records(load_records(&backend, &key));
        Workspace {
            store,
            backend,
            key,
        }
    }

    pub fn open_with_config(backend: S, config: &Config) -> Workspace<S> {
        let mut workspace = Workspace::open(backend, config.storage_key());
        workspace.store = workspace
            .store
            .with_auto_insert_blank(config.auto_insert_blank());
        workspace
    }

    pub fn records(&self) -> &[ApartmentRecord] {
        self.store.records()
    }

    pub fn get(&self, id: RecordId) -> Option<&ApartmentRecord> {
        self.store.get(id)
    }

    pub fn overview(&self) -> Overview<'_> {
        Overview::build(self.store.records())
    }

    pub fn add(&mut self) -> RecordId {
        let id = self.store.create().id();
        self.persist();
        id
    }

    pub fn update(
        &mut self,
        id: RecordId,
        field_key: &str,
        value: impl Into<String>,
    ) -> UpdateOutcome {
        let outcome = self.store.update(id, field_key, value);
        if outcome == UpdateOutcome::Applied {
            self.persist();
        }
        outcome
    }

    pub fn remove(&mut self, id: RecordId) -> bool {
        let removed = self.store.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.store.reset();
        self.persist();
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn persist(&mut self) {
        // A failed save is already logged and must not disturb the session.
        let _ = save_records(&mut self.backend, &self.key, self.store.records());
    }
}
