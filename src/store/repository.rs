//! Repository abstraction
//!
//! One repository per record kind. Ids are assigned on `add` from an
//! auto-increment counter; explicit ids (like the reserved Quick Todo
//! project) go through `put`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{StoreError, StoreResult};

pub type RecordId = i64;

/// A stored row
pub trait Record: Clone {
    /// Table name for errors and logs
    const TABLE: &'static str;

    fn id(&self) -> Option<RecordId>;
    fn set_id(&mut self, id: RecordId);
}

/// CRUD over one record kind
pub trait Repository<T: Record> {
    /// All records in id order
    fn list(&self) -> Vec<T>;
    fn get(&self, id: RecordId) -> Option<T>;
    /// Insert with a fresh id; returns that id
    fn add(&mut self, record: T) -> StoreResult<RecordId>;
    /// Insert or replace at the record's own id
    fn put(&mut self, record: T) -> StoreResult<RecordId>;
    /// Apply `change` to the stored record
    fn update(&mut self, id: RecordId, change: &mut dyn FnMut(&mut T)) -> StoreResult<()>;
    fn delete(&mut self, id: RecordId) -> StoreResult<T>;
}

/// In-memory repository, serializable as a whole for local storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: DeserializeOwned"))]
pub struct MemoryRepository<T> {
    rows: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate without cloning
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Store `record` under an explicit `id`, replacing any existing row
    pub fn insert_at(&mut self, id: RecordId, mut record: T) -> RecordId {
        record.set_id(id);
        if id >= self.next_id {
            self.next_id = id + 1;
        }
        self.rows.insert(id, record);
        id
    }

    /// Remove every record matching `pred`; returns how many went
    pub fn delete_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !pred(row));
        before - self.rows.len()
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: RecordId) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn add(&mut self, mut record: T) -> StoreResult<RecordId> {
        if let Some(id) = record.id() {
            return Err(StoreError::AlreadyStored(id));
        }
        let id = self.next_id;
        self.next_id += 1;
        record.set_id(id);
        self.rows.insert(id, record);
        log::debug!("{}: added #{}", T::TABLE, id);
        Ok(id)
    }

    fn put(&mut self, record: T) -> StoreResult<RecordId> {
        match record.id() {
            Some(id) => Ok(self.insert_at(id, record)),
            None => self.add(record),
        }
    }

    fn update(&mut self, id: RecordId, change: &mut dyn FnMut(&mut T)) -> StoreResult<()> {
        let row = self.rows.get_mut(&id).ok_or(StoreError::NotFound {
            table: T::TABLE,
            id,
        })?;
        change(row);
        row.set_id(id);
        Ok(())
    }

    fn delete(&mut self, id: RecordId) -> StoreResult<T> {
        self.rows.remove(&id).ok_or(StoreError::NotFound {
            table: T::TABLE,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Option<RecordId>,
        body: String,
    }

    impl Record for Note {
        const TABLE: &'static str = "notes";
        fn id(&self) -> Option<RecordId> {
            self.id
        }
        fn set_id(&mut self, id: RecordId) {
            self.id = Some(id);
        }
    }

    fn note(body: &str) -> Note {
        Note {
            id: None,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut repo = MemoryRepository::new();
        assert_eq!(repo.add(note("a")).unwrap(), 1);
        assert_eq!(repo.add(note("b")).unwrap(), 2);
        assert_eq!(repo.get(2).unwrap().body, "b");
        assert_eq!(repo.list().len(), 2);
    }

    #[test]
    fn test_add_rejects_stored_record() {
        let mut repo = MemoryRepository::new();
        let id = repo.add(note("a")).unwrap();
        let stored = repo.get(id).unwrap();
        assert!(matches!(repo.add(stored), Err(StoreError::AlreadyStored(1))));
    }

    #[test]
    fn test_put_negative_id_keeps_counter() {
        let mut repo = MemoryRepository::new();
        repo.put(Note {
            id: Some(-1),
            body: "reserved".into(),
        })
        .unwrap();
        assert_eq!(repo.add(note("a")).unwrap(), 1);
        assert_eq!(repo.list()[0].id, Some(-1));
    }

    #[test]
    fn test_insert_at_sets_id_and_counter() {
        let mut repo = MemoryRepository::new();
        assert_eq!(repo.insert_at(7, note("seven")), 7);
        let stored = repo.get(7).unwrap();
        assert_eq!(stored.id, Some(7));
        assert_eq!(repo.add(note("next")).unwrap(), 8);

        // Replaces the existing row
        repo.insert_at(7, note("again"));
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get(7).unwrap().body, "again");
    }

    #[test]
    fn test_update_and_missing() {
        let mut repo = MemoryRepository::new();
        let id = repo.add(note("a")).unwrap();
        repo.update(id, &mut |n: &mut Note| n.body = "z".into()).unwrap();
        assert_eq!(repo.get(id).unwrap().body, "z");

        let err = repo.update(99, &mut |_: &mut Note| {}).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { table: "notes", id: 99 }));
        assert!(repo.delete(99).is_err());
    }

    #[test]
    fn test_delete_where() {
        let mut repo = MemoryRepository::new();
        for body in ["keep", "drop", "drop"] {
            repo.add(note(body)).unwrap();
        }
        assert_eq!(repo.delete_where(|n| n.body == "drop"), 2);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_snapshot_keeps_counter() {
        let mut repo = MemoryRepository::new();
        repo.add(note("a")).unwrap();
        repo.add(note("b")).unwrap();
        repo.delete(2).unwrap();

        let json = serde_json::to_string(&repo).unwrap();
        let mut restored: MemoryRepository<Note> = serde_json::from_str(&json).unwrap();
        // Deleted ids are not reused
        assert_eq!(restored.add(note("c")).unwrap(), 3);
    }
}
