//! Record store contracts and adapters for the published-app table.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use catalog_contract::{AppRecord, AppRecordPatch, NewAppRecord};

use crate::time::next_monotonic_timestamp_ms;

/// Object-safe boxed future used by [`RecordStore`] async methods.
pub type RecordStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for the published-app record table.
///
/// Reads are anonymous; inserts, updates, and deletes require an active
/// signed-in session and are rejected by the backend otherwise.
pub trait RecordStore {
    /// Lists every record ordered newest-first by creation time.
    fn list_records<'a>(&'a self) -> RecordStoreFuture<'a, Result<Vec<AppRecord>, String>>;

    /// Inserts one record and returns the stored row with its assigned
    /// identifier and creation timestamp.
    fn insert_record<'a>(
        &'a self,
        record: &'a NewAppRecord,
    ) -> RecordStoreFuture<'a, Result<AppRecord, String>>;

    /// Applies a patch to the record with `id`.
    ///
    /// Returns `Ok(None)` when no row matches, mirroring a filtered update
    /// that affected zero rows; a record deleted elsewhere is not an error.
    fn update_record<'a>(
        &'a self,
        id: &'a str,
        patch: &'a AppRecordPatch,
    ) -> RecordStoreFuture<'a, Result<Option<AppRecord>, String>>;

    /// Deletes the record with `id`.
    ///
    /// Deleting an already-absent row succeeds. Blobs referenced by the row
    /// are left in place.
    fn delete_record<'a>(&'a self, id: &'a str) -> RecordStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op record store for unconfigured compositions and baseline tests.
pub struct NoopRecordStore;

impl NoopRecordStore {
    fn unsupported(op: &str) -> String {
        format!("record store unavailable: {op}")
    }
}

impl RecordStore for NoopRecordStore {
    fn list_records<'a>(&'a self) -> RecordStoreFuture<'a, Result<Vec<AppRecord>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn insert_record<'a>(
        &'a self,
        _record: &'a NewAppRecord,
    ) -> RecordStoreFuture<'a, Result<AppRecord, String>> {
        Box::pin(async { Err(Self::unsupported("insert_record")) })
    }

    fn update_record<'a>(
        &'a self,
        _id: &'a str,
        _patch: &'a AppRecordPatch,
    ) -> RecordStoreFuture<'a, Result<Option<AppRecord>, String>> {
        Box::pin(async { Err(Self::unsupported("update_record")) })
    }

    fn delete_record<'a>(&'a self, _id: &'a str) -> RecordStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported("delete_record")) })
    }
}

#[derive(Debug, Default)]
struct MemoryRecordRows {
    next_id: u64,
    rows: Vec<AppRecord>,
}

#[derive(Debug, Clone, Default)]
/// In-memory record store used by runtime tests and the end-to-end harness.
pub struct MemoryRecordStore {
    inner: Rc<RefCell<MemoryRecordRows>>,
}

impl MemoryRecordStore {
    /// Store pre-seeded with records, stamped as if inserted in order.
    pub fn with_records(records: impl IntoIterator<Item = NewAppRecord>) -> Self {
        let store = Self::default();
        for record in records {
            store.insert_now(&record);
        }
        store
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().rows.len()
    }

    /// Returns whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().rows.is_empty()
    }

    /// Overwrites one stored row's download counter, standing in for the
    /// externally maintained counter this client never writes.
    pub fn set_downloads(&self, id: &str, downloads: i64) {
        let mut state = self.inner.borrow_mut();
        if let Some(row) = state.rows.iter_mut().find(|row| row.id == id) {
            row.downloads = downloads;
        }
    }

    fn insert_now(&self, record: &NewAppRecord) -> AppRecord {
        let mut state = self.inner.borrow_mut();
        state.next_id += 1;
        let row = AppRecord {
            id: format!("rec-{}", state.next_id),
            name: record.name.clone(),
            version: record.version.clone(),
            description: record.description.clone(),
            size: record.size.clone(),
            downloads: 0,
            apk_url: record.apk_url.clone(),
            icon_url: record.icon_url.clone(),
            created_at: format!("{:013}", next_monotonic_timestamp_ms()),
        };
        state.rows.push(row.clone());
        row
    }
}

impl RecordStore for MemoryRecordStore {
    fn list_records<'a>(&'a self) -> RecordStoreFuture<'a, Result<Vec<AppRecord>, String>> {
        Box::pin(async move {
            let mut rows = self.inner.borrow().rows.clone();
            rows.reverse();
            Ok(rows)
        })
    }

    fn insert_record<'a>(
        &'a self,
        record: &'a NewAppRecord,
    ) -> RecordStoreFuture<'a, Result<AppRecord, String>> {
        Box::pin(async move { Ok(self.insert_now(record)) })
    }

    fn update_record<'a>(
        &'a self,
        id: &'a str,
        patch: &'a AppRecordPatch,
    ) -> RecordStoreFuture<'a, Result<Option<AppRecord>, String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            let Some(row) = state.rows.iter_mut().find(|row| row.id == id) else {
                return Ok(None);
            };
            if let Some(name) = &patch.name {
                row.name = name.clone();
            }
            if let Some(version) = &patch.version {
                row.version = version.clone();
            }
            if let Some(description) = &patch.description {
                row.description = description.clone();
            }
            Ok(Some(row.clone()))
        })
    }

    fn delete_record<'a>(&'a self, id: &'a str) -> RecordStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().rows.retain(|row| row.id != id);
            Ok(())
        })
    }
}
