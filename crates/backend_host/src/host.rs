//! Backend service bundle injected into the catalog runtime.

use std::rc::Rc;

use crate::{
    AuthService, BlobStore, MemoryAuthService, MemoryBlobStore, MemoryRecordStore, NoopAuthService,
    NoopBlobStore, NoopRecordStore, RecordStore,
};

/// Selected backend service bundle handed to the catalog runtime.
///
/// All environment-specific adapter selection happens before this bundle
/// crosses into `catalog_runtime`, which keeps the runtime and UI crates
/// decoupled from browser transport details.
#[derive(Clone)]
pub struct BackendServices {
    /// Published-app record table.
    pub records: Rc<dyn RecordStore>,
    /// Public blob buckets.
    pub blobs: Rc<dyn BlobStore>,
    /// Session lifecycle and role probe.
    pub auth: Rc<dyn AuthService>,
}

impl BackendServices {
    /// Bundle of no-op adapters for unconfigured compositions: catalog reads
    /// come back empty and every write or sign-in fails.
    pub fn noop() -> Self {
        Self {
            records: Rc::new(NoopRecordStore),
            blobs: Rc::new(NoopBlobStore),
            auth: Rc::new(NoopAuthService),
        }
    }

    /// Bundle of empty in-memory adapters for tests and the end-to-end
    /// harness.
    pub fn in_memory() -> Self {
        Self {
            records: Rc::new(MemoryRecordStore::default()),
            blobs: Rc::new(MemoryBlobStore::default()),
            auth: Rc::new(MemoryAuthService::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_contract::NewAppRecord;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn new_record() -> NewAppRecord {
        NewAppRecord {
            name: "Notes".to_string(),
            version: "1.0.0".to_string(),
            description: "No description".to_string(),
            size: "2.00 MB".to_string(),
            apk_url: "memory://apk-files/notes.apk".to_string(),
            icon_url: None,
        }
    }

    #[test]
    fn noop_bundle_reads_empty_and_rejects_everything_else() {
        let services = BackendServices::noop();
        assert_eq!(
            block_on(services.records.list_records()).expect("list"),
            vec![]
        );
        assert!(block_on(services.records.insert_record(&new_record())).is_err());
        assert!(block_on(services.auth.sign_in("a@b.example", "pw")).is_err());
    }

    #[test]
    fn in_memory_bundle_round_trips_records() {
        let services = BackendServices::in_memory();
        let row = block_on(services.records.insert_record(&new_record())).expect("insert");
        let rows = block_on(services.records.list_records()).expect("list");
        assert_eq!(rows, vec![row]);
    }
}
