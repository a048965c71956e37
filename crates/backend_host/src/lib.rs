//! Typed backend-service contracts shared by the catalog runtime and the
//! browser adapters.
//!
//! This crate is the API-first boundary for the hosted backend: record store,
//! blob store, and auth service traits plus their in-memory/no-op adapters,
//! the backend endpoint configuration, and the process-local active-session
//! snapshot. Concrete browser transports live in `backend_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod blobs;
pub mod config;
pub mod host;
pub mod records;
pub mod session;
pub mod time;

pub use auth::{
    AuthFuture, AuthService, AuthSession, MemoryAccount, MemoryAuthService, NoopAuthService,
    UserIdentity, AUTH_SESSION_STORAGE_KEY,
};
pub use blobs::{
    fresh_storage_key, storage_key, BlobStore, BlobStoreFuture, MemoryBlobStore, NoopBlobStore,
    PickedFile, StoredBlob,
};
pub use config::{
    BackendConfig, DEFAULT_ICON_BUCKET, DEFAULT_PACKAGE_BUCKET, DEFAULT_RECORDS_TABLE,
    DEFAULT_ROLES_TABLE,
};
pub use host::BackendServices;
pub use records::{MemoryRecordStore, NoopRecordStore, RecordStore, RecordStoreFuture};
pub use session::{active_access_token, active_session, set_active_session};
pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
