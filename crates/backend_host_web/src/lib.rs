//! Browser (`wasm32`) implementations of [`backend_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring for the hosted backend:
//! record-table REST calls, bucket uploads, and the auth/session endpoints,
//! all sharing one fetch transport under `http/` that is routed to
//! target-specific implementations.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod adapters;
pub mod auth;
pub mod blobs;
pub mod files;
mod http;
pub mod navigation;
pub mod records;
pub mod timers;

pub use adapters::{backend_services_for, build_backend_services};
pub use auth::WebAuthService;
pub use blobs::WebBlobStore;
pub use files::{read_picked_file, selected_file};
pub use navigation::navigate_to_url;
pub use records::WebRecordStore;
pub use timers::sleep_ms;
