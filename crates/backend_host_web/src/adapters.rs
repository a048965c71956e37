//! Concrete adapter factories for entry-layer wiring.

use std::rc::Rc;

use backend_host::{BackendConfig, BackendServices};

use crate::{WebAuthService, WebBlobStore, WebRecordStore};

/// Builds the browser-backed service bundle for one explicit configuration.
pub fn backend_services_for(config: BackendConfig) -> BackendServices {
    BackendServices {
        records: Rc::new(WebRecordStore::new(config.clone())),
        blobs: Rc::new(WebBlobStore::new(config.clone())),
        auth: Rc::new(WebAuthService::new(config)),
    }
}

/// Builds the browser-backed service bundle for the backend project captured
/// at build time, or a no-op bundle when the build carries none.
///
/// With the no-op bundle the catalog renders empty and every write or sign-in
/// fails with an "unavailable" error, which keeps an unconfigured build
/// obviously broken instead of silently half-working.
pub fn build_backend_services() -> BackendServices {
    match BackendConfig::from_build_env() {
        Some(config) => backend_services_for(config),
        None => BackendServices::noop(),
    }
}
