//! Async backend effects feeding the catalog reducer.
//!
//! Every effect follows the same shape: spawn the service call, dispatch the
//! settled action on success, and funnel failures into a console warning plus
//! a reducer action so the UI can raise a notice.

use backend_host::{
    fresh_storage_key, BackendServices, PickedFile, DEFAULT_ICON_BUCKET, DEFAULT_PACKAGE_BUCKET,
};
use catalog_contract::{AppRecord, AppRecordPatch, NewAppRecord, UploadFields};
use leptos::{logging, spawn_local, SignalWithUntracked};

use crate::{
    notices::NOTICE_TTL_MS,
    reducer::{CatalogAction, CatalogEffect},
    runtime_context::CatalogRuntimeContext,
};

/// Synthetic pre-navigation delay so the downloading state is readable.
pub const DOWNLOAD_DELAY_MS: i32 = 1_500;

/// Runs one reducer-emitted effect.
pub(crate) fn run_catalog_effect(runtime: CatalogRuntimeContext, effect: CatalogEffect) {
    match effect {
        CatalogEffect::RefreshCatalog => load_catalog(runtime),
        CatalogEffect::RefreshAdminList => load_admin_list(runtime),
        CatalogEffect::SyncActiveSession(session) => backend_host::set_active_session(session),
        CatalogEffect::LoadAdminRole(user_id) => load_admin_role(runtime, user_id),
        CatalogEffect::ExpireNotice(id) => expire_notice(runtime, id),
    }
}

/// Runs the public catalog query and stores the result.
pub fn load_catalog(runtime: CatalogRuntimeContext) {
    runtime.dispatch_action(CatalogAction::CatalogLoadStarted);
    let backend = runtime.backend();
    spawn_local(async move {
        match backend.records.list_records().await {
            Ok(records) => runtime.dispatch_action(CatalogAction::CatalogLoaded { records }),
            Err(err) => {
                logging::warn!("catalog load failed: {err}");
                runtime.dispatch_action(CatalogAction::CatalogLoadFailed);
            }
        }
    });
}

/// Runs the admin list query and stores the result.
pub fn load_admin_list(runtime: CatalogRuntimeContext) {
    runtime.dispatch_action(CatalogAction::AdminListLoadStarted);
    let backend = runtime.backend();
    spawn_local(async move {
        match backend.records.list_records().await {
            Ok(records) => runtime.dispatch_action(CatalogAction::AdminListLoaded { records }),
            Err(err) => {
                logging::warn!("admin list load failed: {err}");
                runtime.dispatch_action(CatalogAction::AdminListLoadFailed);
            }
        }
    });
}

/// Restores the persisted session at boot.
pub fn restore_session(runtime: CatalogRuntimeContext) {
    let backend = runtime.backend();
    spawn_local(async move {
        match backend.auth.restore_session().await {
            Ok(session) => runtime.dispatch_action(CatalogAction::SessionRestored { session }),
            Err(err) => {
                logging::warn!("session restore failed: {err}");
                runtime.dispatch_action(CatalogAction::SessionRestored { session: None });
            }
        }
    });
}

fn load_admin_role(runtime: CatalogRuntimeContext, user_id: String) {
    let backend = runtime.backend();
    spawn_local(async move {
        match backend.auth.load_is_admin(&user_id).await {
            Ok(is_admin) => {
                runtime.dispatch_action(CatalogAction::AdminRoleLoaded { user_id, is_admin });
            }
            Err(err) => {
                // An unanswerable probe reads as no role rather than leaving
                // the gate unresolved.
                logging::warn!("admin role probe failed: {err}");
                runtime.dispatch_action(CatalogAction::AdminRoleLoaded {
                    user_id,
                    is_admin: false,
                });
            }
        }
    });
}

/// Exchanges the sign-in form's credentials for a session.
pub fn sign_in(runtime: CatalogRuntimeContext, email: String, password: String) {
    runtime.dispatch_action(CatalogAction::SignInStarted);
    let backend = runtime.backend();
    spawn_local(async move {
        match backend.auth.sign_in(&email, &password).await {
            Ok(session) => runtime.dispatch_action(CatalogAction::SignedIn { session }),
            Err(err) => runtime.dispatch_action(CatalogAction::SignInFailed { error: err }),
        }
    });
}

/// Signs the active session out. Local credentials are cleared even when the
/// backend revocation fails.
pub fn sign_out(runtime: CatalogRuntimeContext) {
    let backend = runtime.backend();
    spawn_local(async move {
        if let Err(err) = backend.auth.sign_out().await {
            logging::warn!("sign-out revocation failed: {err}");
        }
        runtime.dispatch_action(CatalogAction::SignedOut);
    });
}

/// Starts the package download for the currently selected record.
///
/// A record without a package URL makes this a no-op. Otherwise the runtime
/// holds the busy state through [`DOWNLOAD_DELAY_MS`], then points the
/// browser at the blob URL and closes the detail view.
pub fn download_selected(runtime: CatalogRuntimeContext) {
    let Some(record) = runtime.state.with_untracked(|state| state.selected.clone()) else {
        return;
    };
    if record.apk_url.is_empty() {
        return;
    }
    runtime.dispatch_action(CatalogAction::DownloadStarted);
    spawn_local(async move {
        backend_host_web::sleep_ms(DOWNLOAD_DELAY_MS).await;
        if let Err(err) = backend_host_web::navigate_to_url(&record.apk_url) {
            logging::warn!("package navigation failed: {err}");
        }
        runtime.dispatch_action(CatalogAction::DownloadFinished);
    });
}

/// One validated upload submission: form fields plus picked file handles.
#[derive(Clone)]
pub struct UploadSubmission {
    /// Collected text fields.
    pub fields: UploadFields,
    /// Required package file handle.
    pub package_file: web_sys::File,
    /// Optional icon file handle.
    pub icon_file: Option<web_sys::File>,
}

/// Buffers the submission's files and runs the upload pipeline.
pub fn submit_upload(runtime: CatalogRuntimeContext, submission: UploadSubmission) {
    runtime.dispatch_action(CatalogAction::UploadStarted);
    let backend = runtime.backend();
    spawn_local(async move {
        let package = match backend_host_web::read_picked_file(&submission.package_file).await {
            Ok(payload) => payload,
            Err(err) => {
                logging::warn!("package file read failed: {err}");
                runtime.dispatch_action(CatalogAction::UploadFailed {
                    error: "Couldn't read the APK file.".to_string(),
                });
                return;
            }
        };
        let icon = match &submission.icon_file {
            Some(file) => match backend_host_web::read_picked_file(file).await {
                Ok(payload) => Some(payload),
                Err(err) => {
                    logging::warn!("icon file read failed: {err}");
                    runtime.dispatch_action(CatalogAction::UploadFailed {
                        error: "Couldn't read the icon file.".to_string(),
                    });
                    return;
                }
            },
            None => None,
        };

        match perform_upload(&backend, &submission.fields, &package, icon.as_ref()).await {
            Ok(record) => runtime.dispatch_action(CatalogAction::RecordInserted { record }),
            Err(err) => {
                logging::warn!("upload failed: {err}");
                runtime.dispatch_action(CatalogAction::UploadFailed { error: err });
            }
        }
    });
}

/// Stores the package and optional icon blobs, then inserts the record row.
///
/// The record only exists once both stores succeeded, so a failed blob
/// upload never leaves a row pointing at nothing. Stored blobs from a failed
/// later step are left behind; nothing references them.
pub async fn perform_upload(
    backend: &BackendServices,
    fields: &UploadFields,
    package: &PickedFile,
    icon: Option<&PickedFile>,
) -> Result<AppRecord, String> {
    let package_key = fresh_storage_key(&package.name);
    let apk_url = backend
        .blobs
        .store_blob(
            DEFAULT_PACKAGE_BUCKET,
            &package_key,
            package.content_type_or_default(),
            &package.bytes,
        )
        .await?;

    let icon_url = match icon {
        Some(icon) => {
            let icon_key = fresh_storage_key(&icon.name);
            let url = backend
                .blobs
                .store_blob(
                    DEFAULT_ICON_BUCKET,
                    &icon_key,
                    icon.content_type_or_default(),
                    &icon.bytes,
                )
                .await?;
            Some(url)
        }
        None => None,
    };

    let row = NewAppRecord::from_upload(fields, package.byte_len(), apk_url, icon_url);
    backend.records.insert_record(&row).await
}

/// Submits the edit dialog's patch for one record.
pub fn submit_edit(runtime: CatalogRuntimeContext, record_id: String, patch: AppRecordPatch) {
    let backend = runtime.backend();
    spawn_local(async move {
        match backend.records.update_record(&record_id, &patch).await {
            Ok(row) => runtime.dispatch_action(CatalogAction::RecordUpdateSettled {
                found: row.is_some(),
            }),
            Err(err) => {
                logging::warn!("record update failed: {err}");
                runtime.dispatch_action(CatalogAction::EditFailed { error: err });
            }
        }
    });
}

/// Deletes one record after its confirmation.
pub fn delete_record(runtime: CatalogRuntimeContext, record_id: String) {
    let backend = runtime.backend();
    spawn_local(async move {
        match backend.records.delete_record(&record_id).await {
            Ok(()) => runtime.dispatch_action(CatalogAction::RecordDeleted),
            Err(err) => {
                logging::warn!("record delete failed: {err}");
                runtime.dispatch_action(CatalogAction::DeleteFailed { error: err });
            }
        }
    });
}

fn expire_notice(runtime: CatalogRuntimeContext, id: u64) {
    spawn_local(async move {
        backend_host_web::sleep_ms(NOTICE_TTL_MS).await;
        runtime.dispatch_action(CatalogAction::DismissNotice { id });
    });
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use backend_host::{MemoryBlobStore, MemoryRecordStore, NoopAuthService, NoopBlobStore};
    use catalog_contract::DESCRIPTION_PLACEHOLDER;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn memory_backend() -> (BackendServices, MemoryRecordStore, MemoryBlobStore) {
        let records = MemoryRecordStore::default();
        let blobs = MemoryBlobStore::default();
        let backend = BackendServices {
            records: Rc::new(records.clone()),
            blobs: Rc::new(blobs.clone()),
            auth: Rc::new(NoopAuthService),
        };
        (backend, records, blobs)
    }

    fn fields() -> UploadFields {
        UploadFields {
            name: "Notes".to_string(),
            version: "1.0.0".to_string(),
            description: String::new(),
        }
    }

    fn package() -> PickedFile {
        PickedFile {
            name: "notes.apk".to_string(),
            content_type: "application/vnd.android.package-archive".to_string(),
            bytes: b"apk-bytes".to_vec(),
        }
    }

    #[test]
    fn upload_pipeline_stores_blobs_then_inserts_the_record() {
        let (backend, records, blobs) = memory_backend();
        let icon = PickedFile {
            name: "icon.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: b"png-bytes".to_vec(),
        };

        let record =
            block_on(perform_upload(&backend, &fields(), &package(), Some(&icon))).expect("upload");

        assert_eq!(record.name, "Notes");
        assert_eq!(record.version, "1.0.0");
        assert_eq!(record.description, DESCRIPTION_PLACEHOLDER);
        assert_eq!(record.size, "0.00 MB");
        assert_eq!(record.downloads, 0);
        assert!(record.apk_url.starts_with("memory://apk-files/"));
        assert!(record.apk_url.ends_with("-notes.apk"));
        let icon_url = record.icon_url.expect("icon url");
        assert!(icon_url.starts_with("memory://app-icons/"));
        assert!(icon_url.ends_with("-icon.png"));

        assert_eq!(records.len(), 1);
        assert_eq!(blobs.len(), 2);
    }

    #[test]
    fn upload_without_an_icon_skips_the_icon_bucket() {
        let (backend, records, blobs) = memory_backend();

        let record = block_on(perform_upload(&backend, &fields(), &package(), None)).expect("upload");

        assert_eq!(record.icon_url, None);
        assert_eq!(records.len(), 1);
        assert_eq!(blobs.len(), 1);
    }

    #[test]
    fn failed_blob_store_aborts_before_the_record_insert() {
        let records = MemoryRecordStore::default();
        let backend = BackendServices {
            records: Rc::new(records.clone()),
            blobs: Rc::new(NoopBlobStore),
            auth: Rc::new(NoopAuthService),
        };

        let err = block_on(perform_upload(&backend, &fields(), &package(), None))
            .expect_err("blob store down");
        assert_eq!(err, "blob store unavailable: store_blob");
        assert!(records.is_empty());
    }
}
