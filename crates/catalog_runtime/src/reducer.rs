//! Reducer actions, side-effect intents, and transition logic for the
//! catalog runtime.

use backend_host::AuthSession;
use catalog_contract::AppRecord;
use thiserror::Error;

use crate::{
    model::{ActiveSession, AdminRole, CatalogState, LoadPhase, SessionState},
    notices::{Notice, NoticeLevel, NOTICE_SHELF_LIMIT},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_catalog`] to mutate [`CatalogState`].
pub enum CatalogAction {
    /// Mark the public catalog query as in flight.
    CatalogLoadStarted,
    /// Store the answered public catalog query.
    CatalogLoaded {
        /// Rows in backend order, newest first.
        records: Vec<AppRecord>,
    },
    /// Mark the public catalog query as failed.
    CatalogLoadFailed,
    /// Mark the admin list query as in flight.
    AdminListLoadStarted,
    /// Store the answered admin list query.
    AdminListLoaded {
        /// Rows in backend order, newest first.
        records: Vec<AppRecord>,
    },
    /// Mark the admin list query as failed.
    AdminListLoadFailed,
    /// Open the download detail view for a record.
    SelectRecord {
        /// Record to present.
        record: AppRecord,
    },
    /// Close the download detail view.
    ClearSelection,
    /// Mark the selected record's package download as started.
    DownloadStarted,
    /// Finish the in-flight download and close the detail view.
    DownloadFinished,
    /// Mark an upload submission as in flight.
    UploadStarted,
    /// Record a completed upload.
    RecordInserted {
        /// Row returned by the insert.
        record: AppRecord,
    },
    /// Record a failed upload.
    UploadFailed {
        /// User-facing failure description.
        error: String,
    },
    /// Open the admin edit dialog for a record.
    OpenEdit {
        /// Record to edit.
        record: AppRecord,
    },
    /// Close the admin edit dialog without saving.
    CloseEdit,
    /// Record a settled edit submission.
    RecordUpdateSettled {
        /// Whether the backend still had the row.
        found: bool,
    },
    /// Record a failed edit submission; the dialog stays open.
    EditFailed {
        /// User-facing failure description.
        error: String,
    },
    /// Open the delete confirmation for a record.
    OpenDeleteConfirm {
        /// Record to delete.
        record: AppRecord,
    },
    /// Close the delete confirmation without deleting.
    CloseDeleteConfirm,
    /// Record a completed delete.
    RecordDeleted,
    /// Record a failed delete; the confirmation stays open.
    DeleteFailed {
        /// User-facing failure description.
        error: String,
    },
    /// Mark a sign-in submission as in flight.
    SignInStarted,
    /// Store the boot-time session restore result.
    SessionRestored {
        /// Session recovered from durable storage, if any survived.
        session: Option<AuthSession>,
    },
    /// Store a session minted by the sign-in endpoint.
    SignedIn {
        /// Newly authenticated session.
        session: AuthSession,
    },
    /// Record a failed sign-in submission.
    SignInFailed {
        /// User-facing failure description.
        error: String,
    },
    /// Clear the signed-in session.
    SignedOut,
    /// Store the answered admin-role probe for a signed-in account.
    AdminRoleLoaded {
        /// Account the probe was issued for.
        user_id: String,
        /// Whether the role table grants that account admin.
        is_admin: bool,
    },
    /// Push a notification onto the shelf.
    PushNotice {
        /// Notice severity.
        level: NoticeLevel,
        /// Notice copy.
        message: String,
    },
    /// Remove a notification from the shelf. Dismissing an already-gone
    /// notice is a no-op, so manual dismissal and auto-expiry can race.
    DismissNotice {
        /// Notice to remove.
        id: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_catalog`] for the runtime to
/// execute.
pub enum CatalogEffect {
    /// Re-run the public catalog query.
    RefreshCatalog,
    /// Re-run the admin list query.
    RefreshAdminList,
    /// Replace the process-local session snapshot that authorizes requests.
    SyncActiveSession(Option<AuthSession>),
    /// Probe the role table for the signed-in account.
    LoadAdminRole(String),
    /// Auto-dismiss a success notice after its display window.
    ExpireNotice(u64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions.
pub enum CatalogReducerError {
    /// A download action arrived with no record selected.
    #[error("no record selected")]
    SelectionMissing,
    /// A role probe answered for an account that is no longer signed in.
    #[error("role probe does not match the signed-in account")]
    SessionMismatch,
}

/// Applies a [`CatalogAction`] to the catalog state and collects resulting
/// side effects.
///
/// Mutations never patch fetched rows in place: completed writes emit
/// [`CatalogEffect::RefreshCatalog`] and [`CatalogEffect::RefreshAdminList`]
/// so both queries re-run against the backend.
///
/// # Errors
///
/// Returns [`CatalogReducerError::SelectionMissing`] when a download starts
/// without a selected record, and [`CatalogReducerError::SessionMismatch`]
/// when a stale role probe answers for an account that signed out meanwhile.
pub fn reduce_catalog(
    state: &mut CatalogState,
    action: CatalogAction,
) -> Result<Vec<CatalogEffect>, CatalogReducerError> {
    let mut effects = Vec::new();
    match action {
        CatalogAction::CatalogLoadStarted => {
            // A background refresh keeps showing the rows it is replacing.
            if state.catalog_phase != LoadPhase::Ready {
                state.catalog_phase = LoadPhase::Loading;
            }
        }
        CatalogAction::CatalogLoaded { records } => {
            state.catalog_phase = LoadPhase::Ready;
            state.records = records;
        }
        CatalogAction::CatalogLoadFailed => {
            state.catalog_phase = LoadPhase::Failed;
            state.records = Vec::new();
            push_notice(
                state,
                NoticeLevel::Error,
                "Couldn't load the app catalog.".to_string(),
            );
        }
        CatalogAction::AdminListLoadStarted => {
            if state.admin_phase != LoadPhase::Ready {
                state.admin_phase = LoadPhase::Loading;
            }
        }
        CatalogAction::AdminListLoaded { records } => {
            state.admin_phase = LoadPhase::Ready;
            state.admin_records = records;
        }
        CatalogAction::AdminListLoadFailed => {
            state.admin_phase = LoadPhase::Failed;
            state.admin_records = Vec::new();
            push_notice(
                state,
                NoticeLevel::Error,
                "Couldn't load the app list.".to_string(),
            );
        }
        CatalogAction::SelectRecord { record } => {
            state.selected = Some(record);
            state.download_busy = false;
        }
        CatalogAction::ClearSelection => {
            state.selected = None;
            state.download_busy = false;
        }
        CatalogAction::DownloadStarted => {
            if state.selected.is_none() {
                return Err(CatalogReducerError::SelectionMissing);
            }
            state.download_busy = true;
        }
        CatalogAction::DownloadFinished => {
            state.download_busy = false;
            state.selected = None;
        }
        CatalogAction::UploadStarted => {
            state.upload_busy = true;
        }
        CatalogAction::RecordInserted { record } => {
            state.upload_busy = false;
            state.uploads_completed += 1;
            let id = push_notice(
                state,
                NoticeLevel::Success,
                format!("{} uploaded successfully.", record.name),
            );
            effects.push(CatalogEffect::ExpireNotice(id));
            effects.push(CatalogEffect::RefreshCatalog);
            effects.push(CatalogEffect::RefreshAdminList);
        }
        CatalogAction::UploadFailed { error } => {
            state.upload_busy = false;
            push_notice(state, NoticeLevel::Error, error);
        }
        CatalogAction::OpenEdit { record } => {
            state.edit_target = Some(record);
        }
        CatalogAction::CloseEdit => {
            state.edit_target = None;
        }
        CatalogAction::RecordUpdateSettled { found } => {
            state.edit_target = None;
            if found {
                let id = push_notice(
                    state,
                    NoticeLevel::Success,
                    "App updated successfully.".to_string(),
                );
                effects.push(CatalogEffect::ExpireNotice(id));
            } else {
                // Zero rows matched: the record vanished under the edit.
                // Refreshing below drops the stale row from both lists.
                push_notice(
                    state,
                    NoticeLevel::Error,
                    "App no longer exists.".to_string(),
                );
            }
            effects.push(CatalogEffect::RefreshCatalog);
            effects.push(CatalogEffect::RefreshAdminList);
        }
        CatalogAction::EditFailed { error } => {
            push_notice(state, NoticeLevel::Error, error);
        }
        CatalogAction::OpenDeleteConfirm { record } => {
            state.delete_target = Some(record);
        }
        CatalogAction::CloseDeleteConfirm => {
            state.delete_target = None;
        }
        CatalogAction::RecordDeleted => {
            state.delete_target = None;
            let id = push_notice(
                state,
                NoticeLevel::Success,
                "App deleted successfully.".to_string(),
            );
            effects.push(CatalogEffect::ExpireNotice(id));
            effects.push(CatalogEffect::RefreshCatalog);
            effects.push(CatalogEffect::RefreshAdminList);
        }
        CatalogAction::DeleteFailed { error } => {
            push_notice(state, NoticeLevel::Error, error);
        }
        CatalogAction::SignInStarted => {
            state.sign_in_busy = true;
        }
        CatalogAction::SessionRestored { session } => match session {
            Some(session) => apply_signed_in(state, session, &mut effects),
            None => {
                state.session = SessionState::SignedOut;
                effects.push(CatalogEffect::SyncActiveSession(None));
            }
        },
        CatalogAction::SignedIn { session } => {
            state.sign_in_busy = false;
            apply_signed_in(state, session, &mut effects);
        }
        CatalogAction::SignInFailed { error } => {
            state.sign_in_busy = false;
            push_notice(state, NoticeLevel::Error, error);
        }
        CatalogAction::SignedOut => {
            state.session = SessionState::SignedOut;
            effects.push(CatalogEffect::SyncActiveSession(None));
        }
        CatalogAction::AdminRoleLoaded { user_id, is_admin } => {
            let SessionState::SignedIn(active) = &mut state.session else {
                return Err(CatalogReducerError::SessionMismatch);
            };
            if active.session.identity.user_id != user_id {
                return Err(CatalogReducerError::SessionMismatch);
            }
            active.role = if is_admin {
                AdminRole::Admin
            } else {
                AdminRole::Member
            };
        }
        CatalogAction::PushNotice { level, message } => {
            let id = push_notice(state, level, message);
            if level == NoticeLevel::Success {
                effects.push(CatalogEffect::ExpireNotice(id));
            }
        }
        CatalogAction::DismissNotice { id } => {
            state.notices.retain(|notice| notice.id != id);
        }
    }
    Ok(effects)
}

fn apply_signed_in(
    state: &mut CatalogState,
    session: AuthSession,
    effects: &mut Vec<CatalogEffect>,
) {
    let user_id = session.identity.user_id.clone();
    effects.push(CatalogEffect::SyncActiveSession(Some(session.clone())));
    effects.push(CatalogEffect::LoadAdminRole(user_id));
    state.session = SessionState::SignedIn(ActiveSession {
        session,
        role: AdminRole::Unknown,
    });
}

fn push_notice(state: &mut CatalogState, level: NoticeLevel, message: String) -> u64 {
    state.next_notice_id += 1;
    let id = state.next_notice_id;
    state.notices.push(Notice { id, level, message });
    if state.notices.len() > NOTICE_SHELF_LIMIT {
        let overflow = state.notices.len() - NOTICE_SHELF_LIMIT;
        state.notices.drain(..overflow);
    }
    id
}

#[cfg(test)]
mod tests {
    use backend_host::UserIdentity;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str, name: &str) -> AppRecord {
        AppRecord {
            id: id.to_string(),
            name: name.to_string(),
            version: "1.0.0".to_string(),
            description: "No description".to_string(),
            size: "1.00 MB".to_string(),
            downloads: 0,
            apk_url: format!("https://blobs.example/apk/{id}.apk"),
            icon_url: None,
            created_at: String::new(),
        }
    }

    fn session_for(user_id: &str) -> AuthSession {
        AuthSession {
            access_token: format!("access-{user_id}"),
            refresh_token: format!("refresh-{user_id}"),
            identity: UserIdentity {
                user_id: user_id.to_string(),
                email: format!("{user_id}@example.com"),
            },
        }
    }

    fn reduce(state: &mut CatalogState, action: CatalogAction) -> Vec<CatalogEffect> {
        reduce_catalog(state, action).expect("reduce")
    }

    #[test]
    fn catalog_load_drives_the_phase_and_rows() {
        let mut state = CatalogState::default();
        assert_eq!(state.catalog_phase, LoadPhase::Loading);

        reduce(&mut state, CatalogAction::CatalogLoadStarted);
        assert_eq!(state.catalog_phase, LoadPhase::Loading);

        reduce(
            &mut state,
            CatalogAction::CatalogLoaded {
                records: vec![record("r1", "Notes")],
            },
        );
        assert_eq!(state.catalog_phase, LoadPhase::Ready);
        assert_eq!(state.records.len(), 1);
    }

    #[test]
    fn empty_catalog_settles_ready_without_a_notice() {
        let mut state = CatalogState::default();
        reduce(&mut state, CatalogAction::CatalogLoadStarted);
        reduce(&mut state, CatalogAction::CatalogLoaded { records: vec![] });

        assert_eq!(state.catalog_phase, LoadPhase::Ready);
        assert!(state.records.is_empty());
        assert!(state.notices.is_empty());
    }

    #[test]
    fn refresh_of_a_ready_catalog_keeps_showing_old_rows() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::CatalogLoaded {
                records: vec![record("r1", "Notes")],
            },
        );

        reduce(&mut state, CatalogAction::CatalogLoadStarted);
        assert_eq!(state.catalog_phase, LoadPhase::Ready);
        assert_eq!(state.records.len(), 1);
    }

    #[test]
    fn catalog_load_failure_empties_the_view_and_raises_a_notice() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::CatalogLoaded {
                records: vec![record("r1", "Notes")],
            },
        );

        reduce(&mut state, CatalogAction::CatalogLoadFailed);
        assert_eq!(state.catalog_phase, LoadPhase::Failed);
        assert!(state.records.is_empty());
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn selection_opens_and_closes_the_detail_view() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::SelectRecord {
                record: record("r1", "Notes"),
            },
        );
        assert_eq!(state.selected.as_ref().map(|r| r.id.as_str()), Some("r1"));

        reduce(&mut state, CatalogAction::ClearSelection);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn download_requires_a_selection_and_closes_the_view_when_done() {
        let mut state = CatalogState::default();
        assert_eq!(
            reduce_catalog(&mut state, CatalogAction::DownloadStarted),
            Err(CatalogReducerError::SelectionMissing)
        );

        reduce(
            &mut state,
            CatalogAction::SelectRecord {
                record: record("r1", "Notes"),
            },
        );
        reduce(&mut state, CatalogAction::DownloadStarted);
        assert!(state.download_busy);

        reduce(&mut state, CatalogAction::DownloadFinished);
        assert!(!state.download_busy);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn completed_upload_refreshes_both_lists_and_resets_the_form() {
        let mut state = CatalogState::default();
        reduce(&mut state, CatalogAction::UploadStarted);
        assert!(state.upload_busy);

        let effects = reduce(
            &mut state,
            CatalogAction::RecordInserted {
                record: record("r1", "Notes"),
            },
        );
        assert!(!state.upload_busy);
        assert_eq!(state.uploads_completed, 1);
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].level, NoticeLevel::Success);
        assert_eq!(state.notices[0].message, "Notes uploaded successfully.");
        assert_eq!(
            effects,
            vec![
                CatalogEffect::ExpireNotice(1),
                CatalogEffect::RefreshCatalog,
                CatalogEffect::RefreshAdminList,
            ]
        );
    }

    #[test]
    fn failed_upload_keeps_the_form_and_raises_the_error() {
        let mut state = CatalogState::default();
        reduce(&mut state, CatalogAction::UploadStarted);

        let effects = reduce(
            &mut state,
            CatalogAction::UploadFailed {
                error: "Couldn't store the APK file.".to_string(),
            },
        );
        assert!(!state.upload_busy);
        assert_eq!(state.uploads_completed, 0);
        assert_eq!(state.notices[0].level, NoticeLevel::Error);
        assert!(effects.is_empty());
    }

    #[test]
    fn settled_edit_closes_the_dialog_and_refreshes() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::OpenEdit {
                record: record("r1", "Notes"),
            },
        );
        assert!(state.edit_target.is_some());

        let effects = reduce(&mut state, CatalogAction::RecordUpdateSettled { found: true });
        assert_eq!(state.edit_target, None);
        assert_eq!(state.notices[0].level, NoticeLevel::Success);
        assert_eq!(
            effects,
            vec![
                CatalogEffect::ExpireNotice(1),
                CatalogEffect::RefreshCatalog,
                CatalogEffect::RefreshAdminList,
            ]
        );
    }

    #[test]
    fn edit_of_a_vanished_record_reports_and_still_refreshes() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::OpenEdit {
                record: record("r1", "Notes"),
            },
        );

        let effects = reduce(&mut state, CatalogAction::RecordUpdateSettled { found: false });
        assert_eq!(state.edit_target, None);
        assert_eq!(state.notices[0].level, NoticeLevel::Error);
        assert_eq!(state.notices[0].message, "App no longer exists.");
        assert_eq!(
            effects,
            vec![CatalogEffect::RefreshCatalog, CatalogEffect::RefreshAdminList]
        );
    }

    #[test]
    fn failed_edit_leaves_the_dialog_open() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::OpenEdit {
                record: record("r1", "Notes"),
            },
        );

        reduce(
            &mut state,
            CatalogAction::EditFailed {
                error: "update failed".to_string(),
            },
        );
        assert!(state.edit_target.is_some());
        assert_eq!(state.notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn delete_confirmation_flow_closes_on_success_and_stays_on_failure() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::OpenDeleteConfirm {
                record: record("r1", "Notes"),
            },
        );
        assert_eq!(
            state.delete_target.as_ref().map(|r| r.name.as_str()),
            Some("Notes")
        );

        reduce(
            &mut state,
            CatalogAction::DeleteFailed {
                error: "delete failed".to_string(),
            },
        );
        assert!(state.delete_target.is_some());

        let effects = reduce(&mut state, CatalogAction::RecordDeleted);
        assert_eq!(state.delete_target, None);
        assert_eq!(
            effects,
            vec![
                CatalogEffect::ExpireNotice(2),
                CatalogEffect::RefreshCatalog,
                CatalogEffect::RefreshAdminList,
            ]
        );
    }

    #[test]
    fn sign_in_transitions_sync_the_session_and_probe_the_role() {
        let mut state = CatalogState::default();
        reduce(&mut state, CatalogAction::SignInStarted);
        assert!(state.sign_in_busy);

        let session = session_for("user-admin");
        let effects = reduce(
            &mut state,
            CatalogAction::SignedIn {
                session: session.clone(),
            },
        );
        assert!(!state.sign_in_busy);
        assert!(state.session.is_signed_in());
        assert!(!state.session.is_admin());
        assert_eq!(
            effects,
            vec![
                CatalogEffect::SyncActiveSession(Some(session)),
                CatalogEffect::LoadAdminRole("user-admin".to_string()),
            ]
        );

        reduce(
            &mut state,
            CatalogAction::AdminRoleLoaded {
                user_id: "user-admin".to_string(),
                is_admin: true,
            },
        );
        assert!(state.session.is_admin());
    }

    #[test]
    fn restore_without_a_persisted_session_signs_out() {
        let mut state = CatalogState::default();
        assert!(state.session.is_resolving());

        let effects = reduce(&mut state, CatalogAction::SessionRestored { session: None });
        assert_eq!(state.session, SessionState::SignedOut);
        assert_eq!(effects, vec![CatalogEffect::SyncActiveSession(None)]);
    }

    #[test]
    fn stale_role_probe_is_rejected() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::SessionRestored {
                session: Some(session_for("user-admin")),
            },
        );
        reduce(&mut state, CatalogAction::SignedOut);

        assert_eq!(
            reduce_catalog(
                &mut state,
                CatalogAction::AdminRoleLoaded {
                    user_id: "user-admin".to_string(),
                    is_admin: true,
                },
            ),
            Err(CatalogReducerError::SessionMismatch)
        );
    }

    #[test]
    fn sign_out_clears_the_session_snapshot() {
        let mut state = CatalogState::default();
        reduce(
            &mut state,
            CatalogAction::SessionRestored {
                session: Some(session_for("user-admin")),
            },
        );

        let effects = reduce(&mut state, CatalogAction::SignedOut);
        assert_eq!(state.session, SessionState::SignedOut);
        assert_eq!(effects, vec![CatalogEffect::SyncActiveSession(None)]);
    }

    #[test]
    fn success_notices_expire_and_errors_do_not() {
        let mut state = CatalogState::default();
        let effects = reduce(
            &mut state,
            CatalogAction::PushNotice {
                level: NoticeLevel::Success,
                message: "done".to_string(),
            },
        );
        assert_eq!(effects, vec![CatalogEffect::ExpireNotice(1)]);

        let effects = reduce(
            &mut state,
            CatalogAction::PushNotice {
                level: NoticeLevel::Error,
                message: "failed".to_string(),
            },
        );
        assert!(effects.is_empty());

        reduce(&mut state, CatalogAction::DismissNotice { id: 1 });
        assert_eq!(state.notices.len(), 1);
        assert_eq!(state.notices[0].id, 2);

        // Dismissing an already-gone notice stays a no-op.
        reduce(&mut state, CatalogAction::DismissNotice { id: 1 });
        assert_eq!(state.notices.len(), 1);
    }

    #[test]
    fn notice_shelf_drops_oldest_entries_past_the_limit() {
        let mut state = CatalogState::default();
        for n in 0..6 {
            reduce(
                &mut state,
                CatalogAction::PushNotice {
                    level: NoticeLevel::Error,
                    message: format!("failure {n}"),
                },
            );
        }

        assert_eq!(state.notices.len(), NOTICE_SHELF_LIMIT);
        assert_eq!(state.notices[0].message, "failure 2");
        assert_eq!(state.notices[3].message, "failure 5");
    }
}
