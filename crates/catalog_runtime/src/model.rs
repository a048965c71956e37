use backend_host::{AuthSession, UserIdentity};
use catalog_contract::AppRecord;

use crate::notices::Notice;

/// Most records shown by each featured rail on the home page.
pub const RAIL_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminRole {
    /// Role probe still in flight.
    #[default]
    Unknown,
    Member,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub session: AuthSession,
    pub role: AdminRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Persisted credentials are still being restored at boot.
    #[default]
    Resolving,
    SignedOut,
    SignedIn(ActiveSession),
}

impl SessionState {
    pub fn identity(&self) -> Option<&UserIdentity> {
        match self {
            Self::SignedIn(active) => Some(&active.session.identity),
            _ => None,
        }
    }

    pub fn is_resolving(&self) -> bool {
        matches!(self, Self::Resolving)
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::SignedIn(ActiveSession {
                role: AdminRole::Admin,
                ..
            })
        )
    }
}

/// Whole-app state owned by the runtime reducer.
///
/// The public catalog and the admin list are independent queries over the
/// same table, so each carries its own phase and rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogState {
    pub catalog_phase: LoadPhase,
    pub records: Vec<AppRecord>,
    pub admin_phase: LoadPhase,
    pub admin_records: Vec<AppRecord>,
    /// Record currently presented in the download detail view.
    pub selected: Option<AppRecord>,
    pub download_busy: bool,
    /// Record currently open in the admin edit dialog.
    pub edit_target: Option<AppRecord>,
    /// Record currently awaiting delete confirmation.
    pub delete_target: Option<AppRecord>,
    pub upload_busy: bool,
    /// Counter of completed uploads; the form resets when it advances.
    pub uploads_completed: u64,
    pub sign_in_busy: bool,
    pub session: SessionState,
    pub notices: Vec<Notice>,
    pub next_notice_id: u64,
}

/// The newest records in catalog order, capped at [`RAIL_LIMIT`].
///
/// The record store already returns rows newest-first, so this is a prefix.
pub fn recent_view(records: &[AppRecord]) -> &[AppRecord] {
    &records[..records.len().min(RAIL_LIMIT)]
}

/// Records ranked by download count, capped at [`RAIL_LIMIT`].
///
/// Ties keep their catalog order, so equally-downloaded apps stay newest
/// first.
pub fn popular_view(records: &[AppRecord]) -> Vec<AppRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.downloads.cmp(&a.downloads));
    ranked.truncate(RAIL_LIMIT);
    ranked
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(id: &str, downloads: i64) -> AppRecord {
        AppRecord {
            id: id.to_string(),
            name: format!("App {id}"),
            version: "1.0.0".to_string(),
            description: "No description".to_string(),
            size: "1.00 MB".to_string(),
            downloads,
            apk_url: format!("https://blobs.example/apk/{id}.apk"),
            icon_url: None,
            created_at: String::new(),
        }
    }

    fn ids(records: &[AppRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn recent_view_is_a_prefix_capped_at_the_rail_limit() {
        let records: Vec<_> = (0..14i64).map(|n| record(&format!("r{n}"), n)).collect();

        let recent = recent_view(&records);
        assert_eq!(recent.len(), RAIL_LIMIT);
        assert_eq!(recent[0].id, "r0");
        assert_eq!(recent[9].id, "r9");
    }

    #[test]
    fn recent_view_keeps_short_catalogs_whole() {
        let records = vec![record("a", 5), record("b", 2)];
        assert_eq!(ids(recent_view(&records)), vec!["a", "b"]);
        assert!(recent_view(&[]).is_empty());
    }

    #[test]
    fn popular_view_ranks_by_downloads_descending() {
        let records = vec![
            record("new", 10),
            record("mid", 500),
            record("top", 9_000),
            record("old", 0),
        ];

        assert_eq!(ids(&popular_view(&records)), vec!["top", "mid", "new", "old"]);
    }

    #[test]
    fn popular_view_keeps_catalog_order_for_ties() {
        let records = vec![
            record("a", 100),
            record("b", 100),
            record("c", 200),
            record("d", 100),
        ];

        assert_eq!(ids(&popular_view(&records)), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn popular_view_caps_at_the_rail_limit_without_mutating_input() {
        let records: Vec<_> = (0..14i64).map(|n| record(&format!("r{n}"), n)).collect();
        let before = records.clone();

        let popular = popular_view(&records);
        assert_eq!(popular.len(), RAIL_LIMIT);
        assert_eq!(popular[0].id, "r13");
        assert_eq!(records, before);
    }

    #[test]
    fn session_state_helpers_track_role() {
        assert!(SessionState::Resolving.is_resolving());
        assert!(!SessionState::SignedOut.is_signed_in());

        let session = AuthSession {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            identity: UserIdentity {
                user_id: "user-admin".to_string(),
                email: "admin@example.com".to_string(),
            },
        };
        let member = SessionState::SignedIn(ActiveSession {
            session: session.clone(),
            role: AdminRole::Member,
        });
        assert!(member.is_signed_in());
        assert!(!member.is_admin());
        assert_eq!(member.identity().map(|id| id.user_id.as_str()), Some("user-admin"));

        let admin = SessionState::SignedIn(ActiveSession {
            session,
            role: AdminRole::Admin,
        });
        assert!(admin.is_admin());
    }
}
