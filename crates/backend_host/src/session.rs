//! Process-local snapshot of the active authenticated session.
//!
//! The runtime owns the authoritative session state; this snapshot mirrors it
//! so backend adapters can attach the bearer token to authenticated requests
//! without threading the session through every call site.

use std::cell::RefCell;

use crate::auth::AuthSession;

thread_local! {
    static ACTIVE_SESSION: RefCell<Option<AuthSession>> = const { RefCell::new(None) };
}

/// Replaces the active-session snapshot.
///
/// The runtime calls this on sign-in and session restore, and clears it with
/// `None` on sign-out.
pub fn set_active_session(session: Option<AuthSession>) {
    ACTIVE_SESSION.with(|slot| *slot.borrow_mut() = session);
}

/// Returns the current active-session snapshot.
pub fn active_session() -> Option<AuthSession> {
    ACTIVE_SESSION.with(|slot| slot.borrow().clone())
}

/// Returns the bearer token for authenticated calls, when signed in.
pub fn active_access_token() -> Option<String> {
    ACTIVE_SESSION.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|session| session.access_token.clone())
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::auth::UserIdentity;

    use super::*;

    #[test]
    fn snapshot_tracks_set_and_clear() {
        set_active_session(None);
        assert_eq!(active_session(), None);
        assert_eq!(active_access_token(), None);

        let session = AuthSession {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            identity: UserIdentity {
                user_id: "user-admin".to_string(),
                email: "admin@example.com".to_string(),
            },
        };
        set_active_session(Some(session.clone()));
        assert_eq!(active_session(), Some(session));
        assert_eq!(active_access_token(), Some("access-1".to_string()));

        set_active_session(None);
        assert_eq!(active_access_token(), None);
    }
}
