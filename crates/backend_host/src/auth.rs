//! Auth service contracts and adapters for password sign-in, sign-out, and
//! the admin-role probe.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Durable storage key under which the browser adapter persists the active
/// [`AuthSession`] between page loads.
pub const AUTH_SESSION_STORAGE_KEY: &str = "catalog.auth.session";

/// Signed-in user identity as the auth backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Backend-assigned user identifier.
    pub user_id: String,
    /// Sign-in email address.
    pub email: String,
}

/// One authenticated session: bearer tokens plus the identity they belong to.
///
/// Restored sessions reuse the stored access token as-is; refresh flows are
/// not part of this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token attached to authenticated backend calls.
    pub access_token: String,
    /// Refresh token persisted alongside the access token.
    #[serde(default)]
    pub refresh_token: String,
    /// Identity the tokens were issued for.
    pub identity: UserIdentity,
}

/// Object-safe boxed future used by [`AuthService`] async methods.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for session lifecycle against the auth backend.
pub trait AuthService {
    /// Exchanges email and password for an authenticated session.
    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthSession, String>>;

    /// Revokes the active session on the backend and forgets any persisted
    /// copy.
    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>>;

    /// Restores a previously persisted session, if one survives in durable
    /// storage.
    fn restore_session<'a>(&'a self) -> AuthFuture<'a, Result<Option<AuthSession>, String>>;

    /// Probes the role table for whether `user_id` holds the admin role.
    fn load_is_admin<'a>(&'a self, user_id: &'a str) -> AuthFuture<'a, Result<bool, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op auth service for unconfigured compositions and baseline tests.
pub struct NoopAuthService;

impl AuthService for NoopAuthService {
    fn sign_in<'a>(
        &'a self,
        _email: &'a str,
        _password: &'a str,
    ) -> AuthFuture<'a, Result<AuthSession, String>> {
        Box::pin(async { Err("auth service unavailable: sign_in".to_string()) })
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn restore_session<'a>(&'a self) -> AuthFuture<'a, Result<Option<AuthSession>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn load_is_admin<'a>(&'a self, _user_id: &'a str) -> AuthFuture<'a, Result<bool, String>> {
        Box::pin(async { Ok(false) })
    }
}

/// One configured account recognized by [`MemoryAuthService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAccount {
    /// Sign-in email.
    pub email: String,
    /// Sign-in password.
    pub password: String,
    /// Backend-style user identifier.
    pub user_id: String,
    /// Whether the role table marks this account admin.
    pub admin: bool,
}

impl MemoryAccount {
    /// Account holding the admin role.
    pub fn admin(email: &str, password: &str, user_id: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            user_id: user_id.to_string(),
            admin: true,
        }
    }

    /// Account without the admin role.
    pub fn member(email: &str, password: &str, user_id: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            user_id: user_id.to_string(),
            admin: false,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryAuthState {
    accounts: Vec<MemoryAccount>,
    persisted: Option<AuthSession>,
    minted: u64,
}

#[derive(Debug, Clone, Default)]
/// In-memory auth service used by runtime tests and the end-to-end harness.
pub struct MemoryAuthService {
    inner: Rc<RefCell<MemoryAuthState>>,
}

impl MemoryAuthService {
    /// Service recognizing the given accounts.
    pub fn with_accounts(accounts: impl IntoIterator<Item = MemoryAccount>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryAuthState {
                accounts: accounts.into_iter().collect(),
                persisted: None,
                minted: 0,
            })),
        }
    }

}

impl AuthService for MemoryAuthService {
    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthSession, String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            let Some(account) = state
                .accounts
                .iter()
                .find(|account| account.email == email && account.password == password)
                .cloned()
            else {
                return Err("Invalid login credentials".to_string());
            };
            state.minted += 1;
            let session = AuthSession {
                access_token: format!("access-{}", state.minted),
                refresh_token: format!("refresh-{}", state.minted),
                identity: UserIdentity {
                    user_id: account.user_id,
                    email: account.email,
                },
            };
            state.persisted = Some(session.clone());
            Ok(session)
        })
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().persisted = None;
            Ok(())
        })
    }

    fn restore_session<'a>(&'a self) -> AuthFuture<'a, Result<Option<AuthSession>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().persisted.clone()) })
    }

    fn load_is_admin<'a>(&'a self, user_id: &'a str) -> AuthFuture<'a, Result<bool, String>> {
        Box::pin(async move {
            Ok(self
                .inner
                .borrow()
                .accounts
                .iter()
                .any(|account| account.user_id == user_id && account.admin))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    fn service() -> MemoryAuthService {
        MemoryAuthService::with_accounts([
            MemoryAccount::admin("admin@example.com", "hunter2", "user-admin"),
            MemoryAccount::member("viewer@example.com", "hunter2", "user-viewer"),
        ])
    }

    #[test]
    fn sign_in_mints_sessions_for_known_credentials() {
        let auth = service();
        let auth_obj: &dyn AuthService = &auth;

        let session =
            block_on(auth_obj.sign_in("admin@example.com", "hunter2")).expect("sign in");
        assert_eq!(session.identity.user_id, "user-admin");
        assert_eq!(session.identity.email, "admin@example.com");
        assert_eq!(session.access_token, "access-1");

        let err = block_on(auth_obj.sign_in("admin@example.com", "wrong")).expect_err("reject");
        assert_eq!(err, "Invalid login credentials");
    }

    #[test]
    fn restore_returns_the_last_signed_in_session_until_sign_out() {
        let auth = service();
        let auth_obj: &dyn AuthService = &auth;

        assert_eq!(block_on(auth_obj.restore_session()).expect("restore"), None);

        let session =
            block_on(auth_obj.sign_in("viewer@example.com", "hunter2")).expect("sign in");
        assert_eq!(
            block_on(auth_obj.restore_session()).expect("restore"),
            Some(session)
        );

        block_on(auth_obj.sign_out()).expect("sign out");
        assert_eq!(block_on(auth_obj.restore_session()).expect("restore"), None);
    }

    #[test]
    fn admin_probe_distinguishes_roles() {
        let auth = service();
        let auth_obj: &dyn AuthService = &auth;
        assert!(block_on(auth_obj.load_is_admin("user-admin")).expect("probe"));
        assert!(!block_on(auth_obj.load_is_admin("user-viewer")).expect("probe"));
        assert!(!block_on(auth_obj.load_is_admin("user-unknown")).expect("probe"));
    }

    #[test]
    fn noop_auth_refuses_sign_in_and_restores_nothing() {
        let auth = NoopAuthService;
        let auth_obj: &dyn AuthService = &auth;
        assert!(block_on(auth_obj.sign_in("a@b.c", "pw")).is_err());
        assert_eq!(block_on(auth_obj.restore_session()).expect("restore"), None);
        assert!(!block_on(auth_obj.load_is_admin("user")).expect("probe"));
    }

    #[test]
    fn auth_session_round_trips_through_json() {
        let session = AuthSession {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            identity: UserIdentity {
                user_id: "user-admin".to_string(),
                email: "admin@example.com".to_string(),
            },
        };
        let raw = serde_json::to_string(&session).expect("serialize");
        let parsed: AuthSession = serde_json::from_str(&raw).expect("deserialize");
        assert_eq!(parsed, session);
    }
}
