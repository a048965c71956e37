//! Auth adapter: password sign-in, sign-out, role probe, and session
//! persistence across page loads.

use backend_host::{
    AuthFuture, AuthService, AuthSession, BackendConfig, UserIdentity, AUTH_SESSION_STORAGE_KEY,
};
use serde::Deserialize;

use crate::http::{authorized_headers, send, RequestBody};

#[derive(Debug, Clone)]
/// Browser auth service speaking the hosted backend's auth endpoints, with
/// the active session persisted in `window.localStorage`.
pub struct WebAuthService {
    config: BackendConfig,
}

impl WebAuthService {
    /// Adapter for one configured backend project.
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    fn json_headers(&self) -> Vec<(String, String)> {
        let mut headers = authorized_headers(&self.config);
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        headers
    }
}

impl AuthService for WebAuthService {
    fn sign_in<'a>(
        &'a self,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Result<AuthSession, String>> {
        Box::pin(async move {
            let payload = serde_json::json!({ "email": email, "password": password }).to_string();
            let response = send(
                "POST",
                &self.config.auth_url("token?grant_type=password"),
                &self.json_headers(),
                Some(RequestBody::Json(payload)),
            )
            .await?;
            let session = parse_auth_session(&response.into_body_or_detail()?)?;
            persist_session(&session)?;
            Ok(session)
        })
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            // Scrub the persisted copy before the network call so a failed
            // revoke still leaves the browser signed out.
            forget_persisted_session()?;
            let response = send(
                "POST",
                &self.config.auth_url("logout"),
                &authorized_headers(&self.config),
                None,
            )
            .await?;
            response.into_body("sign-out")?;
            Ok(())
        })
    }

    fn restore_session<'a>(&'a self) -> AuthFuture<'a, Result<Option<AuthSession>, String>> {
        Box::pin(async move { Ok(load_persisted_session()) })
    }

    fn load_is_admin<'a>(&'a self, user_id: &'a str) -> AuthFuture<'a, Result<bool, String>> {
        Box::pin(async move {
            let url = format!(
                "{}?select=role&user_id=eq.{user_id}&role=eq.admin",
                self.config.rest_url(&self.config.roles_table)
            );
            let response = send("GET", &url, &authorized_headers(&self.config), None).await?;
            parse_role_is_admin(&response.into_body("role probe")?)
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: String,
}

fn parse_auth_session(body: &str) -> Result<AuthSession, String> {
    let token: TokenResponse =
        serde_json::from_str(body).map_err(|err| format!("unexpected token payload: {err}"))?;
    Ok(AuthSession {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        identity: UserIdentity {
            user_id: token.user.id,
            email: token.user.email,
        },
    })
}

fn parse_role_is_admin(body: &str) -> Result<bool, String> {
    #[derive(Deserialize)]
    struct RoleRow {
        role: String,
    }
    let rows: Vec<RoleRow> =
        serde_json::from_str(body).map_err(|err| format!("unexpected role payload: {err}"))?;
    Ok(rows.first().is_some_and(|row| row.role == "admin"))
}

fn persist_session(session: &AuthSession) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let raw = serde_json::to_string(session).map_err(|err| err.to_string())?;
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .set_item(AUTH_SESSION_STORAGE_KEY, &raw)
            .map_err(|err| format!("localStorage set_item failed: {err:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = session;
        Ok(())
    }
}

fn load_persisted_session() -> Option<AuthSession> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        let raw = storage.get_item(AUTH_SESSION_STORAGE_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

fn forget_persisted_session() -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| "localStorage unavailable".to_string())?;
        storage
            .remove_item(AUTH_SESSION_STORAGE_KEY)
            .map_err(|err| format!("localStorage remove_item failed: {err:?}"))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn token_payload_parses_into_a_session() {
        let session = parse_auth_session(
            r#"{
                "access_token": "jwt-access",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "jwt-refresh",
                "user": { "id": "user-1", "email": "admin@example.com", "role": "authenticated" }
            }"#,
        )
        .expect("parse");
        assert_eq!(session.access_token, "jwt-access");
        assert_eq!(session.refresh_token, "jwt-refresh");
        assert_eq!(
            session.identity,
            UserIdentity {
                user_id: "user-1".to_string(),
                email: "admin@example.com".to_string(),
            }
        );
    }

    #[test]
    fn token_payload_without_a_user_is_rejected() {
        assert!(parse_auth_session(r#"{"access_token":"jwt"}"#).is_err());
    }

    #[test]
    fn role_rows_grant_admin_only_for_the_admin_role() {
        assert!(parse_role_is_admin(r#"[{"role":"admin"}]"#).expect("parse"));
        assert!(!parse_role_is_admin(r#"[{"role":"moderator"}]"#).expect("parse"));
        assert!(!parse_role_is_admin("[]").expect("parse"));
    }
}
