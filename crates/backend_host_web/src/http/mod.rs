//! Shared fetch transport for the hosted-backend adapters.
//!
//! This module routes requests to target-specific implementations while
//! preserving a uniform API for the adapter modules, and owns the header and
//! error conventions every backend endpoint shares.

use backend_host::BackendConfig;

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

/// Request payload variants accepted by the transport.
pub(crate) enum RequestBody<'a> {
    /// JSON text body.
    Json(String),
    /// Raw bytes body, used by bucket uploads.
    Bytes(&'a [u8]),
}

/// Response status and body text as read off the wire.
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the response body, or a contextual error naming the operation,
    /// status, and backend error detail for non-2xx responses.
    pub(crate) fn into_body(self, context: &str) -> Result<String, String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(format!(
                "{context} failed (HTTP {}): {}",
                self.status,
                error_detail(&self.body)
            ))
        }
    }

    /// Returns the response body, or the bare backend error detail for
    /// non-2xx responses.
    ///
    /// Sign-in uses this so the notice shows the backend's own message
    /// ("Invalid login credentials") rather than a transport wrapper.
    pub(crate) fn into_body_or_detail(self) -> Result<String, String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(error_detail(&self.body))
        }
    }
}

/// Sends one request and reads the response body as text.
pub(crate) async fn send(
    method: &str,
    url: &str,
    headers: &[(String, String)],
    body: Option<RequestBody<'_>>,
) -> Result<HttpResponse, String> {
    imp::send(method, url, headers, body).await
}

/// Base headers for backend calls: the project key plus a bearer token, the
/// active session's when signed in and the publishable key otherwise.
pub(crate) fn authorized_headers(config: &BackendConfig) -> Vec<(String, String)> {
    let bearer =
        backend_host::active_access_token().unwrap_or_else(|| config.publishable_key.clone());
    vec![
        ("apikey".to_string(), config.publishable_key.clone()),
        ("Authorization".to_string(), format!("Bearer {bearer}")),
    ]
}

/// Extracts the most specific human-readable message from a backend error
/// payload, falling back to the raw body.
pub(crate) fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error_description", "msg", "error"] {
            if let Some(text) = value.get(key).and_then(|entry| entry.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no error detail".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use backend_host::{set_active_session, AuthSession, UserIdentity};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn error_detail_prefers_structured_messages() {
        assert_eq!(
            error_detail(r#"{"message":"duplicate key value"}"#),
            "duplicate key value"
        );
        assert_eq!(
            error_detail(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(
            error_detail(r#"{"code":400,"msg":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(error_detail("  gateway timeout  "), "gateway timeout");
        assert_eq!(error_detail(""), "no error detail");
    }

    #[test]
    fn response_errors_carry_context_and_status() {
        let response = HttpResponse {
            status: 403,
            body: r#"{"message":"permission denied"}"#.to_string(),
        };
        assert_eq!(
            response.into_body("record insert"),
            Err("record insert failed (HTTP 403): permission denied".to_string())
        );

        let response = HttpResponse {
            status: 200,
            body: "[]".to_string(),
        };
        assert_eq!(response.into_body("record list"), Ok("[]".to_string()));
    }

    #[test]
    fn bearer_follows_the_active_session() {
        let config = BackendConfig::new("https://project.example.co", "pk-test");

        set_active_session(None);
        let headers = authorized_headers(&config);
        assert_eq!(
            headers,
            vec![
                ("apikey".to_string(), "pk-test".to_string()),
                ("Authorization".to_string(), "Bearer pk-test".to_string()),
            ]
        );

        set_active_session(Some(AuthSession {
            access_token: "access-1".to_string(),
            refresh_token: String::new(),
            identity: UserIdentity {
                user_id: "user-admin".to_string(),
                email: "admin@example.com".to_string(),
            },
        }));
        let headers = authorized_headers(&config);
        assert_eq!(headers[1].1, "Bearer access-1");
        set_active_session(None);
    }
}
