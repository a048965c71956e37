use super::{HttpResponse, RequestBody};

pub async fn send(
    _method: &str,
    _url: &str,
    _headers: &[(String, String)],
    _body: Option<RequestBody<'_>>,
) -> Result<HttpResponse, String> {
    Err("backend HTTP transport is only available when compiled for wasm32".to_string())
}
