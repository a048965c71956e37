use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use super::{HttpResponse, RequestBody};

pub async fn send(
    method: &str,
    url: &str,
    headers: &[(String, String)],
    body: Option<RequestBody<'_>>,
) -> Result<HttpResponse, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;

    let request_headers =
        Headers::new().map_err(|err| format!("failed to build headers: {err:?}"))?;
    for (name, value) in headers {
        request_headers
            .set(name, value)
            .map_err(|err| format!("failed to set header {name}: {err:?}"))?;
    }

    let init = RequestInit::new();
    init.set_method(method);
    init.set_headers(request_headers.as_ref());
    match body {
        Some(RequestBody::Json(text)) => {
            init.set_body(&wasm_bindgen::JsValue::from_str(&text));
        }
        Some(RequestBody::Bytes(bytes)) => {
            let array = Uint8Array::new_with_length(bytes.len() as u32);
            array.copy_from(bytes);
            init.set_body(array.as_ref());
        }
        None => {}
    }

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|err| format!("failed to build request: {err:?}"))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| format!("network request failed: {err:?}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch returned a non-response value".to_string())?;

    let status = response.status();
    let text = response
        .text()
        .map_err(|err| format!("failed to open response body: {err:?}"))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|err| format!("failed to read response body: {err:?}"))?
        .as_string()
        .unwrap_or_default();

    Ok(HttpResponse { status, body })
}
