//! Page-level navigation out of the single-page app.

/// Points the browser at `url`, replacing the current page.
///
/// Used for package downloads, which are plain storage URLs rather than
/// in-app routes.
pub fn navigate_to_url(url: &str) -> Result<(), String> {
    imp::navigate_to_url(url)
}

#[cfg(target_arch = "wasm32")]
mod imp {
    pub(super) fn navigate_to_url(url: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        window
            .location()
            .set_href(url)
            .map_err(|err| format!("navigation failed: {err:?}"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    pub(super) fn navigate_to_url(_url: &str) -> Result<(), String> {
        Err("page navigation is only available when compiled for wasm32".to_string())
    }
}
