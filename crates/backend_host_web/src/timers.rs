//! Timer futures bridged to the browser event loop.

/// Resolves after `duration_ms` milliseconds of wall-clock time.
///
/// Outside the browser the future resolves immediately.
pub async fn sleep_ms(duration_ms: i32) {
    imp::sleep_ms(duration_ms).await;
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use futures::channel::oneshot;
    use wasm_bindgen::{closure::Closure, JsCast};

    pub(super) async fn sleep_ms(duration_ms: i32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (tx, rx) = oneshot::channel::<()>();
        let callback = Closure::once_into_js(move || {
            let _ = tx.send(());
        });
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                duration_ms,
            )
            .is_err()
        {
            return;
        }
        let _ = rx.await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    pub(super) async fn sleep_ms(_duration_ms: i32) {}
}
