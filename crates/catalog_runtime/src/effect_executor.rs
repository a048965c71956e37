//! Explicit effect-queue executor for reducer-emitted side effects.

use leptos::*;

use crate::{effects, runtime_context::CatalogRuntimeContext};

/// Installs the effect executor that drains reducer-emitted effects in order.
pub fn install(runtime: CatalogRuntimeContext) {
    // Clear the current queue before processing so nested dispatches enqueue a
    // fresh batch instead of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            effects::run_catalog_effect(runtime, effect);
        }
    });
}
