//! Runtime provider and context wiring for the catalog app.
//!
//! This module owns the long-lived reducer container, the effect queue, and
//! the boot-time session restore. UI composition stays in
//! [`crate::components`].

use backend_host::BackendServices;
use leptos::*;

use crate::{
    effect_executor, effects,
    model::CatalogState,
    reducer::{reduce_catalog, CatalogAction, CatalogEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading catalog state and dispatching [`CatalogAction`]
/// values.
pub struct CatalogRuntimeContext {
    /// Backend service bundle used by runtime effects.
    pub backend: StoredValue<BackendServices>,
    /// Reactive catalog state signal.
    pub state: RwSignal<CatalogState>,
    /// Queue of effects emitted by the reducer and processed by the runtime.
    pub effects: RwSignal<Vec<CatalogEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<CatalogAction>,
}

impl CatalogRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: CatalogAction) {
        self.dispatch.call(action);
    }

    /// Backend service bundle for effect execution.
    pub fn backend(&self) -> BackendServices {
        self.backend.get_value()
    }
}

#[component]
/// Provides [`CatalogRuntimeContext`] to descendant components and restores
/// the persisted session.
pub fn CatalogProvider(
    /// Injected backend service bundle assembled by the entry layer.
    backend: BackendServices,
    children: Children,
) -> impl IntoView {
    let backend = store_value(backend);
    let state = create_rw_signal(CatalogState::default());
    let effects = create_rw_signal(Vec::<CatalogEffect>::new());

    let dispatch = Callback::new(move |action: CatalogAction| {
        let mut catalog = state.get_untracked();
        let previous = catalog.clone();

        match reduce_catalog(&mut catalog, action) {
            Ok(new_effects) => {
                if catalog != previous {
                    state.set(catalog);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("catalog reducer error: {err}"),
        }
    });

    let runtime = CatalogRuntimeContext {
        backend,
        state,
        effects,
        dispatch,
    };

    provide_context(runtime);

    effect_executor::install(runtime);
    install_boot_hydration(runtime);

    children().into_view()
}

fn install_boot_hydration(runtime: CatalogRuntimeContext) {
    create_effect(move |_| {
        effects::restore_session(runtime);
    });
}

/// Returns the current [`CatalogRuntimeContext`].
///
/// # Panics
///
/// Panics when called outside a [`CatalogProvider`] subtree.
pub fn use_catalog_runtime() -> CatalogRuntimeContext {
    use_context::<CatalogRuntimeContext>().expect("CatalogRuntimeContext not provided")
}
