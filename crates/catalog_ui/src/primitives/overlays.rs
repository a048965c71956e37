use super::*;

#[component]
/// Shared modal dialog with a dismissable backdrop.
///
/// Pointer-downs on the backdrop fire `on_dismiss`; the dialog surface swallows
/// them so interacting with the content never closes the overlay.
pub fn Modal(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(default = Elevation::Overlay)] elevation: Elevation,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class="ui-modal-backdrop"
            data-ui-primitive="true"
            data-ui-kind="modal-backdrop"
            on:mousedown=move |_| {
                if let Some(on_dismiss) = on_dismiss.as_ref() {
                    on_dismiss.call(());
                }
            }
        >
            <div
                class=merge_layout_class("ui-modal", layout_class)
                role="dialog"
                aria-modal="true"
                aria-label=aria_label
                data-ui-primitive="true"
                data-ui-kind="modal"
                data-ui-slot=ui_slot
                data-ui-elevation=elevation.token()
                on:mousedown=move |ev| ev.stop_propagation()
            >
                {children()}
            </div>
        </div>
    }
}

#[component]
/// Transient notice surface with an optional dismiss affordance.
pub fn Toast(
    #[prop(default = TextTone::Primary)] tone: TextTone,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional)] on_dismiss: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-toast", layout_class)
            role="status"
            data-ui-primitive="true"
            data-ui-kind="toast"
            data-ui-slot=ui_slot
            data-ui-tone=tone.token()
        >
            <span data-ui-slot="copy">{children()}</span>
            {on_dismiss.map(|on_dismiss| {
                view! {
                    <IconButton
                        icon=IconName::Close
                        size=ButtonSize::Sm
                        aria_label="Dismiss notice"
                        ui_slot="dismiss"
                        on_click=on_dismiss
                    />
                }
            })}
        </div>
    }
}
