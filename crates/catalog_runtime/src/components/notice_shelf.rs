//! Corner overlay rendering the runtime's transient notices.

use catalog_ui::prelude::*;
use leptos::*;

use crate::{
    notices::NoticeLevel,
    reducer::CatalogAction,
    runtime_context::use_catalog_runtime,
};

fn notice_tone(level: NoticeLevel) -> TextTone {
    match level {
        NoticeLevel::Success => TextTone::Success,
        NoticeLevel::Error => TextTone::Danger,
    }
}

#[component]
/// Stacked toast layer; mounted once above the router so notices survive
/// navigation.
pub fn NoticeShelf() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let notices = create_memo(move |_| runtime.state.with(|state| state.notices.clone()));

    view! {
        <div class="notice-shelf" aria-live="polite">
            <For each=move || notices.get() key=|notice| notice.id let:notice>
                <Toast
                    tone=notice_tone(notice.level)
                    on_dismiss=Callback::new(move |_| {
                        runtime.dispatch_action(CatalogAction::DismissNotice { id: notice.id });
                    })
                >
                    {notice.message.clone()}
                </Toast>
            </For>
        </div>
    }
}
