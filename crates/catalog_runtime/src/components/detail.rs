//! Download confirmation dialog for one selected record.

use catalog_contract::{format_count, AppRecord};
use catalog_ui::prelude::*;
use leptos::*;

use super::AppIconThumb;
use crate::{effects, reducer::CatalogAction, runtime_context::use_catalog_runtime};

#[component]
/// Expanded record view with the one real download affordance.
///
/// While the synthetic download delay runs the dialog cannot be dismissed;
/// it closes itself once the browser has been pointed at the package URL.
pub(super) fn DownloadDialog(record: AppRecord) -> impl IntoView {
    let runtime = use_catalog_runtime();
    let state = runtime.state;
    let download_busy = create_memo(move |_| state.with(|state| state.download_busy));

    let dismiss = move || {
        if !download_busy.get_untracked() {
            runtime.dispatch_action(CatalogAction::ClearSelection);
        }
    };

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            dismiss();
        }
    });
    on_cleanup(move || escape_listener.remove());

    let start_download = Callback::new(move |_: ev::MouseEvent| {
        effects::download_selected(runtime);
    });

    view! {
        <Modal
            aria_label=format!("Download {}", record.name)
            layout_class="download-dialog"
            on_dismiss=Callback::new(move |_| dismiss())
        >
            <Stack gap=LayoutGap::Md align=LayoutAlign::Center>
                <IconButton
                    icon=IconName::Close
                    aria_label="Close"
                    layout_class="download-dialog-close"
                    disabled=download_busy
                    on_click=Callback::new(move |_| dismiss())
                />
                <AppIconThumb
                    icon_url=record.icon_url.clone()
                    name=record.name.clone()
                    placeholder_size=IconSize::Lg
                    ui_slot="detail-icon"
                />
                <Heading role=TextRole::Title>{record.name.clone()}</Heading>
                <Cluster gap=LayoutGap::Sm justify=LayoutJustify::Center>
                    <Badge leading_icon=IconName::Package>{record.size.clone()}</Badge>
                    <Badge>{format!("v{}", record.version)}</Badge>
                    <Badge leading_icon=IconName::Download>{format_count(record.downloads)}</Badge>
                </Cluster>
                <Text tone=TextTone::Secondary layout_class="download-dialog-description">
                    {record.description.clone()}
                </Text>
                <Button
                    variant=ButtonVariant::Primary
                    size=ButtonSize::Lg
                    layout_class="download-dialog-action"
                    leading_icon=IconName::Download
                    busy=download_busy
                    on_click=start_download
                >
                    {move || if download_busy.get() { "Downloading..." } else { "Download APK" }}
                </Button>
                <Text role=TextRole::Caption tone=TextTone::Secondary>
                    "Verified and safe to install"
                </Text>
            </Stack>
        </Modal>
    }
}
