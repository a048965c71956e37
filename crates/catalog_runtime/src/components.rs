//! Page composition for the public catalog and admin surfaces.

mod admin;
mod auth;
mod detail;
mod home;
mod notice_shelf;

use catalog_contract::{format_count, AppRecord};
use catalog_ui::prelude::*;
use leptos::*;

pub use self::{
    admin::AdminPage, auth::SignInPage, home::HomePage, notice_shelf::NoticeShelf,
};

fn downloads_label(downloads: i64) -> String {
    format!("{} downloads", format_count(downloads))
}

fn admin_row_meta(record: &AppRecord) -> String {
    format!(
        "v{} • {} • {}",
        record.version,
        record.size,
        downloads_label(record.downloads)
    )
}

#[component]
/// App icon with the shared handset placeholder when no icon was uploaded.
fn AppIconThumb(
    /// Icon blob URL, when the record carries one.
    icon_url: Option<String>,
    /// App name, used as the image alternative text.
    name: String,
    #[prop(default = IconSize::Md)] placeholder_size: IconSize,
    #[prop(optional)] ui_slot: Option<&'static str>,
) -> impl IntoView {
    view! {
        <span class="app-icon-thumb" data-ui-slot=ui_slot>
            {match icon_url {
                Some(url) => view! { <img src=url alt=name loading="lazy" /> }.into_view(),
                None => {
                    view! { <Icon icon=IconName::Smartphone size=placeholder_size /> }.into_view()
                }
            }}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record() -> AppRecord {
        AppRecord {
            id: "rec-1".to_string(),
            name: "Notes".to_string(),
            version: "1.0.0".to_string(),
            description: "No description".to_string(),
            size: "2.00 MB".to_string(),
            downloads: 12_500,
            apk_url: "https://blobs.example/apk/rec-1.apk".to_string(),
            icon_url: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn downloads_label_groups_thousands() {
        assert_eq!(downloads_label(0), "0 downloads");
        assert_eq!(downloads_label(12_500), "12,500 downloads");
    }

    #[test]
    fn admin_row_meta_joins_version_size_and_downloads() {
        assert_eq!(
            admin_row_meta(&record()),
            "v1.0.0 • 2.00 MB • 12,500 downloads"
        );
    }
}
