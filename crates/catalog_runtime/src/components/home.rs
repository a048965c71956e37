//! Public home page: hero banner plus the three catalog views.

use catalog_contract::{format_count, AppRecord};
use catalog_ui::prelude::*;
use leptos::*;
use leptos_router::use_navigate;

use super::{detail::DownloadDialog, downloads_label, AppIconThumb};
use crate::{
    effects,
    model::{popular_view, recent_view, LoadPhase},
    reducer::CatalogAction,
    runtime_context::use_catalog_runtime,
};

/// Distance one rail paddle press scrolls, roughly one card plus its gap.
const RAIL_SCROLL_STEP_PX: f64 = 320.0;

fn is_activation_key(ev: &web_sys::KeyboardEvent) -> bool {
    matches!(ev.key().as_str(), "Enter" | " " | "Spacebar")
}

#[component]
/// Public catalog page: hero, recent and popular rails, and the full grid.
///
/// Entering the page issues one catalog query; the three views are derived
/// from that single response.
pub fn HomePage() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let state = runtime.state;

    create_effect(move |_| {
        effects::load_catalog(runtime);
    });

    let catalog_phase = create_memo(move |_| state.with(|state| state.catalog_phase));
    let recent = create_memo(move |_| state.with(|state| recent_view(&state.records).to_vec()));
    let popular = create_memo(move |_| state.with(|state| popular_view(&state.records)));
    let all_records = create_memo(move |_| state.with(|state| state.records.clone()));
    let app_count = create_memo(move |_| state.with(|state| state.records.len()));
    let show_admin_link = create_memo(move |_| state.with(|state| state.session.is_admin()));
    let selected = create_memo(move |_| state.with(|state| state.selected.clone()));

    let open_admin = use_navigate();
    let open_admin = Callback::new(move |_: ev::MouseEvent| {
        open_admin("/admin", Default::default());
    });

    view! {
        <div class="home-page">
            <Cluster
                justify=LayoutJustify::End
                padding=LayoutPadding::Sm
                layout_class="home-topbar"
            >
                <Show when=move || show_admin_link.get()>
                    <Button
                        variant=ButtonVariant::Quiet
                        leading_icon=IconName::Shield
                        on_click=open_admin
                    >
                        "Admin Panel"
                    </Button>
                </Show>
            </Cluster>
            <HeroBanner app_count />
            {move || match catalog_phase.get() {
                LoadPhase::Loading => {
                    view! {
                        <div class="catalog-loading">
                            <Spinner size=IconSize::Lg aria_label="Loading catalog" />
                        </div>
                    }
                        .into_view()
                }
                LoadPhase::Failed => ().into_view(),
                LoadPhase::Ready => view! { <CatalogViews recent popular all_records /> }.into_view(),
            }}
            {move || selected.get().map(|record| view! { <DownloadDialog record /> })}
        </div>
    }
}

#[component]
fn HeroBanner(app_count: Memo<usize>) -> impl IntoView {
    view! {
        <Panel
            variant=SurfaceVariant::Muted
            elevation=Elevation::Flat
            padding=LayoutPadding::Lg
            layout_class="home-hero"
            ui_slot="hero"
        >
            <Stack gap=LayoutGap::Lg align=LayoutAlign::Center>
                <Badge tone=TextTone::Accent leading_icon=IconName::Package>"APK Repository"</Badge>
                <Heading layout_class="home-hero-title">"Download Premium Apps"</Heading>
                <Text tone=TextTone::Secondary layout_class="home-hero-tagline">
                    "Your trusted source for Android applications. Download verified APKs safely and securely."
                </Text>
                <Cluster gap=LayoutGap::Md justify=LayoutJustify::Center>
                    <Card padding=LayoutPadding::Sm layout_class="hero-stat">
                        <Cluster gap=LayoutGap::Sm>
                            <Icon icon=IconName::Download />
                            <Stack gap=LayoutGap::None align=LayoutAlign::Start>
                                <Text role=TextRole::Label>
                                    {move || format_count(app_count.get() as i64)}
                                </Text>
                                <Text role=TextRole::Caption tone=TextTone::Secondary>
                                    "Apps Available"
                                </Text>
                            </Stack>
                        </Cluster>
                    </Card>
                    <Card padding=LayoutPadding::Sm layout_class="hero-stat">
                        <Cluster gap=LayoutGap::Sm>
                            <Icon icon=IconName::Shield />
                            <Stack gap=LayoutGap::None align=LayoutAlign::Start>
                                <Text role=TextRole::Label>"Safe"</Text>
                                <Text role=TextRole::Caption tone=TextTone::Secondary>
                                    "Verified APKs"
                                </Text>
                            </Stack>
                        </Cluster>
                    </Card>
                </Cluster>
            </Stack>
        </Panel>
    }
}

#[component]
fn CatalogViews(
    recent: Memo<Vec<AppRecord>>,
    popular: Memo<Vec<AppRecord>>,
    all_records: Memo<Vec<AppRecord>>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !all_records.get().is_empty()
            fallback=|| {
                view! {
                    <EmptyState icon=IconName::Package layout_class="catalog-empty">
                        <Heading role=TextRole::Title>"No apps published yet"</Heading>
                        <Text tone=TextTone::Secondary>"Check back soon for new releases."</Text>
                    </EmptyState>
                }
            }
        >
            <Stack gap=LayoutGap::Lg layout_class="catalog-views">
                <CatalogRail title="Recently Added" records=recent />
                <CatalogRail title="Most Downloaded" records=popular />
                <AllAppsGrid records=all_records />
            </Stack>
        </Show>
    }
}

#[component]
/// One horizontal catalog rail with paddle-button scrolling.
fn CatalogRail(title: &'static str, records: Memo<Vec<AppRecord>>) -> impl IntoView {
    let rail_ref = create_node_ref::<html::Div>();
    let scroll_by = move |step: f64| {
        if let Some(rail) = rail_ref.get_untracked() {
            let options = web_sys::ScrollToOptions::new();
            options.set_left(step);
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            rail.scroll_by_with_scroll_to_options(&options);
        }
    };

    view! {
        <Show when=move || !records.get().is_empty()>
            <section class="catalog-rail">
                <Cluster justify=LayoutJustify::Between layout_class="catalog-rail-header">
                    <Heading role=TextRole::Title>{title}</Heading>
                    <Cluster gap=LayoutGap::Sm>
                        <IconButton
                            icon=IconName::ChevronLeft
                            aria_label=format!("Scroll {title} left")
                            on_click=Callback::new(move |_| scroll_by(-RAIL_SCROLL_STEP_PX))
                        />
                        <IconButton
                            icon=IconName::ChevronRight
                            aria_label=format!("Scroll {title} right")
                            on_click=Callback::new(move |_| scroll_by(RAIL_SCROLL_STEP_PX))
                        />
                    </Cluster>
                </Cluster>
                <Rail node_ref=rail_ref aria_label=title>
                    <For each=move || records.get() key=|record| record.id.clone() let:record>
                        <RailCard record />
                    </For>
                </Rail>
            </section>
        </Show>
    }
}

#[component]
fn RailCard(record: AppRecord) -> impl IntoView {
    let runtime = use_catalog_runtime();
    let selected_record = store_value(record.clone());
    let open_detail = move || {
        runtime.dispatch_action(CatalogAction::SelectRecord {
            record: selected_record.get_value(),
        });
    };

    view! {
        <div
            class="rail-card"
            role="button"
            tabindex="0"
            on:click=move |_| open_detail()
            on:keydown=move |ev| {
                if is_activation_key(&ev) {
                    ev.prevent_default();
                    open_detail();
                }
            }
        >
            <Card layout_class="rail-card-surface">
                <Stack gap=LayoutGap::Sm align=LayoutAlign::Center>
                    <AppIconThumb
                        icon_url=record.icon_url.clone()
                        name=record.name.clone()
                        placeholder_size=IconSize::Lg
                        ui_slot="rail-icon"
                    />
                    <Heading role=TextRole::Label layout_class="rail-card-name">
                        {record.name.clone()}
                    </Heading>
                    <Text tone=TextTone::Secondary layout_class="rail-card-description">
                        {record.description.clone()}
                    </Text>
                    <Cluster gap=LayoutGap::Sm justify=LayoutJustify::Center>
                        <Badge>{record.size.clone()}</Badge>
                        <Badge tone=TextTone::Accent>{format!("v{}", record.version)}</Badge>
                    </Cluster>
                </Stack>
            </Card>
        </div>
    }
}

#[component]
fn AllAppsGrid(records: Memo<Vec<AppRecord>>) -> impl IntoView {
    view! {
        <section class="catalog-grid-section">
            <Stack gap=LayoutGap::Sm align=LayoutAlign::Center layout_class="catalog-grid-header">
                <Heading role=TextRole::Title>"Featured Apps"</Heading>
                <Text tone=TextTone::Secondary>
                    "Browse our collection of verified Android applications"
                </Text>
            </Stack>
            <Grid layout_class="catalog-grid" ui_slot="all-apps">
                <For each=move || records.get() key=|record| record.id.clone() let:record>
                    <GridCard record />
                </For>
            </Grid>
        </section>
    }
}

#[component]
fn GridCard(record: AppRecord) -> impl IntoView {
    let runtime = use_catalog_runtime();
    let selected_record = store_value(record.clone());
    let open_detail = Callback::new(move |_: ev::MouseEvent| {
        runtime.dispatch_action(CatalogAction::SelectRecord {
            record: selected_record.get_value(),
        });
    });

    view! {
        <Card layout_class="grid-card" ui_slot="all-apps-card">
            <Stack gap=LayoutGap::Md>
                <Cluster gap=LayoutGap::Md align=LayoutAlign::Start>
                    <AppIconThumb
                        icon_url=record.icon_url.clone()
                        name=record.name.clone()
                        ui_slot="grid-icon"
                    />
                    <Stack gap=LayoutGap::None align=LayoutAlign::Start>
                        <Heading role=TextRole::Label>{record.name.clone()}</Heading>
                        <Text role=TextRole::Caption tone=TextTone::Secondary>
                            {format!("Version {}", record.version)}
                        </Text>
                    </Stack>
                </Cluster>
                <Text tone=TextTone::Secondary layout_class="grid-card-description">
                    {record.description.clone()}
                </Text>
                <Cluster gap=LayoutGap::Sm>
                    <Badge>{record.size.clone()}</Badge>
                    <Badge leading_icon=IconName::Download>
                        {downloads_label(record.downloads)}
                    </Badge>
                </Cluster>
                <Button
                    variant=ButtonVariant::Primary
                    leading_icon=IconName::Download
                    layout_class="grid-card-download"
                    on_click=open_detail
                >
                    "Download APK"
                </Button>
            </Stack>
        </Card>
    }
}
