//! Admin panel: session gate, upload form, record list, and the edit and
//! delete dialogs.

use catalog_contract::{validate_upload, AppRecord, AppRecordPatch, UploadFields};
use catalog_ui::prelude::*;
use leptos::*;
use leptos_router::use_navigate;

use super::{admin_row_meta, AppIconThumb};
use crate::{
    effects::{self, UploadSubmission},
    model::{AdminRole, LoadPhase, SessionState},
    notices::NoticeLevel,
    reducer::CatalogAction,
    runtime_context::use_catalog_runtime,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Flattened session posture the admin route renders from.
enum AdminGate {
    Resolving,
    SignedOut,
    RoleUnknown,
    Member,
    Admin,
}

impl AdminGate {
    fn from_session(session: &SessionState) -> Self {
        match session {
            SessionState::Resolving => Self::Resolving,
            SessionState::SignedOut => Self::SignedOut,
            SessionState::SignedIn(active) => match active.role {
                AdminRole::Unknown => Self::RoleUnknown,
                AdminRole::Member => Self::Member,
                AdminRole::Admin => Self::Admin,
            },
        }
    }
}

#[component]
/// Admin route. Resolves the session gate before any admin data loads:
/// signed-out visitors are sent to the sign-in page, signed-in accounts
/// without the admin role get an access notice.
pub fn AdminPage() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let state = runtime.state;

    let gate = create_memo(move |_| state.with(|state| AdminGate::from_session(&state.session)));

    let redirect = use_navigate();
    create_effect(move |_| {
        if gate.get() == AdminGate::SignedOut {
            redirect("/auth", Default::default());
        }
    });

    let is_admin = create_memo(move |_| state.with(|state| state.session.is_admin()));
    create_effect(move |_| {
        if is_admin.get() {
            effects::load_admin_list(runtime);
        }
    });

    view! {
        <div class="admin-page">
            {move || match gate.get() {
                AdminGate::Resolving | AdminGate::SignedOut | AdminGate::RoleUnknown => {
                    view! {
                        <div class="admin-gate-loading">
                            <Spinner size=IconSize::Lg aria_label="Checking access" />
                        </div>
                    }
                        .into_view()
                }
                AdminGate::Member => view! { <AccessNotice /> }.into_view(),
                AdminGate::Admin => view! { <AdminPanel /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn AccessNotice() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let go_home = use_navigate();
    let go_home = Callback::new(move |_: ev::MouseEvent| go_home("/", Default::default()));
    let sign_out = Callback::new(move |_: ev::MouseEvent| effects::sign_out(runtime));

    view! {
        <Panel layout_class="admin-access-notice" aria_label="Access restricted">
            <EmptyState icon=IconName::Shield>
                <Heading role=TextRole::Title>"Admin access required"</Heading>
                <Text tone=TextTone::Secondary>
                    "This account is signed in but does not hold the admin role."
                </Text>
                <Cluster gap=LayoutGap::Sm justify=LayoutJustify::Center>
                    <Button leading_icon=IconName::Home on_click=go_home>"Home"</Button>
                    <Button leading_icon=IconName::LogOut on_click=sign_out>"Logout"</Button>
                </Cluster>
            </EmptyState>
        </Panel>
    }
}

#[component]
fn AdminPanel() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let state = runtime.state;
    let edit_target = create_memo(move |_| state.with(|state| state.edit_target.clone()));
    let delete_target = create_memo(move |_| state.with(|state| state.delete_target.clone()));

    view! {
        <AdminHeader />
        <div class="admin-content">
            <UploadForm />
            <AdminList />
        </div>
        {move || edit_target.get().map(|record| view! { <EditDialog record /> })}
        {move || delete_target.get().map(|record| view! { <DeleteDialog record /> })}
    }
}

#[component]
fn AdminHeader() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let state = runtime.state;
    let account_email = create_memo(move |_| {
        state.with(|state| {
            state
                .session
                .identity()
                .map(|identity| identity.email.clone())
                .unwrap_or_default()
        })
    });
    let go_home = use_navigate();
    let go_home = Callback::new(move |_: ev::MouseEvent| go_home("/", Default::default()));
    let sign_out = Callback::new(move |_: ev::MouseEvent| effects::sign_out(runtime));

    view! {
        <header class="admin-header">
            <Cluster justify=LayoutJustify::Between padding=LayoutPadding::Sm>
                <Cluster gap=LayoutGap::Sm>
                    <Icon icon=IconName::Package size=IconSize::Lg />
                    <Heading role=TextRole::Title>"Admin Panel"</Heading>
                    <Badge tone=TextTone::Accent leading_icon=IconName::Shield>"Admin"</Badge>
                </Cluster>
                <Cluster gap=LayoutGap::Sm>
                    <Text role=TextRole::Caption tone=TextTone::Secondary>
                        {move || account_email.get()}
                    </Text>
                    <Button variant=ButtonVariant::Quiet leading_icon=IconName::Home on_click=go_home>
                        "Home"
                    </Button>
                    <Button
                        variant=ButtonVariant::Quiet
                        leading_icon=IconName::LogOut
                        on_click=sign_out
                    >
                        "Logout"
                    </Button>
                </Cluster>
            </Cluster>
        </header>
    }
}

#[component]
/// Upload form. Validation runs before any network call; the fields and file
/// pickers reset only after a completed upload, so a failed submission keeps
/// everything the admin typed.
fn UploadForm() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let state = runtime.state;

    let name = create_rw_signal(String::new());
    let version = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let package_input = create_node_ref::<html::Input>();
    let icon_input = create_node_ref::<html::Input>();

    let upload_busy = create_memo(move |_| state.with(|state| state.upload_busy));
    let uploads_completed = create_memo(move |_| state.with(|state| state.uploads_completed));

    create_effect(move |previous: Option<u64>| {
        let completed = uploads_completed.get();
        if previous.is_some_and(|previous| previous != completed) {
            name.set(String::new());
            version.set(String::new());
            description.set(String::new());
            if let Some(input) = package_input.get_untracked() {
                input.set_value("");
            }
            if let Some(input) = icon_input.get_untracked() {
                input.set_value("");
            }
        }
        completed
    });

    let submit = Callback::new(move |_: ev::MouseEvent| {
        let fields = UploadFields {
            name: name.get_untracked(),
            version: version.get_untracked(),
            description: description.get_untracked(),
        };
        let package_file = package_input
            .get_untracked()
            .and_then(|input| backend_host_web::selected_file(&input));
        if let Err(err) = validate_upload(&fields, package_file.is_some()) {
            runtime.dispatch_action(CatalogAction::PushNotice {
                level: NoticeLevel::Error,
                message: err.to_string(),
            });
            return;
        }
        let Some(package_file) = package_file else {
            return;
        };
        let icon_file = icon_input
            .get_untracked()
            .and_then(|input| backend_host_web::selected_file(&input))
            .filter(|file| file.size() > 0.0);

        effects::submit_upload(
            runtime,
            UploadSubmission {
                fields,
                package_file,
                icon_file,
            },
        );
    });

    view! {
        <Panel layout_class="upload-form" aria_label="Upload new app">
            <Stack gap=LayoutGap::Md>
                <Cluster gap=LayoutGap::Sm>
                    <Icon icon=IconName::Upload />
                    <Heading role=TextRole::Title>"Upload New App"</Heading>
                </Cluster>
                <FieldGroup title="App name *">
                    <TextField
                        placeholder="My App"
                        value=name
                        disabled=upload_busy
                        on_input=Callback::new(move |ev| name.set(event_target_value(&ev)))
                    />
                </FieldGroup>
                <FieldGroup title="Version *">
                    <TextField
                        placeholder="1.0.0"
                        value=version
                        disabled=upload_busy
                        on_input=Callback::new(move |ev| version.set(event_target_value(&ev)))
                    />
                </FieldGroup>
                <FieldGroup title="Description">
                    <TextArea
                        placeholder="What does this app do?"
                        rows=4
                        value=description
                        disabled=upload_busy
                        on_input=Callback::new(move |ev| description.set(event_target_value(&ev)))
                    />
                </FieldGroup>
                <FieldGroup title="APK file *">
                    <FileField accept=".apk" node_ref=package_input disabled=upload_busy />
                </FieldGroup>
                <FieldGroup title="Icon" description="Optional">
                    <FileField accept="image/*" node_ref=icon_input disabled=upload_busy />
                </FieldGroup>
                <Button
                    variant=ButtonVariant::Primary
                    leading_icon=IconName::Upload
                    busy=upload_busy
                    on_click=submit
                >
                    {move || if upload_busy.get() { "Uploading..." } else { "Upload App" }}
                </Button>
            </Stack>
        </Panel>
    }
}

#[component]
fn AdminList() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let state = runtime.state;
    let admin_phase = create_memo(move |_| state.with(|state| state.admin_phase));
    let admin_records = create_memo(move |_| state.with(|state| state.admin_records.clone()));
    let record_count = create_memo(move |_| state.with(|state| state.admin_records.len()));

    view! {
        <Panel layout_class="admin-list" aria_label="All apps">
            <Stack gap=LayoutGap::Md>
                <Heading role=TextRole::Title>
                    {move || format!("All Apps ({})", record_count.get())}
                </Heading>
                {move || match admin_phase.get() {
                    LoadPhase::Loading => {
                        view! {
                            <div class="admin-list-loading">
                                <Spinner aria_label="Loading app list" />
                            </div>
                        }
                            .into_view()
                    }
                    LoadPhase::Failed => ().into_view(),
                    LoadPhase::Ready => view! { <AdminRows records=admin_records /> }.into_view(),
                }}
            </Stack>
        </Panel>
    }
}

#[component]
fn AdminRows(records: Memo<Vec<AppRecord>>) -> impl IntoView {
    view! {
        <Show
            when=move || !records.get().is_empty()
            fallback=|| {
                view! {
                    <EmptyState icon=IconName::Package>
                        <Text tone=TextTone::Secondary>
                            "No apps uploaded yet. Use the form to publish the first one."
                        </Text>
                    </EmptyState>
                }
            }
        >
            <Stack gap=LayoutGap::Sm>
                <For each=move || records.get() key=|record| record.id.clone() let:record>
                    <AdminRow record />
                </For>
            </Stack>
        </Show>
    }
}

#[component]
fn AdminRow(record: AppRecord) -> impl IntoView {
    let runtime = use_catalog_runtime();
    let row = store_value(record.clone());
    let open_edit = Callback::new(move |_: ev::MouseEvent| {
        runtime.dispatch_action(CatalogAction::OpenEdit {
            record: row.get_value(),
        });
    });
    let open_delete = Callback::new(move |_: ev::MouseEvent| {
        runtime.dispatch_action(CatalogAction::OpenDeleteConfirm {
            record: row.get_value(),
        });
    });
    let row_meta = admin_row_meta(&record);
    let edit_label = format!("Edit {}", record.name);
    let delete_label = format!("Delete {}", record.name);

    view! {
        <Card
            variant=SurfaceVariant::Muted
            elevation=Elevation::Flat
            padding=LayoutPadding::Sm
            layout_class="admin-row"
        >
            <Cluster justify=LayoutJustify::Between>
                <Cluster gap=LayoutGap::Sm>
                    <AppIconThumb
                        icon_url=record.icon_url.clone()
                        name=record.name.clone()
                        ui_slot="admin-row-icon"
                    />
                    <Stack gap=LayoutGap::None align=LayoutAlign::Start>
                        <Text role=TextRole::Label>{record.name.clone()}</Text>
                        <Text role=TextRole::Caption tone=TextTone::Secondary>
                            {row_meta}
                        </Text>
                    </Stack>
                </Cluster>
                <Cluster gap=LayoutGap::Sm>
                    <IconButton
                        icon=IconName::Pencil
                        aria_label=edit_label
                        on_click=open_edit
                    />
                    <IconButton
                        icon=IconName::Trash
                        aria_label=delete_label
                        on_click=open_delete
                    />
                </Cluster>
            </Cluster>
        </Card>
    }
}

#[component]
/// Edit dialog pre-filled from one record. Only name, version, and
/// description are reachable here; files and size have no edit path.
fn EditDialog(record: AppRecord) -> impl IntoView {
    let runtime = use_catalog_runtime();
    let name = create_rw_signal(record.name.clone());
    let version = create_rw_signal(record.version.clone());
    let description = create_rw_signal(record.description.clone());
    let record_id = store_value(record.id.clone());

    let close = move || runtime.dispatch_action(CatalogAction::CloseEdit);
    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            close();
        }
    });
    on_cleanup(move || escape_listener.remove());

    let save = Callback::new(move |_: ev::MouseEvent| {
        effects::submit_edit(
            runtime,
            record_id.get_value(),
            AppRecordPatch::edit(
                name.get_untracked(),
                version.get_untracked(),
                description.get_untracked(),
            ),
        );
    });

    view! {
        <Modal
            aria_label=format!("Edit {}", record.name)
            layout_class="edit-dialog"
            on_dismiss=Callback::new(move |_| close())
        >
            <Stack gap=LayoutGap::Md>
                <Heading role=TextRole::Title>"Edit App"</Heading>
                <FieldGroup title="App name">
                    <TextField
                        value=name
                        on_input=Callback::new(move |ev| name.set(event_target_value(&ev)))
                    />
                </FieldGroup>
                <FieldGroup title="Version">
                    <TextField
                        value=version
                        on_input=Callback::new(move |ev| version.set(event_target_value(&ev)))
                    />
                </FieldGroup>
                <FieldGroup title="Description">
                    <TextArea
                        rows=4
                        value=description
                        on_input=Callback::new(move |ev| description.set(event_target_value(&ev)))
                    />
                </FieldGroup>
                <Cluster gap=LayoutGap::Sm justify=LayoutJustify::End>
                    <Button variant=ButtonVariant::Quiet on_click=Callback::new(move |_| close())>
                        "Cancel"
                    </Button>
                    <Button variant=ButtonVariant::Primary on_click=save>"Save Changes"</Button>
                </Cluster>
            </Stack>
        </Modal>
    }
}

#[component]
fn DeleteDialog(record: AppRecord) -> impl IntoView {
    let runtime = use_catalog_runtime();
    let record_id = store_value(record.id.clone());

    let close = move || runtime.dispatch_action(CatalogAction::CloseDeleteConfirm);
    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            close();
        }
    });
    on_cleanup(move || escape_listener.remove());

    let confirm = Callback::new(move |_: ev::MouseEvent| {
        effects::delete_record(runtime, record_id.get_value());
    });

    view! {
        <Modal
            aria_label=format!("Delete {}", record.name)
            layout_class="delete-dialog"
            on_dismiss=Callback::new(move |_| close())
        >
            <Stack gap=LayoutGap::Md>
                <Heading role=TextRole::Title>"Delete App"</Heading>
                <Text tone=TextTone::Secondary>
                    {format!(
                        "Delete \"{}\"? The listing is removed; stored files are kept.",
                        record.name
                    )}
                </Text>
                <Cluster gap=LayoutGap::Sm justify=LayoutJustify::End>
                    <Button variant=ButtonVariant::Quiet on_click=Callback::new(move |_| close())>
                        "Cancel"
                    </Button>
                    <Button
                        variant=ButtonVariant::Danger
                        leading_icon=IconName::Trash
                        on_click=confirm
                    >
                        "Delete"
                    </Button>
                </Cluster>
            </Stack>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use backend_host::{AuthSession, UserIdentity};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ActiveSession;

    fn session_with_role(role: AdminRole) -> SessionState {
        SessionState::SignedIn(ActiveSession {
            session: AuthSession {
                access_token: "access".to_string(),
                refresh_token: "refresh".to_string(),
                identity: UserIdentity {
                    user_id: "user-1".to_string(),
                    email: "admin@example.com".to_string(),
                },
            },
            role,
        })
    }

    #[test]
    fn gate_tracks_session_posture() {
        assert_eq!(
            AdminGate::from_session(&SessionState::Resolving),
            AdminGate::Resolving
        );
        assert_eq!(
            AdminGate::from_session(&SessionState::SignedOut),
            AdminGate::SignedOut
        );
        assert_eq!(
            AdminGate::from_session(&session_with_role(AdminRole::Unknown)),
            AdminGate::RoleUnknown
        );
        assert_eq!(
            AdminGate::from_session(&session_with_role(AdminRole::Member)),
            AdminGate::Member
        );
        assert_eq!(
            AdminGate::from_session(&session_with_role(AdminRole::Admin)),
            AdminGate::Admin
        );
    }
}
