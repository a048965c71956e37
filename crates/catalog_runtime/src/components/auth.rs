//! Email and password sign-in page.

use catalog_ui::prelude::*;
use leptos::*;
use leptos_router::use_navigate;

use crate::{
    effects, notices::NoticeLevel, reducer::CatalogAction, runtime_context::use_catalog_runtime,
};

#[component]
/// Password-grant sign-in form. Already-authenticated visitors, and anyone
/// whose sign-in settles successfully, are forwarded to the admin route.
pub fn SignInPage() -> impl IntoView {
    let runtime = use_catalog_runtime();
    let state = runtime.state;

    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let sign_in_busy = create_memo(move |_| state.with(|state| state.sign_in_busy));

    let signed_in = create_memo(move |_| state.with(|state| state.session.is_signed_in()));
    let redirect = use_navigate();
    create_effect(move |_| {
        if signed_in.get() {
            redirect("/admin", Default::default());
        }
    });

    let submit = move || {
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if email_value.trim().is_empty() || password_value.is_empty() {
            runtime.dispatch_action(CatalogAction::PushNotice {
                level: NoticeLevel::Error,
                message: "Email and password are required.".to_string(),
            });
            return;
        }
        effects::sign_in(runtime, email_value, password_value);
    };

    let go_home = use_navigate();
    let go_home = Callback::new(move |_: ev::MouseEvent| go_home("/", Default::default()));

    view! {
        <div class="auth-page">
            <Panel layout_class="auth-card" aria_label="Sign in">
                <Stack gap=LayoutGap::Md>
                    <Stack gap=LayoutGap::Sm align=LayoutAlign::Center>
                        <Icon icon=IconName::Package size=IconSize::Lg />
                        <Heading role=TextRole::Title>"Admin Sign In"</Heading>
                        <Text tone=TextTone::Secondary>"Sign in to manage the app catalog."</Text>
                    </Stack>
                    <FieldGroup title="Email">
                        <TextField
                            input_type="email"
                            autocomplete="email"
                            placeholder="you@example.com"
                            value=email
                            disabled=sign_in_busy
                            on_input=Callback::new(move |ev| email.set(event_target_value(&ev)))
                        />
                    </FieldGroup>
                    <FieldGroup title="Password">
                        <TextField
                            input_type="password"
                            autocomplete="current-password"
                            value=password
                            disabled=sign_in_busy
                            on_input=Callback::new(move |ev| password.set(event_target_value(&ev)))
                            on_keydown=Callback::new(move |ev: ev::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    submit();
                                }
                            })
                        />
                    </FieldGroup>
                    <Button
                        variant=ButtonVariant::Primary
                        leading_icon=IconName::LogIn
                        busy=sign_in_busy
                        on_click=Callback::new(move |_: ev::MouseEvent| submit())
                    >
                        {move || if sign_in_busy.get() { "Signing in..." } else { "Sign In" }}
                    </Button>
                    <Cluster justify=LayoutJustify::Center>
                        <Button
                            variant=ButtonVariant::Quiet
                            leading_icon=IconName::Home
                            on_click=go_home
                        >
                            "Back to catalog"
                        </Button>
                    </Cluster>
                </Stack>
            </Panel>
        </div>
    }
}
