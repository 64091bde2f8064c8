//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app, AppContext};
use crate::pages::Page;

pub const LOGIN_FAILED: &str = "Invalid credentials. Try demo / demo";

const FEATURES: &[(&str, &str, &str)] = &[
    ("📋", "Smart Planning", "AI-generated lesson plans tailored to each student"),
    ("👁", "Observation Tracking", "Record and analyze student observations with insights"),
    ("📊", "Progress Reports", "Beautiful newsletters and progress reports in seconds"),
];

/// Run a login and publish the outcome. `on_failure` gets called with no session.
fn attempt_login(
    ctx: AppContext,
    username: String,
    password: String,
    set_loading: WriteSignal<bool>,
    on_failure: impl FnOnce() + 'static,
) {
    set_loading.set(true);
    let session = ctx.session();
    spawn_local(async move {
        let ok = session.login(&username, &password).await;
        set_loading.set(false);
        if ok {
            ctx.navigate(Page::Dashboard);
            ctx.sync_auth();
        } else {
            on_failure();
        }
    });
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(String::new());
        attempt_login(ctx, username.get(), password.get(), set_loading, move || {
            set_error.set(LOGIN_FAILED.to_string())
        });
    };

    let demo_login = move |_| {
        set_error.set(String::new());
        attempt_login(ctx, "demo".to_string(), "demo".to_string(), set_loading, || {});
    };

    view! {
        <div class="login-screen">
            <div class="login-hero">
                <h1>"Meet Monty"</h1>
                <p>"Your AI-powered Montessori Teaching Assistant"</p>
            </div>

            <div class="login-card">
                <h2>"Welcome Back"</h2>
                <form on:submit=on_submit>
                    <div class="form-field">
                        <label>"Username"</label>
                        <input
                            type="text"
                            placeholder="Enter username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label>"Password"</label>
                        <input
                            type="password"
                            placeholder="Enter password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <Show when=move || !error.get().is_empty()>
                        <p class="login-error">{move || error.get()}</p>
                    </Show>
                    <button type="submit" class="btn btn-primary btn-block" disabled=move || loading.get()>
                        {move || if loading.get() { "Signing in…" } else { "Sign In" }}
                    </button>
                </form>

                <div class="divider"></div>

                <button class="btn btn-secondary btn-block" disabled=move || loading.get() on:click=demo_login>
                    "👤 Login as Demo User"
                </button>
                <p class="muted small center">
                    "Demo: username " <code>"demo"</code> ", password " <code>"demo"</code>
                </p>
            </div>

            <div class="login-features">
                {FEATURES.iter().map(|(icon, title, desc)| view! {
                    <div class="feature-card">
                        <div class="feature-icon">{*icon}</div>
                        <h3>{*title}</h3>
                        <p>{*desc}</p>
                    </div>
                }).collect_view()}
            </div>
        </div>
    }
}
