//! Monty Frontend App
//!
//! Builds the services, restores the session and gates the layout on it.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::info;
use reactive_stores::Store;

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::cache::QueryCache;
use crate::components::{Sidebar, ToastStack};
use crate::config::AppConfig;
use crate::context::{use_app, AppContext, Services};
use crate::pages::{
    DailyTrackingPage, DashboardPage, LoginPage, MaterialsPage, ObservationsPage, Page, ReportsPage,
    SchedulePage, SettingsPage, StudentsPage,
};
use crate::session::{AuthState, Session};
use crate::storage::{LocalTokenStore, TokenStore};
use crate::store::AppState;

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

fn build_services() -> Services {
    let config = AppConfig::resolve(page_origin());
    info!("[APP] API base {}", config.api_base);

    let transport: Rc<dyn Transport> = Rc::new(HttpTransport::new(config.api_base.clone()));
    let tokens: Rc<dyn TokenStore> = Rc::new(LocalTokenStore::new(config.token_key.clone()));
    let api = ApiClient::new(transport, tokens);
    let cache = QueryCache::new(config.stale_after, config.fetch_retries);
    let session = Rc::new(Session::new(api.clone()));

    Services { config, api, cache, session }
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let ctx = AppContext::new(build_services(), store);
    provide_context(ctx);

    // Restore the session from a stored token once on mount
    let session = ctx.session();
    if ctx.api().tokens().get().is_some() {
        ctx.auth.set(AuthState::Verifying);
    }
    spawn_local(async move {
        session.init().await;
        ctx.sync_auth();
    });
    on_cleanup(move || ctx.session().teardown());

    view! {
        <div class="app-root">
            {move || match ctx.auth.get() {
                AuthState::Verifying => view! {
                    <div class="app-loading">
                        <div class="spinner"></div>
                    </div>
                }.into_any(),
                AuthState::Anonymous => view! { <LoginPage /> }.into_any(),
                AuthState::Authenticated(_) => view! { <Layout /> }.into_any(),
            }}
            <ToastStack />
        </div>
    }
}

/// Sidebar plus the current page
#[component]
fn Layout() -> impl IntoView {
    let ctx = use_app();

    view! {
        <div class="app-layout">
            <Sidebar />
            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                    Page::Students => view! { <StudentsPage /> }.into_any(),
                    Page::Observations => view! { <ObservationsPage /> }.into_any(),
                    Page::Schedule => view! { <SchedulePage /> }.into_any(),
                    Page::Materials => view! { <MaterialsPage /> }.into_any(),
                    Page::DailyTracking => view! { <DailyTrackingPage /> }.into_any(),
                    Page::Reports => view! { <ReportsPage /> }.into_any(),
                    Page::Settings => view! { <SettingsPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
