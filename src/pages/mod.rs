//! Pages
//!
//! One component per sidebar entry, plus the login screen. The helpers
//! below connect a page to the query cache and to [`ResourceForm`].

mod daily_tracking;
mod dashboard;
mod login;
mod materials;
mod observations;
mod reports;
mod schedule;
mod settings;
mod students;

pub use daily_tracking::DailyTrackingPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use materials::MaterialsPage;
pub use observations::ObservationsPage;
pub use reports::ReportsPage;
pub use schedule::SchedulePage;
pub use settings::SettingsPage;
pub use students::StudentsPage;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::context::AppContext;
use crate::form::{self, failure_message, ResourceForm};
use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Students,
    Observations,
    Schedule,
    Materials,
    DailyTracking,
    Reports,
    Settings,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Dashboard,
        Page::Students,
        Page::Observations,
        Page::Schedule,
        Page::Materials,
        Page::DailyTracking,
        Page::Reports,
        Page::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Students => "Students",
            Page::Observations => "Observations",
            Page::Schedule => "Schedule",
            Page::Materials => "Materials",
            Page::DailyTracking => "Daily Tracking",
            Page::Reports => "Reports",
            Page::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Dashboard => "🏠",
            Page::Students => "👧",
            Page::Observations => "👁",
            Page::Schedule => "📅",
            Page::Materials => "🧩",
            Page::DailyTracking => "📝",
            Page::Reports => "📊",
            Page::Settings => "⚙",
        }
    }
}

// ========================
// Page Helpers
// ========================

/// Cached list of `R`, refetched whenever its cache key is invalidated.
pub fn use_resource_list<R: Resource>(ctx: AppContext) -> (ReadSignal<Vec<R>>, ReadSignal<bool>) {
    let (items, set_items) = signal(Vec::<R>::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let version = ctx.version(R::KEY).get();
        let api = ctx.api();
        let cache = ctx.cache();
        spawn_local(async move {
            let result = form::load::<R>(&api, &cache).await;
            // a later invalidation already started a newer load
            if ctx.version(R::KEY).get_untracked() != version {
                return;
            }
            match result {
                Ok(list) => set_items.set(list),
                Err(err) => {
                    warn!("[PAGE] Loading {} (v{}) failed: {}", R::KEY.as_str(), version, err);
                    ctx.error(format!("Failed to load {}", R::KEY.as_str().replace('-', " ")));
                }
            }
            set_loading.set(false);
        });
    });

    (items, loading)
}

/// Validate and send the form, then raise the resulting notice.
pub fn submit_form<R: Resource>(ctx: AppContext, form: RwSignal<ResourceForm<R>>) {
    let submission = match form.try_update(|f| f.begin_submit()) {
        Some(Ok(submission)) => submission,
        Some(Err(err)) => {
            ctx.error(failure_message("save", R::NOUN, &err));
            return;
        }
        None => return,
    };

    let api = ctx.api();
    let cache = ctx.cache();
    spawn_local(async move {
        let result = form::execute::<R>(&api, &cache, submission).await;
        form.update(|f| f.finish(result.is_ok()));
        match result {
            Ok(message) => ctx.success(message),
            Err(err) => ctx.error(failure_message("save", R::NOUN, &err)),
        }
    });
}

pub fn delete_item<R: Resource>(ctx: AppContext, id: u32) {
    let api = ctx.api();
    let cache = ctx.cache();
    spawn_local(async move {
        match form::delete_record::<R>(&api, &cache, id).await {
            Ok(message) => ctx.success(message),
            Err(err) => ctx.error(failure_message("delete", R::NOUN, &err)),
        }
    });
}

/// Fixed dropdown choices
fn choices(values: &[&str]) -> Signal<Vec<String>> {
    Signal::stored(values.iter().map(|v| v.to_string()).collect())
}

/// Header row: title, subtitle and the "add" button that opens the form.
#[component]
fn PageHeader(
    #[prop(into)] title: String,
    subtitle: Signal<String>,
    #[prop(into, optional)] action_label: Option<String>,
    #[prop(optional)] on_action: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <header class="page-header">
            <div>
                <h1>{title}</h1>
                <p class="page-subtitle">{move || subtitle.get()}</p>
            </div>
            {action_label.zip(on_action).map(|(label, on_action)| view! {
                <button class="btn btn-primary" on:click=move |_| on_action.run(())>
                    {label}
                </button>
            })}
        </header>
    }
}

/// Submit/cancel row at the bottom of a resource form.
#[component]
fn FormActions<R: Resource>(form: RwSignal<ResourceForm<R>>) -> impl IntoView {
    let submit_label = move || {
        form.with(|f| match (f.is_submitting(), f.is_editing()) {
            (true, _) => "Saving...",
            (false, true) => "Update",
            (false, false) => "Save",
        })
    };

    view! {
        <div class="form-actions">
            <button type="button" class="btn btn-ghost" on:click=move |_| form.update(|f| f.cancel())>
                "Cancel"
            </button>
            <button type="submit" class="btn btn-primary" disabled=move || form.with(|f| f.is_submitting())>
                {submit_label}
            </button>
        </div>
    }
}
