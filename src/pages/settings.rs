//! Settings Page
//!
//! Five tabs over one settings document. Edits stay pending until "Save",
//! which sends the whole merged document.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use super::choices;
use crate::cache::CacheKey;
use crate::components::{NumberField, SelectField, TextAreaField, TextField, ToggleField};
use crate::context::use_app;
use crate::session::AuthState;
use crate::settings::{self, SettingValue, SettingsEditor, SettingsTab};

const THEMES: &[&str] = &["light", "dark"];
const ACCENT_COLORS: &[&str] = &["Purple", "Blue", "Green", "Orange", "Red"];
const FONT_SIZES: &[&str] = &["Small", "Medium", "Large"];

const NOTIFICATION_TOGGLES: &[(&str, &str)] = &[
    ("email_observations", "Email for observations"),
    ("email_reports", "Email for reports"),
    ("email_parent_communications", "Email for parent communications"),
    ("push_activities", "Push for activities"),
    ("push_schedule_changes", "Push for schedule changes"),
    ("weekly_digest", "Weekly digest"),
];

const PRIVACY_TOGGLES: &[(&str, &str)] = &[
    ("two_factor_auth", "Two-factor authentication"),
    ("share_progress_with_parents", "Share progress with parents"),
    ("analytics_tracking", "Analytics tracking"),
];

// ========================
// Field Bindings
// ========================

fn text_value(editor: RwSignal<SettingsEditor>, section: &'static str, key: &'static str, default: &'static str) -> Signal<String> {
    Signal::derive(move || {
        editor.with(|e| e.value(section, key).map(|v| v.as_text()).unwrap_or_else(|| default.to_string()))
    })
}

fn bool_value(editor: RwSignal<SettingsEditor>, section: &'static str, key: &'static str) -> Signal<bool> {
    Signal::derive(move || editor.with(|e| e.value(section, key).is_some_and(|v| v.as_bool())))
}

fn number_value(editor: RwSignal<SettingsEditor>, section: &'static str, key: &'static str, default: i64) -> Signal<i64> {
    Signal::derive(move || editor.with(|e| e.value(section, key).and_then(|v| v.as_i64()).unwrap_or(default)))
}

fn setter<T>(editor: RwSignal<SettingsEditor>, section: &'static str, key: &'static str) -> Callback<T>
where
    T: Into<SettingValue> + 'static,
{
    Callback::new(move |value: T| editor.update(|e| e.edit(section, key, value)))
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let ctx = use_app();
    let editor = RwSignal::new(SettingsEditor::default());
    let tab = RwSignal::new(SettingsTab::default());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);

    // Load, and reload whenever a save invalidates the settings key
    Effect::new(move |_| {
        let version = ctx.version(CacheKey::Settings).get();
        let api = ctx.api();
        let cache = ctx.cache();
        spawn_local(async move {
            let result = settings::load(&api, &cache).await;
            if ctx.version(CacheKey::Settings).get_untracked() != version {
                return;
            }
            match result {
                Ok(document) => editor.update(|e| e.load(document)),
                Err(err) => {
                    warn!("[SETTINGS] Load failed: {}", err);
                    ctx.error("Failed to load settings");
                }
            }
            set_loading.set(false);
        });
    });

    let save = move |_| {
        let current_tab = tab.get();
        let mut saving_editor = editor.get_untracked();
        let api = ctx.api();
        let cache = ctx.cache();
        set_saving.set(true);
        spawn_local(async move {
            match saving_editor.save(&api, &cache).await {
                Ok(()) => {
                    editor.set(saving_editor);
                    ctx.success(current_tab.saved_message());
                }
                Err(err) => {
                    warn!("[SETTINGS] Save failed: {}", err);
                    ctx.error("Failed to save settings");
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="page settings-page">
            <header class="page-header">
                <div>
                    <h1>"Settings"</h1>
                    <p class="page-subtitle">"Manage your account and preferences"</p>
                </div>
            </header>

            <div class="tab-bar">
                {SettingsTab::ALL.into_iter().map(|t| {
                    let class = move || if tab.get() == t { "tab active" } else { "tab" };
                    view! {
                        <button class=class on:click=move |_| tab.set(t)>{t.label()}</button>
                    }
                }).collect_view()}
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="spinner"></div> }
            >
                <div class="card settings-card">
                    {move || match tab.get() {
                        SettingsTab::Profile => view! { <ProfileTab editor=editor /> }.into_any(),
                        SettingsTab::Classroom => view! { <ClassroomTab editor=editor /> }.into_any(),
                        SettingsTab::Notifications => view! { <NotificationsTab editor=editor /> }.into_any(),
                        SettingsTab::Privacy => view! { <PrivacyTab editor=editor /> }.into_any(),
                        SettingsTab::Appearance => view! { <AppearanceTab editor=editor /> }.into_any(),
                    }}
                    <div class="form-actions">
                        <button
                            class="btn btn-ghost"
                            disabled=move || !editor.with(|e| e.has_pending())
                            on:click=move |_| editor.update(|e| e.discard())
                        >
                            "Discard"
                        </button>
                        <button class="btn btn-primary" disabled=move || saving.get() on:click=save>
                            {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ProfileTab(editor: RwSignal<SettingsEditor>) -> impl IntoView {
    let ctx = use_app();
    let section = SettingsTab::Profile.section();

    // name and email fall back to the signed-in teacher
    let user_field = move |key: &'static str| {
        Signal::derive(move || {
            editor
                .with(|e| e.value(section, key).map(|v| v.as_text()))
                .unwrap_or_else(|| match ctx.auth.get() {
                    AuthState::Authenticated(user) if key == "name" => user.name,
                    AuthState::Authenticated(user) if key == "email" => user.email,
                    _ => String::new(),
                })
        })
    };

    view! {
        <div class="settings-section">
            <h2>"Profile Information"</h2>
            <TextField label="Name" value=user_field("name") on_input={setter::<String>(editor, section, "name")} />
            <TextField label="Email" input_type="email" value=user_field("email") on_input={setter::<String>(editor, section, "email")} />
            <TextField label="Phone" value=text_value(editor, section, "phone", "") on_input={setter::<String>(editor, section, "phone")} />
            <TextAreaField label="Bio" value=text_value(editor, section, "bio", "") on_input={setter::<String>(editor, section, "bio")} />
        </div>
    }
}

#[component]
fn ClassroomTab(editor: RwSignal<SettingsEditor>) -> impl IntoView {
    let section = SettingsTab::Classroom.section();

    view! {
        <div class="settings-section">
            <h2>"Classroom Settings"</h2>
            <TextField label="School Name" value=text_value(editor, section, "school_name", "") on_input={setter::<String>(editor, section, "school_name")} />
            <TextField label="Classroom Name" value=text_value(editor, section, "classroom_name", "") on_input={setter::<String>(editor, section, "classroom_name")} />
            <TextField label="Academic Year" value=text_value(editor, section, "academic_year", "") on_input={setter::<String>(editor, section, "academic_year")} />
            <NumberField label="Max Students" min=0 value=number_value(editor, section, "student_count", 18) on_input={setter::<i64>(editor, section, "student_count")} />
        </div>
    }
}

#[component]
fn NotificationsTab(editor: RwSignal<SettingsEditor>) -> impl IntoView {
    let section = SettingsTab::Notifications.section();

    view! {
        <div class="settings-section">
            <h2>"Notification Preferences"</h2>
            {NOTIFICATION_TOGGLES.iter().map(|(key, label)| view! {
                <ToggleField label=*label checked=bool_value(editor, section, *key) on_toggle={setter::<bool>(editor, section, *key)} />
            }).collect_view()}
        </div>
    }
}

#[component]
fn PrivacyTab(editor: RwSignal<SettingsEditor>) -> impl IntoView {
    let section = SettingsTab::Privacy.section();

    view! {
        <div class="settings-section">
            <h2>"Privacy & Security"</h2>
            {PRIVACY_TOGGLES.iter().map(|(key, label)| view! {
                <ToggleField label=*label checked=bool_value(editor, section, *key) on_toggle={setter::<bool>(editor, section, *key)} />
            }).collect_view()}
            <NumberField
                label="Session Timeout (minutes)"
                min=1
                value=number_value(editor, section, "session_timeout", 30)
                on_input={setter::<i64>(editor, section, "session_timeout")}
            />
        </div>
    }
}

#[component]
fn AppearanceTab(editor: RwSignal<SettingsEditor>) -> impl IntoView {
    let section = SettingsTab::Appearance.section();

    view! {
        <div class="settings-section">
            <h2>"Appearance"</h2>
            <SelectField label="Theme" options=choices(THEMES) value=text_value(editor, section, "theme", "light") on_change={setter::<String>(editor, section, "theme")} />
            <SelectField label="Accent Color" options=choices(ACCENT_COLORS) value=text_value(editor, section, "accent_color", "Purple") on_change={setter::<String>(editor, section, "accent_color")} />
            <SelectField label="Font Size" options=choices(FONT_SIZES) value=text_value(editor, section, "font_size", "Medium") on_change={setter::<String>(editor, section, "font_size")} />
            <ToggleField label="Compact mode" checked=bool_value(editor, section, "compact_mode") on_toggle={setter::<bool>(editor, section, "compact_mode")} />
        </div>
    }
}
