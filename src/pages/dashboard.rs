//! Dashboard Page
//!
//! Greeting, counts, quick actions, today's schedule, recent observations
//! and the assistant chat.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{use_resource_list, Page};
use crate::calendar::{current_greeting, current_weekday_name, format_date, today_long};
use crate::context::use_app;
use crate::dashboard::{preview, recent_observations, today_schedule, DashboardCounts, PREVIEW_CHARS};
use crate::markdown::render_reply;
use crate::models::{ChatRole, DailyEntry, Observation, Schedule, Student};
use crate::session::AuthState;
use crate::store::AppStateStoreFields;

const QUICK_ACTIONS: &[(Page, &str, &str)] = &[
    (Page::Students, "➕", "Add Student"),
    (Page::Observations, "👁", "New Observation"),
    (Page::DailyTracking, "📝", "Log Activity"),
    (Page::Reports, "📊", "View Reports"),
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_app();
    let (students, _) = use_resource_list::<Student>(ctx);
    let (observations, _) = use_resource_list::<Observation>(ctx);
    let (entries, _) = use_resource_list::<DailyEntry>(ctx);
    let (schedules, _) = use_resource_list::<Schedule>(ctx);

    let counts = Memo::new(move |_| {
        DashboardCounts::new(
            students.with(Vec::len),
            observations.with(Vec::len),
            entries.with(Vec::len),
            schedules.with(Vec::len),
        )
    });
    let teacher_name = move || match ctx.auth.get() {
        AuthState::Authenticated(user) => user.name,
        _ => String::new(),
    };

    view! {
        <div class="page dashboard-page">
            <div class="welcome-banner">
                <h1>{format!("Good {}! 👋", current_greeting())}</h1>
                <p class="banner-date">{today_long()}</p>
                <p class="banner-sub">{move || format!("Welcome back, {}. Let's make today count!", teacher_name())}</p>
            </div>

            <div class="stat-grid four">
                <StatCard label="Students" icon="👧" value=Signal::derive(move || counts.get().students) />
                <StatCard label="Observations" icon="👁" value=Signal::derive(move || counts.get().observations) />
                <StatCard label="Activities" icon="📝" value=Signal::derive(move || counts.get().daily_entries) />
                <StatCard label="Scheduled" icon="📅" value=Signal::derive(move || counts.get().schedules) />
            </div>

            <section>
                <h2>"⚡ Quick Actions"</h2>
                <div class="quick-actions">
                    {QUICK_ACTIONS.iter().map(|(page, icon, label)| {
                        let page = *page;
                        view! {
                            <button class="btn btn-secondary" on:click=move |_| ctx.navigate(page)>
                                <span>{*icon}</span>
                                {*label}
                            </button>
                        }
                    }).collect_view()}
                </div>
            </section>

            <div class="two-column">
                <div class="card">
                    <h2>"📅 Today's Schedule"</h2>
                    {move || schedules.with(|all| {
                        let today = today_schedule(all, current_weekday_name());
                        if today.is_empty() {
                            view! { <p class="muted">"No activities scheduled for today."</p> }.into_any()
                        } else {
                            today.into_iter().map(|s| view! {
                                <div class="today-row">
                                    <div>
                                        <span class="strong">{s.time.clone()}</span>
                                        <span class="muted">" — "</span>
                                        <span>{s.activity.clone()}</span>
                                    </div>
                                    <span class="muted small">{s.students.clone()}</span>
                                </div>
                            }).collect_view().into_any()
                        }
                    })}
                </div>

                <div class="card">
                    <h2>"👁 Recent Observations"</h2>
                    {move || observations.with(|all| {
                        let recent = recent_observations(all);
                        if recent.is_empty() {
                            view! { <p class="muted">"No observations yet."</p> }.into_any()
                        } else {
                            recent.into_iter().map(|o| view! {
                                <div class="recent-row">
                                    <div class="report-row-head">
                                        <span class="strong">{o.student.clone()}</span>
                                        <span class="muted">{format_date(&o.date)}</span>
                                    </div>
                                    <p class="muted small">
                                        {format!("{} — {}", o.area, preview(&o.notes, PREVIEW_CHARS))}
                                    </p>
                                </div>
                            }).collect_view().into_any()
                        }
                    })}
                </div>
            </div>

            <AskMonty />
        </div>
    }
}

#[component]
fn StatCard(#[prop(into)] label: String, icon: &'static str, value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <div>
                <p class="muted">{label}</p>
                <p class="stat-value">{move || value.get()}</p>
            </div>
            <div class="stat-icon">{icon}</div>
        </div>
    }
}

/// Assistant chat; the transcript lives in the app store.
#[component]
fn AskMonty() -> impl IntoView {
    let ctx = use_app();
    let store = ctx.store;
    let (input, set_input) = signal(String::new());

    let send = move || {
        let Some(message) = store.transcript().write().begin(&input.get()) else {
            return;
        };
        set_input.set(String::new());
        let api = ctx.api();
        spawn_local(async move {
            let reply = api.send_chat(&message).await;
            store.transcript().write().receive(reply);
        });
    };

    view! {
        <div class="card chat-card">
            <h2>"🤖 Ask Monty"</h2>
            <div class="chat-messages">
                {move || store.transcript().with(|t| {
                    if t.messages().is_empty() {
                        view! {
                            <p class="muted">"Ask about lesson plans, observations, materials, or student progress…"</p>
                        }.into_any()
                    } else {
                        t.messages().iter().map(|m| match m.role {
                            ChatRole::User => view! {
                                <div class="chat-row user">
                                    <div class="chat-bubble">{m.content.clone()}</div>
                                </div>
                            }.into_any(),
                            ChatRole::Assistant => view! {
                                <div class="chat-row assistant">
                                    <div class="chat-bubble markdown" inner_html=render_reply(&m.content)></div>
                                </div>
                            }.into_any(),
                        }).collect_view().into_any()
                    }
                })}
                <Show when=move || store.transcript().with(|t| t.is_pending())>
                    <div class="chat-row assistant">
                        <div class="chat-bubble muted">"Thinking…"</div>
                    </div>
                </Show>
            </div>
            <div class="chat-input">
                <input
                    type="text"
                    placeholder="Ask Monty anything…"
                    prop:value=move || input.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            send();
                        }
                    }
                />
                <button
                    class="btn btn-primary"
                    disabled=move || store.transcript().with(|t| t.is_pending())
                    on:click=move |_| send()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}
