//! Student Reports Page
//!
//! Pick a student on the left; their observations and daily entries on the right.

use leptos::prelude::*;

use super::use_resource_list;
use crate::calendar::format_date;
use crate::context::use_app;
use crate::dashboard::student_report;
use crate::models::{DailyEntry, Observation, Student};

#[component]
pub fn ReportsPage() -> impl IntoView {
    let ctx = use_app();
    let (students, _) = use_resource_list::<Student>(ctx);
    let (observations, _) = use_resource_list::<Observation>(ctx);
    let (entries, _) = use_resource_list::<DailyEntry>(ctx);
    let (selected_id, set_selected_id) = signal::<Option<u32>>(None);

    let selected = move || {
        let id = selected_id.get()?;
        students.with(|all| all.iter().find(|s| s.id == id).cloned())
    };

    view! {
        <div class="page reports-page">
            <header class="page-header">
                <div>
                    <h1>"Student Reports"</h1>
                    <p class="page-subtitle">"Select a student to view their progress report"</p>
                </div>
            </header>

            <div class="reports-layout">
                <div class="report-student-list">
                    {move || students.get().into_iter().map(|s| {
                        let id = s.id;
                        let class = move || {
                            if selected_id.get() == Some(id) { "report-student active" } else { "report-student" }
                        };
                        view! {
                            <button class=class on:click=move |_| set_selected_id.set(Some(id))>
                                {s.name}
                                <span class="muted small">{format!("Age {}", s.age)}</span>
                            </button>
                        }
                    }).collect_view()}
                </div>

                <div class="report-body">
                    {move || match selected() {
                        None => view! {
                            <div class="card empty-state">
                                <p>"Select a student to view their report"</p>
                            </div>
                        }.into_any(),
                        Some(student) => {
                            let all_observations = observations.get();
                            let all_entries = entries.get();
                            let report = student_report(&student.name, &all_observations, &all_entries);
                            let areas_covered = report.areas_covered;
                            let observation_rows: Vec<Observation> = report.observations.into_iter().cloned().collect();
                            let entry_rows: Vec<DailyEntry> = report.entries.into_iter().cloned().collect();
                            let (observation_count, entry_count) = (observation_rows.len(), entry_rows.len());
                            view! {
                                <StudentSummary student=student />
                                <div class="stat-grid three">
                                    <Stat value=observation_count label="Observations" />
                                    <Stat value=entry_count label="Daily Entries" />
                                    <Stat value=areas_covered label="Areas Covered" />
                                </div>
                                <ObservationSection rows=observation_rows />
                                <EntrySection rows=entry_rows />
                            }.into_any()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn Stat(value: usize, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <p class="stat-value">{value}</p>
            <p class="muted">{label}</p>
        </div>
    }
}

#[component]
fn StudentSummary(student: Student) -> impl IntoView {
    view! {
        <div class="card">
            <h2>{student.name.clone()}</h2>
            <div class="report-facts">
                <div><span class="muted">"Age: "</span>{student.age}</div>
                <div><span class="muted">"Parent: "</span>{student.parent_name.clone()}</div>
                <div><span class="muted">"Email: "</span>{student.parent_email.clone()}</div>
            </div>
            <div class="chip-row">
                {student.interests.iter().map(|i| view! { <span class="chip chip-blue">{i.clone()}</span> }).collect_view()}
            </div>
            <div class="chip-row">
                {student.allergies.iter().map(|a| view! { <span class="chip chip-red">"⚠ " {a.clone()}</span> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn ObservationSection(rows: Vec<Observation>) -> impl IntoView {
    view! {
        <div class="card">
            <h3>"Observations"</h3>
            {if rows.is_empty() {
                view! { <p class="muted">"No observations recorded yet."</p> }.into_any()
            } else {
                rows.into_iter().map(|o| view! {
                    <div class="report-row">
                        <div class="report-row-head">
                            <span class="strong">{o.area.clone()}</span>
                            <span class="muted">{format_date(&o.date)}</span>
                        </div>
                        <div class="chip-row">
                            {o.skills.iter().map(|s| view! { <span class="chip chip-green">{s.clone()}</span> }).collect_view()}
                        </div>
                        <p class="muted">{o.notes.clone()}</p>
                    </div>
                }).collect_view().into_any()
            }}
        </div>
    }
}

#[component]
fn EntrySection(rows: Vec<DailyEntry>) -> impl IntoView {
    view! {
        <div class="card">
            <h3>"Daily Entries"</h3>
            {if rows.is_empty() {
                view! { <p class="muted">"No daily entries recorded yet."</p> }.into_any()
            } else {
                rows.into_iter().map(|e| view! {
                    <div class="report-row">
                        <div class="report-row-head">
                            <span class="strong">{e.subject.clone()}</span>
                            <span class="muted">{format_date(&e.date)}</span>
                        </div>
                        <div class="chip-row">
                            <span class="chip chip-indigo">{e.skill_level.as_str().to_string()}</span>
                            {e.activities.iter().map(|a| view! { <span class="chip">{a.clone()}</span> }).collect_view()}
                        </div>
                        {(!e.notes.is_empty()).then(|| view! { <p class="muted">{e.notes.clone()}</p> })}
                    </div>
                }).collect_view().into_any()
            }}
        </div>
    }
}
