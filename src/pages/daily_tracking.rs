//! Daily Tracking Page
//!
//! Per-student daily entries, newest first.

use leptos::prelude::*;

use super::{choices, delete_item, submit_form, use_resource_list, FormActions, PageHeader};
use crate::calendar::format_date;
use crate::components::{DeleteConfirmButton, SelectField, TagListInput, TextAreaField, TextField};
use crate::context::use_app;
use crate::dashboard::newest_first;
use crate::form::{add_tag, remove_tag, ResourceForm};
use crate::models::{DailyEntry, SkillLevel, Student, LEARNING_AREAS};

#[component]
pub fn DailyTrackingPage() -> impl IntoView {
    let ctx = use_app();
    let (entries, loading) = use_resource_list::<DailyEntry>(ctx);
    let (students, _) = use_resource_list::<Student>(ctx);
    let form = RwSignal::new(ResourceForm::<DailyEntry>::new());

    let subtitle = move || format!("{} entries recorded", entries.get().len());
    let student_names = Signal::derive(move || students.get().into_iter().map(|s| s.name).collect());

    view! {
        <div class="page daily-tracking-page">
            <PageHeader
                title="Daily Tracking"
                subtitle=Signal::derive(subtitle)
                action_label="New Entry"
                on_action=Callback::new(move |_| form.update(|f| f.open_create()))
            />

            <Show when=move || form.with(|f| f.is_open())>
                <EntryForm form=form student_names=student_names />
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="spinner"></div> }
            >
                <div class="card-list">
                    {move || entries.with(|all| {
                        newest_first(all)
                            .into_iter()
                            .cloned()
                            .map(|e| view! { <EntryCard entry=e form=form /> })
                            .collect_view()
                    })}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn EntryCard(entry: DailyEntry, form: RwSignal<ResourceForm<DailyEntry>>) -> impl IntoView {
    let ctx = use_app();
    let id = entry.id;
    let editing = entry.clone();

    view! {
        <div class="card entry-card">
            <div class="card-header">
                <div>
                    <h3>{entry.student.clone()}</h3>
                    <p class="muted small">{format!("{} · {}", format_date(&entry.date), entry.subject)}</p>
                </div>
                <div class="card-actions">
                    <span class=entry.skill_level.badge_class()>{entry.skill_level.as_str().to_string()}</span>
                    <button class="btn btn-ghost" on:click=move |_| form.update(|f| f.open_edit(&editing))>
                        "Edit"
                    </button>
                    <DeleteConfirmButton on_confirm={move |_| delete_item::<DailyEntry>(ctx, id)} />
                </div>
            </div>
            <div class="chip-row">
                {entry.activities.iter().map(|a| view! {
                    <span class="chip chip-indigo">{a.clone()}</span>
                }).collect_view()}
            </div>
            {(!entry.notes.is_empty()).then(|| view! { <p class="muted">{entry.notes.clone()}</p> })}
        </div>
    }
}

#[component]
fn EntryForm(form: RwSignal<ResourceForm<DailyEntry>>, student_names: Signal<Vec<String>>) -> impl IntoView {
    let ctx = use_app();

    let title = move || if form.with(|f| f.is_editing()) { "Edit Entry" } else { "New Daily Entry" };
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submit_form(ctx, form);
    };

    view! {
        <div class="card form-card">
            <h2>{title}</h2>
            <form on:submit=on_submit>
                <div class="form-grid">
                    <SelectField
                        label="Student *"
                        placeholder="Select student"
                        options=student_names
                        value=Signal::derive(move || form.with(|f| f.draft().student.clone()))
                        on_change=move |v: String| form.update(|f| f.draft_mut().student = v)
                    />
                    <TextField
                        label="Date"
                        input_type="date"
                        value=Signal::derive(move || form.with(|f| f.draft().date.clone()))
                        on_input=move |v: String| form.update(|f| f.draft_mut().date = v)
                    />
                    <SelectField
                        label="Subject"
                        options=choices(LEARNING_AREAS)
                        value=Signal::derive(move || form.with(|f| f.draft().subject.clone()))
                        on_change=move |v: String| form.update(|f| f.draft_mut().subject = v)
                    />
                    <SelectField
                        label="Skill Level"
                        options=choices(SkillLevel::KNOWN)
                        value=Signal::derive(move || form.with(|f| f.draft().skill_level.as_str().to_string()))
                        on_change=move |v: String| form.update(|f| f.draft_mut().skill_level = SkillLevel::from(v))
                    />
                </div>
                <TagListInput
                    label="Activities *"
                    placeholder="Add activity and press Enter"
                    tags=Signal::derive(move || form.with(|f| f.draft().activities.clone()))
                    on_add=move |v: String| form.update(|f| { add_tag(&mut f.draft_mut().activities, &v); })
                    on_remove=move |i: usize| form.update(|f| remove_tag(&mut f.draft_mut().activities, i))
                />
                <TextAreaField
                    label="Notes"
                    value=Signal::derive(move || form.with(|f| f.draft().notes.clone()))
                    on_input=move |v: String| form.update(|f| f.draft_mut().notes = v)
                />
                <FormActions form=form />
            </form>
        </div>
    }
}
