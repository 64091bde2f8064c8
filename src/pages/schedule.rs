//! Weekly Schedule Page
//!
//! Activities grouped Monday to Friday, sorted by time within a day.

use leptos::prelude::*;

use super::{choices, delete_item, submit_form, use_resource_list, FormActions, PageHeader};
use crate::calendar::SCHOOL_DAYS;
use crate::components::{DeleteConfirmButton, NumberField, SelectField, TextField};
use crate::context::use_app;
use crate::dashboard::group_by_day;
use crate::form::{to_count, ResourceForm};
use crate::models::Schedule;

#[component]
pub fn SchedulePage() -> impl IntoView {
    let ctx = use_app();
    let (schedules, loading) = use_resource_list::<Schedule>(ctx);
    let form = RwSignal::new(ResourceForm::<Schedule>::new());

    let subtitle = move || format!("{} activities scheduled", schedules.get().len());

    view! {
        <div class="page schedule-page">
            <PageHeader
                title="Weekly Schedule"
                subtitle=Signal::derive(subtitle)
                action_label="Add Activity"
                on_action=Callback::new(move |_| form.update(|f| f.open_create()))
            />

            <Show when=move || form.with(|f| f.is_open())>
                <ScheduleForm form=form />
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="spinner"></div> }
            >
                {move || schedules.with(|all| {
                    group_by_day(all).into_iter().map(|(day, items)| {
                        let rows: Vec<Schedule> = items.into_iter().cloned().collect();
                        view! {
                            <section class="day-group">
                                <h3>{day}</h3>
                                {if rows.is_empty() {
                                    view! { <p class="muted small">"No activities"</p> }.into_any()
                                } else {
                                    view! {
                                        <div class="schedule-rows">
                                            {rows.into_iter().map(|s| ScheduleRow(ScheduleRowProps { slot: s, form })).collect_view()}
                                        </div>
                                    }.into_any()
                                }}
                            </section>
                        }
                    }).collect_view()
                })}
            </Show>
        </div>
    }
}

#[component]
fn ScheduleRow(slot: Schedule, form: RwSignal<ResourceForm<Schedule>>) -> impl IntoView {
    let ctx = use_app();
    let id = slot.id;
    let editing = slot.clone();

    view! {
        <div class="schedule-row">
            <div class="schedule-info">
                <span class="schedule-time">{slot.time.clone()}</span>
                <span class="schedule-activity">{slot.activity.clone()}</span>
                <span class="muted small">{format!("{} min", slot.duration)}</span>
                <span class="badge">{slot.students.clone()}</span>
            </div>
            <div class="card-actions">
                <button class="btn btn-ghost" on:click=move |_| form.update(|f| f.open_edit(&editing))>
                    "Edit"
                </button>
                <DeleteConfirmButton on_confirm={move |_| delete_item::<Schedule>(ctx, id)} />
            </div>
        </div>
    }
}

#[component]
fn ScheduleForm(form: RwSignal<ResourceForm<Schedule>>) -> impl IntoView {
    let ctx = use_app();

    let title = move || if form.with(|f| f.is_editing()) { "Edit Activity" } else { "Add Activity" };
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
                        label="Day"
                        options=choices(SCHOOL_DAYS)
                        value=Signal::derive(move || form.with(|f| f.draft().day.clone()))
                        on_change=move |v: String| form.update(|f| f.draft_mut().day = v)
                    />
                    <TextField
                        label="Time"
                        placeholder="9:00 AM"
                        value=Signal::derive(move || form.with(|f| f.draft().time.clone()))
                        on_input=move |v: String| form.update(|f| f.draft_mut().time = v)
                    />
                </div>
                <TextField
                    label="Activity *"
                    placeholder="Activity name"
                    value=Signal::derive(move || form.with(|f| f.draft().activity.clone()))
                    on_input=move |v: String| form.update(|f| f.draft_mut().activity = v)
                />
                <div class="form-grid">
                    <NumberField
                        label="Duration (min)"
                        min=5
                        value=Signal::derive(move || form.with(|f| f.draft().duration as i64))
                        on_input=move |v: i64| form.update(|f| f.draft_mut().duration = to_count(v))
                    />
                    <TextField
                        label="Students"
                        placeholder="All"
                        value=Signal::derive(move || form.with(|f| f.draft().students.clone()))
                        on_input=move |v: String| form.update(|f| f.draft_mut().students = v)
                    />
                </div>
                <FormActions form=form />
            </form>
        </div>
    }
}
