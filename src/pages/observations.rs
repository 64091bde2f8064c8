//! Observations Page

use leptos::prelude::*;

use super::{choices, delete_item, submit_form, use_resource_list, FormActions, PageHeader};
use crate::calendar::format_date;
use crate::components::{DeleteConfirmButton, SelectField, TagListInput, TextAreaField, TextField};
use crate::context::use_app;
use crate::dashboard::newest_first;
use crate::form::{add_tag, remove_tag, ResourceForm};
use crate::models::{Observation, Student, LEARNING_AREAS};

#[component]
pub fn ObservationsPage() -> impl IntoView {
    let ctx = use_app();
    let (observations, loading) = use_resource_list::<Observation>(ctx);
    let (students, _) = use_resource_list::<Student>(ctx);
    let form = RwSignal::new(ResourceForm::<Observation>::new());

    let subtitle = move || format!("{} observations recorded", observations.get().len());
    let student_names = Signal::derive(move || students.get().into_iter().map(|s| s.name).collect());

    view! {
        <div class="page observations-page">
            <PageHeader
                title="Observations"
                subtitle=Signal::derive(subtitle)
                action_label="New Observation"
                on_action=Callback::new(move |_| form.update(|f| f.open_create()))
            />

            <Show when=move || form.with(|f| f.is_open())>
                <ObservationForm form=form student_names=student_names />
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="spinner"></div> }
            >
                <div class="card-list">
                    {move || observations.with(|all| {
                        newest_first(all)
                            .into_iter()
                            .cloned()
                            .map(|o| view! { <ObservationCard observation=o form=form /> })
                            .collect_view()
                    })}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ObservationCard(observation: Observation, form: RwSignal<ResourceForm<Observation>>) -> impl IntoView {
    let ctx = use_app();
    let id = observation.id;
    let editing = observation.clone();

    view! {
        <div class="card observation-card">
            <div class="card-header">
                <div>
                    <h3>{observation.student.clone()}</h3>
                    <p class="muted small">
                        {format!("{} · {}", format_date(&observation.date), observation.area)}
                    </p>
                </div>
                <div class="card-actions">
                    <button class="btn btn-ghost" on:click=move |_| form.update(|f| f.open_edit(&editing))>
                        "Edit"
                    </button>
                    <DeleteConfirmButton on_confirm={move |_| delete_item::<Observation>(ctx, id)} />
                </div>
            </div>
            <div class="chip-row">
                {observation.skills.iter().map(|s| view! {
                    <span class="chip chip-green">{s.clone()}</span>
                }).collect_view()}
            </div>
            <p class="muted">{observation.notes.clone()}</p>
        </div>
    }
}

#[component]
fn ObservationForm(form: RwSignal<ResourceForm<Observation>>, student_names: Signal<Vec<String>>) -> impl IntoView {
    let ctx = use_app();

    let title = move || if form.with(|f| f.is_editing()) { "Edit Observation" } else { "New Observation" };
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submit_form(ctx, form);
    };

    view! {
        <div class="card form-card">
            <h2>{title}</h2>
            <form on:submit=on_submit>
                <div class="form-grid three">
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
                        label="Area"
                        options=choices(LEARNING_AREAS)
                        value=Signal::derive(move || form.with(|f| f.draft().area.clone()))
                        on_change=move |v: String| form.update(|f| f.draft_mut().area = v)
                    />
                </div>
                <TagListInput
                    label="Skills"
                    placeholder="Add skill and press Enter"
                    tags=Signal::derive(move || form.with(|f| f.draft().skills.clone()))
                    on_add=move |v: String| form.update(|f| { add_tag(&mut f.draft_mut().skills, &v); })
                    on_remove=move |i: usize| form.update(|f| remove_tag(&mut f.draft_mut().skills, i))
                />
                <TextAreaField
                    label="Notes *"
                    rows=4
                    value=Signal::derive(move || form.with(|f| f.draft().notes.clone()))
                    on_input=move |v: String| form.update(|f| f.draft_mut().notes = v)
                />
                <FormActions form=form />
            </form>
        </div>
    }
}
