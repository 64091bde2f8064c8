//! Students Page
//!
//! Student cards with a create/edit form.

use leptos::prelude::*;

use super::{delete_item, submit_form, use_resource_list, FormActions, PageHeader};
use crate::components::{DeleteConfirmButton, NumberField, TagListInput, TextField};
use crate::context::use_app;
use crate::form::{add_tag, remove_tag, to_count, ResourceForm};
use crate::models::Student;

#[component]
pub fn StudentsPage() -> impl IntoView {
    let ctx = use_app();
    let (students, loading) = use_resource_list::<Student>(ctx);
    let form = RwSignal::new(ResourceForm::<Student>::new());

    let subtitle = move || format!("{} students enrolled", students.get().len());

    view! {
        <div class="page students-page">
            <PageHeader
                title="Student Management"
                subtitle=Signal::derive(subtitle)
                action_label="Add Student"
                on_action=Callback::new(move |_| form.update(|f| f.open_create()))
            />

            <Show when=move || form.with(|f| f.is_open())>
                <StudentForm form=form />
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="spinner"></div> }
            >
                <div class="card-grid">
                    {move || students.get().into_iter().map(|s| view! { <StudentCard student=s form=form /> }).collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn StudentCard(student: Student, form: RwSignal<ResourceForm<Student>>) -> impl IntoView {
    let ctx = use_app();
    let id = student.id;
    let editing = student.clone();

    view! {
        <div class="card student-card">
            <div class="card-header">
                <div>
                    <h3>{student.name.clone()}</h3>
                    <p class="muted">"Age: " {student.age}</p>
                </div>
                <div class="card-actions">
                    <button class="btn btn-ghost" on:click=move |_| form.update(|f| f.open_edit(&editing))>
                        "Edit"
                    </button>
                    <DeleteConfirmButton on_confirm={move |_| delete_item::<Student>(ctx, id)} />
                </div>
            </div>
            <div class="chip-row">
                {student.interests.iter().map(|t| view! {
                    <span class="chip chip-blue">{t.clone()}</span>
                }).collect_view()}
            </div>
            <div class="chip-row">
                {student.allergies.iter().map(|t| view! {
                    <span class="chip chip-red">"⚠ " {t.clone()}</span>
                }).collect_view()}
            </div>
            {(!student.parent_name.is_empty()).then(|| view! {
                <p class="muted small">
                    {format!("Parent: {} ({})", student.parent_name, student.parent_email)}
                </p>
            })}
        </div>
    }
}

#[component]
fn StudentForm(form: RwSignal<ResourceForm<Student>>) -> impl IntoView {
    let ctx = use_app();

    let title = move || if form.with(|f| f.is_editing()) { "Edit Student" } else { "Add New Student" };
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submit_form(ctx, form);
    };

    view! {
        <div class="card form-card">
            <h2>{title}</h2>
            <form on:submit=on_submit>
                <div class="form-grid">
                    <TextField
                        label="Name *"
                        placeholder="Student name"
                        value=Signal::derive(move || form.with(|f| f.draft().name.clone()))
                        on_input=move |v: String| form.update(|f| f.draft_mut().name = v)
                    />
                    <NumberField
                        label="Age *"
                        min=2
                        max=12
                        value=Signal::derive(move || form.with(|f| f.draft().age as i64))
                        on_input=move |v: i64| form.update(|f| f.draft_mut().age = to_count(v))
                    />
                    <TextField
                        label="Parent Name"
                        placeholder="Parent name"
                        value=Signal::derive(move || form.with(|f| f.draft().parent_name.clone()))
                        on_input=move |v: String| form.update(|f| f.draft_mut().parent_name = v)
                    />
                    <TextField
                        label="Parent Email"
                        input_type="email"
                        placeholder="parent@email.com"
                        value=Signal::derive(move || form.with(|f| f.draft().parent_email.clone()))
                        on_input=move |v: String| form.update(|f| f.draft_mut().parent_email = v)
                    />
                </div>
                <TagListInput
                    label="Interests"
                    placeholder="Add interest and press Enter"
                    tags=Signal::derive(move || form.with(|f| f.draft().interests.clone()))
                    on_add=move |v: String| form.update(|f| { add_tag(&mut f.draft_mut().interests, &v); })
                    on_remove=move |i: usize| form.update(|f| remove_tag(&mut f.draft_mut().interests, i))
                />
                <TagListInput
                    label="Allergies"
                    placeholder="Add allergy and press Enter"
                    tags=Signal::derive(move || form.with(|f| f.draft().allergies.clone()))
                    on_add=move |v: String| form.update(|f| { add_tag(&mut f.draft_mut().allergies, &v); })
                    on_remove=move |i: usize| form.update(|f| remove_tag(&mut f.draft_mut().allergies, i))
                />
                <FormActions form=form />
            </form>
        </div>
    }
}
