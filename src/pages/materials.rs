//! Materials Page
//!
//! Classroom materials with usage counter and stock flag.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{choices, delete_item, submit_form, use_resource_list, FormActions, PageHeader};
use crate::components::{DeleteConfirmButton, SelectField, TextAreaField, TextField, ToggleField};
use crate::context::{use_app, AppContext};
use crate::form::{self, failure_message, ResourceForm};
use crate::models::{Material, MATERIAL_CATEGORIES};

fn category_class(category: &str) -> &'static str {
    match category {
        "Practical Life" => "chip chip-amber",
        "Sensorial" => "chip chip-pink",
        "Language" => "chip chip-blue",
        "Mathematics" => "chip chip-green",
        "Art" => "chip chip-purple",
        "Science" => "chip chip-teal",
        _ => "chip",
    }
}

fn record_use(ctx: AppContext, material: Material) {
    let api = ctx.api();
    let cache = ctx.cache();
    spawn_local(async move {
        match form::record_use(&api, &cache, &material).await {
            Ok(message) => ctx.success(message),
            Err(err) => ctx.error(failure_message("record use of", "material", &err)),
        }
    });
}

#[component]
pub fn MaterialsPage() -> impl IntoView {
    let ctx = use_app();
    let (materials, loading) = use_resource_list::<Material>(ctx);
    let form = RwSignal::new(ResourceForm::<Material>::new());

    let subtitle = move || format!("{} materials in the classroom", materials.get().len());

    view! {
        <div class="page materials-page">
            <PageHeader
                title="Materials"
                subtitle=Signal::derive(subtitle)
                action_label="Add Material"
                on_action=Callback::new(move |_| form.update(|f| f.open_create()))
            />

            <Show when=move || form.with(|f| f.is_open())>
                <MaterialForm form=form />
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="spinner"></div> }
            >
                <div class="card-grid">
                    {move || materials.get().into_iter().map(|m| view! { <MaterialCard material=m form=form /> }).collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn MaterialCard(material: Material, form: RwSignal<ResourceForm<Material>>) -> impl IntoView {
    let ctx = use_app();
    let id = material.id;
    let editing = material.clone();
    let used = material.clone();

    let (stock_class, stock_label) = if material.in_stock {
        ("stock in-stock", "In Stock")
    } else {
        ("stock out-of-stock", "Out of Stock")
    };

    view! {
        <div class="card material-card">
            <div class="card-header">
                <div>
                    <h3>{material.name.clone()}</h3>
                    <span class=category_class(&material.category)>{material.category.clone()}</span>
                </div>
                <div class="card-actions">
                    <button
                        class="btn btn-ghost use-btn"
                        title="Record use"
                        on:click=move |_| record_use(ctx, used.clone())
                    >
                        "▶"
                    </button>
                    <button class="btn btn-ghost" on:click=move |_| form.update(|f| f.open_edit(&editing))>
                        "Edit"
                    </button>
                    <DeleteConfirmButton on_confirm={move |_| delete_item::<Material>(ctx, id)} />
                </div>
            </div>
            <p class="muted">{material.description.clone()}</p>
            <div class="material-meta">
                <span>{format!("Ages {}", material.age_range)}</span>
                <span>{format!("Used {}×", material.times_used)}</span>
                <span class=stock_class>{stock_label}</span>
            </div>
        </div>
    }
}

#[component]
fn MaterialForm(form: RwSignal<ResourceForm<Material>>) -> impl IntoView {
    let ctx = use_app();

    let title = move || if form.with(|f| f.is_editing()) { "Edit Material" } else { "Add Material" };
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
                        placeholder="Material name"
                        value=Signal::derive(move || form.with(|f| f.draft().name.clone()))
                        on_input=move |v: String| form.update(|f| f.draft_mut().name = v)
                    />
                    <SelectField
                        label="Category"
                        options=choices(MATERIAL_CATEGORIES)
                        value=Signal::derive(move || form.with(|f| f.draft().category.clone()))
                        on_change=move |v: String| form.update(|f| f.draft_mut().category = v)
                    />
                    <TextField
                        label="Age Range"
                        placeholder="3-6"
                        value=Signal::derive(move || form.with(|f| f.draft().age_range.clone()))
                        on_input=move |v: String| form.update(|f| f.draft_mut().age_range = v)
                    />
                    <ToggleField
                        label="In Stock"
                        checked=Signal::derive(move || form.with(|f| f.draft().in_stock))
                        on_toggle=move |v: bool| form.update(|f| f.draft_mut().in_stock = v)
                    />
                </div>
                <TextAreaField
                    label="Description"
                    value=Signal::derive(move || form.with(|f| f.draft().description.clone()))
                    on_input=move |v: String| form.update(|f| f.draft_mut().description = v)
                />
                <FormActions form=form />
            </form>
        </div>
    }
}
