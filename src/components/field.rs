//! Form Field Components
//!
//! Labelled inputs shared by the resource forms and the settings tabs.

use leptos::prelude::*;

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(into, optional)] input_type: Option<String>,
    #[prop(into, optional)] placeholder: Option<String>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label>{label}</label>
            <input
                type=input_type.unwrap_or_else(|| "text".to_string())
                placeholder=placeholder.unwrap_or_default()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

/// Numeric input; unparsable text is ignored.
#[component]
pub fn NumberField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<i64>,
    #[prop(into)] on_input: Callback<i64>,
    #[prop(optional)] min: Option<i64>,
    #[prop(optional)] max: Option<i64>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label>{label}</label>
            <input
                type="number"
                min=min.map(|m| m.to_string())
                max=max.map(|m| m.to_string())
                prop:value=move || value.get().to_string()
                on:input=move |ev| {
                    if let Ok(parsed) = event_target_value(&ev).trim().parse::<i64>() {
                        on_input.run(parsed);
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_input: Callback<String>,
    #[prop(optional)] rows: Option<u32>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label>{label}</label>
            <textarea
                rows=rows.unwrap_or(3)
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

/// Dropdown. `placeholder` adds a leading empty choice.
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<String>>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into, optional)] placeholder: Option<String>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label>{label}</label>
            <select
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|text| view! { <option value="">{text}</option> })}
                {move || options.get().into_iter().map(|option| {
                    let selected = value.get() == option;
                    view! {
                        <option value=option.clone() selected=selected>
                            {option.clone()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

/// Label with a description on the left, switch on the right.
#[component]
pub fn ToggleField(
    #[prop(into)] label: String,
    #[prop(into, optional)] description: Option<String>,
    #[prop(into)] checked: Signal<bool>,
    #[prop(into)] on_toggle: Callback<bool>,
) -> impl IntoView {
    view! {
        <div class="toggle-field">
            <div class="toggle-text">
                <span class="toggle-label">{label}</span>
                {description.map(|d| view! { <span class="toggle-description">{d}</span> })}
            </div>
            <input
                type="checkbox"
                class="toggle"
                prop:checked=move || checked.get()
                on:change=move |ev| on_toggle.run(event_target_checked(&ev))
            />
        </div>
    }
}
