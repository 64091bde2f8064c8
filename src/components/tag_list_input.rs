//! Tag List Input Component
//!
//! Chip list with a text input; Enter adds, × removes.

use leptos::prelude::*;

/// Editable list of short strings (interests, allergies, skills, activities).
///
/// Props:
/// - tags: current list
/// - on_add: raw input text when Enter is pressed (caller trims and validates)
/// - on_remove: index of the chip to drop
#[component]
pub fn TagListInput(
    #[prop(into)] label: String,
    #[prop(into)] tags: Signal<Vec<String>>,
    #[prop(into)] on_add: Callback<String>,
    #[prop(into)] on_remove: Callback<usize>,
    #[prop(into, optional)] placeholder: Option<String>,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(String::new());

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" {
            // keep the surrounding form from submitting
            ev.prevent_default();
            on_add.run(input_value.get());
            set_input_value.set(String::new());
        }
    };

    view! {
        <div class="form-field tag-list-input">
            <label>{label}</label>
            <div class="tag-chips">
                {move || tags.get().into_iter().enumerate().map(|(idx, tag)| view! {
                    <span class="tag-chip">
                        {tag}
                        <button
                            type="button"
                            class="tag-chip-remove"
                            on:click=move |_| on_remove.run(idx)
                        >
                            "×"
                        </button>
                    </span>
                }).collect_view()}
            </div>
            <input
                type="text"
                placeholder=placeholder.unwrap_or_else(|| "Type and press Enter".to_string())
                prop:value=move || input_value.get()
                on:input=move |ev| set_input_value.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
        </div>
    }
}
