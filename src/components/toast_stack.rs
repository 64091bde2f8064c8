//! Toast Stack Component

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

/// Bottom-right notices; click to dismiss early.
#[component]
pub fn ToastStack() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-stack">
            <For
                each=move || store.notices().with(|board| board.notices().to_vec())
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div
                            class=notice.kind.css_class()
                            on:click=move |_| store.notices().write().dismiss(id)
                        >
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
