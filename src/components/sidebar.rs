//! Sidebar Component
//!
//! Page navigation, signed-in teacher and logout.

use leptos::prelude::*;

use crate::context::use_app;
use crate::pages::Page;
use crate::session::AuthState;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app();

    let user_name = move || match ctx.auth.get() {
        AuthState::Authenticated(user) => user.name,
        _ => String::new(),
    };
    let classroom = move || match ctx.auth.get() {
        AuthState::Authenticated(user) => user.classroom.unwrap_or_default(),
        _ => String::new(),
    };

    let logout = move |_| {
        ctx.session().logout();
        ctx.sync_auth();
        ctx.navigate(Page::Dashboard);
    };

    view! {
        <aside class="sidebar">
            <div class="sidebar-brand">
                <span class="brand-mark">"M"</span>
                <span class="brand-name">"Monty"</span>
            </div>

            <nav class="sidebar-nav">
                {Page::ALL.into_iter().map(|page| {
                    let class = move || {
                        if ctx.page.get() == page { "nav-item active" } else { "nav-item" }
                    };
                    view! {
                        <button class=class on:click=move |_| ctx.navigate(page)>
                            <span class="nav-icon">{page.icon()}</span>
                            <span class="nav-label">{page.label()}</span>
                        </button>
                    }
                }).collect_view()}
            </nav>

            <div class="sidebar-footer">
                <div class="sidebar-user">
                    <span class="user-name">{user_name}</span>
                    <span class="user-classroom">{classroom}</span>
                </div>
                <button class="btn btn-ghost logout-btn" on:click=logout>"Log out"</button>
            </div>
        </aside>
    }
}
