//! Admin Shell Component
//!
//! Session guard plus the sidebar layout shared by every protected page.

use leptos::prelude::*;
use leptos_router::components::{Redirect, A};
use leptos_router::hooks::use_location;

use crate::context::use_app_context;
use crate::session::AuthState;
use crate::store::{store_close_sidebar, store_toggle_sidebar, use_app_store, AppStateStoreFields};

/// Sidebar entries: (path, label)
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Dashboard"),
    ("/stories", "Stories"),
    ("/videos", "Videos"),
    ("/banners", "Banners"),
    ("/puzzles", "Puzzles"),
    ("/quizzes", "Quizzes"),
    ("/questions", "Questions"),
    ("/submissions", "Kid Submissions"),
    ("/notifications", "Notifications"),
    ("/quiz-attempts", "Quiz Attempts"),
    ("/support", "Support"),
];

/// Spinner while the session loads, redirect to `/login` without one
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let location = use_location();

    // Navigation is one of the points where an externally cleared token is noticed
    Effect::new(move |_| {
        let _ = location.pathname.get();
        ctx.reload_session();
    });

    move || match store.auth().get() {
        AuthState::Loading => view! {
            <div class="loading-panel">
                <div class="spinner"></div>
            </div>
        }
        .into_any(),
        AuthState::Unauthenticated => view! { <Redirect path="/login"/> }.into_any(),
        AuthState::Authenticated(_) => children().into_any(),
    }
}

/// Sidebar + content area, behind `RequireAuth`
#[component]
pub fn AdminShell(children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    // RequireAuth redirects to /login once the session is gone
    let logout = move |_| ctx.logout();

    let admin_name = move || {
        store
            .admin()
            .get()
            .map(|a| a.display_name().to_string())
            .unwrap_or_else(|| "Admin".to_string())
    };

    view! {
        <RequireAuth>
            <div class="admin-layout" class=("sidebar-open", move || store.sidebar_open().get())>
                <aside class="sidebar">
                    <div class="sidebar-brand">"Zai Toon"</div>
                    <ul class="sidebar-nav">
                        {NAV_LINKS.iter().map(|(path, label)| view! {
                            <li on:click=move |_| store_close_sidebar(&store)>
                                <A href=*path>{*label}</A>
                            </li>
                        }).collect_view()}
                    </ul>
                    <div class="sidebar-footer">
                        <span class="admin-name">{admin_name}</span>
                        <button class="btn secondary" on:click=logout>"Log out"</button>
                    </div>
                </aside>
                <main class="admin-content">
                    <button class="sidebar-toggle" on:click=move |_| store_toggle_sidebar(&store)>"☰"</button>
                    {children()}
                </main>
            </div>
        </RequireAuth>
    }
}
