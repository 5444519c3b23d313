//! Dashboard Page
//!
//! Static landing page; links only, no requests.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::NAV_LINKS;
use crate::models::AdminUser;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_app_store();
    let greeting = move || {
        store
            .admin()
            .with(|admin| admin.as_ref().map(AdminUser::display_name).map(str::to_string))
            .map(|name| format!("Welcome, {}", name))
            .unwrap_or_else(|| "Welcome".to_string())
    };

    view! {
        <section class="dashboard">
            <h1>{greeting}</h1>
            <p class="muted">"Manage stories, videos and games for Zai Toon."</p>
            <div class="dashboard-grid">
                {NAV_LINKS
                    .iter()
                    .filter(|(path, _)| *path != "/")
                    .map(|(path, label)| view! {
                        <A href=*path attr:class="dashboard-tile">{*label}</A>
                    })
                    .collect_view()}
                <A href="/quiz-test" attr:class="dashboard-tile">"Quiz Test"</A>
            </div>
        </section>
    }
}
