//! Zai Toon Admin App
//!
//! Router, app-wide contexts and the status modal overlay.

use leptos::ev;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::components::{AdminShell, StatusModal, StatusModalContext};
use crate::config::AdminConfig;
use crate::context::AppContext;
use crate::pages::{
    BannersPage, DashboardPage, LoginPage, NotFoundPage, NotificationsPage, PuzzlesPage, QuestionsPage,
    QuizAttemptsPage, QuizTestPage, QuizzesPage, StoriesPage, SubmissionsPage, SupportPage, VideosPage,
};
use crate::session::SessionKeys;
use crate::store::{AppState, AppStore};

#[component]
pub fn App(config: AdminConfig) -> impl IntoView {
    // Global store; the session context mirrors auth into it
    let store: AppStore = Store::new(AppState::default());
    provide_context(store);

    let ctx = AppContext::new(config, store);
    provide_context(ctx);
    provide_context(StatusModalContext::new());

    // Another tab logged in or out
    let storage_listener = window_event_listener(ev::storage, move |event| {
        let key = event.key();
        if key.is_none() || key.as_deref() == Some(SessionKeys::ADMIN.token) {
            ctx.reload_session();
        }
    });
    on_cleanup(move || storage_listener.remove());

    log::info!("[app] api base {}", ctx.config().api_base_url);

    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/support") view=SupportPage/>
                <Route path=path!("/quiz-test") view=QuizTestPage/>
                <Route path=path!("/") view=|| view! { <AdminShell><DashboardPage/></AdminShell> }/>
                <Route path=path!("/stories") view=|| view! { <AdminShell><StoriesPage/></AdminShell> }/>
                <Route path=path!("/videos") view=|| view! { <AdminShell><VideosPage/></AdminShell> }/>
                <Route path=path!("/banners") view=|| view! { <AdminShell><BannersPage/></AdminShell> }/>
                <Route path=path!("/puzzles") view=|| view! { <AdminShell><PuzzlesPage/></AdminShell> }/>
                <Route path=path!("/quizzes") view=|| view! { <AdminShell><QuizzesPage/></AdminShell> }/>
                <Route path=path!("/questions") view=|| view! { <AdminShell><QuestionsPage/></AdminShell> }/>
                <Route path=path!("/submissions") view=|| view! { <AdminShell><SubmissionsPage/></AdminShell> }/>
                <Route path=path!("/notifications") view=|| view! { <AdminShell><NotificationsPage/></AdminShell> }/>
                <Route path=path!("/quiz-attempts") view=|| view! { <AdminShell><QuizAttemptsPage/></AdminShell> }/>
            </Routes>
        </Router>
        <StatusModal/>
    }
}
