//! Login Page

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::api::admin_login;
use crate::components::use_status;
use crate::context::use_app_context;
use crate::session::AuthState;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::task::TaskScope;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let status = use_status();
    let scope = StoredValue::new(TaskScope::bound());

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        if email.trim().is_empty() || password.is_empty() {
            status.error("Email and password are required.");
            return;
        }
        set_submitting.set(true);
        let client = ctx.anonymous_client();
        scope.try_with_value(|s| {
            s.spawn(async move {
                let outcome = admin_login(&client, &email, &password).await;
                set_submitting.set(false);
                match outcome.map(|grant| ctx.login(grant)) {
                    // The store flips to Authenticated and the redirect below takes over
                    Ok(Ok(())) => status.success("Welcome back!"),
                    Ok(Err(err)) => {
                        log::error!("[login] could not persist session: {}", err);
                        status.error(err.to_string());
                    }
                    Err(err) => status.error(err.user_message()),
                }
            })
        });
    };

    view! {
        <Show
            when=move || !store.auth().with(AuthState::is_authenticated)
            fallback=|| view! { <Redirect path="/"/> }
        >
            <div class="login-page">
                <form class="login-card" on:submit=submit>
                    <div class="sidebar-brand">"Zai Toon"</div>
                    <h1>"Admin sign in"</h1>
                    <input
                        type="email"
                        placeholder="Email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </Show>
    }
}
