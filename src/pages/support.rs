//! Support Page
//!
//! Public contact details plus recent log lines to paste into a bug report.

use leptos::prelude::*;

const SUPPORT_EMAIL: &str = "support@zaitoon.app";

#[component]
pub fn SupportPage() -> impl IntoView {
    let (entries, set_entries) = signal(admin_logger::recent());

    view! {
        <section class="support-page">
            <h1>"Support"</h1>
            <p>"Questions about the admin console or the Zai Toon app?"</p>
            <ul class="contact-list">
                <li>"Email: " <a href=format!("mailto:{}", SUPPORT_EMAIL)>{SUPPORT_EMAIL}</a></li>
                <li>"Hours: Sunday to Thursday, 9:00 to 17:00"</li>
            </ul>

            <h2>"Diagnostics"</h2>
            <p class="muted">"Recent activity in this browser tab. Include it when reporting a problem."</p>
            <button class="btn secondary" on:click=move |_| set_entries.set(admin_logger::recent())>"Refresh"</button>
            <pre class="log-panel">
                {move || {
                    let lines = entries.get();
                    if lines.is_empty() {
                        "No log entries yet.".to_string()
                    } else {
                        lines.iter().map(|e| e.format_line()).collect::<Vec<_>>().join("\n")
                    }
                }}
            </pre>
        </section>
    }
}
