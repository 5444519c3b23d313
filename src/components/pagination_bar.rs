//! Pagination Bar Component

use leptos::prelude::*;

use crate::models::Pagination;

/// Prev/next controls driven by the server's pagination cursor
#[component]
pub fn PaginationBar(
    #[prop(into)] pagination: Signal<Pagination>,
    #[prop(into)] on_page: Callback<u32>,
    #[prop(into, optional)] disabled: Signal<bool>,
) -> impl IntoView {
    let page = move || pagination.with(|p| p.page);

    view! {
        <Show when=move || pagination.with(|p| p.total_pages > 1)>
            <nav class="pagination-bar">
                <button
                    class="btn secondary"
                    disabled=move || disabled.get() || !pagination.with(Pagination::has_prev)
                    on:click=move |_| on_page.run(page().saturating_sub(1).max(1))
                >
                    "‹ Prev"
                </button>
                <span class="pagination-info">
                    {move || pagination.with(|p| format!("Page {} of {} ({} total)", p.page, p.total_pages, p.total))}
                </span>
                <button
                    class="btn secondary"
                    disabled=move || disabled.get() || !pagination.with(Pagination::has_next)
                    on:click=move |_| on_page.run(page() + 1)
                >
                    "Next ›"
                </button>
            </nav>
        </Show>
    }
}
