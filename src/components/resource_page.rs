//! Resource Page Component
//!
//! Generic list screen for one `AdminResource`: header, loading/empty/error
//! states, card grid, pagination and the form modal.

use leptos::prelude::*;

use super::{FormModal, PaginationBar};
use crate::config::AdminConfig;
use crate::crud::{use_crud, Crud};
use crate::resource::{empty_state_cta, AdminResource, CardView, LoadPhase, Tone};

/// Full page for `resource`; the value is only a type marker
#[component]
pub fn ResourcePage<R: AdminResource>(resource: R) -> impl IntoView {
    let _ = resource;
    let crud = use_crud::<R>();
    let config = crud.config();

    view! {
        <section class="resource-page">
            <header class="page-header">
                <h1>{R::PLURAL}</h1>
                {R::CAN_CREATE.then(|| view! {
                    <button class="btn primary" on:click=move |_| crud.open_create()>
                        {format!("+ Add {}", R::SINGULAR)}
                    </button>
                })}
            </header>

            {move || list_body(crud, &config)}

            {R::PAGINATED.then(|| view! {
                <PaginationBar
                    pagination=Signal::derive(move || crud.state.with(|s| s.pagination.clone()))
                    disabled=Signal::derive(move || crud.state.with(|s| s.is_loading()))
                    on_page=Callback::new(move |page| crud.go_to_page(page))
                />
            })}

            <FormModal crud=crud/>
        </section>
    }
}

fn list_body<R: AdminResource>(crud: Crud<R>, config: &AdminConfig) -> AnyView {
    crud.state.with(|state| {
        if state.items.is_empty() {
            if state.is_loading() || state.phase == LoadPhase::Idle {
                return view! { <LoadingPanel label=R::PLURAL/> }.into_any();
            }
            if let Some(message) = state.error() {
                return view! {
                    <ErrorPanel message=message.to_string() on_retry=Callback::new(move |_| crud.reload())/>
                }
                .into_any();
            }
            return empty_state(crud).into_any();
        }

        let error = state.error().map(|message| {
            view! { <ErrorPanel message=message.to_string() on_retry=Callback::new(move |_| crud.reload())/> }
        });
        let cards = state
            .items
            .iter()
            .map(|item| item_card(crud, item, R::card(item, config)))
            .collect_view();

        view! {
            {error}
            <div class="card-grid" class:refreshing=state.is_loading()>{cards}</div>
        }
        .into_any()
    })
}

fn empty_state<R: AdminResource>(crud: Crud<R>) -> impl IntoView {
    view! {
        <div class="empty-state">
            <p>{format!("No {} yet.", R::PLURAL.to_lowercase())}</p>
            {R::CAN_CREATE.then(|| view! {
                <button class="btn primary" on:click=move |_| crud.open_create()>
                    {empty_state_cta(R::SINGULAR)}
                </button>
            })}
        </div>
    }
}

fn item_card<R: AdminResource>(crud: Crud<R>, item: &R::Item, card: CardView) -> impl IntoView {
    let id = R::id(item);
    let editable = item.clone();

    view! {
        <article class="resource-card">
            {card.image.map(|src| view! { <img class="card-image" src=src alt="" loading="lazy"/> })}
            <div class="card-body">
                <h3>{card.title}</h3>
                {card.subtitle.map(|s| view! { <p class="card-subtitle">{s}</p> })}
                <div class="card-badges">
                    {card.badges.into_iter().map(|b| view! {
                        <span class=tone_class(b.tone)>{b.label}</span>
                    }).collect_view()}
                </div>
                <dl class="card-details">
                    {card.details.into_iter().map(|(label, value)| view! {
                        <dt>{label}</dt>
                        <dd>{value}</dd>
                    }).collect_view()}
                </dl>
            </div>
            <div class="card-actions">
                {R::CAN_EDIT.then(|| view! {
                    <button class="btn secondary" on:click=move |_| crud.open_edit(&editable)>"Edit"</button>
                })}
                {R::CAN_DELETE.then(|| view! {
                    <button class="btn danger" on:click=move |_| crud.request_delete(id.clone())>"Delete"</button>
                })}
            </div>
        </article>
    }
}

pub fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "badge",
        Tone::Good => "badge good",
        Tone::Warn => "badge warn",
        Tone::Bad => "badge bad",
    }
}

#[component]
pub fn LoadingPanel(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="loading-panel">
            <div class="spinner"></div>
            <p>{format!("Loading {}...", label.to_lowercase())}</p>
        </div>
    }
}

/// Fetch failure with a retry button
#[component]
pub fn ErrorPanel(#[prop(into)] message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="error-panel">
            <p>{message}</p>
            <button class="btn secondary" on:click=move |_| on_retry.run(())>"Retry"</button>
        </div>
    }
}
