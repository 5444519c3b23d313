//! Status Modal Component
//!
//! One app-wide overlay for success, error, loading and confirmation.
//! Pages talk to it through `StatusModalContext`.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::status::{StatusKind, StatusModalState, StatusView};

type Action = Box<dyn Fn()>;

/// Handle for opening the status modal from anywhere below `App`
#[derive(Clone, Copy)]
pub struct StatusModalContext {
    state: RwSignal<StatusModalState>,
    on_confirm: StoredValue<Option<Action>, LocalStorage>,
    on_cancel: StoredValue<Option<Action>, LocalStorage>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl StatusModalContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(StatusModalState::default()),
            on_confirm: StoredValue::new_local(None),
            on_cancel: StoredValue::new_local(None),
            timer: StoredValue::new_local(None),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(StatusView::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(StatusView::error(message));
    }

    pub fn loading(&self, message: impl Into<String>) {
        self.show(StatusView::loading(message));
    }

    /// Ask before doing something; `on_confirm` runs after the modal closes
    pub fn confirm(&self, title: impl Into<String>, message: impl Into<String>, on_confirm: impl Fn() + 'static) {
        self.show(StatusView::confirmation(title, message));
        self.on_confirm.set_value(Some(Box::new(on_confirm)));
    }

    /// Same as `confirm`, with an action for the Cancel button
    pub fn confirm_with_cancel(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: impl Fn() + 'static,
        on_cancel: impl Fn() + 'static,
    ) {
        self.confirm(title, message, on_confirm);
        self.on_cancel.set_value(Some(Box::new(on_cancel)));
    }

    /// Dismiss without running any pending action
    pub fn close(&self) {
        self.timer.set_value(None);
        self.clear_actions();
        self.state.update(StatusModalState::close);
    }

    /// Drop a Loading or Confirmation view left behind by a page that is
    /// going away; its pending actions are discarded with it
    pub fn dismiss_blocking(&self) {
        let closed = self.state.try_update(StatusModalState::dismiss_blocking).unwrap_or(false);
        if closed {
            self.timer.try_set_value(None);
            self.on_confirm.try_set_value(None);
            self.on_cancel.try_set_value(None);
        }
    }

    /// Tie `dismiss_blocking` to the current owner's cleanup
    pub fn dismiss_blocking_on_cleanup(&self) {
        let status = *self;
        on_cleanup(move || status.dismiss_blocking());
    }

    pub fn current(&self) -> Option<StatusView> {
        self.state.with(|s| s.current().cloned())
    }

    fn show(&self, view: StatusView) {
        let delay = view.kind.auto_close_ms();
        self.clear_actions();
        let mut generation = 0;
        self.state.update(|s| generation = s.show(view));

        // Replacing the stored Timeout cancels any earlier one
        let handle = delay.map(|ms| {
            let state = self.state;
            Timeout::new(ms, move || {
                state.try_update(|s| s.expire(generation));
            })
        });
        self.timer.set_value(handle);
    }

    fn clear_actions(&self) {
        self.on_confirm.set_value(None);
        self.on_cancel.set_value(None);
    }

    fn run_confirm(&self) {
        let action = self.on_confirm.try_update_value(Option::take).flatten();
        self.close();
        if let Some(action) = action {
            action();
        }
    }

    fn run_cancel(&self) {
        let action = self.on_cancel.try_update_value(Option::take).flatten();
        self.close();
        if let Some(action) = action {
            action();
        }
    }
}

impl Default for StatusModalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_status() -> StatusModalContext {
    use_context::<StatusModalContext>().expect("StatusModalContext should be provided")
}

/// Overlay rendered once in the app shell
#[component]
pub fn StatusModal() -> impl IntoView {
    let status = use_status();

    view! {
        {move || status.current().map(|shown| {
            let kind = shown.kind;
            let dismissable = kind != StatusKind::Loading;
            view! {
                <div class="modal-backdrop" on:click=move |_| if dismissable { status.run_cancel() }>
                    <div class=kind.css_class() on:click=|ev| ev.stop_propagation()>
                        <div class="status-icon">{kind.icon()}</div>
                        <h3>{shown.title.clone()}</h3>
                        <p>{shown.message.clone()}</p>
                        {match kind {
                            StatusKind::Confirmation => view! {
                                <div class="modal-actions">
                                    <button class="btn secondary" on:click=move |_| status.run_cancel()>"Cancel"</button>
                                    <button class="btn danger" on:click=move |_| status.run_confirm()>"Confirm"</button>
                                </div>
                            }.into_any(),
                            StatusKind::Loading => view! { <div class="spinner"></div> }.into_any(),
                            _ => view! {
                                <div class="modal-actions">
                                    <button class="btn" on:click=move |_| status.close()>"OK"</button>
                                </div>
                            }.into_any(),
                        }}
                    </div>
                </div>
            }
        })}
    }
}
