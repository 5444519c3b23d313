//! Debounce
//!
//! Last-write-wins debouncing split into a pure ticket counter and a timer
//! hook. Every input takes a ticket; when its timer fires, only the newest
//! ticket yields a value, so a burst produces exactly one result.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self { generation: 0, pending: None }
    }
}

impl<T> Debouncer<T> {
    /// Record a new input; returns the ticket its timer must present
    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Timer fired for `ticket`: yields the value only for the latest input
    pub fn fire(&mut self, ticket: u64) -> Option<T> {
        if ticket == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop whatever is pending (e.g. an explicit "Clear")
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}

/// Debounced callback bound to the current reactive owner.
///
/// Each `call` restarts the timer; the previous `Timeout` is dropped, which
/// cancels it. Disposing the owner drops the pending timer too.
pub struct Debounced<T: Send + Sync + 'static> {
    state: StoredValue<Debouncer<T>>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
    on_settle: StoredValue<Box<dyn Fn(T)>, LocalStorage>,
    delay_ms: u32,
}

impl<T: Send + Sync + 'static> Clone for Debounced<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Debounced<T> {}

impl<T: Send + Sync + 'static> Debounced<T> {
    pub fn new(delay_ms: u32, on_settle: impl Fn(T) + 'static) -> Self {
        Self {
            state: StoredValue::new(Debouncer::default()),
            timer: StoredValue::new_local(None),
            on_settle: StoredValue::new_local(Box::new(on_settle)),
            delay_ms,
        }
    }

    pub fn call(&self, value: T) {
        let Some(ticket) = self.state.try_update_value(|d| d.push(value)) else {
            return;
        };
        let this = *self;
        let handle = Timeout::new(self.delay_ms, move || {
            if let Some(value) = this.state.try_update_value(|d| d.fire(ticket)).flatten() {
                this.on_settle.try_with_value(|settle| settle(value));
            }
        });
        self.timer.set_value(Some(handle));
    }

    /// Forget the pending input without firing
    pub fn cancel(&self) {
        self.timer.set_value(None);
        self.state.try_update_value(Debouncer::cancel);
    }
}
