//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The session
//! store pushes every auth transition in here; components only read.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::AdminUser;
use crate::session::AuthState;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Admin session (`Loading` until local storage has been read)
    pub auth: AuthState,
    /// Decoded `adminUser`, when the stored record parses
    pub admin: Option<AdminUser>,
    /// Mobile sidebar toggle
    pub sidebar_open: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Mirror a session transition into the store
pub fn store_set_auth(store: &AppStore, state: &AuthState) {
    let admin = state.session().and_then(|s| s.user_as::<AdminUser>());
    store.admin().set(admin);
    store.auth().set(state.clone());
}

pub fn store_toggle_sidebar(store: &AppStore) {
    store.sidebar_open().update(|open| *open = !*open);
}

pub fn store_close_sidebar(store: &AppStore) {
    store.sidebar_open().set(false);
}
