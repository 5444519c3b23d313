//! Application Context
//!
//! Shared handles provided via Leptos Context API: build config and the
//! admin session.

use leptos::prelude::*;

use crate::api::{ApiClient, LoginGrant};
use crate::config::AdminConfig;
use crate::session::{AuthState, BrowserStorage, SessionError, SessionKeys, SessionStore};
use crate::store::{store_set_auth, AppStore};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AdminConfig>,
    session: StoredValue<SessionStore<BrowserStorage>, LocalStorage>,
}

impl AppContext {
    /// Build the admin session, mirror it into `store` and read storage once
    pub fn new(config: AdminConfig, store: AppStore) -> Self {
        let mut session = SessionStore::new(BrowserStorage, SessionKeys::ADMIN);
        session.subscribe(move |state| store_set_auth(&store, state));
        session.load();

        Self {
            config: StoredValue::new(config),
            session: StoredValue::new_local(session),
        }
    }

    pub fn config(&self) -> AdminConfig {
        self.config.get_value()
    }

    pub fn auth(&self) -> AuthState {
        self.session.with_value(|s| s.state().clone())
    }

    /// Client carrying the current admin token
    pub fn client(&self) -> ApiClient {
        let base = self.config.with_value(|c| c.api_base_url.clone());
        ApiClient::new(base, self.auth().token())
    }

    /// Client without credentials, for login endpoints
    pub fn anonymous_client(&self) -> ApiClient {
        ApiClient::new(self.config.with_value(|c| c.api_base_url.clone()), None)
    }

    pub fn login(&self, grant: LoginGrant) -> Result<(), SessionError> {
        self.session
            .try_update_value(|s| s.login(grant))
            .unwrap_or(Err(SessionError::Unavailable))
    }

    pub fn logout(&self) {
        self.session.update_value(|s| s.logout());
    }

    /// Pick up a token change made in another tab
    pub fn reload_session(&self) {
        self.session.update_value(|s| {
            s.reload_from_storage();
        });
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
