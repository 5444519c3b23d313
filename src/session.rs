//! Session Store
//!
//! Bearer token + user record kept in local storage under a pair of keys.
//! Transitions are plain methods; listeners registered with `subscribe` hear
//! about every state change, including ones picked up from other tabs via
//! `reload_from_storage`.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::api::LoginGrant;

/// Local storage key pair for one kind of session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
    pub token: &'static str,
    pub user: &'static str,
}

impl SessionKeys {
    pub const ADMIN: SessionKeys = SessionKeys { token: "adminToken", user: "adminUser" };
    pub const PLAYER: SessionKeys = SessionKeys { token: "userToken", user: "userData" };
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("could not write {0} to local storage")]
    Write(String),
}

/// Key/value storage the session persists into
pub trait TokenStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str);
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl TokenStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let storage = Self::storage().ok_or(SessionError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| SessionError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-process storage; pass `&MemoryStorage` to share it between stores
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl<S: TokenStorage> TokenStorage for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    /// Raw stored user record
    pub user: Option<Value>,
}

impl Session {
    pub fn user_as<T: DeserializeOwned>(&self) -> Option<T> {
        self.user.clone().and_then(|u| serde_json::from_value(u).ok())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.session().map(|s| s.token.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&AuthState)>;

pub struct SessionStore<S: TokenStorage> {
    storage: S,
    keys: SessionKeys,
    state: AuthState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Starts in `Loading`; call `load` once storage is reachable
    pub fn new(storage: S, keys: SessionKeys) -> Self {
        Self {
            storage,
            keys,
            state: AuthState::Loading,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Read storage and leave `Loading`
    pub fn load(&mut self) -> &AuthState {
        let next = self.read_storage();
        self.transition(next);
        &self.state
    }

    /// Re-read storage after an external change; notifies only if the
    /// session actually changed. Returns whether it did.
    pub fn reload_from_storage(&mut self) -> bool {
        let next = self.read_storage();
        if next == self.state {
            return false;
        }
        log::info!("[session] {} changed outside this tab", self.keys.token);
        self.transition(next);
        true
    }

    pub fn login(&mut self, grant: LoginGrant) -> Result<(), SessionError> {
        self.storage.set(self.keys.token, &grant.token)?;
        let stored_user = match &grant.user {
            Some(user) => self.storage.set(self.keys.user, &user.to_string()),
            None => {
                self.storage.remove(self.keys.user);
                Ok(())
            }
        };
        // A token without its user would come back as a half session
        if let Err(err) = stored_user {
            self.storage.remove(self.keys.token);
            log::warn!("[session] sign-in not saved ({}): {}", self.keys.token, err);
            return Err(err);
        }
        log::info!("[session] signed in ({})", self.keys.token);
        self.transition(AuthState::Authenticated(Session { token: grant.token, user: grant.user }));
        Ok(())
    }

    pub fn logout(&mut self) {
        self.storage.remove(self.keys.token);
        self.storage.remove(self.keys.user);
        log::info!("[session] signed out ({})", self.keys.token);
        self.transition(AuthState::Unauthenticated);
    }

    pub fn subscribe(&mut self, listener: impl Fn(&AuthState) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn read_storage(&self) -> AuthState {
        match self.storage.get(self.keys.token).filter(|t| !t.trim().is_empty()) {
            Some(token) => {
                let user = self
                    .storage
                    .get(self.keys.user)
                    .and_then(|raw| serde_json::from_str(&raw).ok());
                AuthState::Authenticated(Session { token, user })
            }
            None => AuthState::Unauthenticated,
        }
    }

    fn transition(&mut self, next: AuthState) {
        self.state = next;
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }
}
