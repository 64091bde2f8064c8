//! Auth Session
//!
//! Owns the login lifecycle on top of an [`ApiClient`] and its token store.
//! `init` verifies a stored token once at startup; `teardown` makes an
//! in-flight `init` drop its result.

use std::cell::{Cell, RefCell};

use log::{info, warn};

use crate::api::ApiClient;
use crate::models::User;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    /// Stored token found, identity check in flight
    Verifying,
    Authenticated(User),
}

pub struct Session {
    api: ApiClient,
    state: RefCell<AuthState>,
    torn_down: Cell<bool>,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self { api, state: RefCell::new(AuthState::Anonymous), torn_down: Cell::new(false) }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        match &*self.state.borrow() {
            AuthState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), AuthState::Authenticated(_))
    }

    fn set_state(&self, state: AuthState) {
        *self.state.borrow_mut() = state;
    }

    /// Restore a session from the stored token. Failures are silent.
    pub async fn init(&self) -> AuthState {
        if self.api.tokens().get().is_none() {
            self.set_state(AuthState::Anonymous);
            return self.state();
        }

        self.set_state(AuthState::Verifying);
        let result = self.api.me().await;

        if result.is_err() {
            self.api.tokens().clear();
        }
        if self.torn_down.get() {
            info!("[SESSION] Identity check finished after teardown, ignoring");
            return self.state();
        }

        match result {
            Ok(user) => {
                info!("[SESSION] Restored session for {}", user.username);
                self.set_state(AuthState::Authenticated(user));
            }
            Err(err) => {
                warn!("[SESSION] Stored token rejected: {}", err);
                self.set_state(AuthState::Anonymous);
            }
        }
        self.state()
    }

    pub fn teardown(&self) {
        self.torn_down.set(true);
    }

    /// Authenticate, store the token, then load the identity.
    /// Any failure leaves no token behind.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        let token = match self.api.login(username, password).await {
            Ok(token) => token,
            Err(err) => {
                warn!("[SESSION] Login failed for {}: {}", username, err);
                self.api.tokens().clear();
                return false;
            }
        };
        self.api.tokens().set(&token.access_token);

        match self.api.me().await {
            Ok(user) => {
                info!("[SESSION] Logged in as {}", user.username);
                self.set_state(AuthState::Authenticated(user));
                true
            }
            Err(err) => {
                warn!("[SESSION] Identity lookup failed after login: {}", err);
                self.api.tokens().clear();
                self.set_state(AuthState::Anonymous);
                false
            }
        }
    }

    pub fn logout(&self) {
        self.api.tokens().clear();
        self.set_state(AuthState::Anonymous);
        info!("[SESSION] Logged out");
    }
}
