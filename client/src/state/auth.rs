//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware pages to coordinate login redirects and
//! identity-dependent rendering.
//!
//! TRADE-OFFS
//! ==========
//! Login is a local placeholder gate, not a security boundary: no password is
//! stored, hashed or sent anywhere, and the session is lost on reload. The
//! acceptance rule sits behind [`AuthPolicy`] so a verified credential
//! exchange can replace it without touching pages.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;

/// Decides whether a username/password pair is accepted.
pub trait AuthPolicy: Send + Sync {
    fn accepts(&self, username: &str, password: &str) -> bool;
}

/// Accepts any non-empty username with a password longer than three
/// characters, counted in UTF-16 code units as browser inputs report length.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderPolicy;

impl AuthPolicy for PlaceholderPolicy {
    fn accepts(&self, username: &str, password: &str) -> bool {
        !username.is_empty() && password.encode_utf16().count() > 3
    }
}

/// Who is signed in, if anyone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
}

impl Session {
    /// Sign in when `policy` accepts the credentials. Leaves the session
    /// untouched and returns `false` otherwise.
    pub fn login(&mut self, policy: &dyn AuthPolicy, username: &str, password: &str) -> bool {
        if !policy.accepts(username, password) {
            return false;
        }
        *self = Self { logged_in: true, username: Some(username.to_owned()) };
        true
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }
}

/// Context handle over the reactive session and the active policy.
///
/// Provided once at the application root; pages and guards read it with
/// `expect_context::<AuthGate>()`.
#[derive(Clone, Copy)]
pub struct AuthGate {
    session: RwSignal<Session>,
    policy: StoredValue<Arc<dyn AuthPolicy>>,
}

impl AuthGate {
    pub fn new(policy: Arc<dyn AuthPolicy>) -> Self {
        Self { session: RwSignal::new(Session::default()), policy: StoredValue::new(policy) }
    }

    /// Reactive read access to the session.
    pub fn session(&self) -> ReadSignal<Session> {
        self.session.read_only()
    }

    /// Tracked: re-runs dependents when the login flag changes.
    pub fn is_logged_in(&self) -> bool {
        self.session.with(|s| s.logged_in)
    }

    /// Tracked username of the signed-in user.
    pub fn username(&self) -> Option<String> {
        self.session.with(|s| s.username.clone())
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        let policy = self.policy.get_value();
        let mut next = self.session.get_untracked();
        if !next.login(policy.as_ref(), username, password) {
            return false;
        }
        self.session.set(next);
        true
    }

    pub fn logout(&self) {
        self.session.set(Session::default());
    }
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new(Arc::new(PlaceholderPolicy))
    }
}
