//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes and the login page apply identical redirect behavior; the
//! decision itself is a pure function of the session so it can be tested
//! without a router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{AuthGate, Session};

/// Public sign-in route.
pub const LOGIN_PATH: &str = "/login";
/// Landing route after sign-in.
pub const HOME_PATH: &str = "/dashboard";

/// What a protected route should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectToLogin,
}

pub fn guard_decision(session: &Session) -> GuardDecision {
    if session.logged_in { GuardDecision::Render } else { GuardDecision::RedirectToLogin }
}

/// Auth redirects replace the current history entry so Back does not bounce
/// the user into the guard again.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Redirect to `/login` whenever the session is logged out.
pub fn install_unauth_redirect<F>(gate: AuthGate, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if guard_decision(&gate.session().get()) == GuardDecision::RedirectToLogin {
            navigate(LOGIN_PATH, redirect_options());
        }
    });
}

/// Redirect to the dashboard whenever the session is logged in.
pub fn install_authed_redirect<F>(gate: AuthGate, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if guard_decision(&gate.session().get()) == GuardDecision::Render {
            navigate(HOME_PATH, redirect_options());
        }
    });
}
