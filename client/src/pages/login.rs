//! Login page backed by the local placeholder gate.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthGate;
use crate::util::auth::{HOME_PATH, install_authed_redirect, redirect_options};

/// Inline message for rejected credentials.
pub const LOGIN_REJECTED: &str = "Enter a username and a password longer than 3 characters.";

/// Attempt a sign-in through `gate`.
///
/// # Errors
///
/// Returns the inline message to show when the credentials are rejected.
pub fn submit_login(gate: AuthGate, username: &str, password: &str) -> Result<(), &'static str> {
    if gate.login(username, password) { Ok(()) } else { Err(LOGIN_REJECTED) }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let gate = expect_context::<AuthGate>();
    let navigate = use_navigate();
    install_authed_redirect(gate, navigate.clone());

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match submit_login(gate, &username.get_untracked(), &password.get_untracked()) {
            Ok(()) => {
                info.set(String::new());
                password.set(String::new());
                navigate(HOME_PATH, redirect_options());
            }
            Err(message) => info.set(message.to_owned()),
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Vision Hub"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit">
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
