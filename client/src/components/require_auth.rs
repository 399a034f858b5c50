//! Route guard for authenticated screens.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthGate;
use crate::util::auth::{GuardDecision, guard_decision, install_unauth_redirect};

/// Renders `children` only for a signed-in session; otherwise replaces the
/// current history entry with `/login`.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let gate = expect_context::<AuthGate>();
    install_unauth_redirect(gate, use_navigate());

    let allowed = move || guard_decision(&gate.session().get()) == GuardDecision::Render;

    view! {
        <Show
            when=allowed
            fallback=|| view! { <p class="route-guard">"Redirecting to login..."</p> }
        >
            {children()}
        </Show>
    }
}
