//! Dashboard page listing the available analysis tools.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Signing out only clears the
//! session; the route guard wrapping this page performs the redirect.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::tool_card::ToolCard;
use crate::state::auth::AuthGate;

/// One entry in the tool grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tool {
    pub title: &'static str,
    pub description: &'static str,
    /// Route segment, without the leading slash.
    pub slug: &'static str,
}

/// Tools offered on the dashboard, in display order.
pub const TOOLS: &[Tool] = &[Tool {
    title: "Face and Emotion Recognition",
    description: "Identify and verify faces and emotion",
    slug: "face-recognition",
}];

pub fn tool_route(tool: &Tool) -> String {
    format!("/{}", tool.slug)
}

pub fn welcome_label(username: Option<&str>) -> String {
    match username {
        Some(name) if !name.is_empty() => format!("Welcome, {name}"),
        _ => "Welcome".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let gate = expect_context::<AuthGate>();

    let on_logout = move |_| gate.logout();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__title">"Vision Hub"</span>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{move || welcome_label(gate.username().as_deref())}</span>
                <button class="btn toolbar__logout" on:click=on_logout title="Sign Out">
                    "Sign Out"
                </button>
            </header>

            <main class="dashboard-page__body">
                <h2>"AI Vision Tools"</h2>
                <div class="dashboard-page__cards">
                    {TOOLS
                        .iter()
                        .map(|tool| {
                            view! {
                                <ToolCard
                                    title=tool.title
                                    description=tool.description
                                    href=tool_route(tool)
                                />
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </main>
        </div>
    }
}
