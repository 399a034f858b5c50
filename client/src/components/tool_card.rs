//! Card linking to one analysis tool on the dashboard.

use leptos::prelude::*;

#[component]
pub fn ToolCard(title: &'static str, description: &'static str, href: String) -> impl IntoView {
    view! {
        <a class="tool-card" href=href>
            <span class="tool-card__title">{title}</span>
            <span class="tool-card__description">{description}</span>
            <span class="tool-card__action">"Open Tool"</span>
        </a>
    }
}
