//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::notice_tray::NoticeTray;
use crate::components::require_auth::RequireAuth;
use crate::config::{API_URL_META, ApiConfig};
use crate::pages::{dashboard::DashboardPage, face_recognition::FaceRecognitionPage, login::LoginPage};
use crate::state::auth::AuthGate;
use crate::state::notices::NoticeState;
use crate::util::auth::HOME_PATH;

/// HTML shell rendered on the server for SSR + hydration.
///
/// The backend address is published in a `<meta>` tag so the browser bundle
/// picks up the host's runtime configuration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let api_url = use_context::<ApiConfig>().unwrap_or_default().base_url().to_owned();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=API_URL_META content=api_url/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth gate, backend configuration and notice queue, and sets up
/// client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = use_context::<ApiConfig>().unwrap_or_else(runtime_config);
    provide_context(config);
    provide_context(AuthGate::default());
    provide_context(RwSignal::new(NoticeState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/vision-hub.css"/>
        <Title text="Vision Hub"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <RequireAuth><DashboardPage/></RequireAuth> }
                />
                <Route
                    path=StaticSegment("face-recognition")
                    view=|| view! { <RequireAuth><FaceRecognitionPage/></RequireAuth> }
                />
                <Route path=StaticSegment("") view=|| view! { <Redirect path=HOME_PATH/> }/>
            </Routes>
        </Router>
        <NoticeTray/>
    }
}

#[cfg(feature = "hydrate")]
fn runtime_config() -> ApiConfig {
    ApiConfig::from_document()
}

#[cfg(not(feature = "hydrate"))]
fn runtime_config() -> ApiConfig {
    ApiConfig::default()
}
