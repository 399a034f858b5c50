//! Face and emotion recognition page: file upload tab and live stream tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns both session states and the realtime channel. The channel
//! opens on mount and is aborted on unmount together with every outstanding
//! object URL, so remounting never stacks a second set of handlers.

#[cfg(test)]
#[path = "face_recognition_test.rs"]
mod face_recognition_test;

use leptos::prelude::*;

use crate::components::stream_panel::StreamPanel;
use crate::components::upload_panel::UploadPanel;
use crate::net::channel::ChannelSender;
use crate::state::stream::StreamState;
use crate::state::upload::{UploadSignal, UploadState};
use crate::util::auth::HOME_PATH;
use crate::util::media::BrowserHandles;

/// Which tab is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Upload,
    Stream,
}

impl Tab {
    pub const ALL: [Self; 2] = [Self::Upload, Self::Stream];

    pub fn label(self) -> &'static str {
        match self {
            Self::Upload => "Upload File",
            Self::Stream => "Live Stream",
        }
    }
}

#[component]
pub fn FaceRecognitionPage() -> impl IntoView {
    let upload: UploadSignal = RwSignal::new_local(UploadState::default());
    let stream = RwSignal::new(StreamState::default());
    let sender = StoredValue::new(ChannelSender::default());
    let tab = RwSignal::new(Tab::default());

    #[cfg(feature = "hydrate")]
    {
        let notices = expect_context::<RwSignal<crate::state::notices::NoticeState>>();
        let url = expect_context::<crate::config::ApiConfig>().socket_url();
        leptos::logging::log!("opening channel to {url}");
        sender.set_value(crate::net::channel::spawn_channel(url, stream, upload, notices));
    }

    on_cleanup(move || {
        sender.with_value(ChannelSender::close);
        upload.try_update(|u| u.teardown(&mut BrowserHandles));
    });

    view! {
        <div class="recognition-page">
            <header class="recognition-page__header toolbar">
                <a class="btn toolbar__back" href=HOME_PATH>
                    "← Back to Dashboard"
                </a>
                <h1 class="toolbar__title">"Face Recognition"</h1>
                <span class="toolbar__spacer"></span>
            </header>

            <main class="recognition-page__body">
                <div class="tabs" role="tablist">
                    {Tab::ALL
                        .into_iter()
                        .map(|t| {
                            view! {
                                <button
                                    class="tabs__tab"
                                    class:tabs__tab--active=move || tab.get() == t
                                    role="tab"
                                    aria-selected=move || (tab.get() == t).to_string()
                                    on:click=move |_| tab.set(t)
                                >
                                    {t.label()}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
                <Show
                    when=move || tab.get() == Tab::Upload
                    fallback=move || {
                        view! {
                            <StreamPanel
                                stream=stream
                                sender=sender
                                upload_busy=Signal::derive(move || upload.with(UploadState::is_processing))
                            />
                        }
                    }
                >
                    <UploadPanel upload=upload/>
                </Show>
            </main>
        </div>
    }
}
