//! Live stream tab: start/stop the server-side camera stream and show the
//! latest annotated frame.

use leptos::prelude::*;
use wire::MediaKind;

use crate::net::channel::ChannelSender;
use crate::state::notices::{Notice, NoticeState, notify};
use crate::state::stream::{ConnectionStatus, StreamState};
use crate::util::format::stream_overlay_line;

#[component]
pub fn StreamPanel(
    stream: RwSignal<StreamState>,
    sender: StoredValue<ChannelSender>,
    /// An upload analysis is in flight.
    #[prop(into)]
    upload_busy: Signal<bool>,
) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    let on_start = move |_| {
        if !stream.with_untracked(|s| s.can_start(upload_busy.get_untracked())) {
            return;
        }
        match stream.try_update(StreamState::start) {
            Some(Ok(Some(event))) => {
                if !sender.with_value(|s| s.send(event)) {
                    leptos::logging::warn!("channel closed, {} dropped", event.name());
                }
            }
            Some(Err(err)) => notify(notices, Notice::from(&err)),
            Some(Ok(None)) | None => {}
        }
    };

    let on_stop = move |_| {
        if let Some(Some(event)) = stream.try_update(StreamState::stop) {
            if !sender.with_value(|s| s.send(event)) {
                leptos::logging::warn!("channel closed, {} dropped", event.name());
            }
        }
    };

    let connection_label = move || match stream.with(|s| s.connection) {
        ConnectionStatus::Connected => "Connected",
        ConnectionStatus::Connecting => "Connecting...",
        ConnectionStatus::Disconnected => "Disconnected",
    };
    let connection_class = move || match stream.with(|s| s.connection) {
        ConnectionStatus::Connected => "stream-panel__dot stream-panel__dot--connected",
        ConnectionStatus::Connecting => "stream-panel__dot stream-panel__dot--connecting",
        ConnectionStatus::Disconnected => "stream-panel__dot stream-panel__dot--disconnected",
    };

    let overlay = move || {
        stream.with(|s| {
            s.last_analysis
                .as_ref()
                .filter(|a| a.kind == MediaKind::Stream)
                .map(stream_overlay_line)
        })
    };

    view! {
        <div class="stream-panel">
            <p class="stream-panel__connection">
                <span class=connection_class></span>
                {connection_label}
            </p>
            <div class="stream-panel__frame">
                <Show
                    when=move || stream.with(|s| s.active)
                    fallback=|| {
                        view! {
                            <div class="stream-panel__idle">
                                <p>"Camera stream not active"</p>
                            </div>
                        }
                    }
                >
                    {move || match stream.with(|s| s.last_frame.clone()) {
                        Some(src) => view! { <img class="stream-panel__image" src=src alt="Live stream"/> }.into_any(),
                        None => view! { <div class="stream-panel__starting">"Starting camera stream..."</div> }.into_any(),
                    }}
                    {move || overlay().map(|line| view! { <div class="stream-panel__overlay">{line}</div> })}
                </Show>
            </div>
            <div class="stream-panel__actions">
                <Show
                    when=move || stream.with(|s| s.active)
                    fallback=move || {
                        view! {
                            <button
                                class="btn btn--primary"
                                on:click=on_start
                                disabled=move || !stream.with(|s| s.can_start(upload_busy.get()))
                            >
                                "Start Live Stream"
                            </button>
                        }
                    }
                >
                    <button class="btn btn--danger" on:click=on_stop>
                        "Stop Stream"
                    </button>
                </Show>
            </div>
        </div>
    }
}
