//! Stack of transient notices in the corner of the screen.

use leptos::prelude::*;

use crate::state::notices::{NoticeState, Tone};

#[component]
pub fn NoticeTray() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-tray" role="status" aria-live="polite">
            {move || {
                notices
                    .get()
                    .items
                    .into_iter()
                    .map(|notice| {
                        let class = match notice.tone {
                            Tone::Info => "notice",
                            Tone::Error => "notice notice--error",
                        };
                        let id = notice.id.clone();
                        view! {
                            <div class=class>
                                <div class="notice__body">
                                    <strong class="notice__title">{notice.title}</strong>
                                    <p class="notice__message">{notice.message}</p>
                                </div>
                                <button
                                    class="notice__close"
                                    title="Dismiss"
                                    on:click=move |_| notices.update(|q| q.dismiss(&id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
