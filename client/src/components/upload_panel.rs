//! File upload tab: pick a file, preview it, send it for analysis and show
//! the processed result.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns the [`UploadSignal`]; this panel drives its transitions and
//! performs the `/analyze` exchange. Every failure is reported through the
//! notice tray.

use leptos::prelude::*;
use wire::MediaKind;

use crate::components::analysis_summary::AnalysisSummary;
use crate::config::ApiConfig;
use crate::error::AppError;
use crate::net::api::analyze;
use crate::state::notices::{Notice, NoticeState, notify};
use crate::state::upload::{LocalFile, UploadPhase, UploadSignal, UploadState};
use crate::util::format::analyzing_message;
use crate::util::media::BrowserHandles;

#[component]
pub fn UploadPanel(upload: UploadSignal) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let config = StoredValue::new(expect_context::<ApiConfig>());

    let on_file_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                return;
            };
            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                return;
            };
            let local = LocalFile {
                name: file.name(),
                media_type: file.type_(),
                size: crate::util::media::byte_len(file.size()),
                blob: file,
            };
            // Clear so picking the same file again still fires `change`.
            input.set_value("");
            if let Some(Err(err)) = upload.try_update(|u| u.select_file(local, &mut BrowserHandles)) {
                notify(notices, Notice::from(&err));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_submit = move |_| match upload.try_update(|u| u.begin_submit().map(|file| (u.submission(), file))) {
        Some(Ok((ticket, file))) => {
            notify(notices, Notice::info("Processing File", analyzing_message(&file.name)));
            let config = config.get_value();
            leptos::task::spawn_local(async move {
                let outcome = analyze(&config, &file).await;
                let notice = upload
                    .try_update(|u| u.settle(ticket, outcome.as_ref().map_err(AppError::clone), &mut BrowserHandles))
                    .flatten();
                match notice {
                    Some(notice) => notify(notices, notice),
                    None => leptos::logging::log!("dropping stale reply for {}", file.name),
                }
            });
        }
        Some(Err(err)) => notify(notices, Notice::from(&err)),
        None => {}
    };

    let on_download = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(url) = upload.with_untracked(|u| u.can_download().then(|| u.result.clone()).flatten()) else {
                return;
            };
            if let Err(e) = crate::util::media::trigger_download(&url, crate::util::media::DOWNLOAD_FILENAME) {
                leptos::logging::warn!("download failed: {e}");
            }
        }
    };

    let preview = move || {
        let (src, is_image) = upload.with(|u| (u.preview.clone(), u.file.as_ref().is_some_and(LocalFile::is_image)));
        src.map(|src| {
            let media = if is_image {
                view! { <img class="upload-panel__media" src=src alt="Preview"/> }.into_any()
            } else {
                view! { <video class="upload-panel__media" src=src controls=true></video> }.into_any()
            };
            view! {
                <section class="upload-panel__section">
                    <h3>"Original"</h3>
                    <div class="upload-panel__frame">{media}</div>
                </section>
            }
        })
    };

    let result = move || {
        let (src, kind) = upload.with(|u| (u.result.clone(), u.analysis.as_ref().map(|a| a.kind)));
        src.map(|src| {
            let media = if kind == Some(MediaKind::Image) {
                view! { <img class="upload-panel__media" src=src alt="Processed"/> }.into_any()
            } else {
                view! { <ResultVideo src=src upload=upload/> }.into_any()
            };
            view! {
                <section class="upload-panel__section">
                    <h3>"Processed Result"</h3>
                    <div class="upload-panel__frame">
                        {media}
                        <Show when=move || upload.with(|u| matches!(u.error, Some(AppError::Playback(_))))>
                            <div class="upload-panel__overlay">
                                <p class="upload-panel__overlay-title">"Error playing video"</p>
                                <p>{move || upload.with(UploadState::error_message).unwrap_or_default()}</p>
                                <Show when=move || upload.with(UploadState::can_download)>
                                    <button class="btn" on:click=on_download>
                                        "Download Video"
                                    </button>
                                </Show>
                            </div>
                        </Show>
                    </div>
                </section>
            }
        })
    };

    let failure = move || {
        upload.with(|u| (u.phase == UploadPhase::Failed).then(|| u.error_message()).flatten())
    };

    view! {
        <div class="upload-panel">
            <div class="upload-panel__dropzone">
                <input
                    type="file"
                    id="file-upload-face"
                    class="upload-panel__input"
                    accept="image/*,video/*"
                    disabled=move || upload.with(UploadState::is_processing)
                    on:change=on_file_change
                />
                <label for="file-upload-face" class="upload-panel__label">
                    <span class="upload-panel__prompt">"Click to upload an image or video"</span>
                    <span class="upload-panel__hint">"SVG, PNG, JPG, or MP4 (max. 20MB)"</span>
                </label>
            </div>

            {preview}
            {result}

            {move || failure().map(|msg| view! { <p class="upload-panel__error">{msg}</p> })}

            <AnalysisSummary analysis=Signal::derive(move || upload.with(|u| u.analysis.clone()))/>

            <div class="upload-panel__actions">
                <Show when=move || upload.with(UploadState::can_download)>
                    <button class="btn" on:click=on_download>
                        "Download Video"
                    </button>
                </Show>
                <button
                    class="btn btn--primary"
                    on:click=on_submit
                    disabled=move || !upload.with(UploadState::can_submit)
                >
                    {move || if upload.with(UploadState::is_processing) { "Processing..." } else { "Start Analysis" }}
                </button>
            </div>
        </div>
    }
}

/// Processed video with playback error reporting.
#[component]
fn ResultVideo(src: String, upload: UploadSignal) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    let on_error = move |ev: leptos::ev::ErrorEvent| {
        #[cfg(feature = "hydrate")]
        let detail = {
            use wasm_bindgen::JsCast;

            ev.target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlMediaElement>().ok())
                .and_then(|media| media.error())
                .map(|err| err.message())
                .unwrap_or_default()
        };
        #[cfg(not(feature = "hydrate"))]
        let detail = {
            let _ = ev;
            String::new()
        };
        if let Some(err) = upload.try_update(|u| u.report_playback_error(&detail)) {
            leptos::logging::warn!("video playback error: {err}");
        }
        notify(
            notices,
            Notice::error("Video Playback Error", "Could not play the processed video. Try downloading it."),
        );
    };

    let on_loaded = move |_| {
        upload.update(UploadState::clear_playback_error);
        notify(notices, Notice::info("Video Loaded", "Processed video loaded successfully."));
    };

    view! {
        <video
            class="upload-panel__media"
            src=src
            controls=true
            autoplay=true
            muted=true
            on:error=on_error
            on:loadeddata=on_loaded
        ></video>
    }
}
