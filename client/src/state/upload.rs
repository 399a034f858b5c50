//! Upload-analysis session: one selected file, its preview and result
//! handles, and a single request/response exchange with `/analyze`.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Idle -> FileSelected -> Processing -> {Completed | Failed}`, and back to
//! `FileSelected` whenever a new file is accepted. The upload panel drives
//! the transitions; the channel dispatcher calls
//! [`UploadState::settle_pushed`] when a result arrives over the socket
//! instead of the HTTP reply.
//!
//! Each submission gets a ticket. Only the first reply for the current
//! ticket settles the session; anything later, or for an older ticket, is
//! dropped so at most one exchange is ever in flight.
//!
//! RESOURCE MODEL
//! ==============
//! Preview and result URLs are revocable object handles. At most one of each
//! is outstanding: every handle is created and released through
//! [`ObjectHandles`], so a superseded or torn-down handle is always released.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use leptos::prelude::{LocalStorage, RwSignal};
use wire::{AnalysisResponse, AnalysisResult, MediaKind};

use crate::error::{AppError, ValidationError};
use crate::state::notices::Notice;
use crate::util::media::BrowserBlob;

/// Largest accepted upload (20 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Creates and releases object handles for local and returned media.
pub trait ObjectHandles<B> {
    /// Handle for previewing a local file.
    ///
    /// # Errors
    ///
    /// Returns a message when the platform refuses to create the handle.
    fn create_from_file(&mut self, file: &LocalFile<B>) -> Result<String, String>;

    /// Handle for a media reference returned by the backend.
    ///
    /// # Errors
    ///
    /// Returns a message when the reference cannot be turned into a handle.
    fn create_from_media(&mut self, media: &str) -> Result<String, String>;

    fn release(&mut self, url: &str);
}

/// A user-selected file. `blob` is the browser file object (unit in tests).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile<B = ()> {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub blob: B,
}

impl<B> LocalFile<B> {
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn is_video(&self) -> bool {
        self.media_type.starts_with("video/")
    }
}

/// Page-scoped upload session. Browser file objects are not `Send`, so the
/// signal lives in local storage.
pub type UploadSignal = RwSignal<UploadState<BrowserBlob>, LocalStorage>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    FileSelected,
    Processing,
    Completed,
    Failed,
}

/// Check type and size before anything is touched.
///
/// # Errors
///
/// [`ValidationError::UnsupportedType`] for anything but `image/*` and
/// `video/*`, [`ValidationError::TooLarge`] above [`MAX_UPLOAD_BYTES`].
pub fn validate_file<B>(file: &LocalFile<B>) -> Result<(), ValidationError> {
    if !file.is_image() && !file.is_video() {
        return Err(ValidationError::UnsupportedType);
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge);
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct UploadState<B = ()> {
    pub file: Option<LocalFile<B>>,
    pub preview: Option<String>,
    pub result: Option<String>,
    pub analysis: Option<AnalysisResult>,
    pub phase: UploadPhase,
    pub error: Option<AppError>,
    submission: u64,
}

impl<B> Default for UploadState<B> {
    fn default() -> Self {
        Self {
            file: None,
            preview: None,
            result: None,
            analysis: None,
            phase: UploadPhase::Idle,
            error: None,
            submission: 0,
        }
    }
}

impl<B> UploadState<B> {
    pub fn is_processing(&self) -> bool {
        self.phase == UploadPhase::Processing
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() && !self.is_processing()
    }

    /// Download is offered only for processed videos.
    pub fn can_download(&self) -> bool {
        self.result.is_some() && self.analysis.as_ref().is_some_and(|a| a.kind == MediaKind::Video)
    }

    /// Ticket of the most recent submission. Replies carrying any other
    /// ticket are stale.
    pub fn submission(&self) -> u64 {
        self.submission
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Accept a new file, replacing the previous preview and result.
    ///
    /// # Errors
    ///
    /// Validation failures and a refused preview handle; the state is left
    /// exactly as it was in both cases.
    pub fn select_file<H: ObjectHandles<B>>(&mut self, file: LocalFile<B>, handles: &mut H) -> Result<(), AppError> {
        if self.is_processing() {
            return Err(ValidationError::Busy.into());
        }
        validate_file(&file)?;
        let preview = handles.create_from_file(&file).map_err(AppError::Playback)?;

        self.release_handles(handles);
        self.file = Some(file);
        self.preview = Some(preview);
        self.analysis = None;
        self.error = None;
        self.phase = UploadPhase::FileSelected;
        Ok(())
    }

    /// Enter `Processing` and hand out the file to upload.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NoFile`] without a selection,
    /// [`ValidationError::Busy`] while another analysis is running.
    pub fn begin_submit(&mut self) -> Result<LocalFile<B>, AppError>
    where
        B: Clone,
    {
        if self.is_processing() {
            return Err(ValidationError::Busy.into());
        }
        let file = self.file.clone().ok_or(ValidationError::NoFile)?;
        self.submission = self.submission.wrapping_add(1);
        self.phase = UploadPhase::Processing;
        self.error = None;
        Ok(file)
    }

    /// Apply a successful analysis.
    ///
    /// # Errors
    ///
    /// [`AppError::Playback`] when the returned media cannot be turned into a
    /// handle; the previous result is kept in that case.
    fn complete<H: ObjectHandles<B>>(&mut self, response: &AnalysisResponse, handles: &mut H) -> Result<(), AppError> {
        let result = match response.media_ref() {
            Some(media) => Some(handles.create_from_media(media).map_err(AppError::Playback)?),
            None => None,
        };

        if let Some(old) = self.result.take() {
            handles.release(&old);
        }
        self.result = result;
        self.analysis = Some(response.to_result());
        self.error = None;
        self.phase = UploadPhase::Completed;
        Ok(())
    }

    fn fail(&mut self, error: AppError) {
        self.error = Some(error);
        self.phase = UploadPhase::Failed;
    }

    /// Resolve the analysis exchange started under `ticket` and return the
    /// notice to show.
    ///
    /// Returns `None` without touching state when no analysis is running or
    /// `ticket` belongs to an earlier submission.
    pub fn settle<H: ObjectHandles<B>>(
        &mut self,
        ticket: u64,
        outcome: Result<&AnalysisResponse, AppError>,
        handles: &mut H,
    ) -> Option<Notice> {
        if !self.is_processing() || ticket != self.submission {
            return None;
        }
        let notice = match outcome.and_then(|resp| self.complete(resp, handles).map(|()| resp)) {
            Ok(resp) => Notice::info("Analysis Complete", format!("{} face(s) detected", resp.faces_detected)),
            Err(err) => {
                let notice = Notice::error("Processing Failed", err.to_string());
                self.fail(err);
                notice
            }
        };
        Some(notice)
    }

    /// Apply a result pushed over the channel to the running submission.
    pub fn settle_pushed<H: ObjectHandles<B>>(&mut self, response: &AnalysisResponse, handles: &mut H) -> Option<Notice> {
        self.settle(self.submission, Ok(response), handles)
    }

    /// Record that the result media failed to render. Returns the error so
    /// the caller can surface it.
    pub fn report_playback_error(&mut self, message: &str) -> AppError {
        let message = if message.trim().is_empty() { "Unknown error" } else { message };
        let err = AppError::Playback(format!("Video error: {message}"));
        self.error = Some(err.clone());
        err
    }

    /// Result media loaded; drop a stale playback error.
    pub fn clear_playback_error(&mut self) {
        if matches!(self.error, Some(AppError::Playback(_))) {
            self.error = None;
        }
    }

    /// Release every outstanding handle (page unmount).
    pub fn teardown<H: ObjectHandles<B>>(&mut self, handles: &mut H) {
        self.release_handles(handles);
    }

    fn release_handles<H: ObjectHandles<B>>(&mut self, handles: &mut H) {
        if let Some(url) = self.preview.take() {
            handles.release(&url);
        }
        if let Some(url) = self.result.take() {
            handles.release(&url);
        }
    }
}
