//! Client error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is caught at the component boundary and turned into a
//! notice; nothing here is allowed to panic the view. The variant decides the
//! notice title and the recovery path (validation leaves state untouched,
//! playback offers a download, connectivity is not retried).

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A file or action rejected before any network call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please upload an image or video file.")]
    UnsupportedType,
    #[error("File size must be less than 20MB.")]
    TooLarge,
    #[error("Select an image or video to analyze first.")]
    NoFile,
    #[error("An analysis is already in progress.")]
    Busy,
}

/// Any user-visible failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The request or channel could not be established or completed.
    #[error("{0}")]
    Connectivity(String),
    /// The backend answered with a non-success status.
    #[error("{0}")]
    Backend(String),
    /// Returned media could not be rendered locally.
    #[error("{0}")]
    Playback(String),
}

impl AppError {
    /// Notice title for this error.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::UnsupportedType) => "Invalid File Type",
            Self::Validation(ValidationError::TooLarge) => "File Too Large",
            Self::Validation(ValidationError::NoFile) => "No File Selected",
            Self::Validation(ValidationError::Busy) => "Analysis In Progress",
            Self::Connectivity(_) => "Connection Error",
            Self::Backend(_) => "Processing Failed",
            Self::Playback(_) => "Video Playback Error",
        }
    }
}
