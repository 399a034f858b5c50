//! Display formatting for analysis metadata.
//!
//! Missing values render as `N/A`. Confidence is treated as absent unless it is
//! positive, so an unset score and a zero score read the same.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use wire::AnalysisResult;

/// Placeholder for a value the backend did not report.
pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_count(value: Option<u32>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |n| n.to_string())
}

pub fn format_label(value: Option<&str>) -> String {
    match value {
        Some(label) if !label.trim().is_empty() => label.to_owned(),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// Confidence in `[0, 1]` as a percentage with two decimals.
pub fn format_confidence(value: Option<f64>) -> String {
    match value {
        Some(c) if c.is_finite() && c > 0.0 => format!("{:.2}%", c * 100.0),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

/// One-line summary drawn over the live stream.
pub fn stream_overlay_line(analysis: &AnalysisResult) -> String {
    format!(
        "Faces: {} | Emotion: {} | Confidence: {} | Blinks: {}",
        analysis.faces_detected,
        format_label(analysis.emotion.as_deref()),
        format_confidence(analysis.confidence),
        format_count(analysis.blink_count),
    )
}

/// Notice body shown while an upload is in flight.
pub fn analyzing_message(file_name: &str) -> String {
    format!("Analyzing {file_name}...")
}
