//! Detection metadata list shown under an analyzed upload.

use leptos::prelude::*;
use wire::AnalysisResult;

use crate::util::format::{format_confidence, format_count, format_label};

#[component]
pub fn AnalysisSummary(#[prop(into)] analysis: Signal<Option<AnalysisResult>>) -> impl IntoView {
    move || {
        analysis.get().map(|a| {
            view! {
                <div class="analysis-summary">
                    <h4>"Analysis Results:"</h4>
                    <ul>
                        <li>"Faces detected: " {format_count(Some(a.faces_detected))}</li>
                        <li>"Emotion: " {format_label(a.emotion.as_deref())}</li>
                        <li>"Confidence: " {format_confidence(a.confidence)}</li>
                        <li>"Blink count: " {format_count(a.blink_count)}</li>
                        <li>"File type: " {a.kind.as_str()}</li>
                    </ul>
                </div>
            }
        })
    }
}
