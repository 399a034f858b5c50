//! Reusable UI components composed by the route pages.
//!
//! ARCHITECTURE
//! ============
//! Components read shared state from context or take page-owned signals as
//! props; none of them own network connections.

pub mod analysis_summary;
pub mod notice_tray;
pub mod require_auth;
pub mod stream_panel;
pub mod tool_card;
pub mod upload_panel;
