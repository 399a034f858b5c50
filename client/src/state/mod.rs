//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `upload`, `stream`, `notices`) so each
//! page depends on small focused models. The models are plain structs with
//! explicit transitions; pages wrap them in signals.

pub mod auth;
pub mod notices;
pub mod stream;
pub mod upload;
