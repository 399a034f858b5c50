//! Networking modules for the analysis backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the one-shot `/analyze` upload and `channel` owns the
//! realtime Socket.IO connection. Payload types live in the `wire` crate.

pub mod api;
pub mod channel;
