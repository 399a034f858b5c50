//! Live camera-stream state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The channel task feeds decoded [`ChannelEvent`]s into [`StreamState::apply`]
//! in arrival order; the stream panel reads the result and calls
//! [`StreamState::start`] / [`StreamState::stop`] to decide what to emit.
//!
//! The backend owns the camera. Stopping is cooperative: `stop_stream` is
//! only a request, and the view is cleared when the server confirms with a
//! `stopped` status or the connection goes away.

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;

use wire::{AnalysisResult, ClientEvent, ServerEvent, StatusKind, StreamStatus};

use crate::error::AppError;
use crate::state::notices::Notice;

/// Channel connection lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Socket closed or never opened.
    #[default]
    Disconnected,
    /// Socket opening or namespace connect pending.
    Connecting,
    /// Namespace connect acknowledged.
    Connected,
}

/// Something that happened on the channel, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelEvent {
    Connecting,
    Connected,
    /// The channel never reached `Connected`.
    ConnectFailed(String),
    /// An established channel went away.
    Disconnected,
    Server(ServerEvent),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamState {
    pub connection: ConnectionStatus,
    /// Set by a local start request, cleared by a `stopped` status.
    pub active: bool,
    /// Most recent annotated frame.
    pub last_frame: Option<String>,
    pub last_analysis: Option<AnalysisResult>,
}

impl StreamState {
    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionStatus::Connected
    }

    /// Active but no frame has arrived yet.
    pub fn is_starting(&self) -> bool {
        self.active && self.last_frame.is_none()
    }

    /// Whether the start control is offered. A running upload analysis
    /// holds it back; a missing connection does not, so the refusal from
    /// [`StreamState::start`] reaches the user.
    pub fn can_start(&self, upload_busy: bool) -> bool {
        !self.active && !upload_busy
    }

    /// Request a stream. Returns the event to emit, or `None` when a stream
    /// is already active.
    ///
    /// # Errors
    ///
    /// [`AppError::Connectivity`] unless the channel is connected.
    pub fn start(&mut self) -> Result<Option<ClientEvent>, AppError> {
        if !self.is_connected() {
            return Err(AppError::Connectivity("Not connected to the backend server.".to_owned()));
        }
        if self.active {
            return Ok(None);
        }
        self.active = true;
        Ok(Some(ClientEvent::StartStream))
    }

    /// Request the server to stop. Without a connection there is nobody to
    /// confirm, so the view is cleared right away.
    pub fn stop(&mut self) -> Option<ClientEvent> {
        if self.is_connected() {
            Some(ClientEvent::StopStream)
        } else {
            self.clear();
            None
        }
    }

    /// Apply one channel event and return the notice it produces, if any.
    pub fn apply(&mut self, event: &ChannelEvent) -> Option<Notice> {
        match event {
            ChannelEvent::Connecting => {
                self.connection = ConnectionStatus::Connecting;
                None
            }
            ChannelEvent::Connected => {
                self.connection = ConnectionStatus::Connected;
                Some(Notice::info("Connected", "Successfully connected to the backend server."))
            }
            ChannelEvent::ConnectFailed(message) => {
                self.connection = ConnectionStatus::Disconnected;
                self.clear();
                Some(Notice::from(&AppError::Connectivity(message.clone())))
            }
            ChannelEvent::Disconnected => {
                let was_connected = self.is_connected();
                self.connection = ConnectionStatus::Disconnected;
                self.clear();
                was_connected.then(|| {
                    Notice::from(&AppError::Connectivity("Disconnected from the backend server.".to_owned()))
                })
            }
            ChannelEvent::Server(ServerEvent::StreamStatus(status)) => Some(self.apply_status(status)),
            ChannelEvent::Server(ServerEvent::ProcessedFrame(frame)) => {
                self.last_frame = Some(frame.image.clone());
                self.last_analysis = Some(frame.to_result());
                None
            }
            ChannelEvent::Server(ServerEvent::AnalysisResult(_) | ServerEvent::Unknown(_)) => None,
        }
    }

    fn apply_status(&mut self, status: &StreamStatus) -> Notice {
        match status.status {
            StatusKind::Error => Notice::error("Error", status.message.clone()),
            StatusKind::Stopped => {
                self.clear();
                Notice::info("Stream Update", status.message.clone())
            }
            StatusKind::Ok | StatusKind::Other(_) => Notice::info("Stream Update", status.message.clone()),
        }
    }

    fn clear(&mut self) {
        self.active = false;
        self.last_frame = None;
        self.last_analysis = None;
    }
}
