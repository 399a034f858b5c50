//! Realtime channel client for live frames and pushed analysis results.
//!
//! The channel is one Socket.IO session over a plain WebSocket. It is opened
//! when the recognition page mounts and aborted when it unmounts; there is no
//! reconnect loop, a dropped channel stays down until the page is revisited.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment. Frame interpretation lives in
//! [`ChannelSession`] so it can be exercised without one.
//!
//! ERROR HANDLING
//! ==============
//! Undecodable frames are logged and skipped. Transport failures end the
//! session; the owner is told once, via [`ChannelSession::finish`], whether
//! the channel never came up or went away after connecting.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

#[cfg(any(test, feature = "hydrate"))]
use leptos::prelude::*;
use wire::{ChannelSignal, ClientEvent, CodecError, Connection};
#[cfg(any(test, feature = "hydrate"))]
use wire::ServerEvent;

use crate::state::stream::ChannelEvent;
#[cfg(any(test, feature = "hydrate"))]
use crate::state::notices::{NoticeState, notify};
#[cfg(any(test, feature = "hydrate"))]
use crate::state::{stream::StreamState, upload::UploadSignal};
#[cfg(any(test, feature = "hydrate"))]
use crate::util::media::BrowserHandles;

/// Notice body when the channel never reaches `Connected`.
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to the backend server.";

/// Result of feeding one inbound frame to a [`ChannelSession`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Step {
    /// Frames to write back, in order.
    pub replies: Vec<String>,
    pub event: Option<ChannelEvent>,
    /// The server ended or refused the session.
    pub close: bool,
}

/// Protocol state of one channel session.
#[derive(Clone, Debug, Default)]
pub struct ChannelSession {
    connection: Connection,
    ever_connected: bool,
}

impl ChannelSession {
    /// Interpret one inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] for frames that cannot be decoded; the session
    /// is unchanged and the caller should skip the frame.
    pub fn receive(&mut self, text: &str) -> Result<Step, CodecError> {
        let received = self.connection.receive(text)?;
        let mut step = Step { replies: received.replies, ..Step::default() };
        match received.signal {
            Some(ChannelSignal::Connected { .. }) => {
                self.ever_connected = true;
                step.event = Some(ChannelEvent::Connected);
            }
            Some(ChannelSignal::Rejected(reason)) => {
                log_rejection(&reason);
                step.close = true;
            }
            Some(ChannelSignal::Event(event)) => step.event = Some(ChannelEvent::Server(event)),
            Some(ChannelSignal::Closed) => step.close = true,
            None => {}
        }
        Ok(step)
    }

    /// The event that reports the end of this session.
    pub fn finish(&self) -> ChannelEvent {
        if self.ever_connected {
            ChannelEvent::Disconnected
        } else {
            ChannelEvent::ConnectFailed(CONNECT_FAILED_MESSAGE.to_owned())
        }
    }
}

fn log_rejection(reason: &str) {
    #[cfg(feature = "hydrate")]
    leptos::logging::warn!("channel connect rejected: {reason}");
    #[cfg(not(feature = "hydrate"))]
    let _ = reason;
}

/// Apply one channel event to page state in arrival order.
///
/// Pushed analysis results settle the running upload exactly like an HTTP
/// reply and are dropped when nothing is running; everything else belongs
/// to the stream.
#[cfg(any(test, feature = "hydrate"))]
pub fn dispatch(
    event: &ChannelEvent,
    stream: RwSignal<StreamState>,
    upload: UploadSignal,
    notices: RwSignal<NoticeState>,
) {
    let notice = match event {
        ChannelEvent::Server(ServerEvent::AnalysisResult(resp)) => {
            upload.try_update(|u| u.settle_pushed(resp, &mut BrowserHandles)).flatten()
        }
        ChannelEvent::Server(ServerEvent::Unknown(name)) => {
            #[cfg(feature = "hydrate")]
            leptos::logging::log!("ignoring channel event {name}");
            #[cfg(not(feature = "hydrate"))]
            let _ = name;
            None
        }
        other => stream.try_update(|s| s.apply(other)).flatten(),
    };
    if let Some(notice) = notice {
        notify(notices, notice);
    }
}

/// Handle for emitting events on, and tearing down, a running channel.
///
/// The default value is detached: sends are dropped and `close` is a no-op.
#[derive(Clone, Debug, Default)]
pub struct ChannelSender {
    #[cfg(feature = "hydrate")]
    tx: Option<futures::channel::mpsc::UnboundedSender<String>>,
    #[cfg(feature = "hydrate")]
    abort: Option<futures::future::AbortHandle>,
}

impl ChannelSender {
    /// Queue `event` for the socket. Returns `false` if the channel is gone.
    pub fn send(&self, event: ClientEvent) -> bool {
        #[cfg(feature = "hydrate")]
        {
            self.tx.as_ref().is_some_and(|tx| tx.unbounded_send(event.encode()).is_ok())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = event;
            false
        }
    }

    /// Abort the channel task, dropping the socket and its handlers.
    pub fn close(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(abort) = &self.abort {
                abort.abort();
            }
            if let Some(tx) = &self.tx {
                tx.close_channel();
            }
        }
    }
}

/// Spawn the channel lifecycle as a local async task.
#[cfg(feature = "hydrate")]
pub fn spawn_channel(
    url: String,
    stream: RwSignal<StreamState>,
    upload: UploadSignal,
    notices: RwSignal<NoticeState>,
) -> ChannelSender {
    use futures::channel::mpsc;
    use futures::future::{AbortHandle, Abortable};

    let (tx, rx) = mpsc::unbounded::<String>();
    let (abort, registration) = AbortHandle::new_pair();
    let task = Abortable::new(channel_task(url, stream, upload, notices, tx.clone(), rx), registration);
    leptos::task::spawn_local(async move {
        if task.await.is_err() {
            leptos::logging::log!("channel task aborted");
        }
    });

    ChannelSender { tx: Some(tx), abort: Some(abort) }
}

#[cfg(feature = "hydrate")]
async fn channel_task(
    url: String,
    stream: RwSignal<StreamState>,
    upload: UploadSignal,
    notices: RwSignal<NoticeState>,
    tx: futures::channel::mpsc::UnboundedSender<String>,
    rx: futures::channel::mpsc::UnboundedReceiver<String>,
) {
    use std::cell::RefCell;

    dispatch(&ChannelEvent::Connecting, stream, upload, notices);
    let session = RefCell::new(ChannelSession::default());
    match run_socket(&url, &session, stream, upload, notices, &tx, rx).await {
        Ok(()) => leptos::logging::log!("channel closed"),
        Err(e) => leptos::logging::warn!("channel error: {e}"),
    }
    let end = session.borrow().finish();
    dispatch(&end, stream, upload, notices);
}

/// Connect and pump frames until either direction finishes.
#[cfg(feature = "hydrate")]
async fn run_socket(
    url: &str,
    session: &std::cell::RefCell<ChannelSession>,
    stream: RwSignal<StreamState>,
    upload: UploadSignal,
    notices: RwSignal<NoticeState>,
    tx: &futures::channel::mpsc::UnboundedSender<String>,
    mut rx: futures::channel::mpsc::UnboundedReceiver<String>,
) -> Result<(), String> {
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| e.to_string())?;
    let (mut ws_write, mut ws_read) = ws.split();

    let send_task = async move {
        while let Some(text) = rx.next().await {
            if ws_write.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    };

    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text,
                Ok(Message::Bytes(_)) => {
                    leptos::logging::warn!("binary channel frame ignored");
                    continue;
                }
                Err(e) => {
                    leptos::logging::warn!("channel recv error: {e}");
                    break;
                }
            };
            let step = match session.borrow_mut().receive(&text) {
                Ok(step) => step,
                Err(e) => {
                    leptos::logging::warn!("undecodable channel frame: {e}");
                    continue;
                }
            };
            for reply in step.replies {
                if tx.unbounded_send(reply).is_err() {
                    return;
                }
            }
            if let Some(event) = &step.event {
                dispatch(event, stream, upload, notices);
            }
            if step.close {
                break;
            }
        }
    };

    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;
    Ok(())
}
