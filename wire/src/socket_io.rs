//! Engine.IO v4 / Socket.IO v4 text codec for the realtime channel.
//!
//! PROTOCOL
//! ========
//! Every WebSocket text frame is one Engine.IO packet: a single type digit
//! followed by an optional payload. Engine.IO `message` packets (`4`) carry one
//! Socket.IO packet, which again starts with a type digit, an optional
//! `/namespace,` prefix, an optional ack id, and a JSON payload. An event is
//! therefore written as `42["event_name",{...}]`.
//!
//! Only the default namespace and text packets are used by the analysis
//! backend; binary attachments are rejected.

#[cfg(test)]
#[path = "socket_io_test.rs"]
mod socket_io_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AnalysisResponse, ProcessedFrame, StreamStatus};

const DEFAULT_NAMESPACE: &str = "/";

/// Error returned when a channel packet cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame carried no packet type.
    #[error("empty packet")]
    Empty,
    /// The leading Engine.IO type digit is not one of `0..=6`.
    #[error("unknown engine.io packet type: {0:?}")]
    UnknownEngineType(char),
    /// The leading Socket.IO type digit is not one of `0..=6`.
    #[error("unknown socket.io packet type: {0:?}")]
    UnknownSocketType(char),
    /// Binary events and base64 engine payloads are not supported.
    #[error("binary packets are not supported")]
    Binary,
    /// An event payload was not a JSON array headed by the event name.
    #[error("malformed event payload")]
    MalformedEvent,
    /// A packet payload was not valid JSON for its expected shape.
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Engine.IO open-handshake payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: u64,
}

/// One Engine.IO packet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    /// Carries an encoded Socket.IO packet.
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    /// Decode one WebSocket text frame.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] for empty frames, unknown type digits, base64
    /// binary frames and malformed open handshakes.
    pub fn decode(text: &str) -> Result<Self, CodecError> {
        let mut chars = text.chars();
        let kind = chars.next().ok_or(CodecError::Empty)?;
        let rest = chars.as_str();
        match kind {
            '0' => Ok(Self::Open(serde_json::from_str(rest)?)),
            '1' => Ok(Self::Close),
            '2' => Ok(Self::Ping(rest.to_owned())),
            '3' => Ok(Self::Pong(rest.to_owned())),
            '4' => Ok(Self::Message(rest.to_owned())),
            '5' => Ok(Self::Upgrade),
            '6' => Ok(Self::Noop),
            'b' => Err(CodecError::Binary),
            other => Err(CodecError::UnknownEngineType(other)),
        }
    }

    /// Encode into the text form sent over the WebSocket.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Open(handshake) => {
                format!("0{}", serde_json::to_string(handshake).unwrap_or_default())
            }
            Self::Close => "1".to_owned(),
            Self::Ping(payload) => format!("2{payload}"),
            Self::Pong(payload) => format!("3{payload}"),
            Self::Message(payload) => format!("4{payload}"),
            Self::Upgrade => "5".to_owned(),
            Self::Noop => "6".to_owned(),
        }
    }
}

/// One Socket.IO packet (the payload of an Engine.IO message).
#[derive(Clone, Debug, PartialEq)]
pub enum SocketPacket {
    /// Namespace connect request (client) or acknowledgement (server).
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, args: Vec<Value> },
    /// Acknowledgement of an event; the channel never requests acks.
    Ack,
    ConnectError(Value),
}

/// A decoded Socket.IO packet with the namespace it was addressed to.
#[derive(Clone, Debug, PartialEq)]
pub struct SocketMessage {
    pub namespace: String,
    pub packet: SocketPacket,
}

impl SocketMessage {
    /// Decode the payload of an Engine.IO message packet.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] for empty payloads, unknown type digits, binary
    /// packets and malformed JSON.
    pub fn decode(payload: &str) -> Result<Self, CodecError> {
        let mut chars = payload.chars();
        let kind = chars.next().ok_or(CodecError::Empty)?;
        let (namespace, rest) = split_namespace(chars.as_str());

        let packet = match kind {
            '0' => SocketPacket::Connect(parse_optional_json(rest)?),
            '1' => SocketPacket::Disconnect,
            '2' => {
                let (name, args) = parse_event(strip_ack_id(rest))?;
                SocketPacket::Event { name, args }
            }
            '3' => SocketPacket::Ack,
            '4' => SocketPacket::ConnectError(parse_optional_json(rest)?.unwrap_or(Value::Null)),
            '5' | '6' => return Err(CodecError::Binary),
            other => return Err(CodecError::UnknownSocketType(other)),
        };

        Ok(Self { namespace: namespace.to_owned(), packet })
    }
}

impl SocketPacket {
    /// Encode for the default namespace.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Connect(None) => "0".to_owned(),
            Self::Connect(Some(data)) => format!("0{data}"),
            Self::Disconnect => "1".to_owned(),
            Self::Event { name, args } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                format!("2{}", Value::Array(items))
            }
            Self::Ack => "3[]".to_owned(),
            Self::ConnectError(data) => format!("4{data}"),
        }
    }
}

fn split_namespace(rest: &str) -> (&str, &str) {
    if !rest.starts_with('/') {
        return (DEFAULT_NAMESPACE, rest);
    }
    match rest.split_once(',') {
        Some((namespace, tail)) => (namespace, tail),
        None => (rest, ""),
    }
}

fn strip_ack_id(rest: &str) -> &str {
    rest.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn parse_optional_json(rest: &str) -> Result<Option<Value>, CodecError> {
    if rest.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(rest)?))
}

fn parse_event(rest: &str) -> Result<(String, Vec<Value>), CodecError> {
    let Value::Array(mut items) = serde_json::from_str::<Value>(rest)? else {
        return Err(CodecError::MalformedEvent);
    };
    if items.is_empty() {
        return Err(CodecError::MalformedEvent);
    }
    let Value::String(name) = items.remove(0) else {
        return Err(CodecError::MalformedEvent);
    };
    Ok((name, items))
}

/// Events the client emits on the channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    StartStream,
    StopStream,
}

impl ClientEvent {
    /// Socket.IO event name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::StartStream => "start_stream",
            Self::StopStream => "stop_stream",
        }
    }

    /// Full WebSocket text frame for this event.
    #[must_use]
    pub fn encode(self) -> String {
        let packet = SocketPacket::Event { name: self.name().to_owned(), args: Vec::new() };
        EnginePacket::Message(packet.encode()).encode()
    }
}

/// Events the backend pushes on the channel.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerEvent {
    StreamStatus(StreamStatus),
    ProcessedFrame(ProcessedFrame),
    /// Upload analysis delivered over the channel instead of the HTTP reply.
    AnalysisResult(AnalysisResponse),
    /// An event name this client does not handle.
    Unknown(String),
}

impl ServerEvent {
    /// Interpret a Socket.IO event by name; the payload is the first argument.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if a known event carries a payload of the
    /// wrong shape.
    pub fn from_event(name: &str, args: &[Value]) -> Result<Self, CodecError> {
        let payload = || args.first().cloned().unwrap_or(Value::Null);
        Ok(match name {
            "stream_status" => Self::StreamStatus(serde_json::from_value(payload())?),
            "processed_frame" => Self::ProcessedFrame(serde_json::from_value(payload())?),
            "analysis_result" => Self::AnalysisResult(serde_json::from_value(payload())?),
            other => Self::Unknown(other.to_owned()),
        })
    }
}

/// What a received frame means for the channel owner.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelSignal {
    /// The default namespace accepted the connection.
    Connected { sid: Option<String> },
    /// The server refused the namespace connection.
    Rejected(String),
    Event(ServerEvent),
    /// The server closed the engine session or disconnected the namespace.
    Closed,
}

/// Outcome of feeding one inbound frame to a [`Connection`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Received {
    /// Frames to write back to the socket, in order.
    pub replies: Vec<String>,
    pub signal: Option<ChannelSignal>,
}

/// Client side of one Engine.IO session on the default namespace.
///
/// Answers the open handshake with a namespace connect and pings with pongs;
/// everything else is surfaced as a [`ChannelSignal`].
#[derive(Clone, Debug, Default)]
pub struct Connection {
    handshake: Option<Handshake>,
    connected: bool,
}

impl Connection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the namespace connect has been acknowledged.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Engine.IO handshake data, once the open packet arrived.
    #[must_use]
    pub fn handshake(&self) -> Option<&Handshake> {
        self.handshake.as_ref()
    }

    /// Process one inbound WebSocket text frame.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the frame cannot be decoded; the connection
    /// state is left unchanged in that case.
    pub fn receive(&mut self, text: &str) -> Result<Received, CodecError> {
        let mut out = Received::default();
        match EnginePacket::decode(text)? {
            EnginePacket::Open(handshake) => {
                self.handshake = Some(handshake);
                out.replies
                    .push(EnginePacket::Message(SocketPacket::Connect(None).encode()).encode());
            }
            EnginePacket::Ping(payload) => out.replies.push(EnginePacket::Pong(payload).encode()),
            EnginePacket::Close => {
                self.connected = false;
                out.signal = Some(ChannelSignal::Closed);
            }
            EnginePacket::Message(payload) => {
                let message = SocketMessage::decode(&payload)?;
                if message.namespace == DEFAULT_NAMESPACE {
                    out.signal = self.apply_socket_packet(message.packet)?;
                }
            }
            EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => {}
        }
        Ok(out)
    }

    fn apply_socket_packet(&mut self, packet: SocketPacket) -> Result<Option<ChannelSignal>, CodecError> {
        Ok(match packet {
            SocketPacket::Connect(data) => {
                self.connected = true;
                let sid = data
                    .as_ref()
                    .and_then(|d| d.get("sid"))
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                Some(ChannelSignal::Connected { sid })
            }
            SocketPacket::ConnectError(data) => {
                self.connected = false;
                Some(ChannelSignal::Rejected(connect_error_message(&data)))
            }
            SocketPacket::Disconnect => {
                self.connected = false;
                Some(ChannelSignal::Closed)
            }
            SocketPacket::Event { name, args } => {
                Some(ChannelSignal::Event(ServerEvent::from_event(&name, &args)?))
            }
            SocketPacket::Ack => None,
        })
    }
}

fn connect_error_message(data: &Value) -> String {
    data.get("message")
        .and_then(Value::as_str)
        .or_else(|| data.as_str())
        .unwrap_or("connection rejected")
        .to_owned()
}
