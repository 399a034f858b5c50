use super::*;
use crate::StatusKind;

const OPEN: &str =
    r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

fn connected() -> Connection {
    let mut conn = Connection::new();
    conn.receive(OPEN).expect("open");
    conn.receive(r#"40{"sid":"ns-1"}"#).expect("connect");
    conn
}

// =============================================================
// Engine.IO packets
// =============================================================

#[test]
fn engine_decode_open_reads_handshake() {
    let EnginePacket::Open(handshake) = EnginePacket::decode(OPEN).expect("decode") else {
        panic!("expected open packet");
    };
    assert_eq!(handshake.sid, "abc");
    assert_eq!(handshake.ping_interval, 25_000);
    assert_eq!(handshake.ping_timeout, 20_000);
}

#[test]
fn engine_decode_simple_packets() {
    assert_eq!(EnginePacket::decode("1").expect("close"), EnginePacket::Close);
    assert_eq!(EnginePacket::decode("2").expect("ping"), EnginePacket::Ping(String::new()));
    assert_eq!(EnginePacket::decode("3probe").expect("pong"), EnginePacket::Pong("probe".to_owned()));
    assert_eq!(EnginePacket::decode("6").expect("noop"), EnginePacket::Noop);
}

#[test]
fn engine_decode_rejects_empty_and_unknown() {
    assert!(matches!(EnginePacket::decode(""), Err(CodecError::Empty)));
    assert!(matches!(EnginePacket::decode("9"), Err(CodecError::UnknownEngineType('9'))));
    assert!(matches!(EnginePacket::decode("bAAAA"), Err(CodecError::Binary)));
}

#[test]
fn engine_encode_pong_echoes_payload() {
    assert_eq!(EnginePacket::Pong("probe".to_owned()).encode(), "3probe");
    assert_eq!(EnginePacket::Message("0".to_owned()).encode(), "40");
}

// =============================================================
// Socket.IO packets
// =============================================================

#[test]
fn socket_decode_event_with_payload() {
    let msg = SocketMessage::decode(r#"2["stream_status",{"status":"ok","message":"hi"}]"#).expect("decode");
    assert_eq!(msg.namespace, "/");
    let SocketPacket::Event { name, args } = msg.packet else {
        panic!("expected event");
    };
    assert_eq!(name, "stream_status");
    assert_eq!(args, vec![serde_json::json!({"status":"ok","message":"hi"})]);
}

#[test]
fn socket_decode_event_skips_ack_id_and_namespace() {
    let msg = SocketMessage::decode(r#"2/admin,12["ping_me"]"#).expect("decode");
    assert_eq!(msg.namespace, "/admin");
    assert_eq!(msg.packet, SocketPacket::Event { name: "ping_me".to_owned(), args: Vec::new() });
}

#[test]
fn socket_decode_rejects_malformed_events() {
    assert!(matches!(SocketMessage::decode(r#"2{"a":1}"#), Err(CodecError::MalformedEvent)));
    assert!(matches!(SocketMessage::decode("2[]"), Err(CodecError::MalformedEvent)));
    assert!(matches!(SocketMessage::decode("2[1,2]"), Err(CodecError::MalformedEvent)));
    assert!(matches!(SocketMessage::decode("2[oops"), Err(CodecError::Json(_))));
}

#[test]
fn socket_decode_rejects_binary_packets() {
    assert!(matches!(SocketMessage::decode(r#"51-["frame",{"_placeholder":true,"num":0}]"#), Err(CodecError::Binary)));
}

#[test]
fn socket_encode_event_prepends_name() {
    let packet = SocketPacket::Event {
        name: "start_stream".to_owned(),
        args: vec![serde_json::json!({"camera": 0})],
    };
    assert_eq!(packet.encode(), r#"2["start_stream",{"camera":0}]"#);
}

#[test]
fn client_events_encode_to_full_frames() {
    assert_eq!(ClientEvent::StartStream.encode(), r#"42["start_stream"]"#);
    assert_eq!(ClientEvent::StopStream.encode(), r#"42["stop_stream"]"#);
}

// =============================================================
// Server events
// =============================================================

#[test]
fn server_event_maps_processed_frame() {
    let args = vec![serde_json::json!({
        "image": "data:image/jpeg;base64,AAAA",
        "faces_detected": 1,
        "emotion": "sad",
        "confidence": 0.4,
        "blink_count": 2
    })];
    let ServerEvent::ProcessedFrame(frame) = ServerEvent::from_event("processed_frame", &args).expect("event")
    else {
        panic!("expected processed frame");
    };
    assert_eq!(frame.emotion.as_deref(), Some("sad"));
}

#[test]
fn server_event_unknown_name_is_preserved() {
    let event = ServerEvent::from_event("heartbeat", &[]).expect("event");
    assert_eq!(event, ServerEvent::Unknown("heartbeat".to_owned()));
}

#[test]
fn server_event_known_name_with_bad_payload_errors() {
    let result = ServerEvent::from_event("stream_status", &[serde_json::json!(42)]);
    assert!(matches!(result, Err(CodecError::Json(_))));
}

// =============================================================
// Connection driver
// =============================================================

#[test]
fn connection_answers_open_with_namespace_connect() {
    let mut conn = Connection::new();
    let received = conn.receive(OPEN).expect("open");
    assert_eq!(received.replies, vec!["40".to_owned()]);
    assert_eq!(received.signal, None);
    assert!(!conn.is_connected());
    assert_eq!(conn.handshake().map(|h| h.sid.as_str()), Some("abc"));
}

#[test]
fn connection_reports_connected_with_sid() {
    let mut conn = Connection::new();
    conn.receive(OPEN).expect("open");
    let received = conn.receive(r#"40{"sid":"ns-1"}"#).expect("connect");
    assert_eq!(received.signal, Some(ChannelSignal::Connected { sid: Some("ns-1".to_owned()) }));
    assert!(conn.is_connected());
}

#[test]
fn connection_answers_ping_with_pong() {
    let mut conn = connected();
    let received = conn.receive("2").expect("ping");
    assert_eq!(received.replies, vec!["3".to_owned()]);
    assert_eq!(received.signal, None);
}

#[test]
fn connection_surfaces_rejection_message() {
    let mut conn = Connection::new();
    conn.receive(OPEN).expect("open");
    let received = conn.receive(r#"44{"message":"Not authorized"}"#).expect("reject");
    assert_eq!(received.signal, Some(ChannelSignal::Rejected("Not authorized".to_owned())));
    assert!(!conn.is_connected());
}

#[test]
fn connection_surfaces_stream_status_event() {
    let mut conn = connected();
    let received = conn
        .receive(r#"42["stream_status",{"status":"stopped","message":"Stream stopped"}]"#)
        .expect("event");
    let Some(ChannelSignal::Event(ServerEvent::StreamStatus(status))) = received.signal else {
        panic!("expected stream status");
    };
    assert_eq!(status.status, StatusKind::Stopped);
}

#[test]
fn connection_ignores_other_namespaces() {
    let mut conn = connected();
    let received = conn.receive(r#"42/admin,["stream_status",{"status":"ok"}]"#).expect("event");
    assert_eq!(received.signal, None);
}

#[test]
fn connection_close_and_disconnect_report_closed() {
    let mut conn = connected();
    assert_eq!(conn.receive("41").expect("disconnect").signal, Some(ChannelSignal::Closed));
    assert!(!conn.is_connected());

    let mut conn = connected();
    assert_eq!(conn.receive("1").expect("close").signal, Some(ChannelSignal::Closed));
    assert!(!conn.is_connected());
}

#[test]
fn connection_decode_failure_keeps_state() {
    let mut conn = connected();
    assert!(conn.receive("4[").is_err());
    assert!(conn.is_connected());
}
