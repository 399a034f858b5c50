use wire::{AnalysisResponse, MediaKind};

use super::*;
use crate::state::notices::Tone;
use crate::state::stream::ConnectionStatus;
use crate::state::upload::{LocalFile, UploadPhase, UploadState};

const OPEN: &str = r#"0{"sid":"eio-1","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

fn connected_session() -> ChannelSession {
    let mut session = ChannelSession::default();
    session.receive(OPEN).expect("open");
    session.receive(r#"40{"sid":"sock-1"}"#).expect("connect");
    session
}

// =============================================================
// ChannelSession
// =============================================================

#[test]
fn open_is_answered_with_namespace_connect() {
    let mut session = ChannelSession::default();
    let step = session.receive(OPEN).expect("open");
    assert_eq!(step.replies, vec!["40".to_owned()]);
    assert_eq!(step.event, None);
    assert!(!step.close);
}

#[test]
fn namespace_connect_reports_connected() {
    let mut session = ChannelSession::default();
    session.receive(OPEN).expect("open");
    let step = session.receive(r#"40{"sid":"sock-1"}"#).expect("connect");
    assert_eq!(step.event, Some(ChannelEvent::Connected));
    assert_eq!(session.finish(), ChannelEvent::Disconnected);
}

#[test]
fn ping_is_answered_with_pong() {
    let mut session = connected_session();
    let step = session.receive("2").expect("ping");
    assert_eq!(step.replies, vec!["3".to_owned()]);
    assert_eq!(step.event, None);
}

#[test]
fn server_events_surface_in_order() {
    let mut session = connected_session();
    let first = session
        .receive(r#"42["processed_frame",{"image":"data:a","faces_detected":1}]"#)
        .expect("frame");
    let second = session
        .receive(r#"42["stream_status",{"status":"stopped","message":"Stream stopped"}]"#)
        .expect("status");
    assert!(matches!(first.event, Some(ChannelEvent::Server(ServerEvent::ProcessedFrame(_)))));
    assert!(matches!(second.event, Some(ChannelEvent::Server(ServerEvent::StreamStatus(_)))));
}

#[test]
fn rejected_connect_closes_and_finishes_as_failure() {
    let mut session = ChannelSession::default();
    session.receive(OPEN).expect("open");
    let step = session.receive(r#"44{"message":"unauthorized"}"#).expect("reject");
    assert!(step.close);
    assert_eq!(step.event, None);
    assert_eq!(session.finish(), ChannelEvent::ConnectFailed(CONNECT_FAILED_MESSAGE.to_owned()));
}

#[test]
fn server_disconnect_closes_session() {
    let mut session = connected_session();
    let step = session.receive("41").expect("disconnect");
    assert!(step.close);
    assert_eq!(session.finish(), ChannelEvent::Disconnected);
}

#[test]
fn never_opened_session_finishes_as_failure() {
    assert_eq!(
        ChannelSession::default().finish(),
        ChannelEvent::ConnectFailed("Failed to connect to the backend server.".to_owned())
    );
}

#[test]
fn undecodable_frame_is_an_error_and_keeps_state() {
    let mut session = connected_session();
    assert!(session.receive("").is_err());
    assert!(session.receive("9oops").is_err());
    assert_eq!(session.finish(), ChannelEvent::Disconnected);
}

// =============================================================
// dispatch
// =============================================================

fn with_page_state(f: impl FnOnce(RwSignal<StreamState>, UploadSignal, RwSignal<NoticeState>)) {
    let owner = Owner::new();
    owner.with(|| {
        let stream = RwSignal::new(StreamState::default());
        let upload: UploadSignal = RwSignal::new_local(UploadState::default());
        let notices = RwSignal::new(NoticeState::default());
        f(stream, upload, notices);
    });
}

#[test]
fn dispatch_connected_updates_stream_and_notifies() {
    with_page_state(|stream, upload, notices| {
        dispatch(&ChannelEvent::Connected, stream, upload, notices);
        assert_eq!(stream.get_untracked().connection, ConnectionStatus::Connected);
        let items = notices.get_untracked().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Connected");
    });
}

#[test]
fn dispatch_connect_failure_notifies_error() {
    with_page_state(|stream, upload, notices| {
        dispatch(&ChannelEvent::Connecting, stream, upload, notices);
        dispatch(&ChannelEvent::ConnectFailed(CONNECT_FAILED_MESSAGE.to_owned()), stream, upload, notices);
        assert_eq!(stream.get_untracked().connection, ConnectionStatus::Disconnected);
        let items = notices.get_untracked().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Connection Error");
        assert_eq!(items[0].message, CONNECT_FAILED_MESSAGE);
        assert_eq!(items[0].tone, Tone::Error);
    });
}

#[test]
fn dispatch_pushed_analysis_settles_upload() {
    with_page_state(|stream, upload, notices| {
        upload.update(|u| {
            u.file = Some(LocalFile {
                name: "clip.mp4".to_owned(),
                media_type: "video/mp4".to_owned(),
                size: 10,
                blob: (),
            });
            u.phase = UploadPhase::Processing;
        });
        let resp = AnalysisResponse {
            image: None,
            video: Some("data:video/mp4;base64,AAAA".to_owned()),
            faces_detected: 3,
            emotion: Some("surprise".to_owned()),
            confidence: Some(0.4),
            blink_count: None,
            file_type: MediaKind::Video,
        };

        dispatch(&ChannelEvent::Server(ServerEvent::AnalysisResult(resp)), stream, upload, notices);

        let state = upload.get_untracked();
        assert_eq!(state.phase, UploadPhase::Completed);
        assert!(state.can_download());
        assert_eq!(notices.get_untracked().items[0].message, "3 face(s) detected");
        assert_eq!(stream.get_untracked(), StreamState::default());
    });
}

#[test]
fn dispatch_pushed_analysis_without_running_upload_is_dropped() {
    with_page_state(|stream, upload, notices| {
        upload.update(|u| {
            u.file = Some(LocalFile {
                name: "still.png".to_owned(),
                media_type: "image/png".to_owned(),
                size: 10,
                blob: (),
            });
            u.phase = UploadPhase::FileSelected;
        });
        let resp = AnalysisResponse {
            image: Some("data:image/png;base64,AAAA".to_owned()),
            video: None,
            faces_detected: 1,
            emotion: None,
            confidence: None,
            blink_count: None,
            file_type: MediaKind::Image,
        };

        dispatch(&ChannelEvent::Server(ServerEvent::AnalysisResult(resp)), stream, upload, notices);

        let state = upload.get_untracked();
        assert_eq!(state.phase, UploadPhase::FileSelected);
        assert!(state.analysis.is_none());
        assert!(notices.get_untracked().items.is_empty());
    });
}

#[test]
fn dispatch_unknown_event_changes_nothing() {
    with_page_state(|stream, upload, notices| {
        dispatch(&ChannelEvent::Server(ServerEvent::Unknown("telemetry".to_owned())), stream, upload, notices);
        assert_eq!(stream.get_untracked(), StreamState::default());
        assert!(notices.get_untracked().items.is_empty());
    });
}

// =============================================================
// ChannelSender
// =============================================================

#[test]
fn detached_sender_drops_events() {
    let sender = ChannelSender::default();
    assert!(!sender.send(ClientEvent::StartStream));
    sender.close();
}
