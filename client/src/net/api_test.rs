use wire::MediaKind;

use super::*;

#[test]
fn backend_error_message_uses_error_field_verbatim() {
    assert_eq!(backend_error_message(r#"{"error":"bad format"}"#), "bad format");
}

#[test]
fn backend_error_message_falls_back_when_missing_or_unparseable() {
    assert_eq!(backend_error_message("{}"), GENERIC_FAILURE);
    assert_eq!(backend_error_message(r#"{"error":""}"#), GENERIC_FAILURE);
    assert_eq!(backend_error_message("<html>502 Bad Gateway</html>"), GENERIC_FAILURE);
    assert_eq!(backend_error_message(""), GENERIC_FAILURE);
}

#[test]
fn failed_reply_is_backend_error() {
    let err = parse_analysis_reply(false, r#"{"error":"bad format"}"#).expect_err("failure");
    assert_eq!(err, AppError::Backend("bad format".to_owned()));
    assert_eq!(err.title(), "Processing Failed");
}

#[test]
fn successful_reply_parses_response() {
    let body = r#"{"image":"data:image/jpeg;base64,AAAA","faces_detected":1,"emotion":"happy",
        "confidence":0.91,"blink_count":0,"file_type":"image"}"#;
    let resp = parse_analysis_reply(true, body).expect("response");
    assert_eq!(resp.faces_detected, 1);
    assert_eq!(resp.file_type, MediaKind::Image);
}

#[test]
fn unreadable_success_body_is_backend_error() {
    let err = parse_analysis_reply(true, "not json").expect_err("failure");
    assert!(matches!(err, AppError::Backend(msg) if msg.starts_with("Unexpected response")));
}

#[test]
fn transport_error_message_includes_detail() {
    assert_eq!(
        transport_error_message("Failed to fetch"),
        "Could not reach the analysis server: Failed to fetch"
    );
}

#[test]
fn upload_field_is_named_file() {
    assert_eq!(FILE_FIELD, "file");
}
