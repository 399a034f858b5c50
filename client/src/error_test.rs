use super::*;

#[test]
fn validation_errors_carry_user_facing_messages() {
    let err = AppError::from(ValidationError::TooLarge);
    assert_eq!(err.to_string(), "File size must be less than 20MB.");
    assert_eq!(err.title(), "File Too Large");

    let err = AppError::from(ValidationError::UnsupportedType);
    assert_eq!(err.to_string(), "Please upload an image or video file.");
    assert_eq!(err.title(), "Invalid File Type");
}

#[test]
fn backend_error_displays_server_message_verbatim() {
    let err = AppError::Backend("bad format".to_owned());
    assert_eq!(err.to_string(), "bad format");
    assert_eq!(err.title(), "Processing Failed");
}

#[test]
fn connectivity_and_playback_titles() {
    assert_eq!(AppError::Connectivity("x".to_owned()).title(), "Connection Error");
    assert_eq!(AppError::Playback("x".to_owned()).title(), "Video Playback Error");
}
