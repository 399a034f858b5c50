use super::*;
use crate::error::ValidationError;

#[test]
fn push_returns_id_of_pushed_notice() {
    let mut state = NoticeState::default();
    let id = state.push(Notice::info("Connected", "Successfully connected to the backend server."));
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, id);
    assert_eq!(state.items[0].tone, Tone::Info);
}

#[test]
fn push_drops_oldest_beyond_limit() {
    let mut state = NoticeState::default();
    for i in 0..(MAX_VISIBLE_NOTICES + 2) {
        state.push(Notice::info(format!("n{i}"), ""));
    }
    assert_eq!(state.items.len(), MAX_VISIBLE_NOTICES);
    assert_eq!(state.items[0].title, "n2");
}

#[test]
fn dismiss_removes_only_matching_notice() {
    let mut state = NoticeState::default();
    let keep = state.push(Notice::info("keep", ""));
    let drop = state.push(Notice::error("drop", ""));
    state.dismiss(&drop);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, keep);
}

#[test]
fn notice_from_error_uses_title_and_message() {
    let notice = Notice::from(&AppError::from(ValidationError::UnsupportedType));
    assert_eq!(notice.title, "Invalid File Type");
    assert_eq!(notice.message, "Please upload an image or video file.");
    assert_eq!(notice.tone, Tone::Error);
}

#[test]
fn notice_ids_are_unique() {
    assert_ne!(Notice::info("a", "").id, Notice::info("a", "").id);
}

#[test]
fn notify_pushes_into_signal() {
    let owner = Owner::new();
    owner.with(|| {
        let notices = RwSignal::new(NoticeState::default());
        notify(notices, Notice::error("Processing Failed", "bad format"));
        let items = notices.get_untracked().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].message, "bad format");
    });
}
