use super::*;

#[test]
fn tools_list_face_recognition() {
    assert_eq!(TOOLS.len(), 1);
    assert_eq!(TOOLS[0].title, "Face and Emotion Recognition");
    assert_eq!(tool_route(&TOOLS[0]), "/face-recognition");
}

#[test]
fn tool_slugs_are_unique() {
    for (i, tool) in TOOLS.iter().enumerate() {
        assert!(TOOLS[i + 1..].iter().all(|other| other.slug != tool.slug));
    }
}

#[test]
fn welcome_label_names_user() {
    assert_eq!(welcome_label(Some("alice")), "Welcome, alice");
}

#[test]
fn welcome_label_without_user() {
    assert_eq!(welcome_label(None), "Welcome");
    assert_eq!(welcome_label(Some("")), "Welcome");
}
