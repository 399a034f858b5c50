use super::*;

#[test]
fn upload_tab_is_default() {
    assert_eq!(Tab::default(), Tab::Upload);
}

#[test]
fn tab_labels_match_tab_order() {
    let labels: Vec<_> = Tab::ALL.iter().map(|t| t.label()).collect();
    assert_eq!(labels, ["Upload File", "Live Stream"]);
}
