use super::*;

#[test]
fn parse_data_url_splits_base64_media() {
    let parsed = parse_data_url("data:video/mp4;base64,AAAA").expect("data url");
    assert_eq!(parsed, DataUrl { media_type: "video/mp4", base64: true, data: "AAAA" });
}

#[test]
fn parse_data_url_handles_plain_and_parameterized_headers() {
    let plain = parse_data_url("data:text/plain,hello").expect("data url");
    assert!(!plain.base64);
    assert_eq!(plain.data, "hello");

    let with_charset = parse_data_url("data:image/svg+xml;charset=utf-8;BASE64,PHN2Zz4=").expect("data url");
    assert_eq!(with_charset.media_type, "image/svg+xml");
    assert!(with_charset.base64);
}

#[test]
fn parse_data_url_rejects_other_references() {
    assert_eq!(parse_data_url("https://cdn.example/out.mp4"), None);
    assert_eq!(parse_data_url("data:image/png;base64"), None);
}

#[test]
fn latin1_bytes_maps_each_char_to_a_byte() {
    assert_eq!(latin1_bytes("\u{0}A\u{ff}"), Some(vec![0, 65, 255]));
    assert_eq!(latin1_bytes("snow\u{2603}"), None);
}

#[test]
fn byte_len_converts_browser_sizes() {
    assert_eq!(byte_len(20_971_520.0), 20 * 1024 * 1024);
    assert_eq!(byte_len(-1.0), 0);
    assert_eq!(byte_len(f64::NAN), 0);
}

#[test]
fn object_urls_are_detected_by_scheme() {
    assert!(is_object_url("blob:http://localhost:3000/1234"));
    assert!(!is_object_url("data:image/png;base64,AAAA"));
}

#[test]
fn server_handles_pass_media_through_and_refuse_previews() {
    let mut handles = BrowserHandles;
    assert_eq!(handles.create_from_media("data:image/png;base64,AAAA"), Ok("data:image/png;base64,AAAA".to_owned()));

    let file = LocalFile { name: "a.png".to_owned(), media_type: "image/png".to_owned(), size: 1, blob: () };
    assert!(handles.create_from_file(&file).is_err());
    handles.release("blob:anything");
}
