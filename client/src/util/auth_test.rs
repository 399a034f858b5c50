use super::*;

#[test]
fn guard_redirects_logged_out_session() {
    assert_eq!(guard_decision(&Session::default()), GuardDecision::RedirectToLogin);
}

#[test]
fn guard_renders_logged_in_session() {
    let session = Session { logged_in: true, username: Some("alice".to_owned()) };
    assert_eq!(guard_decision(&session), GuardDecision::Render);
}

#[test]
fn guard_follows_login_flag_not_username() {
    let session = Session { logged_in: false, username: Some("stale".to_owned()) };
    assert_eq!(guard_decision(&session), GuardDecision::RedirectToLogin);
}

#[test]
fn redirect_options_replace_history() {
    assert!(redirect_options().replace);
}

#[test]
fn route_constants_are_absolute() {
    assert_eq!(LOGIN_PATH, "/login");
    assert_eq!(HOME_PATH, "/dashboard");
}
