use super::*;
use crate::session::Session;
use multipanel_shared::{Role, UserRecord};

fn authenticated(role: Role) -> SessionState {
    SessionState::Authenticated(Session {
        user: UserRecord::new("u", "u@example.com").with_role(role),
        token: "tok".into(),
    })
}

fn all_states() -> Vec<SessionState> {
    vec![
        SessionState::Pending,
        SessionState::Anonymous,
        authenticated(Role::Owner),
        authenticated(Role::Reseller),
    ]
}

const PUBLIC_PATHS: [&str; 3] = ["/login", "/register", "/download-app"];

const PROTECTED_PATHS: [&str; 15] = [
    "/dashboard",
    "/keys",
    "/transactions",
    "/provider-plans",
    "/upload-keys",
    "/reset-key",
    "/users",
    "/user-profile/42",
    "/generate-keys",
    "/change-password",
    "/unsold-keys",
    "/my-bonus",
    "/bonus-list",
    "/create-ref",
    "/xyz123",
];

// =========================================================
// 路径解析
// =========================================================

#[test]
fn every_known_path_round_trips() {
    for path in PUBLIC_PATHS.iter().chain(PROTECTED_PATHS.iter()) {
        assert_eq!(AppRoute::from_path(path).to_path(), *path);
    }
    assert_eq!(AppRoute::from_path("/").to_path(), "/");
}

#[test]
fn parsing_ignores_query_fragment_and_trailing_slash() {
    assert_eq!(AppRoute::from_path("/keys/"), AppRoute::Keys);
    assert_eq!(AppRoute::from_path("/keys?page=2"), AppRoute::Keys);
    assert_eq!(AppRoute::from_path("/login#top"), AppRoute::Login);
    assert_eq!(AppRoute::from_path(""), AppRoute::Root);
}

#[test]
fn parsing_is_case_insensitive_except_user_id() {
    assert_eq!(AppRoute::from_path("/Dashboard"), AppRoute::Dashboard);
    assert_eq!(AppRoute::from_path("/CHANGE-PASSWORD/"), AppRoute::ChangePassword);
    assert_eq!(
        AppRoute::from_path("/User-Profile/AbC-9"),
        AppRoute::UserProfile("AbC-9".into())
    );
    assert_eq!(
        AppRoute::from_path("/Nowhere"),
        AppRoute::NotFound("/Nowhere".into())
    );

    let dashboard = resolve(&AppRoute::from_path("/DASHBOARD"), &authenticated(Role::User));
    assert_eq!(dashboard.decision, GuardDecision::Render(AppRoute::Dashboard));
}

#[test]
fn user_profile_captures_single_segment() {
    assert_eq!(
        AppRoute::from_path("/user-profile/abc-1"),
        AppRoute::UserProfile("abc-1".into())
    );
    assert_eq!(
        AppRoute::from_path("/user-profile/"),
        AppRoute::NotFound("/user-profile".into())
    );
    assert_eq!(
        AppRoute::from_path("/user-profile/1/edit"),
        AppRoute::NotFound("/user-profile/1/edit".into())
    );
}

#[test]
fn unknown_path_is_protected_not_found() {
    let route = AppRoute::from_path("/xyz123");
    assert_eq!(route, AppRoute::NotFound("/xyz123".into()));
    assert_eq!(route.access(), RouteAccess::Protected);
}

// =========================================================
// 守卫判定
// =========================================================

#[test]
fn pending_always_loads() {
    for path in PUBLIC_PATHS.iter().chain(PROTECTED_PATHS.iter()) {
        let route = AppRoute::from_path(path);
        assert_eq!(guard(&route, &SessionState::Pending), GuardDecision::Loading);
    }
}

#[test]
fn anonymous_on_protected_redirects_to_login() {
    for path in PROTECTED_PATHS {
        let route = AppRoute::from_path(path);
        assert_eq!(
            guard(&route, &SessionState::Anonymous),
            GuardDecision::Redirect(AppRoute::Login),
            "path {}",
            path
        );
    }
}

#[test]
fn authenticated_on_public_redirects_to_dashboard() {
    for path in PUBLIC_PATHS {
        let route = AppRoute::from_path(path);
        assert_eq!(
            guard(&route, &authenticated(Role::Owner)),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }
}

#[test]
fn matching_access_renders() {
    assert_eq!(
        guard(&AppRoute::Login, &SessionState::Anonymous),
        GuardDecision::Render(AppRoute::Login)
    );
    assert_eq!(
        guard(&AppRoute::Dashboard, &authenticated(Role::Admin)),
        GuardDecision::Render(AppRoute::Dashboard)
    );
    assert_eq!(
        guard(
            &AppRoute::NotFound("/xyz123".into()),
            &authenticated(Role::User)
        ),
        GuardDecision::Render(AppRoute::NotFound("/xyz123".into()))
    );
}

#[test]
fn root_redirects_to_dashboard_in_every_state() {
    for state in all_states() {
        assert_eq!(
            guard(&AppRoute::Root, &state),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }
}

// =========================================================
// 重定向链
// =========================================================

#[test]
fn resolve_follows_root_then_guard() {
    let anon = resolve(&AppRoute::Root, &SessionState::Anonymous);
    assert_eq!(anon.route, AppRoute::Login);
    assert_eq!(anon.decision, GuardDecision::Render(AppRoute::Login));
    assert!(anon.redirected);

    let owner = resolve(&AppRoute::Root, &authenticated(Role::Owner));
    assert_eq!(owner.decision, GuardDecision::Render(AppRoute::Dashboard));

    let pending = resolve(&AppRoute::Root, &SessionState::Pending);
    assert_eq!(pending.route, AppRoute::Dashboard);
    assert_eq!(pending.decision, GuardDecision::Loading);
}

#[test]
fn resolve_unknown_path_logged_out_lands_on_login() {
    let result = resolve(&AppRoute::from_path("/xyz123"), &SessionState::Anonymous);
    assert_eq!(result.decision, GuardDecision::Render(AppRoute::Login));
}

#[test]
fn resolve_never_ends_on_a_redirect() {
    for state in all_states() {
        for path in PUBLIC_PATHS.iter().chain(PROTECTED_PATHS.iter()).chain(["/"].iter()) {
            let result = resolve(&AppRoute::from_path(path), &state);
            assert!(!matches!(result.decision, GuardDecision::Redirect(_)));
        }
    }
}

#[test]
fn resolve_without_redirect_keeps_route() {
    let result = resolve(&AppRoute::Keys, &authenticated(Role::Reseller));
    assert!(!result.redirected);
    assert_eq!(result.route, AppRoute::Keys);
}
