//! Route guard deciding which paths a visitor may reach.

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const FOLDERS_PATH: &str = "/deviceFolderList";

/// Outcome of checking a navigation against the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl GateDecision {
    /// Where to navigate instead, if anywhere.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GateDecision::Allow => None,
            GateDecision::RedirectToLogin => Some(LOGIN_PATH),
            GateDecision::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

/// Strip query, fragment and trailing slashes.
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn is_auth_page(path: &str) -> bool {
    matches!(normalize(path), LOGIN_PATH | SIGNUP_PATH)
}

/// Decide whether `path` is reachable.
///
/// Signed-out visitors only reach the login and sign-up pages; signed-in
/// users are kept away from them. Token contents are never inspected.
pub fn resolve_gate(path: &str, authenticated: bool) -> GateDecision {
    match (authenticated, is_auth_page(path)) {
        (false, false) => GateDecision::RedirectToLogin,
        (true, true) => GateDecision::RedirectToDashboard,
        _ => GateDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_is_sent_to_login() {
        assert_eq!(resolve_gate("/dashboard", false), GateDecision::RedirectToLogin);
        assert_eq!(resolve_gate("/", false), GateDecision::RedirectToLogin);
        assert_eq!(resolve_gate(FOLDERS_PATH, false), GateDecision::RedirectToLogin);
        assert_eq!(resolve_gate("/login", false), GateDecision::Allow);
        assert_eq!(resolve_gate("/signup", false), GateDecision::Allow);
    }

    #[test]
    fn test_signed_in_skips_auth_pages() {
        assert_eq!(resolve_gate("/login", true), GateDecision::RedirectToDashboard);
        assert_eq!(resolve_gate("/signup", true), GateDecision::RedirectToDashboard);
        assert_eq!(resolve_gate("/dashboard", true), GateDecision::Allow);
        assert_eq!(resolve_gate("/nowhere", true), GateDecision::Allow);
    }

    #[test]
    fn test_paths_are_normalized() {
        assert_eq!(resolve_gate("/login/?next=x", true), GateDecision::RedirectToDashboard);
        assert_eq!(resolve_gate("/signup#top", false), GateDecision::Allow);
        assert_eq!(resolve_gate("/loginx", false), GateDecision::RedirectToLogin);
        assert_eq!(normalize("///"), "/");
        assert_eq!(GateDecision::RedirectToLogin.redirect(), Some(LOGIN_PATH));
        assert_eq!(GateDecision::Allow.redirect(), None);
    }
}
