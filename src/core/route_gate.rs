//! Redirect rules applied before a command runs.

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";
pub const PROTECTED_PREFIX: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Next,
    Redirect(&'static str),
}

pub fn route_gate(path: &str, cookie_present: bool) -> RouteDecision {
    if !cookie_present && path.starts_with(PROTECTED_PREFIX) {
        return RouteDecision::Redirect(LOGIN_PATH);
    }
    if cookie_present && (path == LOGIN_PATH || path == SIGNUP_PATH) {
        return RouteDecision::Redirect(PROTECTED_PREFIX);
    }
    RouteDecision::Next
}
