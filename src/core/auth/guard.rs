//! Route guarding
//!
//! Decides whether a protected view renders, waits for bootstrap, or sends the
//! visitor to sign in. The decision is a pure function of the session and the
//! override flag, so callers re-run it on every session change.

use url::form_urlencoded;

use super::session::Session;
use crate::core::config::AuthConfig;

pub const HOME_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const VERIFY_EMAIL_PATH: &str = "/verify-email";

/// Query parameter carrying the location to return to after sign-in
pub const RETURN_TO_PARAM: &str = "from";
/// Query parameter carrying the address awaiting verification
pub const EMAIL_PARAM: &str = "email";

/// Navigation requested by a session operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRedirect {
    SignIn,
    VerifyEmail { email: String },
}

impl AuthRedirect {
    pub fn to_path(&self) -> String {
        match self {
            AuthRedirect::SignIn => SIGN_IN_PATH.to_string(),
            AuthRedirect::VerifyEmail { email } => with_query(VERIFY_EMAIL_PATH, EMAIL_PARAM, email),
        }
    }
}

/// Outcome for a protected render request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested view
    Allow,
    /// Bootstrap still running, render a placeholder
    Defer,
    /// Redirect to sign in; `redirect_to` carries the return location
    Deny { redirect_to: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGuard {
    disable_auth: bool,
}

impl RouteGuard {
    pub fn new(disable_auth: bool) -> Self {
        Self { disable_auth }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.disable_auth)
    }

    pub fn decide(&self, session: &Session, requested: &str) -> GuardDecision {
        if self.disable_auth {
            return GuardDecision::Allow;
        }
        if session.is_loading() {
            return GuardDecision::Defer;
        }
        if !session.is_authenticated() {
            return GuardDecision::Deny {
                redirect_to: sign_in_redirect(requested),
            };
        }
        GuardDecision::Allow
    }
}

fn with_query(path: &str, key: &str, value: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{}?{}", path, query)
}

/// Rebuild the location the visitor asked for from its path and query string
pub fn requested_location(pathname: &str, search: &str) -> String {
    let search = search.trim_start_matches('?');
    if search.is_empty() {
        pathname.to_string()
    } else {
        format!("{}?{}", pathname, search)
    }
}

/// Sign-in path remembering where the visitor was headed
pub fn sign_in_redirect(requested: &str) -> String {
    if requested.is_empty() || requested == HOME_PATH || is_sign_in(requested) {
        return SIGN_IN_PATH.to_string();
    }
    with_query(SIGN_IN_PATH, RETURN_TO_PARAM, requested)
}

fn is_sign_in(path: &str) -> bool {
    path == SIGN_IN_PATH
        || path.starts_with(&format!("{}?", SIGN_IN_PATH))
        || path.starts_with(&format!("{}/", SIGN_IN_PATH))
}

/// Read a single parameter out of a raw query string
pub fn query_param(search: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Where to go after sign-in. The hand-off is advisory, so anything that is not
/// a same-origin absolute path falls back to home.
pub fn safe_return_path(from: Option<&str>) -> String {
    match from {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !is_sign_in(path) =>
        {
            path.to_string()
        }
        _ => HOME_PATH.to_string(),
    }
}
