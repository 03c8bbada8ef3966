//! Identity service port
//!
//! Defines the three remote operations the session manager depends on, the
//! payloads they exchange, and how raw HTTP responses are interpreted.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::session::{Token, User};

/// Remote identity service
#[allow(async_fn_in_trait)]
pub trait IdentityClient {
    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthError>;

    /// `POST /auth/register`
    async fn register(&self, data: &RegistrationData) -> Result<(), AuthError>;

    /// `GET /auth/me` with a bearer token
    async fn fetch_current_user(&self, token: &Token) -> Result<User, AuthError>;
}

/// Login request body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration payload, forwarded to the identity service unchanged
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationData {
    pub email: String,
    pub password: String,
    /// Any further fields the sign-up form collects (name, etc.)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RegistrationData {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an additional field to the payload
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl fmt::Debug for RegistrationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationData")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("extra", &self.extra)
            .finish()
    }
}

/// Payload of a successful login. Either field may be missing on a
/// malformed response; the session manager decides what that means.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<Token>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct CurrentUser {
    user: User,
}

/// Error body, e.g. `{"message": "Invalid credentials"}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Status and body of an HTTP exchange, independent of the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail on any non-2xx status, carrying the server message along
    pub fn error_for_status(self) -> Result<Self, AuthError> {
        if self.is_success() {
            return Ok(self);
        }

        let message = serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|body| body.message.or(body.error));

        Err(AuthError::Rejected {
            status: self.status,
            message,
        })
    }

    fn json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, AuthError> {
        serde_json::from_str(&self.body).map_err(|e| AuthError::MalformedResponse(e.to_string()))
    }
}

/// Interpret a `/auth/login` response
pub fn parse_login_response(response: RawResponse) -> Result<LoginResponse, AuthError> {
    let envelope: Envelope<LoginResponse> = response.error_for_status()?.json()?;
    Ok(envelope.data)
}

/// Interpret a `/auth/register` response; any 2xx is success and the body is ignored
pub fn parse_register_response(response: RawResponse) -> Result<(), AuthError> {
    response.error_for_status().map(|_| ())
}

/// Interpret a `/auth/me` response. 401 and 403 mean the token is no good.
pub fn parse_current_user_response(response: RawResponse) -> Result<User, AuthError> {
    if matches!(response.status, 401 | 403) {
        return Err(AuthError::InvalidToken);
    }
    let envelope: Envelope<CurrentUser> = response.error_for_status()?.json()?;
    Ok(envelope.data.user)
}
