//! Session data model
//!
//! A `Session` is the single source of truth for whether the visitor is signed
//! in. The authenticated flag is derived from the user, never stored.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// User record returned by the identity service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            role: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Synthetic identity used when authentication is disabled
    pub fn developer() -> Self {
        Self::new("dev-user")
            .with_name("Developer User")
            .with_email("developer@example.com")
            .with_role("developer")
    }

    /// Best label for display: name, then email, then id
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Identity services disagree on whether ids are strings or numbers
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!("invalid user id: {other}"))),
    }
}

/// Opaque bearer credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// Current authentication state of the visitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
    loading: bool,
    last_error: Option<String>,
}

/// Read-only view over the phase a session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus<'a> {
    /// Bootstrap has not finished yet
    Loading,
    Unauthenticated,
    Authenticated(&'a User),
}

impl Session {
    /// State at page load, before bootstrap
    pub fn initial() -> Self {
        Self {
            user: None,
            loading: true,
            last_error: None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn status(&self) -> SessionStatus<'_> {
        match (&self.user, self.loading) {
            (_, true) => SessionStatus::Loading,
            (Some(user), false) => SessionStatus::Authenticated(user),
            (None, false) => SessionStatus::Unauthenticated,
        }
    }

    pub(crate) fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub(crate) fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub(crate) fn set_error(&mut self, error: Option<String>) {
        self.last_error = error;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_session() {
        let session = Session::initial();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.last_error().is_none());
        assert_eq!(session.status(), SessionStatus::Loading);
    }

    #[test]
    fn test_authenticated_is_derived_from_user() {
        let mut session = Session::initial();
        session.finish_loading();
        assert_eq!(session.status(), SessionStatus::Unauthenticated);

        let user = User::new("42");
        session.set_user(Some(user.clone()));
        assert!(session.is_authenticated());
        assert_eq!(session.status(), SessionStatus::Authenticated(&user));

        session.set_user(None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_loading_takes_precedence() {
        let mut session = Session::initial();
        session.set_user(Some(User::new("1")));
        assert_eq!(session.status(), SessionStatus::Loading);
    }

    #[test]
    fn test_developer_identity() {
        let user = User::developer();
        assert_eq!(user.id, "dev-user");
        assert_eq!(user.name.as_deref(), Some("Developer User"));
        assert_eq!(user.email.as_deref(), Some("developer@example.com"));
        assert_eq!(user.role.as_deref(), Some("developer"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(User::new("7").display_name(), "7");
        assert_eq!(User::new("7").with_email("a@b.com").display_name(), "a@b.com");
        assert_eq!(
            User::new("7").with_email("a@b.com").with_name("Ann").display_name(),
            "Ann"
        );
    }

    #[test]
    fn test_user_ignores_unknown_fields() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.com","avatar":"x.png","created_at":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(user, User::new("u1").with_email("a@b.com"));
    }

    #[test]
    fn test_user_numeric_and_aliased_ids() {
        let user: User = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(user.id, "42");

        let user: User = serde_json::from_str(r#"{"_id":"abc","name":"Ann"}"#).unwrap();
        assert_eq!(user, User::new("abc").with_name("Ann"));

        assert!(serde_json::from_str::<User>(r#"{"id":null}"#).is_err());
        assert!(serde_json::from_str::<User>(r#"{"name":"no id"}"#).is_err());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::new("secret-value");
        assert_eq!(format!("{:?}", token), "Token(<redacted>)");
        assert_eq!(token.bearer(), "Bearer secret-value");
    }
}
