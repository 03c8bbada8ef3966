//! Session manager
//!
//! Owns the session for the lifetime of the page. Resolves a stored token into
//! a user once at startup, and funnels login, registration and logout through
//! the identity service and the token store.
//!
//! Each call captures the generation when it starts, and only a successful
//! login or a logout advances it. A response that arrives after such a write
//! is dropped instead of overwriting the newer state. Failed or incomplete
//! logins change nothing, so they never invalidate a bootstrap in flight.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use super::client::{Credentials, IdentityClient, LoginResponse, RegistrationData};
use super::error::AuthError;
use super::guard::AuthRedirect;
use super::session::{Session, Token, User};
use super::store::{TOKEN_STORAGE_KEY, TokenStore};

pub const LOGIN_FAILED_MESSAGE: &str = "Failed to login. Please try again.";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

type Observer = Box<dyn Fn(&Session) + Send + Sync>;

/// Result of a login call that reached the identity service successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(User),
    /// The service answered 2xx without a token and user; still signed out
    Incomplete,
}

pub struct SessionManager<S, C> {
    store: S,
    client: C,
    disable_auth: bool,
    state: RwLock<Session>,
    generation: AtomicU64,
    bootstrapped: AtomicBool,
    observers: RwLock<Vec<Observer>>,
}

/// Clears the loading flag when bootstrap exits, however it exits
struct FinishLoading<'a, S, C>(&'a SessionManager<S, C>);

impl<S, C> Drop for FinishLoading<'_, S, C> {
    fn drop(&mut self) {
        self.0.update(Session::finish_loading);
    }
}

impl<S, C> SessionManager<S, C> {
    pub fn new(store: S, client: C, disable_auth: bool) -> Self {
        Self {
            store,
            client,
            disable_auth,
            state: RwLock::new(Session::initial()),
            generation: AtomicU64::new(0),
            bootstrapped: AtomicBool::new(false),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_auth_disabled(&self) -> bool {
        self.disable_auth
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Register a callback run after every session change
    pub fn subscribe(&self, observer: impl Fn(&Session) + Send + Sync + 'static) {
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(observer));
    }

    pub fn clear_error(&self) {
        self.update(|session| session.set_error(None));
    }

    fn update(&self, change: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut session = self.state.write().unwrap_or_else(PoisonError::into_inner);
            change(&mut session);
            session.clone()
        };

        let observers = self.observers.read().unwrap_or_else(PoisonError::into_inner);
        for observer in observers.iter() {
            observer(&snapshot);
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.current_generation() == generation
    }

    /// Record a failed login/register for display and hand the error back
    fn fail(&self, err: AuthError, fallback: &str) -> AuthError {
        let message = err.user_message(fallback);
        self.update(|session| session.set_error(Some(message)));
        err
    }
}

impl<S: TokenStore, C: IdentityClient> SessionManager<S, C> {
    /// Resolve the stored token into a session. Runs once per manager; later
    /// calls return immediately.
    ///
    /// Failures are never surfaced: a rejected token is purged and the visitor
    /// is simply signed out.
    pub async fn bootstrap(&self) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            tracing::debug!("Session bootstrap already ran");
            return;
        }
        let _finish = FinishLoading(self);

        if self.disable_auth {
            tracing::warn!("Authentication disabled, using developer identity");
            self.update(|session| session.set_user(Some(User::developer())));
            return;
        }

        let Some(token) = self.store.get(TOKEN_STORAGE_KEY) else {
            tracing::debug!("No stored token, starting signed out");
            return;
        };

        let generation = self.current_generation();
        let result = self.client.fetch_current_user(&Token::new(token)).await;

        if !self.is_current(generation) {
            tracing::debug!("Session changed during bootstrap, discarding lookup");
            return;
        }

        match result {
            Ok(user) => {
                tracing::info!("Session restored for user: {}", user.id);
                self.update(|session| session.set_user(Some(user)));
            }
            Err(err) => {
                tracing::warn!("Stored token rejected, clearing it: {}", err);
                self.store.remove(TOKEN_STORAGE_KEY);
                self.update(|session| session.set_user(None));
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// Callers validate the inputs. On failure the session is left as it was,
    /// apart from `last_error`, and the error is returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if self.disable_auth {
            return Ok(LoginOutcome::Authenticated(User::developer()));
        }

        let generation = self.current_generation();
        self.update(|session| session.set_error(None));
        tracing::info!("Login attempt for email: {}", email);

        let result = self
            .client
            .login(&Credentials::new(email, password))
            .await;

        if !self.is_current(generation) {
            tracing::debug!("Login for {} superseded by a newer session change", email);
            return Err(AuthError::Superseded);
        }

        match result {
            Ok(LoginResponse {
                token: Some(token),
                user: Some(user),
            }) => {
                if let Err(err) = self.store.set(TOKEN_STORAGE_KEY, token.as_str()) {
                    tracing::error!("Could not persist token: {}", err);
                    return Err(self.fail(err.into(), LOGIN_FAILED_MESSAGE));
                }
                self.next_generation();
                tracing::info!("User logged in successfully: {}", user.id);
                self.update(|session| session.set_user(Some(user.clone())));
                Ok(LoginOutcome::Authenticated(user))
            }
            Ok(response) => {
                tracing::warn!(
                    "Login response incomplete (token: {}, user: {}), staying signed out",
                    response.token.is_some(),
                    response.user.is_some()
                );
                Ok(LoginOutcome::Incomplete)
            }
            Err(err) => {
                tracing::warn!("Login failed for {}: {}", email, err);
                Err(self.fail(err, LOGIN_FAILED_MESSAGE))
            }
        }
    }

    /// Create an account. Does not sign in; the caller continues to email
    /// verification.
    pub async fn register(&self, data: &RegistrationData) -> Result<AuthRedirect, AuthError> {
        let redirect = AuthRedirect::VerifyEmail {
            email: data.email.clone(),
        };
        if self.disable_auth {
            return Ok(redirect);
        }

        self.update(|session| session.set_error(None));
        tracing::info!("Registration attempt for email: {}", data.email);

        match self.client.register(data).await {
            Ok(()) => {
                tracing::info!("User registered successfully: {}", data.email);
                Ok(redirect)
            }
            Err(err) => {
                tracing::warn!("Registration failed for {}: {}", data.email, err);
                Err(self.fail(err, REGISTER_FAILED_MESSAGE))
            }
        }
    }

    /// Sign out locally. No remote call is made.
    pub fn logout(&self) -> AuthRedirect {
        if self.disable_auth {
            tracing::debug!("Logout ignored, authentication disabled");
            return AuthRedirect::SignIn;
        }

        self.next_generation();
        self.store.remove(TOKEN_STORAGE_KEY);
        self.update(|session| session.set_user(None));
        tracing::info!("Logout request");
        AuthRedirect::SignIn
    }
}
