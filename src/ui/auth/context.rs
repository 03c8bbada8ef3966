//! Auth context for sharing session state with the component tree
//!
//! This module wires the session manager into Leptos:
//! - Mirrors every session change into a signal so views re-render
//! - Runs the stored-token bootstrap once after hydration
//! - Exposes login, registration and logout to components

use std::sync::Arc;

use leptos::prelude::*;
#[cfg(not(feature = "ssr"))]
use leptos::task::spawn_local;

use crate::core::AuthConfig;
use crate::core::auth::{
    AuthError, AuthRedirect, BrowserTokenStore, GuardDecision, HttpIdentityClient, LoginOutcome,
    RegistrationData, RouteGuard, Session, SessionManager, User,
};

/// Session manager as wired in the browser
pub type AppSessionManager = SessionManager<BrowserTokenStore, HttpIdentityClient>;

/// Auth context providing session state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Current session, updated on every transition
    pub session: RwSignal<Session>,
    /// A login or registration started from the UI is in flight
    pub pending: RwSignal<bool>,
    guard: RouteGuard,
    manager: StoredValue<Arc<AppSessionManager>>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.session.with(|session| session.is_authenticated())
    }

    pub fn is_loading(&self) -> bool {
        self.session.with(|session| session.is_loading())
    }

    /// Get current user (if authenticated)
    pub fn user(&self) -> Option<User> {
        self.session.with(|session| session.user().cloned())
    }

    /// Error message from the last failed login or registration
    pub fn error(&self) -> Option<String> {
        self.session
            .with(|session| session.last_error().map(str::to_string))
    }

    /// Guard decision for a protected location; tracks the session signal
    pub fn decide(&self, requested: &str) -> GuardDecision {
        self.session
            .with(|session| self.guard.decide(session, requested))
    }

    pub fn clear_error(&self) {
        self.manager.get_value().clear_error();
    }

    pub async fn login(&self, email: String, password: String) -> Result<LoginOutcome, AuthError> {
        let manager = self.manager.get_value();
        self.pending.set(true);
        let result = manager.login(&email, &password).await;
        self.pending.set(false);
        result
    }

    pub async fn register(&self, data: RegistrationData) -> Result<AuthRedirect, AuthError> {
        let manager = self.manager.get_value();
        self.pending.set(true);
        let result = manager.register(&data).await;
        self.pending.set(false);
        result
    }

    pub fn logout(&self) -> AuthRedirect {
        self.manager.get_value().logout()
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context(config: AuthConfig) -> AuthContext {
    let guard = RouteGuard::from_config(&config);
    let manager = Arc::new(SessionManager::new(
        BrowserTokenStore,
        HttpIdentityClient::new(config.clone()),
        config.disable_auth,
    ));

    // Server and client both start from the loading state to avoid a hydration mismatch
    let session = RwSignal::new(manager.session());
    manager.subscribe(move |snapshot| session.set(snapshot.clone()));

    let ctx = AuthContext {
        session,
        pending: RwSignal::new(false),
        guard,
        manager: StoredValue::new(manager),
    };

    // Resolve the stored token after hydration (client-side only)
    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            let manager = ctx.manager.get_value();
            spawn_local(async move {
                manager.bootstrap().await;
            });
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
