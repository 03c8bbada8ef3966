//! Browser-side session layer
//!
//! This module provides:
//! - The session model and its derived authentication state
//! - A token store port with in-memory and `localStorage` backends
//! - An identity service port with an HTTP client
//! - The session manager driving login, registration and logout
//! - The route guard deciding what a protected view renders

pub mod client;
pub mod error;
pub mod guard;
pub mod http;
pub mod manager;
pub mod session;
pub mod store;

pub use client::{Credentials, IdentityClient, LoginResponse, RawResponse, RegistrationData};
pub use error::{AuthError, StorageError};
pub use guard::{AuthRedirect, GuardDecision, RouteGuard};
pub use http::HttpIdentityClient;
pub use manager::{LoginOutcome, SessionManager};
pub use session::{Session, SessionStatus, Token, User};
pub use store::{BrowserTokenStore, MemoryTokenStore, TOKEN_STORAGE_KEY, TokenStore};
