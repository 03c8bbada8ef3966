//! Authentication UI module
//!
//! This module provides the auth context, the protected route wrapper and
//! the sign-in/sign-up forms.

mod context;
mod login_form;
mod protected_route;
mod register_form;

pub use context::{AppSessionManager, AuthContext, provide_auth_context, use_auth_context};
pub use login_form::LoginForm;
pub use protected_route::{LoadingScreen, ProtectedRoute};
pub use register_form::RegisterForm;
