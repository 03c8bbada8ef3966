//! Protected route component
//!
//! Wraps nested routes: renders them for a signed-in visitor, a spinner while
//! the stored token is being resolved, and a redirect to sign in otherwise.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::{Outlet, Redirect};
use leptos_router::hooks::use_location;

use super::context::use_auth_context;
use crate::core::auth::GuardDecision;
use crate::core::auth::guard::requested_location;

/// Full-screen placeholder shown while the session is loading
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div
                class="animate-spin rounded-full h-12 w-12 border-t-2 border-b-2 border-primary"
                role="status"
                aria-label="Loading"
            ></div>
        </div>
    }
}

/// Parent route view gating its children on the session
#[component]
pub fn ProtectedRoute() -> impl IntoView {
    let auth = use_auth_context();
    let location = use_location();

    move || {
        let requested = requested_location(&location.pathname.get(), &location.search.get());
        match auth.decide(&requested) {
            GuardDecision::Allow => view! { <Outlet/> }.into_any(),
            GuardDecision::Defer => view! { <LoadingScreen/> }.into_any(),
            GuardDecision::Deny { redirect_to } => {
                let options = NavigateOptions {
                    replace: true,
                    ..Default::default()
                };
                view! { <Redirect path=redirect_to options=options/> }.into_any()
            }
        }
    }
}
