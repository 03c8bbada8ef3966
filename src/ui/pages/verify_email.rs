//! Email verification notice shown after registration

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::core::auth::guard::{EMAIL_PARAM, SIGN_IN_PATH, query_param};

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let location = use_location();
    let email = move || query_param(&location.search.get(), EMAIL_PARAM);

    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col items-center justify-center p-4">
            <div class="w-full max-w-md text-center space-y-4">
                <h1 class="text-2xl font-bold text-theme-primary">"Check your inbox"</h1>
                <p class="text-theme-secondary">
                    {move || match email() {
                        Some(email) => format!("We sent a verification link to {}.", email),
                        None => "We sent you a verification link.".to_string(),
                    }}
                </p>
                <p class="text-sm text-theme-tertiary">
                    "Follow the link to activate your account, then sign in."
                </p>
                <A
                    href=SIGN_IN_PATH
                    attr:class="inline-block px-6 py-3 bg-accent-primary text-white font-medium rounded-lg"
                >
                    "Go to sign in"
                </A>
            </div>
        </div>
    }
}
