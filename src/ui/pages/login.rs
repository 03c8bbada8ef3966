//! Login page component
//!
//! Sends the visitor back to the page they were headed for once signed in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::core::auth::guard::{REGISTER_PATH, RETURN_TO_PARAM, query_param, safe_return_path};
use crate::ui::auth::{LoginForm, use_auth_context};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let location = use_location();

    let return_to =
        Memo::new(move |_| safe_return_path(query_param(&location.search.get(), RETURN_TO_PARAM).as_deref()));

    // Leave as soon as the session is authenticated, whether restored or fresh
    Effect::new(move |_| {
        if !auth.is_loading() && auth.is_authenticated() {
            let navigate = use_navigate();
            navigate(
                &return_to.get(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    let on_register_click = move |_| {
        let navigate = use_navigate();
        navigate(REGISTER_PATH, Default::default());
    };

    view! {
        <div class="min-h-screen bg-theme-primary flex items-center justify-center p-4">
            <div class="w-full max-w-md">
                <LoginForm on_register_click=Callback::new(on_register_click)/>
            </div>
        </div>
    }
}
