//! Home page, only reachable with a session

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::use_auth_context;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let redirect = auth.logout();
        navigate(&redirect.to_path(), Default::default());
    };

    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col items-center justify-center p-4">
            <div class="w-full max-w-md text-center space-y-6">
                <h1 class="text-2xl font-bold text-theme-primary">
                    {move || {
                        auth.user()
                            .map(|user| format!("Welcome, {}", user.display_name()))
                            .unwrap_or_default()
                    }}
                </h1>
                <p class="text-theme-secondary">
                    {move || auth.user().and_then(|user| user.email).unwrap_or_default()}
                </p>
                <button
                    class="px-6 py-3 border border-theme text-theme-primary font-medium rounded-lg"
                    on:click=on_logout
                >
                    "Sign out"
                </button>
            </div>
        </div>
    }
}
