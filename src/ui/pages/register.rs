//! Register page component

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::auth::AuthRedirect;
use crate::core::auth::guard::SIGN_IN_PATH;
use crate::ui::auth::RegisterForm;

/// Register page component
#[component]
pub fn RegisterPage() -> impl IntoView {
    // Continue to email verification
    let on_success = move |redirect: AuthRedirect| {
        let navigate = use_navigate();
        navigate(&redirect.to_path(), Default::default());
    };

    let on_login_click = move |_| {
        let navigate = use_navigate();
        navigate(SIGN_IN_PATH, Default::default());
    };

    view! {
        <div class="min-h-screen bg-theme-primary flex items-center justify-center p-4">
            <div class="w-full max-w-md">
                <RegisterForm
                    on_success=Callback::new(on_success)
                    on_login_click=Callback::new(on_login_click)
                />
            </div>
        </div>
    }
}
