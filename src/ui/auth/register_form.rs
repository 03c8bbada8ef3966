//! Register form component
//!
//! Collects the sign-up fields and submits them unchanged. A successful
//! registration does not sign in; the page moves on to email verification.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;
use crate::core::auth::{AuthRedirect, RegistrationData};

/// Register form component
#[component]
pub fn RegisterForm(
    /// Callback with the navigation to perform after registration
    #[prop(optional, into)]
    on_success: Option<Callback<AuthRedirect>>,
    /// Callback to switch to login form
    #[prop(optional, into)]
    on_login_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    // Form state
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let field_error = RwSignal::new(None::<String>);

    let validate = move || -> Result<(), String> {
        if name.get().trim().is_empty() {
            return Err("Name is required".to_string());
        }
        let email = email.get();
        if email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if !email.contains('@') {
            return Err("Please enter a valid email".to_string());
        }
        if password.get().is_empty() {
            return Err("Password is required".to_string());
        }
        if password.get() != confirm_password.get() {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        auth.clear_error();
        if let Err(message) = validate() {
            field_error.set(Some(message));
            return;
        }
        field_error.set(None);

        let data = RegistrationData::new(email.get().trim(), password.get())
            .with_field("name", name.get().trim());

        spawn_local(async move {
            if let Ok(redirect) = auth.register(data).await {
                if let Some(callback) = on_success {
                    callback.run(redirect);
                }
            }
        });
    };

    let text_input = move |id: &'static str,
                           label: &'static str,
                           kind: &'static str,
                           autocomplete: &'static str,
                           value: RwSignal<String>| {
        view! {
            <div>
                <label for=id class="block text-sm font-medium text-theme-primary mb-1">
                    {label}
                </label>
                <input
                    type=kind
                    id=id
                    name=id
                    autocomplete=autocomplete
                    class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg"
                    prop:value=move || value.get()
                    on:input=move |ev| {
                        value.set(event_target_value(&ev));
                        field_error.set(None);
                    }
                />
            </div>
        }
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-5">
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">"Create Account"</h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        "We'll send you a link to verify your email"
                    </p>
                </div>

                {move || {
                    field_error.get().or_else(|| auth.error()).map(|error| {
                        view! {
                            <div class="p-3 bg-red-100 border border-red-300 rounded-lg" role="alert">
                                <p class="text-sm text-red-700">{error}</p>
                            </div>
                        }
                    })
                }}

                {text_input("name", "Name", "text", "name", name)}
                {text_input("email", "Email", "email", "email", email)}
                {text_input("password", "Password", "password", "new-password", password)}
                {text_input("confirm_password", "Confirm password", "password", "new-password", confirm_password)}

                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary text-white font-medium rounded-lg disabled:opacity-50"
                    disabled=move || auth.pending.get()
                >
                    {move || if auth.pending.get() { "Creating account..." } else { "Sign Up" }}
                </button>

                <div class="text-center text-sm text-theme-secondary">
                    "Already have an account? "
                    <button
                        type="button"
                        class="text-accent-primary font-medium"
                        on:click=move |_| {
                            if let Some(callback) = on_login_click.as_ref() {
                                callback.run(());
                            }
                        }
                    >
                        "Sign in"
                    </button>
                </div>
            </form>
        </div>
    }
}
