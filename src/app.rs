use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::core::AuthConfig;
use crate::ui::ProtectedRoute;
use crate::ui::auth::provide_auth_context;
use crate::ui::pages::{HomePage, LoginPage, NotFoundPage, RegisterPage, VerifyEmailPage};

pub fn shell(options: LeptosOptions, config: AuthConfig) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App config/>
            </body>
        </html>
    }
}

#[component]
pub fn App(config: AuthConfig) -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Session state for every route below
    provide_auth_context(config);

    view! {
        <Title text="Authgate"/>

        <Router>
            <main class="w-full min-h-screen">
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/register") view=RegisterPage/>
                    <Route path=path!("/verify-email") view=VerifyEmailPage/>
                    // Everything nested here requires a session
                    <ParentRoute path=path!("") view=ProtectedRoute>
                        <Route path=path!("") view=HomePage/>
                    </ParentRoute>
                </Routes>
            </main>
        </Router>
    }
}
