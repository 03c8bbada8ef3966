#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use authgate::app::*;
    use authgate::core::AuthConfig;
    use axum::Router;
    use leptos::logging::log;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use tower_http::compression::CompressionLayer;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::EnvFilter;

    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The override flag must be set explicitly, one way or the other
    let config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid auth configuration: {}", err);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Config loaded: api_base_url={}, auth_disabled={}",
        config.api_base_url,
        config.disable_auth
    );
    if config.disable_auth {
        tracing::warn!("Authentication is DISABLED, every visitor is the developer user");
    }

    // Load configuration from Cargo.toml [package.metadata.leptos]
    // Can be overridden via LEPTOS_SITE_ADDR env var for Docker/K8s
    let conf = get_configuration(None).unwrap();
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    let routes = generate_route_list({
        let config = config.clone();
        move || view! { <App config=config.clone()/> }
    });

    // Serve the WASM bundle with pre-compressed file support
    let pkg_service = ServeDir::new(format!("{}/pkg", leptos_options.site_root))
        .precompressed_br()
        .precompressed_gzip();

    let app = Router::new()
        .nest_service("/pkg", pkg_service)
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone(), config.clone())
        })
        .with_state(leptos_options)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    log!("listening on http://{}", &addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
