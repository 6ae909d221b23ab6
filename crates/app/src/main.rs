use dioxus::prelude::*;
use shared_types::ConsoleSettings;

mod auth;
mod debounce;
mod format_helpers;
mod routes;
use auth::AuthState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        let config = server::config::load_config();
        tracing::info!(
            school_api = %config.school_api.base_url,
            debounce_ms = config.console.debounce_ms,
            "Starting école console"
        );
        server::health::record_start_time();

        let school = server::school_api::SchoolApi::shared().clone();
        let router = dioxus::server::router(App)
            .merge(server::health::health_router(school))
            .layer(axum::middleware::from_fn(
                server::auth::middleware::session_middleware,
            ))
            .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
            .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
                tower_http::request_id::MakeRequestUuid,
            ));
        Ok(router)
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Client tuning comes from the server config; defaults if it can't be read.
    let settings_resource =
        use_server_future(move || async move { server::api::get_console_settings().await })?;

    let settings = settings_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(ConsoleSettings::default()))
        .unwrap_or_default();

    use_context_provider(|| settings);
    use_context_provider(AuthState::new);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::ToastProvider {
            SuspenseBoundary {
                fallback: |_| rsx! {
                    div { class: "auth-guard-loading",
                        p { "Loading..." }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
