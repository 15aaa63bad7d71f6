use crate::api::handlers::{AuthState, health, root};
use anyhow::{Context, Result, anyhow};
use axum::{
    Extension, Router,
    body::Body,
    extract::MatchedPath,
    http::{
        HeaderName, HeaderValue, Method, Request,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, options},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{Span, error, info, info_span};
use ulid::Ulid;
use url::Url;
use utoipa_axum::router::OpenApiRouter;

pub mod handlers;
// OpenAPI router wiring and route registration live in openapi.rs.
mod openapi;

pub use openapi::openapi;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the API router with all documented routes registered.
#[must_use]
pub fn router() -> OpenApiRouter {
    openapi::api_router()
}

/// Assemble the full application: documented routes, `/`, the `OPTIONS /health`
/// preflight, and the request-id/trace/CORS middleware stack.
#[must_use]
pub fn app(auth_state: Arc<AuthState>, cors: CorsLayer) -> Router {
    let (router, _openapi) = router().split_for_parts();
    router
        .route("/", get(root::root))
        .route("/health", options(health::health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID_HEADER,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(auth_state)),
        )
}

/// Build the CORS layer.
///
/// With no origins every origin is allowed; otherwise only the listed ones.
///
/// # Errors
/// Returns an error if an origin is not an absolute URL with a host.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    if origins.is_empty() {
        return Ok(cors.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| origin_header(origin))
        .collect::<Result<Vec<_>>>()?;

    Ok(cors.allow_origin(AllowOrigin::list(origins)))
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, auth_state: Arc<AuthState>, cors: CorsLayer) -> Result<()> {
    let app = app(auth_state, cors);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            wait_for_signal().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn origin_header(origin: &str) -> Result<HeaderValue> {
    let parsed = Url::parse(origin).with_context(|| format!("Invalid CORS origin: {origin}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("CORS origin must include a valid host: {origin}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build CORS origin header")
}
