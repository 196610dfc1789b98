//! HTTP surface: router, shared state, request tracing and the listener.

pub mod handlers;
pub mod views;

use crate::{
    api::ApiClient,
    features::auth::{
        guards::{require_admin, require_session},
        session::CookieSettings,
    },
};
use anyhow::Result;
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, FromRef, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    middleware,
    routing::{get, post},
    Router,
};
use handlers::{admin_users, auth, health, pages, password, profile};
use views::Templates;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

/// Largest accepted body for the user-creation form, image included.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const REQUEST_ID: &str = "x-request-id";

/// Immutable state shared by every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub api: ApiClient,
    pub cookies: CookieSettings,
    pub templates: Templates,
}

impl FromRef<AppState> for ApiClient {
    fn from_ref(state: &AppState) -> Self {
        state.api.clone()
    }
}

impl FromRef<AppState> for Templates {
    fn from_ref(state: &AppState) -> Self {
        state.templates.clone()
    }
}

impl FromRef<AppState> for CookieSettings {
    fn from_ref(state: &AppState) -> Self {
        state.cookies.clone()
    }
}

/// Builds the application router. Admin and session routes are wrapped by
/// their guard, which runs before the handler.
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/admin/users", get(admin_users::list))
        .route(
            "/admin/users/create",
            get(admin_users::create_form)
                .post(admin_users::create)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/admin/users/:id", get(admin_users::detail))
        .route(
            "/admin/users/:id/edit",
            get(admin_users::edit_form).post(admin_users::edit),
        )
        .route("/admin/users/:id/delete", post(admin_users::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let signed_in = Router::new()
        .route("/dashboard", get(pages::dashboard))
        .route("/user/profile", get(profile::show).post(profile::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/", get(pages::root))
        .route("/health", get(health::health).options(health::health))
        .route("/home", get(pages::home))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/logout", post(auth::logout))
        .route(
            "/request-reset-password",
            get(password::request_form).post(password::request),
        )
        .route(
            "/reset-password/:token",
            get(password::reset_form).post(password::reset),
        )
        .merge(admin)
        .merge(signed_in)
        .fallback(pages::not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static(REQUEST_ID),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    REQUEST_ID,
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span)),
        )
}

/// Serves the router on `[::]:port` until the process stops.
///
/// # Errors
/// Returns an error if the port cannot be bound or the server fails.
pub async fn new(port: u16, state: AppState) -> Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let method = request.method();
    let path = request.uri().path();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(path, MatchedPath::as_str);
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");

    // Headers are left out: they carry the session cookies.
    info_span!("http-request", %method, route, request_id)
}
