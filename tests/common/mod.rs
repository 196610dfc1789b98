//! Fake backend and request helpers shared by the integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::{Multipart, Path, Query},
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use portal::{
    api::ApiClient,
    features::{auth::session::CookieSettings, users::types::{Role, UserRecord}},
    web::{self, views::Templates, AppState},
};
use serde_json::{json, Value};
use std::{collections::HashMap, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceExt;
use url::form_urlencoded;

pub const ADMIN_TOKEN: &str = "jwt-admin";
pub const USER_TOKEN: &str = "jwt-user";
pub const RESET_TOKEN: &str = "reset token";

const BOUNDARY: &str = "portal-test-boundary";

pub fn record(id: &str, name: &str, role: &str) -> Value {
    json!({"_id": id, "name": name, "email": format!("{id}@example.com"), "role": role})
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

async fn login(Json(body): Json<Value>) -> Response {
    let reply = |token: &str, user: Value| {
        Json(json!({"success": true, "token": token, "data": user})).into_response()
    };
    match body["email"].as_str().unwrap_or_default() {
        "admin@example.com" => reply(ADMIN_TOKEN, record("admin", "Root Admin", "admin")),
        "user@example.com" => reply(USER_TOKEN, record("user", "Plain User", "user")),
        "auditor@example.com" => reply("jwt-auditor", record("auditor", "Auditor", "auditor")),
        "locked@example.com" => {
            Json(json!({"success": false, "message": "Account locked"})).into_response()
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
            .into_response(),
    }
}

async fn list_users(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Not authorized"})),
        )
            .into_response();
    }
    let search = params.get("search").cloned().unwrap_or_default();
    let users: Vec<Value> = [
        record("u-1", "Ada Lovelace", "user"),
        record("u-2", "Grace Hopper", "admin"),
    ]
    .into_iter()
    .filter(|user| {
        user["name"]
            .as_str()
            .is_some_and(|name| name.to_lowercase().contains(&search.to_lowercase()))
    })
    .collect();
    let total = users.len();
    Json(json!({
        "success": true,
        "data": users,
        "pagination": {"page": 1, "size": 10, "total": total, "totalPages": 1}
    }))
    .into_response()
}

async fn get_user(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == "u-1" {
        Json(json!({"success": true, "data": record("u-1", "Ada Lovelace", "user")})).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "User not found"})),
        )
            .into_response()
    }
}

fn refusal(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "message": message}))).into_response()
}

/// Rejects empty uploads and the file named `huge.png`; accepts the rest.
async fn create_user(headers: HeaderMap, mut multipart: Multipart) -> Response {
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return refusal(StatusCode::UNAUTHORIZED, "Not authorized");
    }
    let mut fields = HashMap::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap_or_default();
            if bytes.is_empty() {
                return refusal(StatusCode::BAD_REQUEST, "Empty image upload");
            }
            if file_name == "huge.png" {
                return refusal(StatusCode::PAYLOAD_TOO_LARGE, "Image too large");
            }
        } else {
            fields.insert(name, field.text().await.unwrap_or_default());
        }
    }
    if fields.contains_key("confirm_password") {
        return refusal(StatusCode::BAD_REQUEST, "Unexpected field");
    }
    Json(json!({"success": true, "data": {"_id": "u-3", "name": fields.get("name")}})).into_response()
}

async fn update_user(headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return refusal(StatusCode::UNAUTHORIZED, "Not authorized");
    }
    if id != "u-1" {
        return refusal(StatusCode::NOT_FOUND, "User not found");
    }
    Json(json!({"success": true, "data": {"_id": id, "name": body["name"], "email": body["email"], "role": body["role"]}}))
        .into_response()
}

async fn update_profile(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if bearer(&headers) != Some(USER_TOKEN) {
        return refusal(StatusCode::UNAUTHORIZED, "Not authorized");
    }
    Json(json!({
        "success": true,
        "data": {
            "_id": "user-1",
            "name": body["name"],
            "email": body["email"],
            "username": body["username"],
            "role": "user"
        }
    }))
    .into_response()
}

async fn reset_password(Path(token): Path<String>, Json(body): Json<Value>) -> Response {
    if token != RESET_TOKEN || body["newPassword"].as_str().is_none() {
        return refusal(StatusCode::BAD_REQUEST, "Reset link expired");
    }
    Json(json!({"success": true})).into_response()
}

async fn delete_user(headers: HeaderMap) -> StatusCode {
    if bearer(&headers) == Some(ADMIN_TOKEN) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::UNAUTHORIZED
    }
}

/// Starts the fake backend on an ephemeral port.
pub async fn spawn_backend() -> ApiClient {
    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route(
            "/api/auth/register",
            post(|| async { Json(json!({"success": true, "message": "created"})) }),
        )
        .route("/api/auth/user", post(create_user))
        .route("/api/auth/profile", put(update_profile))
        .route(
            "/api/auth/request-password-reset",
            post(|| async { Json(json!({"success": true, "message": "sent"})) }),
        )
        .route("/api/auth/reset-password/:token", post(reset_password))
        .route("/api/admin/users", axum::routing::get(list_users))
        .route(
            "/api/admin/users/:id",
            axum::routing::get(get_user).put(update_user).delete(delete_user),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind backend");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve backend");
    });
    ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).expect("client")
}

/// Client pointing at a port nothing listens on.
pub async fn dead_backend() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind backend");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    ApiClient::new(&format!("http://{addr}"), Duration::from_secs(2)).expect("client")
}

pub fn app(api: ApiClient) -> Router {
    web::router(AppState {
        api,
        cookies: CookieSettings::default(),
        templates: Templates::new().expect("templates"),
    })
}

pub fn user(role: Role) -> UserRecord {
    UserRecord {
        id: format!("{role}-1"),
        name: format!("{role} person"),
        email: format!("{role}@example.com"),
        username: None,
        role,
        image_url: None,
        created_at: None,
        updated_at: None,
    }
}

/// `Cookie` header for a signed-in visitor.
pub fn session_cookie(token: &str, user: &UserRecord) -> String {
    let json = serde_json::to_string(user).expect("user json");
    let encoded: String = form_urlencoded::byte_serialize(json.as_bytes()).collect();
    format!("auth_token={token}; user_data={encoded}")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn post_form(uri: &str, cookie: Option<&str>, fields: &[(&str, &str)]) -> Request<Body> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish();
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).expect("request")
}

/// `multipart/form-data` request; `file` is the `image` input as
/// `(file name, bytes)`, the way a browser sends it (empty name and body when
/// nothing was picked).
pub fn post_multipart(
    uri: &str,
    cookie: Option<&str>,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).expect("request")
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("infallible")
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf-8")
}
