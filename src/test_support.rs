//! Helpers shared by unit tests: an in-process backend and an in-memory
//! session store.

use crate::{
    api::ApiClient,
    features::{
        auth::session::{SessionError, SessionStore, UserCookie},
        users::types::{Role, UserRecord},
    },
};
use axum::Router;
use secrecy::SecretString;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns a client for it.
pub async fn spawn_backend(router: Router) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve test backend");
    });
    ApiClient::new(&format!("http://{addr}"), Duration::from_secs(5)).expect("client")
}

/// Client pointing at a port nothing listens on.
pub async fn unreachable_backend() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind backend");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    ApiClient::new(&format!("http://{addr}"), Duration::from_secs(2)).expect("client")
}

pub fn user(role: Role) -> UserRecord {
    UserRecord {
        id: "u-1".to_string(),
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        username: None,
        role,
        image_url: None,
        created_at: None,
        updated_at: None,
    }
}

pub struct MemorySession {
    pub token: Option<SecretString>,
    pub user: Option<UserRecord>,
    pub writes: usize,
    cookie: UserCookie,
}

impl Default for MemorySession {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            writes: 0,
            cookie: UserCookie::Missing,
        }
    }
}

impl MemorySession {
    pub fn signed_in(token: &str, user: UserRecord) -> Self {
        Self {
            token: Some(SecretString::from(token.to_string())),
            cookie: UserCookie::Valid(user.clone()),
            user: Some(user),
            writes: 0,
        }
    }
}

impl SessionStore for MemorySession {
    fn user(&self) -> &UserCookie {
        &self.cookie
    }

    fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    fn establish(&mut self, token: SecretString, user: UserRecord) -> Result<(), SessionError> {
        self.writes += 2;
        self.token = Some(token);
        self.cookie = UserCookie::Valid(user.clone());
        self.user = Some(user);
        Ok(())
    }

    fn refresh_user(&mut self, user: UserRecord) -> Result<(), SessionError> {
        self.writes += 1;
        self.cookie = UserCookie::Valid(user.clone());
        self.user = Some(user);
        Ok(())
    }

    fn clear(&mut self) {
        self.writes += 2;
        self.token = None;
        self.user = None;
        self.cookie = UserCookie::Missing;
    }
}
