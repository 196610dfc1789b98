//! Cookie-backed session. The browser keeps two cookies: `auth_token` with the
//! opaque backend token and `user_data` with the URL-encoded JSON user record.
//! There is no server-side session store; whatever the cookies say is the
//! session. Reads go through a strict decode into `UserCookie`, writes are
//! queued on the request-scoped `CookieSession` and emitted as `Set-Cookie`
//! headers with the response.

use crate::features::users::types::UserRecord;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    response::{IntoResponseParts, ResponseParts},
};
use secrecy::{ExposeSecret, SecretString};
use std::{convert::Infallible, fmt};
use tracing::debug;
use url::form_urlencoded;

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
pub const USER_DATA_COOKIE: &str = "user_data";

/// Seven days.
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 604_800;

/// Result of decoding the `user_data` cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserCookie {
    Missing,
    /// Present but not URL-encoded JSON of a user record.
    Invalid,
    Valid(UserRecord),
}

impl UserCookie {
    /// Decodes a raw cookie value. Never fails: anything that is not a
    /// well-formed record is `Invalid`.
    #[must_use]
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return UserCookie::Missing;
        };
        let Some(json) = decode_value(raw) else {
            return UserCookie::Invalid;
        };
        match serde_json::from_str::<UserRecord>(&json) {
            Ok(user) => UserCookie::Valid(user),
            Err(err) => {
                debug!("Discarding undecodable {USER_DATA_COOKIE} cookie: {err}");
                UserCookie::Invalid
            }
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            UserCookie::Valid(user) => Some(user),
            UserCookie::Missing | UserCookie::Invalid => None,
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    Encode(serde_json::Error),
    Header(InvalidHeaderValue),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Encode(err) => write!(f, "Failed to encode session user: {err}"),
            SessionError::Header(err) => write!(f, "Failed to build session cookie: {err}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Read and write access to the visitor's session.
pub trait SessionStore {
    fn user(&self) -> &UserCookie;

    fn token(&self) -> Option<&SecretString>;

    /// Stores a new session: token and user record together.
    ///
    /// # Errors
    /// Returns an error if the cookies cannot be encoded; nothing is stored then.
    fn establish(&mut self, token: SecretString, user: UserRecord) -> Result<(), SessionError>;

    /// Replaces the stored user record, keeping the token.
    ///
    /// # Errors
    /// Returns an error if the cookie cannot be encoded.
    fn refresh_user(&mut self, user: UserRecord) -> Result<(), SessionError>;

    /// Drops both cookies.
    fn clear(&mut self);
}

/// Attributes of the session cookies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieSettings {
    ttl_seconds: u64,
    secure: bool,
}

impl CookieSettings {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            secure: false,
        }
    }

    #[must_use]
    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    #[must_use]
    pub fn secure(&self) -> bool {
        self.secure
    }

    fn cookie(&self, name: &str, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!(
            "{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl_seconds
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }

    fn expired(&self, name: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Session of the current request, read from the `Cookie` headers.
pub struct CookieSession {
    settings: CookieSettings,
    token: Option<SecretString>,
    user: UserCookie,
    pending: Vec<HeaderValue>,
}

impl CookieSession {
    #[must_use]
    pub fn from_headers(headers: &HeaderMap, settings: CookieSettings) -> Self {
        let token = read_cookie(headers, AUTH_TOKEN_COOKIE)
            .and_then(|raw| decode_value(&raw))
            .filter(|token| !token.is_empty())
            .map(SecretString::from);
        let user = UserCookie::decode(read_cookie(headers, USER_DATA_COOKIE).as_deref());

        Self {
            settings,
            token,
            user,
            pending: Vec::new(),
        }
    }

    /// `Set-Cookie` values queued by writes on this session.
    #[must_use]
    pub fn pending(&self) -> &[HeaderValue] {
        &self.pending
    }

    fn user_cookie(&self, user: &UserRecord) -> Result<HeaderValue, SessionError> {
        let json = serde_json::to_string(user).map_err(SessionError::Encode)?;
        self.settings
            .cookie(USER_DATA_COOKIE, &encode_value(&json))
            .map_err(SessionError::Header)
    }
}

impl fmt::Debug for CookieSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieSession")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl SessionStore for CookieSession {
    fn user(&self) -> &UserCookie {
        &self.user
    }

    fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    fn establish(&mut self, token: SecretString, user: UserRecord) -> Result<(), SessionError> {
        let token_cookie = self
            .settings
            .cookie(AUTH_TOKEN_COOKIE, &encode_value(token.expose_secret()))
            .map_err(SessionError::Header)?;
        let user_cookie = self.user_cookie(&user)?;

        self.pending.push(token_cookie);
        self.pending.push(user_cookie);
        self.token = Some(token);
        self.user = UserCookie::Valid(user);
        Ok(())
    }

    fn refresh_user(&mut self, user: UserRecord) -> Result<(), SessionError> {
        let user_cookie = self.user_cookie(&user)?;
        self.pending.push(user_cookie);
        self.user = UserCookie::Valid(user);
        Ok(())
    }

    fn clear(&mut self) {
        for name in [AUTH_TOKEN_COOKIE, USER_DATA_COOKIE] {
            if let Ok(cookie) = self.settings.expired(name) {
                self.pending.push(cookie);
            }
        }
        self.token = None;
        self.user = UserCookie::Missing;
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CookieSession
where
    S: Send + Sync,
    CookieSettings: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, CookieSettings::from_ref(state)))
    }
}

impl IntoResponseParts for CookieSession {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        for cookie in self.pending {
            res.headers_mut().append(SET_COOKIE, cookie);
        }
        Ok(res)
    }
}

/// Finds a cookie by name across all `Cookie` headers.
fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().to_string())
        })
}

fn encode_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Percent-decodes a cookie value. A value with unencoded `&` or `=` is not
/// something this application wrote and is rejected.
fn decode_value(raw: &str) -> Option<String> {
    let mut pairs = form_urlencoded::parse(raw.as_bytes());
    let (decoded, rest) = pairs.next()?;
    if !rest.is_empty() || pairs.next().is_some() {
        return None;
    }
    Some(decoded.into_owned())
}
