//! # Portal (authentication and user administration front end)
//!
//! `portal` is a server-rendered web front end for a remote user API. It owns
//! no business data: every operation is delegated to the backend over HTTP and
//! the front end only validates forms, keeps the session in cookies and decides
//! which pages a visitor may reach.
//!
//! ## Layers
//!
//! - **API client** (`api`): outbound JSON and multipart calls, errors mapped
//!   into `AppError`.
//! - **Actions** (`features::*::actions`): call the client and convert every
//!   outcome into an `ActionResult` envelope. Login writes the session.
//! - **Session guard** (`features::auth::guards`): decodes the `user_data`
//!   cookie and redirects visitors that lack the required role. It fails
//!   closed: a missing or undecodable cookie means "not signed in".
//! - **Web** (`web`): `axum` router, HTML views and request tracing.
//!
//! ## Trust model
//!
//! The session cookie is trusted as presented. The guard is a navigation aid,
//! not an authorization boundary; the backend must enforce roles on its own.

pub mod api;
pub mod cli;
pub mod features;
pub mod web;

#[cfg(test)]
mod test_support;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
