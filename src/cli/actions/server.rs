use crate::{
    api::ApiClient,
    cli::{
        commands::{backend, session},
        telemetry,
    },
    web::{self, views::Templates, AppState},
};
use anyhow::{Context, Result};
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub backend: backend::Options,
    pub session: session::Options,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the API client or the templates cannot be built, or
/// the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let api = ApiClient::new(args.backend.base_url.as_str(), args.backend.timeout)
        .context("Could not build the backend API client")?;

    if !args.session.secure {
        warn!("Session cookies are not marked Secure; enable --cookie-secure behind HTTPS");
    }

    let templates = Templates::new().context("Could not compile the page templates")?;

    let state = AppState {
        api,
        cookies: args.session.cookie_settings(),
        templates,
    };

    let result = web::new(args.port, state).await;

    telemetry::shutdown_tracer();

    result
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("api_base_url", args.backend.base_url.to_string()),
        (
            "api_timeout",
            format!("{}s", args.backend.timeout.as_secs()),
        ),
        ("session_ttl", format!("{}s", args.session.ttl_seconds)),
        ("cookie_secure", args.session.secure.to_string()),
    ];
    info!("{}", startup_message(&entries));
}

fn startup_message(entries: &[(&str, String)]) -> String {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {} - {}\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH)
    );
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    message
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_message_aligns_keys() {
        let message = startup_message(&[
            ("listen", "tcp:8080".to_string()),
            ("cookie_secure", "false".to_string()),
        ]);
        assert!(message.contains("\n  listen:        tcp:8080"));
        assert!(message.contains("\n  cookie_secure: false"));
    }

    #[test]
    fn short_commit_truncates() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit("abc"), "abc");
    }
}
