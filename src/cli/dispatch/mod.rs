use crate::cli::{
    actions::{server::Args, Action},
    commands::{backend, session},
};
use anyhow::Result;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);
    let backend = backend::Options::parse(matches)?;
    let session = session::Options::parse(matches);

    Ok(Action::Server(Args {
        port,
        backend,
        session,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use std::time::Duration;

    #[test]
    fn builds_server_action() {
        temp_env::with_vars_unset(
            [
                "PORTAL_PORT",
                "PORTAL_API_TIMEOUT_SECONDS",
                "PORTAL_SESSION_TTL_SECONDS",
                "PORTAL_COOKIE_SECURE",
            ],
            || {
                let matches = commands::new().get_matches_from([
                    "portal",
                    "--api-base-url",
                    "http://127.0.0.1:4000",
                    "--cookie-secure",
                ]);
                let Ok(Action::Server(args)) = handler(&matches) else {
                    panic!("expected a server action");
                };
                assert_eq!(args.port, 8080);
                assert_eq!(args.backend.base_url.as_str(), "http://127.0.0.1:4000/");
                assert_eq!(args.backend.timeout, Duration::from_secs(10));
                assert!(args.session.secure);
            },
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        let matches =
            commands::new().get_matches_from(["portal", "--api-base-url", "mailto:ops@example.com"]);
        assert!(handler(&matches).is_err());
    }
}
