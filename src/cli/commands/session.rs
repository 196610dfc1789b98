use crate::features::auth::session::{CookieSettings, DEFAULT_SESSION_TTL_SECONDS};
use clap::{builder::BoolishValueParser, Arg, ArgAction, ArgMatches, Command};

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("session-ttl-seconds")
                .long("session-ttl-seconds")
                .help("Lifetime of the session cookies, in seconds (default: 7 days)")
                .default_value("604800")
                .env("PORTAL_SESSION_TTL_SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("cookie-secure")
                .long("cookie-secure")
                .help("Mark the session cookies Secure (serve over HTTPS)")
                .env("PORTAL_COOKIE_SECURE")
                .action(ArgAction::SetTrue)
                .value_parser(BoolishValueParser::new()),
        )
}

/// Session cookie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub ttl_seconds: u64,
    pub secure: bool,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            ttl_seconds: matches
                .get_one::<u64>("session-ttl-seconds")
                .copied()
                .unwrap_or(DEFAULT_SESSION_TTL_SECONDS),
            secure: matches.get_flag("cookie-secure"),
        }
    }

    #[must_use]
    pub fn cookie_settings(self) -> CookieSettings {
        CookieSettings::new()
            .with_ttl_seconds(self.ttl_seconds)
            .with_secure(self.secure)
    }
}
