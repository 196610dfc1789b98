use anyhow::{bail, Context, Result};
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("api-base-url")
                .long("api-base-url")
                .help("Base URL of the backend API, example: https://api.tld")
                .env("PORTAL_API_BASE_URL")
                .required(true),
        )
        .arg(
            Arg::new("api-timeout-seconds")
                .long("api-timeout-seconds")
                .help("Timeout for each backend request, in seconds")
                .default_value("10")
                .env("PORTAL_API_TIMEOUT_SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub base_url: Url,
    pub timeout: Duration,
}

impl Options {
    /// # Errors
    /// Returns an error if the base URL is missing, unparsable or not http(s).
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let raw = matches
            .get_one::<String>("api-base-url")
            .context("missing required argument: --api-base-url")?;
        let base_url =
            Url::parse(raw.trim()).with_context(|| format!("invalid PORTAL_API_BASE_URL: {raw}"))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            bail!("PORTAL_API_BASE_URL must use http or https: {base_url}");
        }

        let timeout = matches
            .get_one::<u64>("api-timeout-seconds")
            .copied()
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout),
        })
    }
}
