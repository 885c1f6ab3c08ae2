//! Process configuration, resolved once at startup and passed explicitly.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use log::debug;

use crate::jinrishici::DEFAULT_API_URL;
use crate::retry::{DEFAULT_MAX_ATTEMPTS, RETRY_DELAY_MS, RetryPolicy};
use crate::runtime::Runtime;

/// Name of the token cache file.
pub const TOKEN_FILE_NAME: &str = ".token";

/// Environment variable holding the dev webhook URL.
pub const DEV_WEBHOOK_ENV: &str = "DEV_BOOT_URL";

/// Environment variable holding the prod webhook URL.
pub const PROD_WEBHOOK_ENV: &str = "PROD_BOOT_URL";

/// Runtime environment selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    #[default]
    Dev,
    Prod,
}

impl Mode {
    /// Log file written for this mode, e.g. `jinrishici.dev.log`.
    pub fn log_file_name(&self) -> String {
        format!("jinrishici.{}.log", self)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Dev => write!(f, "dev"),
            Mode::Prod => write!(f, "prod"),
        }
    }
}

/// Raw settings gathered from the command line and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub mode: Mode,
    pub dev_webhook_url: Option<String>,
    pub prod_webhook_url: Option<String>,
    pub api_url: Option<String>,
    pub token_file: Option<PathBuf>,
    pub attempts: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: Mode,
    /// Webhook selected by `mode`
    pub webhook_url: String,
    /// jinrishici API base, without trailing slash
    pub api_url: String,
    pub token_file: PathBuf,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn new<R: Runtime>(runtime: &R, options: ConfigOptions) -> Result<Self> {
        let (webhook, env_name) = match options.mode {
            Mode::Dev => (options.dev_webhook_url, DEV_WEBHOOK_ENV),
            Mode::Prod => (options.prod_webhook_url, PROD_WEBHOOK_ENV),
        };
        let webhook_url = match webhook.filter(|url| !url.trim().is_empty()) {
            Some(url) => url,
            None => bail!(
                "No webhook URL for {} mode. Set {} (or pass it on the command line).",
                options.mode,
                env_name
            ),
        };

        let api_url = options
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let token_file = match options.token_file {
            Some(path) => path,
            None => default_token_file(runtime),
        };
        debug!("Token cache at {:?}", token_file);

        let retry = RetryPolicy::new(
            options.attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            Duration::from_millis(RETRY_DELAY_MS),
        );

        Ok(Self {
            mode: options.mode,
            webhook_url,
            api_url,
            token_file,
            retry,
        })
    }
}

/// `.token` next to the executable, or in the working directory when the
/// executable location is unknown.
fn default_token_file<R: Runtime>(runtime: &R) -> PathBuf {
    match runtime.exe_dir() {
        Some(dir) => dir.join(TOKEN_FILE_NAME),
        None => PathBuf::from(TOKEN_FILE_NAME),
    }
}
