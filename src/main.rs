use anyhow::Result;
use clap::Parser;
use jinrishici_notify::application::notify_daily_poem;
use jinrishici_notify::config::{Config, ConfigOptions, Mode};
use jinrishici_notify::runtime::RealRuntime;
use log::info;
use std::path::{Path, PathBuf};

/// jinrishici-notify - daily poem to chat webhook
///
/// Fetches today's sentence from jinrishici and posts it as a markdown
/// message to a chat robot webhook.
///
/// Webhook URLs are read from DEV_BOOT_URL / PROD_BOOT_URL, which may also be
/// placed in a .env file in the working directory.
///
/// Examples:
///   jinrishici-notify               # Send to the dev webhook
///   jinrishici-notify --mode prod   # Send to the prod webhook
#[derive(Parser, Debug)]
#[command(author, version = env!("JINRISHICI_NOTIFY_VERSION"), about)]
struct Cli {
    /// Target environment; selects the webhook and the log file
    #[arg(long, value_enum, default_value_t = Mode::Dev)]
    mode: Mode,

    /// Webhook used in dev mode
    #[arg(long, env = "DEV_BOOT_URL", value_name = "URL", hide_env_values = true)]
    dev_webhook_url: Option<String>,

    /// Webhook used in prod mode
    #[arg(long, env = "PROD_BOOT_URL", value_name = "URL", hide_env_values = true)]
    prod_webhook_url: Option<String>,

    /// jinrishici API URL (defaults to https://v2.jinrishici.com)
    #[arg(long = "api-url", value_name = "URL")]
    api_url: Option<String>,

    /// Token cache file (defaults to .token next to the executable)
    #[arg(long, env = "JINRISHICI_TOKEN_FILE", value_name = "PATH")]
    token_file: Option<PathBuf>,

    /// Total number of attempts before giving up
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    attempts: Option<u16>,
}

impl Cli {
    fn into_options(self) -> ConfigOptions {
        ConfigOptions {
            mode: self.mode,
            dev_webhook_url: self.dev_webhook_url,
            prod_webhook_url: self.prod_webhook_url,
            api_url: self.api_url,
            token_file: self.token_file,
            attempts: self.attempts.map(usize::from),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let _guard = jinrishici_notify::logging::init(cli.mode, Path::new("."))?;
    info!(
        "mode={} api_url={:?} token_file={:?} attempts={:?}",
        cli.mode, cli.api_url, cli.token_file, cli.attempts
    );

    let runtime = RealRuntime;
    let config = Config::new(&runtime, cli.into_options())?;
    notify_daily_poem(runtime, &config).await?;
    Ok(())
}
