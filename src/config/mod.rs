pub mod command;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;
use std::time::Duration;

use crate::models::Credentials;

pub use command::Command;

#[derive(Debug, Clone, Parser)]
#[command(name = "chigo-admin", version, about = "Chi-go Admin")]
pub struct Config {
    /// Base URL of the Chi-go API
    #[arg(long, env = "CHIGO_API", default_value = "http://127.0.0.1:5000")]
    api: String,
    /// Admin username, opens the session on start
    #[arg(long, env = "CHIGO_USERNAME")]
    username: Option<String>,
    /// Admin password
    #[arg(long, env = "CHIGO_PASSWORD", hide_env_values = true)]
    password: Option<String>,
    /// Request timeout in seconds [default: none]
    #[arg(long)]
    timeout: Option<u64>,
    /// Retry transient failures
    #[arg(long, default_value = "0")]
    retries: u32,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
    #[command(subcommand)]
    command: Command,
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .init();
    }
    pub fn api(&self) -> &str {
        &self.api
    }
    /// Both halves of the login must be present
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
    pub const fn retries(&self) -> u32 {
        self.retries
    }
    pub const fn command(&self) -> &Command {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["chigo-admin", "users"]).unwrap();
        assert_eq!(config.retries(), 0);
        assert_eq!(config.timeout(), None);
        assert!(matches!(config.command(), Command::Users { .. }));
    }

    #[test]
    fn credentials_need_both_halves() {
        let config =
            Config::try_parse_from(["chigo-admin", "--username", "ana", "analytics"]).unwrap();
        assert_eq!(config.credentials(), None);

        let config = Config::try_parse_from([
            "chigo-admin",
            "--username",
            "ana",
            "--password",
            "secret",
            "--timeout",
            "15",
            "analytics",
        ])
        .unwrap();
        assert_eq!(
            config.credentials(),
            Some(Credentials {
                username: "ana".to_string(),
                password: "secret".to_string(),
            })
        );
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }
}
