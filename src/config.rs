use crate::i18n::RedirectPolicy;
use anyhow::{anyhow, bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// The first delivery attempt plus at most one retry.
pub const MAX_NOTIFY_ATTEMPTS: u32 = 2;

/// A setting the contact sink needs is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingSetting(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub redirect_policy: RedirectPolicy,

    // Discord (optional at startup; checked per contact submission)
    pub discord_bot_token: Option<String>,
    pub discord_channel_id: Option<String>,
    pub discord_api_base: String,

    // Notification delivery
    pub notify_timeout: Duration,
    pub notify_max_attempts: u32,
}

/// Credentials needed to build the Discord sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordCredentials {
    pub bot_token: String,
    pub channel_id: String,
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let redirect_policy = match optional_var("LANG_REDIRECT_POLICY") {
            Some(value) => value
                .parse::<RedirectPolicy>()
                .map_err(|e| anyhow!(e))
                .context("Invalid LANG_REDIRECT_POLICY")?,
            None => RedirectPolicy::default(),
        };

        let notify_timeout_secs: u64 = parse_var("NOTIFY_TIMEOUT_SECS", 5)?;
        if notify_timeout_secs == 0 {
            bail!("NOTIFY_TIMEOUT_SECS must be at least 1");
        }

        let notify_max_attempts: u32 = parse_var("NOTIFY_MAX_ATTEMPTS", MAX_NOTIFY_ATTEMPTS)?;
        if !(1..=MAX_NOTIFY_ATTEMPTS).contains(&notify_max_attempts) {
            bail!(
                "NOTIFY_MAX_ATTEMPTS must be between 1 and {}, got {}",
                MAX_NOTIFY_ATTEMPTS,
                notify_max_attempts
            );
        }

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            redirect_policy,

            discord_bot_token: optional_var("DISCORD_BOT_TOKEN"),
            discord_channel_id: optional_var("DISCORD_CHANNEL_ID"),
            discord_api_base: optional_var("DISCORD_API_BASE")
                .unwrap_or_else(|| DEFAULT_DISCORD_API_BASE.to_string()),

            notify_timeout: Duration::from_secs(notify_timeout_secs),
            notify_max_attempts,
        })
    }

    /// Discord settings, or the first missing one.
    pub fn discord_credentials(&self) -> Result<DiscordCredentials, ConfigError> {
        let bot_token = self
            .discord_bot_token
            .clone()
            .ok_or(ConfigError::MissingSetting("DISCORD_BOT_TOKEN"))?;
        let channel_id = self
            .discord_channel_id
            .clone()
            .ok_or(ConfigError::MissingSetting("DISCORD_CHANNEL_ID"))?;

        Ok(DiscordCredentials {
            bot_token,
            channel_id,
            api_base: self.discord_api_base.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            redirect_policy: RedirectPolicy::default(),
            discord_bot_token: None,
            discord_channel_id: None,
            discord_api_base: DEFAULT_DISCORD_API_BASE.to_string(),
            notify_timeout: Duration::from_secs(5),
            notify_max_attempts: MAX_NOTIFY_ATTEMPTS,
        }
    }
}

// Blank values count as unset.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Unset means `default`; anything present must parse.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(name) {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", name, value)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "PORT",
        "LANG_REDIRECT_POLICY",
        "DISCORD_BOT_TOKEN",
        "DISCORD_CHANNEL_ID",
        "DISCORD_API_BASE",
        "NOTIFY_TIMEOUT_SECS",
        "NOTIFY_MAX_ATTEMPTS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().expect("Defaults should load");
        assert_eq!(config.port, 8080);
        assert_eq!(config.redirect_policy, RedirectPolicy::RootOnly);
        assert_eq!(config.discord_bot_token, None);
        assert_eq!(config.discord_api_base, DEFAULT_DISCORD_API_BASE);
        assert_eq!(config.notify_timeout, Duration::from_secs(5));
        assert_eq!(config.notify_max_attempts, 2);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_values() {
        clear_env();
        std::env::set_var("PORT", "3000");
        std::env::set_var("LANG_REDIRECT_POLICY", "root-like");
        std::env::set_var("DISCORD_BOT_TOKEN", "token");
        std::env::set_var("DISCORD_CHANNEL_ID", "42");
        std::env::set_var("NOTIFY_TIMEOUT_SECS", "9");
        std::env::set_var("NOTIFY_MAX_ATTEMPTS", "1");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.port, 3000);
        assert_eq!(config.redirect_policy, RedirectPolicy::RootLike);
        assert_eq!(config.discord_bot_token.as_deref(), Some("token"));
        assert_eq!(config.discord_channel_id.as_deref(), Some("42"));
        assert_eq!(config.notify_timeout, Duration::from_secs(9));
        assert_eq!(config.notify_max_attempts, 1);
    }

    #[test]
    #[serial]
    fn test_from_env_blank_secret_is_unset() {
        clear_env();
        std::env::set_var("DISCORD_BOT_TOKEN", "   ");
        let config = Config::from_env().expect("Should load");
        clear_env();
        assert_eq!(config.discord_bot_token, None);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_policy() {
        clear_env();
        std::env::set_var("LANG_REDIRECT_POLICY", "sometimes");
        let result = Config::from_env();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_zero_attempts_rejected() {
        clear_env();
        std::env::set_var("NOTIFY_MAX_ATTEMPTS", "0");
        let result = Config::from_env();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_zero_timeout_rejected() {
        clear_env();
        std::env::set_var("NOTIFY_TIMEOUT_SECS", "0");
        let result = Config::from_env();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_attempts_above_one_retry_rejected() {
        clear_env();
        std::env::set_var("NOTIFY_MAX_ATTEMPTS", "500");
        let result = Config::from_env();
        clear_env();
        let err = result.expect_err("500 attempts should be rejected");
        assert!(err.to_string().contains("between 1 and 2"));
    }

    #[test]
    #[serial]
    fn test_from_env_unparseable_numbers_rejected() {
        for (var, value) in [
            ("NOTIFY_MAX_ATTEMPTS", "abc"),
            ("NOTIFY_TIMEOUT_SECS", "-3"),
            ("PORT", "eighty"),
        ] {
            clear_env();
            std::env::set_var(var, value);
            let result = Config::from_env();
            clear_env();
            let err = result.expect_err("Unparseable value should be rejected");
            assert!(err.to_string().contains(var), "{} error: {}", var, err);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_blank_numbers_use_defaults() {
        clear_env();
        std::env::set_var("NOTIFY_MAX_ATTEMPTS", " ");
        std::env::set_var("NOTIFY_TIMEOUT_SECS", "");
        let config = Config::from_env().expect("Blank values are unset");
        clear_env();
        assert_eq!(config.notify_max_attempts, MAX_NOTIFY_ATTEMPTS);
        assert_eq!(config.notify_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_discord_credentials_missing_token() {
        let config = Config {
            discord_channel_id: Some("42".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.discord_credentials(),
            Err(ConfigError::MissingSetting("DISCORD_BOT_TOKEN"))
        );
    }

    #[test]
    fn test_discord_credentials_missing_channel() {
        let config = Config {
            discord_bot_token: Some("token".to_string()),
            ..Config::default()
        };
        assert_eq!(
            config.discord_credentials(),
            Err(ConfigError::MissingSetting("DISCORD_CHANNEL_ID"))
        );
    }

    #[test]
    fn test_discord_credentials_trims_base_slash() {
        let config = Config {
            discord_bot_token: Some("token".to_string()),
            discord_channel_id: Some("42".to_string()),
            discord_api_base: "http://localhost:1234/".to_string(),
            ..Config::default()
        };
        let creds = config.discord_credentials().unwrap();
        assert_eq!(creds.api_base, "http://localhost:1234");
        assert_eq!(creds.channel_id, "42");
    }
}
