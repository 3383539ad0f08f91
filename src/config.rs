//! # Unified Application Configuration
//!
//! This module provides a centralized configuration system that consolidates
//! all application settings into a single, structured configuration object.
//! It supports loading from environment variables, validation, and provides
//! a clean interface for accessing configuration throughout the application.
//!
//! Optional features (manager notification, Google Sheets ledger, webhook
//! mode) are expressed as `Option`s so that one binary covers every
//! deployment instead of maintaining per-deployment copies.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;

/// Bot-specific configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.token.trim().is_empty() {
            return Err(AppError::Config("Bot token cannot be empty".to_string()));
        }

        // Basic bot token format validation
        if !self.token.contains(':') {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        let parts: Vec<&str> = self.token.split(':').collect();
        if parts.len() != 2 {
            return Err(AppError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        // Validate bot ID is numeric
        if parts[0].parse::<u64>().is_err() {
            return Err(AppError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(AppError::Config("HTTP timeout cannot be 0".to_string()));
        }

        if self.http_timeout_secs > 300 {
            return Err(AppError::Config(
                "HTTP timeout cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Manager notification settings
///
/// When `chat_id` is absent the notifier feature is disabled entirely and
/// intake requests are only recorded locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Chat id of the human manager who fulfills sourcing requests
    pub chat_id: Option<i64>,
    /// Public username shown in user-facing copy
    pub username: Option<String>,
}

impl ManagerConfig {
    /// Whether manager notification is enabled
    pub fn notify_enabled(&self) -> bool {
        self.chat_id.is_some()
    }
}

/// Google Sheets ledger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Target spreadsheet id
    pub spreadsheet_id: String,
    /// OAuth bearer token for the Sheets REST API
    pub access_token: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl SheetsConfig {
    /// Validate ledger configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(AppError::Config(
                "Sheets spreadsheet id cannot be empty".to_string(),
            ));
        }
        if self.access_token.trim().is_empty() {
            return Err(AppError::Config(
                "Sheets access token cannot be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(AppError::Config(
                "Sheets timeout must be between 1 and 60 seconds".to_string(),
            ));
        }
        Ok(())
    }
}

/// Webhook deployment settings; absent means long polling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Public HTTPS url Telegram delivers updates to
    pub public_url: String,
    /// Local port the webhook listener binds to
    pub port: u16,
}

impl WebhookConfig {
    /// Validate webhook configuration
    pub fn validate(&self) -> AppResult<()> {
        if !self.public_url.starts_with("https://") {
            return Err(AppError::Config(
                "Webhook url must start with 'https://'".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub manager: ManagerConfig,
    pub sheets: Option<SheetsConfig>,
    pub webhook: Option<WebhookConfig>,
    /// Telegram ids with access to the admin dashboard
    pub admin_ids: HashSet<i64>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
            AppError::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required but not set. \
                 Please set it to your Telegram bot token."
                    .to_string(),
            )
        })?;

        let http_timeout_secs = env::var("HTTP_CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| {
                AppError::Config(
                    "HTTP_CLIENT_TIMEOUT_SECS must be a valid number of seconds".to_string(),
                )
            })?;

        let manager_chat_id = match env::var("MANAGER_CHAT_ID") {
            Ok(raw) => Some(raw.parse::<i64>().map_err(|_| {
                AppError::Config("MANAGER_CHAT_ID must be a numeric chat id".to_string())
            })?),
            Err(_) => None,
        };

        let manager = ManagerConfig {
            chat_id: manager_chat_id,
            username: env::var("MANAGER_USERNAME").ok(),
        };

        let sheets = match (
            env::var("GOOGLE_SHEETS_SPREADSHEET_ID"),
            env::var("GOOGLE_SHEETS_ACCESS_TOKEN"),
        ) {
            (Ok(spreadsheet_id), Ok(access_token)) => Some(SheetsConfig {
                spreadsheet_id,
                access_token,
                timeout_secs: 15,
            }),
            _ => None,
        };

        // WEBHOOK_URL wins; the Railway domain variables are the
        // platform-provided fallbacks (RAILWAY_STATIC_URL is the legacy name).
        let public_url = env::var("WEBHOOK_URL").ok().or_else(|| {
            env::var("RAILWAY_PUBLIC_DOMAIN")
                .ok()
                .or_else(|| env::var("RAILWAY_STATIC_URL").ok())
                .map(|domain| webhook_url_from_domain(&domain))
        });

        let webhook = match public_url {
            Some(public_url) => {
                let port = env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse::<u16>()
                    .map_err(|_| {
                        AppError::Config("PORT must be a valid port number".to_string())
                    })?;
                Some(WebhookConfig { public_url, port })
            }
            None => None,
        };

        let mut admin_ids = parse_admin_ids(&env::var("ADMIN_IDS").unwrap_or_default())?;
        // The manager always has dashboard access.
        if let Some(chat_id) = manager.chat_id {
            admin_ids.insert(chat_id);
        }

        Ok(Self {
            bot: BotConfig {
                token,
                http_timeout_secs,
            },
            manager,
            sheets,
            webhook,
            admin_ids,
        })
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> AppResult<()> {
        self.bot.validate()?;
        if let Some(sheets) = &self.sheets {
            sheets.validate()?;
        }
        if let Some(webhook) = &self.webhook {
            webhook.validate()?;
        }
        Ok(())
    }
}

/// Webhook endpoint for a platform-provided domain. Railway exposes a bare
/// domain, but a scheme prefix is tolerated.
fn webhook_url_from_domain(domain: &str) -> String {
    let domain = domain
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!("https://{}/webhook", domain)
}

fn parse_admin_ids(raw: &str) -> AppResult<HashSet<i64>> {
    let mut ids = HashSet::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part.parse::<i64>().map_err(|_| {
            AppError::Config(format!("ADMIN_IDS contains a non-numeric entry: '{}'", part))
        })?;
        ids.insert(id);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_config_rejects_malformed_tokens() {
        let mut config = BotConfig {
            token: "not-a-token".to_string(),
            ..BotConfig::default()
        };
        assert!(config.validate().is_err());

        config.token = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11".to_string();
        assert!(config.validate().is_ok());

        config.token = "abc:ABC-DEF1234ghIkl-zyx57W2v1u123ew11".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn admin_ids_parse_and_skip_blanks() {
        let ids = parse_admin_ids("123, 456,,789").expect("valid id list");
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&456));

        assert!(parse_admin_ids("123,abc").is_err());
        assert!(parse_admin_ids("").expect("empty list").is_empty());
    }

    #[test]
    fn railway_domains_become_webhook_urls() {
        assert_eq!(
            webhook_url_from_domain("myapp.up.railway.app"),
            "https://myapp.up.railway.app/webhook"
        );
        assert_eq!(
            webhook_url_from_domain("https://myapp.up.railway.app/"),
            "https://myapp.up.railway.app/webhook"
        );
    }

    #[test]
    fn webhook_requires_https() {
        let webhook = WebhookConfig {
            public_url: "http://example.com/webhook".to_string(),
            port: 8080,
        };
        assert!(webhook.validate().is_err());
    }
}
