//! Configuration types — env-sourced SMTP settings and submission budgets.

use secrecy::SecretString;

use crate::error::ConfigError;

/// SMTP transport configuration, built once at startup from environment
/// variables and read-only thereafter.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// `true` → implicit TLS on connect (the port 465 convention);
    /// `false` → STARTTLS upgrade.
    pub secure: bool,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    pub to_address: String,
}

impl SmtpConfig {
    /// Build config from environment variables.
    ///
    /// `SMTP_HOST` and `TO_EMAIL` are required; `SMTP_PORT` defaults by
    /// TLS mode and `FROM_EMAIL` falls back to `SMTP_USER`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| ConfigError::MissingEnvVar("SMTP_HOST".into()))?;

        let secure = std::env::var("SMTP_SECURE").is_ok_and(|v| v == "true");

        let port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if secure { 465 } else { 587 });

        let username = std::env::var("SMTP_USER").unwrap_or_default();
        let password = SecretString::from(std::env::var("SMTP_PASS").unwrap_or_default());
        let from_address = std::env::var("FROM_EMAIL").unwrap_or_else(|_| username.clone());

        let to_address = std::env::var("TO_EMAIL")
            .map_err(|_| ConfigError::MissingEnvVar("TO_EMAIL".into()))?;

        Ok(Self {
            host,
            port,
            secure,
            username,
            password,
            from_address,
            to_address,
        })
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        Self { port }
    }
}

/// Per-submission attachment budgets.
///
/// The admission pipeline enforces these before any decoded buffer is
/// retained — the only backpressure against attacker-sized payloads.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionBudget {
    /// Attachments considered per submission; extras are silently dropped.
    pub max_attachment_count: usize,
    /// Decoded size ceiling for a single attachment.
    pub max_bytes_per_attachment: usize,
    /// Decoded size ceiling across all accepted attachments.
    pub max_total_bytes: usize,
}

impl Default for SubmissionBudget {
    fn default() -> Self {
        Self {
            max_attachment_count: 8,
            max_bytes_per_attachment: 5 * 1024 * 1024, // 5 MiB
            max_total_bytes: 20 * 1024 * 1024,         // 20 MiB
        }
    }
}
