//! Outbound email (SMTP) configuration

use serde::{Deserialize, Serialize};

/// SMTP relay used to deliver one-time codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay host; `None` means no real mail transport is configured
    pub host: Option<String>,

    /// Relay port (587 = STARTTLS submission)
    pub port: u16,

    /// Login user
    #[serde(default)]
    pub username: Option<String>,

    /// Login password
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Sender address; falls back to the login user
    #[serde(default)]
    pub from_address: Option<String>,

    /// Display name shown next to the sender address
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Per-attempt send timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Total send attempts (first try included)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            username: None,
            password: None,
            from_address: None,
            from_name: default_from_name(),
            timeout_seconds: default_timeout(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl SmtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let non_blank = |key: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            host: non_blank("SMTP_HOST"),
            port: non_blank("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: non_blank("SMTP_USER"),
            password: non_blank("SMTP_PASS"),
            from_address: non_blank("SMTP_FROM"),
            from_name: non_blank("SMTP_FROM_NAME").unwrap_or_else(default_from_name),
            ..Default::default()
        }
    }

    /// Whether a real relay is configured
    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }

    /// Sender address used in the `From` header
    pub fn sender(&self) -> Option<&str> {
        self.from_address
            .as_deref()
            .or(self.username.as_deref())
    }
}

fn default_from_name() -> String {
    String::from("MultiYO Admin")
}

fn default_timeout() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_config_default_is_unconfigured() {
        let config = SmtpConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.port, 587);
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.sender(), None);
    }

    #[test]
    fn test_sender_falls_back_to_username() {
        let config = SmtpConfig {
            host: Some("smtp.example.com".into()),
            username: Some("mailer@example.com".into()),
            ..Default::default()
        };
        assert_eq!(config.sender(), Some("mailer@example.com"));

        let config = SmtpConfig {
            from_address: Some("no-reply@example.com".into()),
            ..config
        };
        assert_eq!(config.sender(), Some("no-reply@example.com"));
    }
}
