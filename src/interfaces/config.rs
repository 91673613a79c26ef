use std::env;

/// Immutable process configuration, read once from the environment at
/// startup. Every string field must be non-empty or the process refuses
/// to start.
#[derive(Clone, Debug)]
pub struct Config {
    pub website_url: String,
    pub check_interval: u64,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub email_user: String,
    pub email_pwd: String,
    pub sender: String,
    pub receiver: String,
    pub user_agent: String,
}

const DEFAULT_CHECK_INTERVAL: u64 = 1800;
const DEFAULT_SMTP_PORT: u16 = 587;

impl Config {
    pub fn from_env() -> Self {
        Self {
            website_url: env_or_empty("WEBSITE_URL"),
            check_interval: env_parsed("CHECK_INTERVAL", DEFAULT_CHECK_INTERVAL),
            smtp_server: env_or_empty("SMTP_SERVER"),
            smtp_port: env_parsed("SMTP_PORT", DEFAULT_SMTP_PORT),
            email_user: env_or_empty("EMAIL_USER"),
            email_pwd: env_or_empty("EMAIL_PWD"),
            sender: env_or_empty("SENDER"),
            receiver: env_or_empty("RECEIVER"),
            user_agent: env_or_empty("USER_AGENT"),
        }
    }

    /// One message per empty required field, naming the environment
    /// variable. Empty result means the config is complete.
    pub fn validate(&self) -> Vec<String> {
        let fields = [
            ("WEBSITE_URL", &self.website_url),
            ("SMTP_SERVER", &self.smtp_server),
            ("EMAIL_USER", &self.email_user),
            ("EMAIL_PWD", &self.email_pwd),
            ("SENDER", &self.sender),
            ("RECEIVER", &self.receiver),
            ("USER_AGENT", &self.user_agent),
        ];
        fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| format!("配置项 {name} 不能为空"))
            .collect()
    }
}

fn env_or_empty(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
