use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DbConfig,
    #[serde(default)]
    pub api: ApiConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub wigle: WigleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    /// SQLite URL, e.g. `sqlite://instance/wigle_data.db`
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_host")]
    pub host: String,
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_api_host(),
            port: default_api_port(),
        }
    }
}

fn default_api_host() -> String {
    "0.0.0.0".into()
}

fn default_api_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 key for session tokens
    pub session_secret: String,
    #[serde(default = "default_session_expiry_hours")]
    pub session_expiry_hours: u64,
    /// Adds the `Secure` attribute to the session cookie
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default)]
    pub users: Vec<User>,
}

fn default_session_expiry_hours() -> u64 {
    12
}

/// One year.
pub const MAX_SESSION_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WigleConfig {
    #[serde(default = "default_wigle_api_url")]
    pub api_url: String,
    /// Credential sent base64-encoded as HTTP Basic auth
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_wigle_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WigleConfig {
    fn default() -> Self {
        Self {
            api_url: default_wigle_api_url(),
            api_key: String::new(),
            timeout_secs: default_wigle_timeout_secs(),
        }
    }
}

fn default_wigle_api_url() -> String {
    "https://api.wigle.net/api/v2/file/upload".into()
}

fn default_wigle_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load YAML from disk, substitute $(VAR)/${VAR} with env vars, then parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        use anyhow::Context;

        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut cfg = Self::from_yaml(&raw)?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            cfg.database.url = url;
        }
        if let Ok(secret) = std::env::var("SESSION_SECRET") {
            cfg.auth.session_secret = secret;
        }
        if let Ok(key) = std::env::var("WIGLE_API_KEY") {
            cfg.wigle.api_key = key;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, anyhow::Error> {
        let expanded = expand_env_placeholders(raw)?;
        let cfg: Self = serde_yaml::from_str(&expanded)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.auth.session_secret.trim().is_empty() {
            anyhow::bail!("auth.session_secret must not be empty");
        }
        if !(1..=MAX_SESSION_EXPIRY_HOURS).contains(&self.auth.session_expiry_hours) {
            anyhow::bail!(
                "auth.session_expiry_hours must be between 1 and {}",
                MAX_SESSION_EXPIRY_HOURS
            );
        }
        if self.auth.users.is_empty() {
            anyhow::bail!("auth.users must contain at least one user");
        }
        if self.wigle.api_key.is_empty() {
            tracing::warn!("wigle.api_key is empty; uploads will be rejected by WiGLE");
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Expand $(VAR) and ${VAR} placeholders using environment variables.
fn expand_env_placeholders(input: &str) -> Result<String, anyhow::Error> {
    use anyhow::Context;

    let mut out = String::with_capacity(input.len());
    let mut it = input.chars().peekable();

    while let Some(c) = it.next() {
        if c == '$' {
            match it.peek().copied() {
                Some('$') => {
                    it.next();
                    out.push('$');
                }
                Some(open @ ('(' | '{')) => {
                    it.next();
                    let close = if open == '(' { ')' } else { '}' };
                    let var = read_until(&mut it, close).with_context(|| {
                        format!("unterminated env placeholder: missing '{}'", close)
                    })?;
                    let val = std::env::var(&var)
                        .with_context(|| format!("missing environment variable: {}", var))?;
                    out.push_str(&val);
                }
                _ => out.push('$'),
            }
        } else {
            out.push(c);
        }
    }

    Ok(out)
}

fn read_until<I>(it: &mut std::iter::Peekable<I>, end: char) -> Option<String>
where
    I: Iterator<Item = char>,
{
    let mut buf = String::new();
    for ch in it.by_ref() {
        if ch == end {
            return Some(buf);
        }
        buf.push(ch);
    }
    None
}
