use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub roster: RosterSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub invite: InviteSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    pub timeout_secs: Option<u64>,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            table: default_table(),
            timeout_secs: None,
        }
    }
}

impl RosterSettings {
    /// True when an https endpoint and a key are both set
    pub fn is_configured(&self) -> bool {
        self.endpoint.starts_with("https://") && !self.api_key.is_empty()
    }
}

fn default_table() -> String { "ch-eng-mbti".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_secs: default_ttl_secs() }
    }
}

fn default_ttl_secs() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct InviteSettings {
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
    #[serde(default = "default_calendar_url")]
    pub calendar_url: String,
    #[serde(default = "default_invite_title")]
    pub title: String,
    /// Hour of day, in the team's local time, the invite starts the day after the request
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    /// Team's offset from UTC in minutes (Seoul is +540)
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for InviteSettings {
    fn default() -> Self {
        Self {
            email_domain: default_email_domain(),
            calendar_url: default_calendar_url(),
            title: default_invite_title(),
            start_hour: default_start_hour(),
            duration_minutes: default_duration_minutes(),
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

fn default_email_domain() -> String { "channel.io".to_string() }
fn default_calendar_url() -> String { "https://calendar.google.com/calendar/render".to_string() }
fn default_invite_title() -> String { "MBTI coffee chat".to_string() }
fn default_start_hour() -> u32 { 15 }
fn default_duration_minutes() -> u32 { 30 }
fn default_utc_offset_minutes() -> i32 { 540 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn environment() -> Environment {
    // e.g., MBTI__SERVER__PORT -> server.port
    Environment::with_prefix("MBTI")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration files (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with MBTI__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}
