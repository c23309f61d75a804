//! Bot Configuration
//!
//! Configuration management for the GemBot console binary.
//! Supports environment variables, config files, and CLI arguments.

use serde::{Deserialize, Serialize};

use gembot_catalog::{builtin, Catalogs};
use gembot_engine::Pacing;
use gembot_types::{CatalogEntry, Sender, MAX_GEMS};

/// Bot configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot identity and balance limits
    #[serde(default)]
    pub bot: BotSettings,

    /// Delays between messages
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Chat transport settings
    #[serde(default)]
    pub transport: TransportConfig,

    /// Console transport identity
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Catalog overrides
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Bot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotSettings {
    /// Name shown in the startup banner and logs
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Balance cap per user (at most 500)
    #[serde(default = "default_max_gems")]
    pub max_gems: u16,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            max_gems: default_max_gems(),
        }
    }
}

/// Pacing settings, in whole seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_intro_first")]
    pub intro_first_secs: u64,

    #[serde(default = "default_intro_second")]
    pub intro_second_secs: u64,

    #[serde(default = "default_after_action")]
    pub after_action_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            intro_first_secs: default_intro_first(),
            intro_second_secs: default_intro_second(),
            after_action_secs: default_after_action(),
        }
    }
}

impl PacingConfig {
    pub fn to_pacing(&self) -> Pacing {
        if !self.enabled {
            return Pacing::none();
        }
        Pacing::from_secs(
            self.intro_first_secs,
            self.intro_second_secs,
            self.after_action_secs,
        )
    }
}

/// Settings for a networked chat transport
///
/// The console transport ignores these; they are validated and reported at
/// startup so a deployment can be checked before switching transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Long-poll timeout for update fetching
    #[serde(default = "default_update_timeout")]
    pub update_timeout_secs: u64,

    /// Environment variable holding the bot token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            update_timeout_secs: default_update_timeout(),
            token_env: default_token_env(),
        }
    }
}

impl TransportConfig {
    pub fn token_present(&self) -> bool {
        std::env::var(&self.token_env).map(|t| !t.is_empty()).unwrap_or(false)
    }
}

/// Who the console speaks as
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_console_id")]
    pub chat_id: i64,

    #[serde(default = "default_console_id")]
    pub user_id: i64,

    #[serde(default = "default_first_name")]
    pub first_name: String,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            chat_id: default_console_id(),
            user_id: default_console_id(),
            first_name: default_first_name(),
            last_name: None,
            username: None,
        }
    }
}

impl ConsoleConfig {
    pub fn sender(&self) -> Sender {
        let mut sender = Sender::new(self.user_id, self.first_name.clone());
        if let Some(last) = &self.last_name {
            sender = sender.with_last_name(last.clone());
        }
        if let Some(username) = &self.username {
            sender = sender.with_username(username.clone());
        }
        sender
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// One configured catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryConfig {
    pub code: String,
    pub name: String,
    pub gems: u16,
}

impl From<&EntryConfig> for CatalogEntry {
    fn from(entry: &EntryConfig) -> Self {
        CatalogEntry::new(entry.code.clone(), entry.name.clone(), entry.gems)
    }
}

/// Catalog overrides; a missing table keeps the builtin one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub useful_activities: Option<Vec<EntryConfig>>,

    #[serde(default)]
    pub rewards: Option<Vec<EntryConfig>>,
}

impl CatalogConfig {
    /// Build and validate the catalogs
    pub fn build(&self) -> gembot_catalog::Result<Catalogs> {
        let useful_activities = match &self.useful_activities {
            Some(entries) => entries.iter().map(CatalogEntry::from).collect(),
            None => builtin::useful_activities(),
        };
        let rewards = match &self.rewards {
            Some(entries) => entries.iter().map(CatalogEntry::from).collect(),
            None => builtin::rewards(),
        };
        Catalogs::new(useful_activities, rewards)
    }

    pub fn is_overridden(&self) -> bool {
        self.useful_activities.is_some() || self.rewards.is_some()
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_bot_name() -> String {
    "GemBot".to_string()
}

fn default_max_gems() -> u16 {
    MAX_GEMS.value()
}

fn default_intro_first() -> u64 {
    4
}

fn default_intro_second() -> u64 {
    7
}

fn default_after_action() -> u64 {
    2
}

fn default_update_timeout() -> u64 {
    60
}

fn default_token_env() -> String {
    "GEMBOT_TOKEN".to_string()
}

fn default_console_id() -> i64 {
    1
}

fn default_first_name() -> String {
    "Console".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl BotConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // Environment variables with GEMBOT__ prefix, e.g. GEMBOT__BOT__MAX_GEMS
        builder = builder.add_source(
            config::Environment::with_prefix("GEMBOT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.bot.max_gems, 500);
        assert_eq!(config.pacing.to_pacing(), Pacing::default());
        assert_eq!(config.transport.update_timeout_secs, 60);
        assert_eq!(config.transport.token_env, "GEMBOT_TOKEN");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_pacing_can_be_disabled() {
        let pacing = PacingConfig {
            enabled: false,
            ..Default::default()
        };
        assert_eq!(pacing.to_pacing().after_action, Duration::ZERO);
    }

    #[test]
    fn test_console_sender() {
        let console = ConsoleConfig {
            user_id: 7,
            first_name: "Ada".to_string(),
            last_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        let sender = console.sender();
        assert_eq!(sender.id.as_i64(), 7);
        assert_eq!(sender.display_name(), "Ada Lovelace");
        assert_eq!(sender.username, None);
    }

    #[test]
    fn test_console_sender_with_username() {
        let console = ConsoleConfig {
            username: Some("ada".to_string()),
            ..Default::default()
        };
        let sender = console.sender();
        assert_eq!(sender.username.as_deref(), Some("ada"));
        assert_eq!(sender.display_name(), "Console");
    }

    #[test]
    fn test_catalog_override_keeps_builtin_rewards() {
        let catalog = CatalogConfig {
            useful_activities: Some(vec![EntryConfig {
                code: "pushups".to_string(),
                name: "Push-ups (20)".to_string(),
                gems: 2,
            }]),
            rewards: None,
        };

        let catalogs = catalog.build().unwrap();
        assert_eq!(catalogs.useful_activities.len(), 1);
        assert_eq!(catalogs.rewards.len(), builtin::rewards().len());
        assert!(catalog.is_overridden());
    }

    #[test]
    fn test_catalog_override_is_validated() {
        let catalog = CatalogConfig {
            useful_activities: None,
            rewards: Some(vec![EntryConfig {
                code: "show_balance".to_string(),
                name: "Sneaky".to_string(),
                gems: 1,
            }]),
        };
        assert!(catalog.build().is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let source = r#"
            [bot]
            name = "HabitBot"

            [pacing]
            after_action_secs = 0

            [[catalog.rewards]]
            code = "nap"
            name = "Nap"
            gems = 5
        "#;
        let config: BotConfig = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.bot.name, "HabitBot");
        assert_eq!(config.bot.max_gems, 500);
        assert_eq!(config.pacing.intro_first_secs, 4);
        assert_eq!(config.pacing.after_action_secs, 0);
        assert_eq!(config.catalog.rewards.map(|r| r.len()), Some(1));
    }
}
