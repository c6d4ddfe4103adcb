//! Configuration file handling
//!
//! Settings are read once per run from TOML and passed explicitly to the
//! retention core. Lookup order:
//! 1. `--config <file>` (must exist)
//! 2. `<config dir>/bakrot/config.toml` (if present)
//! 3. Built-in defaults

use anyhow::{Context, Result};
use retention::RetentionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound for each rotation length (ten years of days)
const MAX_ROTATION: u32 = 3650;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Populate the target directory with synthetic backups before cleaning
    pub debug_mode: bool,
    /// Where daily log files go (default: `logs/` next to the executable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
    pub rotation: RotationConfig,
    pub populate: PopulateConfig,
}

/// Rotation lengths, see [`RetentionPolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub days: u32,
    pub weeks: u32,
    pub months: u32,
}

/// Synthetic test-data generator settings (debug mode only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulateConfig {
    /// Days of history to generate, ending today
    pub days: u32,
    /// Object names to generate backups for
    pub objects: Vec<String>,
    /// File extension, without the dot
    pub extension: String,
}

impl Default for RotationConfig {
    fn default() -> Self {
        let policy = RetentionPolicy::default();
        Self {
            days: policy.rotation_days,
            weeks: policy.rotation_weeks,
            months: policy.rotation_months,
        }
    }
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            days: 365,
            objects: vec!["object1".to_string()],
            extension: "bak".to_string(),
        }
    }
}

impl RotationConfig {
    /// Policy handed to the retention core
    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.days, self.weeks, self.months)
    }
}

impl SystemConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("rotation.days", self.rotation.days),
            ("rotation.weeks", self.rotation.weeks),
            ("rotation.months", self.rotation.months),
        ] {
            if value > MAX_ROTATION {
                anyhow::bail!("{} must be between 0 and {} (got {})", key, MAX_ROTATION, value);
            }
        }

        if self.debug_mode {
            if self.populate.objects.is_empty() {
                anyhow::bail!("populate.objects must not be empty when debug_mode is enabled");
            }
            if self.populate.objects.iter().any(|name| name.is_empty()) {
                anyhow::bail!("populate.objects must not contain empty names");
            }
            if self.populate.extension.is_empty()
                || !self
                    .populate
                    .extension
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_')
            {
                anyhow::bail!(
                    "populate.extension must be a single word (got '{}')",
                    self.populate.extension
                );
            }
        }

        Ok(())
    }

    /// Log directory, falling back to `logs/` beside the executable
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }
}

/// Default config file location
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bakrot").join("config.toml"))
}

/// Whether a config file takes part in the lookup
pub fn has_config_file(explicit: Option<&Path>) -> bool {
    explicit.is_some() || config_file_path().is_some_and(|path| path.exists())
}

/// Load configuration following the lookup order
pub fn load(explicit: Option<&Path>) -> Result<SystemConfig> {
    let config = match explicit {
        Some(path) => load_from(path)?,
        None => match config_file_path() {
            Some(path) if path.exists() => load_from(&path)?,
            _ => SystemConfig::default(),
        },
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Parse a config file without validating it
pub fn load_from(path: &Path) -> Result<SystemConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Render the effective configuration
pub fn to_toml(config: &SystemConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}

/// Commented example configuration
pub fn example_config() -> &'static str {
    r#"# bakrot configuration

# Fill the target directory with synthetic backups before cleaning
debug_mode = false

# Daily log files are written here (default: logs/ next to the binary)
# log_dir = "/var/log/bakrot"

[rotation]
# Backups newer than this many days are never touched
days = 7
# One backup kept per week for this many weeks after the recent window
weeks = 4
# One backup kept per 30 days for this many periods after the weekly region
months = 3

[populate]
days = 365
objects = ["object1"]
extension = "bak"
"#
}
