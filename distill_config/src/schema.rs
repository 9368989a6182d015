use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use distill_core::{
    CompressionPolicy, ContentCategory, DigestFormatter, FormatStyle, PolicyTable, ProviderKind,
};
use tracing::debug;

const CONFIG_DIR_NAME: &str = "distill";
const CONFIG_FILE_NAME: &str = "config.json";

/// Template written by `distill init`.
pub const CONFIG_TEMPLATE: &str = r#"{
  "provider": {
    "enabled": true,
    "active": "text_rank",
    "init_timeout_ms": 10000,
    "call_timeout_ms": 5000
  },
  "providers": {
    "zhipu": {
      "api_key": "your-zhipu-api-key-here",
      "model": "glm-4-flash"
    }
  },
  "policies": {
    "news": {
      "target_ratio": 0.55,
      "min_sentences": 4,
      "max_sentences": 8,
      "char_cap": 400,
      "provider_sentences": 2
    }
  },
  "format": {
    "style": "sectioned",
    "max_keywords": 3
  }
}"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Per-category policy overrides.
    #[serde(default)]
    pub policies: BTreeMap<ContentCategory, CompressionPolicy>,
    #[serde(default)]
    pub format: FormatConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderSettings {
    /// Enable the provider tier.
    #[serde(default = "ProviderSettings::default_enabled")]
    pub enabled: bool,
    /// Provider to activate at startup; none means extractive only.
    #[serde(default = "ProviderSettings::default_active")]
    pub active: Option<ProviderKind>,
    #[serde(default = "ProviderSettings::default_init_timeout_ms")]
    pub init_timeout_ms: u64,
    #[serde(default = "ProviderSettings::default_call_timeout_ms")]
    pub call_timeout_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            active: Self::default_active(),
            init_timeout_ms: Self::default_init_timeout_ms(),
            call_timeout_ms: Self::default_call_timeout_ms(),
        }
    }
}

impl ProviderSettings {
    const fn default_enabled() -> bool {
        true
    }

    const fn default_active() -> Option<ProviderKind> {
        Some(ProviderKind::TextRank)
    }

    const fn default_init_timeout_ms() -> u64 {
        10_000
    }

    const fn default_call_timeout_ms() -> u64 {
        5_000
    }

    #[must_use]
    pub const fn init_timeout(&self) -> Duration {
        Duration::from_millis(self.init_timeout_ms)
    }

    #[must_use]
    pub const fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub zhipu: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FormatConfig {
    #[serde(default)]
    pub style: FormatStyle,
    #[serde(default = "FormatConfig::default_max_keywords")]
    pub max_keywords: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            style: FormatStyle::default(),
            max_keywords: Self::default_max_keywords(),
        }
    }
}

impl FormatConfig {
    const fn default_max_keywords() -> usize {
        distill_core::format::DEFAULT_MAX_KEYWORDS
    }

    #[must_use]
    pub const fn formatter(&self) -> DigestFormatter {
        DigestFormatter::new(self.style).with_max_keywords(self.max_keywords)
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'distill init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    /// A file that exists and fails to parse is still an error.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::ensure_config_dir()?.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        Ok(config_path)
    }

    /// Validated policy table built from the overrides.
    pub fn policy_table(&self) -> anyhow::Result<PolicyTable> {
        Ok(PolicyTable::from_overrides(
            self.policies.iter().map(|(c, p)| (*c, *p)),
        )?)
    }
}
