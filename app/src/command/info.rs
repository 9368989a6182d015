use distill_config::Config;
use distill_core::{ContentCategory, ProviderRegistry};
use distill_providers::register_builtin;

use super::zhipu_settings;

/// Strategy for displaying configuration information.
///
/// Prints provider settings (API key masked), the effective policy table and
/// the registered providers.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== distill Configuration ===\n");
        if config_path.exists() {
            println!("Config: {}", config_path.display());
        } else {
            println!("Config: {} (not found, using defaults)", config_path.display());
        }
        println!();

        println!("Provider:");
        println!("  Enabled: {}", config.provider.enabled);
        match config.provider.active {
            Some(kind) => println!("  Active: {kind}"),
            None => println!("  Active: (none, extractive only)"),
        }
        println!("  Init Timeout: {:?}", config.provider.init_timeout());
        println!("  Call Timeout: {:?}", config.provider.call_timeout());
        println!();

        let zhipu = &config.providers.zhipu;
        println!("Zhipu:");
        println!("  API Key: {}", mask_key(&zhipu.api_key));
        if let Some(model) = &zhipu.model {
            println!("  Model: {model}");
        }
        if let Some(base_url) = &zhipu.base_url {
            println!("  Base URL: {}", truncate(base_url, 60));
        }
        println!();

        let mut registry = ProviderRegistry::new();
        register_builtin(&mut registry, zhipu_settings(&config));
        let registered: Vec<String> = registry
            .registered()
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("Registered Providers: {}", registered.join(", "));
        println!();

        let policies = config.policy_table()?;
        println!("Policies:");
        println!("  category     ratio  min  max   cap  llm");
        for category in ContentCategory::ALL {
            let policy = policies.get(category);
            let marker = if policies.is_overridden(category) {
                " *"
            } else {
                ""
            };
            println!(
                "  {:<12} {:>5.2} {:>4} {:>4} {:>5} {:>4}{marker}",
                category.as_str(),
                policy.target_ratio,
                policy.min_sentences,
                policy.max_sentences,
                policy.char_cap,
                policy.provider_sentences,
            );
        }
        println!();

        println!("Format:");
        println!("  Style: {:?}", config.format.style);
        println!("  Max Keywords: {}", config.format.max_keywords);

        Ok(())
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        "(not set)".to_string()
    } else if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
