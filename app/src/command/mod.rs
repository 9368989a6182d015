//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use distill_config::Config;
use distill_core::{Distiller, ProviderRegistry};
use distill_providers::{ZhipuSettings, register_builtin};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

mod classify;
mod info;
mod init;
mod summarize;
mod version;

pub use classify::{ClassifyInput, ClassifyStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use summarize::{SummarizeInput, SummarizeStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Read page text from `file`, or from stdin when `file` is absent or `-`.
fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn zhipu_settings(config: &Config) -> ZhipuSettings {
    let zhipu = &config.providers.zhipu;
    ZhipuSettings {
        api_key: zhipu.api_key.clone(),
        model: zhipu.model.clone(),
        base_url: zhipu.base_url.clone(),
    }
}

/// Build a distiller from `config`. A provider that fails to activate is
/// logged and the distiller runs extractive-only.
async fn build_distiller(config: &Config, no_provider: bool) -> anyhow::Result<Distiller> {
    let settings = &config.provider;
    let enabled = settings.enabled && !no_provider;

    let mut registry = ProviderRegistry::new().with_init_timeout(settings.init_timeout());
    register_builtin(&mut registry, zhipu_settings(config));

    let distiller = Distiller::new()
        .with_policies(config.policy_table()?)
        .with_registry(registry)
        .with_call_timeout(settings.call_timeout())
        .with_provider_enabled(enabled);

    if enabled {
        if let Some(kind) = settings.active {
            match distiller.activate_provider(kind).await {
                Ok(()) => info!("Provider {kind} active"),
                Err(e) => warn!("Provider {kind} unavailable, using extractive summaries: {e}"),
            }
        }
    }

    Ok(distiller)
}
