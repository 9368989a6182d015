use distill_config::Config;

/// Strategy for initializing the configuration.
///
/// Writes the template configuration to `~/distill/config.json`; an existing
/// file is left untouched.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let path = Config::create_config()?;
        println!("Config created at: {}", path.display());
        println!("Set providers.zhipu.api_key and provider.active to \"zhipu\" to use the LLM tier.");
        Ok(())
    }
}
