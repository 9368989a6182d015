use distill_core::ContentClassifier;
use std::path::PathBuf;

use super::read_input;

/// Input for [`ClassifyStrategy`].
#[derive(Debug, Clone, Default)]
pub struct ClassifyInput {
    pub file: Option<PathBuf>,
}

/// Strategy for printing the detected category and its signature hits.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyStrategy;

impl super::CommandStrategy for ClassifyStrategy {
    type Input = ClassifyInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let text = read_input(input.file.as_deref())?;
        let scores = ContentClassifier::with_defaults().scores(&text);

        println!("{}", scores.winner());
        for (category, count) in scores.matched() {
            println!("  {category}: {count}");
        }
        Ok(())
    }
}
