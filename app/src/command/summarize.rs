use distill_config::Config;
use distill_core::{ContentCategory, DigestFormatter, DistillReport, FormatStyle};
use std::path::PathBuf;
use tracing::debug;

use super::{build_distiller, read_input};

/// Input for [`SummarizeStrategy`].
#[derive(Debug, Clone, Default)]
pub struct SummarizeInput {
    /// Page text file; stdin when absent or `-`.
    pub file: Option<PathBuf>,
    /// Skip classification and use this category.
    pub category: Option<ContentCategory>,
    /// Extractive tier only.
    pub no_provider: bool,
    /// Print the bare digest without section markers.
    pub plain: bool,
    /// Print the distillation report to stderr.
    pub report: bool,
    /// Print the report as JSON.
    pub json: bool,
}

/// Strategy for distilling one page into a digest.
#[derive(Debug, Clone, Copy)]
pub struct SummarizeStrategy;

impl super::CommandStrategy for SummarizeStrategy {
    type Input = SummarizeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let text = read_input(input.file.as_deref())?;
        debug!("Read {} chars of input", text.chars().count());

        let distiller = build_distiller(&config, input.no_provider).await?;
        let distillation = match input.category {
            Some(category) => distiller.summarize(&text, category).await,
            None => distiller.distill(&text).await,
        };

        let formatter = if input.plain {
            DigestFormatter::new(FormatStyle::Plain)
        } else {
            config.format.formatter()
        };
        println!("{}", formatter.format(&distillation));

        if input.json {
            eprintln!("{}", serde_json::to_string_pretty(&distillation.report)?);
        } else if input.report {
            eprintln!("{}", render_report(&distillation.report));
        }

        Ok(())
    }
}

fn render_report(report: &DistillReport) -> String {
    format!(
        "category: {}\ntier: {}\nlength: {} -> {} (selected {}{})\nsentences: {} of {}\nratio: {:.2} (target {:.2}, efficiency {:.2})",
        report.category,
        report.tier,
        report.original_length,
        report.summary_length,
        report.selected_length,
        if report.truncated { ", truncated" } else { "" },
        report.selected_sentences,
        report.available_sentences,
        report.actual_ratio,
        report.expected_ratio,
        report.efficiency,
    )
}
