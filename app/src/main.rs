#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    ClassifyInput, ClassifyStrategy, CommandStrategy, InfoStrategy, InitStrategy, SummarizeInput,
    SummarizeStrategy, VersionStrategy,
};
use distill_core::ContentCategory;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "distill")]
#[command(about = "Adaptive page-text distillation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distill page text into a digest
    Summarize {
        /// Input file, `-` or absent for stdin
        file: Option<PathBuf>,

        /// Use this category instead of classifying
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Extractive summaries only
        #[arg(long)]
        no_provider: bool,

        /// Print the digest without section markers
        #[arg(long)]
        plain: bool,

        /// Print the distillation report to stderr
        #[arg(short = 'r', long)]
        report: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the detected content category
    Classify {
        /// Input file, `-` or absent for stdin
        file: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Show configuration
    Info,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            file,
            category,
            no_provider,
            plain,
            report,
            json,
        } => {
            let category = category
                .map(|c| c.parse::<ContentCategory>())
                .transpose()?;
            SummarizeStrategy
                .execute(SummarizeInput {
                    file,
                    category,
                    no_provider,
                    plain,
                    report,
                    json,
                })
                .await
        }
        Commands::Classify { file } => ClassifyStrategy.execute(ClassifyInput { file }).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
