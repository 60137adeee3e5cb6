//! Geogen Translate CLI
//!
//! Runs the translation stage over a JSON-lines primitive extract.
//!
//! # Usage
//!
//! ```bash
//! # Translate into one JSON-lines file
//! geogen-translate run --config translator.yaml --cache geometry.json \
//!     --input primitives.jsonl --output features.jsonl
//!
//! # One file per feature type
//! geogen-translate run --config translator.yaml --cache geometry.json \
//!     --input primitives.jsonl --output out/ --split-by-type
//!
//! # Check a configuration file
//! geogen-translate validate-config --config translator.yaml
//! ```
//!
//! Log level follows `RUST_LOG` (default `info`). Ctrl-C cancels the run:
//! shards stop after their current primitive, the partial report is
//! written and the process exits with status 2.

use clap::{Parser, Subcommand};
use geogen_translator::features::sink::{FeatureSink, JsonLinesSink, PartitionedSink};
use geogen_translator::pipeline::{read_primitives_file, RunReport};
use geogen_translator::{
    CancellationToken, InMemoryGeometryCache, ShardOrchestrator, TranslatorConfig,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "geogen-translate")]
#[command(about = "Translate raw geographic primitives into typed features", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a primitive extract
    Run {
        /// Translator configuration (YAML, version 1)
        #[arg(short, long)]
        config: PathBuf,

        /// Geometry cache (JSON)
        #[arg(long)]
        cache: PathBuf,

        /// Primitives, one JSON object per line
        #[arg(short, long)]
        input: PathBuf,

        /// Output file, or directory with --split-by-type
        #[arg(short, long)]
        output: PathBuf,

        /// Write one `<feature_type>.jsonl` file per type
        #[arg(long)]
        split_by_type: bool,

        /// Run report path (default: `<output>.report.json`)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Override orchestrator.workers
        #[arg(long)]
        workers: Option<usize>,

        /// Override orchestrator.shards
        #[arg(long)]
        shards: Option<usize>,
    },

    /// Parse and validate a configuration file
    ValidateConfig {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            cache,
            input,
            output,
            split_by_type,
            report,
            workers,
            shards,
        } => {
            let mut config = TranslatorConfig::from_yaml(&config)?;
            if let Some(workers) = workers {
                config.orchestrator.workers = workers;
            }
            if let Some(shards) = shards {
                config.orchestrator.shards = shards;
            }
            let report_path = report.unwrap_or_else(|| default_report_path(&output));
            let report = run(&config, &cache, &input, &output, split_by_type)?;
            std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;
            tracing::info!("Report written to {}", report_path.display());

            let code = exit_code(&report);
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::ValidateConfig { config } => {
            let parsed = TranslatorConfig::from_yaml(&config)?;
            println!(
                "{}: ok ({} filters, {} rules, {} collectors)",
                config.display(),
                parsed.filters.len(),
                parsed.builder.rules.len(),
                parsed.accumulator.collectors.len()
            );
        }
    }

    Ok(())
}

fn run(
    config: &TranslatorConfig,
    cache_path: &Path,
    input: &Path,
    output: &Path,
    split_by_type: bool,
) -> Result<RunReport, Box<dyn std::error::Error>> {
    let cache = InMemoryGeometryCache::from_json_file(cache_path)?;
    let primitives = read_primitives_file(input)?;
    let orchestrator = ShardOrchestrator::new(&config.orchestrator)?;
    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    if split_by_type {
        std::fs::create_dir_all(output)?;
        let sink = Arc::new(PartitionedSink::new());
        let template = config.build_translator(cache, sink.clone())?;
        let run = orchestrator.run(&template, &primitives, &cancel)?;

        for feature_type in sink.counts().into_keys() {
            let features = sink.take(&feature_type);

            let path = output.join(format!("{}.jsonl", feature_type));
            let writer = JsonLinesSink::create(&path)?;
            for feature in features {
                writer.emit(feature)?;
            }
            writer.flush()?;
        }
        Ok(run.report())
    } else {
        let sink = Arc::new(JsonLinesSink::create(output)?);
        let template = config.build_translator(cache, sink.clone())?;
        let run = orchestrator.run(&template, &primitives, &cancel)?;
        sink.flush()?;
        Ok(run.report())
    }
}

/// Cancel `token` on the first Ctrl-C
///
/// The signal is awaited on a small runtime in a background thread, so the
/// rayon pool is never blocked on it.
fn cancel_on_interrupt(token: CancellationToken) {
    let spawned = std::thread::Builder::new()
        .name("geogen-interrupt".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::warn!("Ctrl-C handler unavailable: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                if let Ok(()) = tokio::signal::ctrl_c().await {
                    tracing::warn!("Received Ctrl-C, cancelling translation...");
                    token.cancel();
                }
            });
        });
    if let Err(e) = spawned {
        tracing::warn!("Ctrl-C handler unavailable: {}", e);
    }
}

/// Process exit status for a finished run
fn exit_code(report: &RunReport) -> i32 {
    if report.metadata.cancelled {
        2
    } else {
        0
    }
}

fn default_report_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "translation".into());
    name.push(".report.json");
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geogen_translator::CollectingSink;
    use geogen_translator::RawPrimitive;

    fn report(cancelled: bool) -> RunReport {
        let config = TranslatorConfig::default();
        let cache = InMemoryGeometryCache::builder().build();
        let template = config
            .build_translator(cache, Arc::new(CollectingSink::new()))
            .unwrap();
        let cancel = CancellationToken::new();
        if cancelled {
            cancel.cancel();
        }
        let primitives = vec![RawPrimitive::point(1).with_tag("amenity", "cafe")];
        ShardOrchestrator::new(&config.orchestrator)
            .unwrap()
            .run(&template, &primitives, &cancel)
            .unwrap()
            .report()
    }

    #[test]
    fn test_exit_code_follows_cancellation() {
        assert_eq!(exit_code(&report(false)), 0);
        assert_eq!(exit_code(&report(true)), 2);
    }

    #[test]
    fn test_interrupt_handler_leaves_token_alone_without_signal() {
        let token = CancellationToken::new();
        cancel_on_interrupt(token.clone());
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_default_report_path() {
        assert_eq!(
            default_report_path(Path::new("out/features.jsonl")),
            PathBuf::from("out/features.jsonl.report.json")
        );
    }
}
