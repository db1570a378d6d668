use clap::Parser;
use doccheck_core::aggregate::render_feedback;
use doccheck_core::loader::load_package_context;
use doccheck_core::logging::{
    BufferedFileEventLogger, LogEvent, LogLevel, NoopEventLogger, SharedEventLogger,
};
use doccheck_core::metrics::{InMemoryMetrics, Metrics};
use doccheck_core::review::ReviewConfig;
use doccheck_core::reviewers::create_review_provider;
use doccheck_core::runner::ValidationRunner;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::Duration;

#[derive(Parser)]
#[command(name = "doccheck", about = "Check generated integration docs against package metadata")]
pub struct Cli {
    #[arg(long)]
    pub package: PathBuf,

    /// Document to check; defaults to docs/README.md inside the package
    #[arg(long)]
    pub doc: Option<PathBuf>,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit raw per-dimension results as JSON instead of the feedback report
    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(serde::Deserialize, Default)]
struct GlobalConfig {
    runtime: Option<RuntimeConfig>,
    review: Option<ReviewConfig>,
}

#[derive(serde::Deserialize, Default)]
struct RuntimeConfig {
    semantic_timeout_secs: Option<u64>,
}

fn load_global_config(path: Option<PathBuf>) -> GlobalConfig {
    let path = path.unwrap_or_else(|| PathBuf::from("doccheck.toml"));
    match std::fs::read_to_string(&path) {
        Ok(s) => toml::from_str::<GlobalConfig>(&s).unwrap_or_default(),
        Err(_) => GlobalConfig::default(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_global_config(cli.config.clone());

    let doc_path = cli
        .doc
        .clone()
        .unwrap_or_else(|| cli.package.join("docs").join("README.md"));
    let doc = std::fs::read_to_string(&doc_path)
        .map_err(|e| anyhow::anyhow!("cannot read document {}: {e}", doc_path.display()))?;

    let metrics: Arc<dyn Metrics> = Arc::new(InMemoryMetrics::new());
    let buffered = cli.log_dir.as_ref().map(|_| Arc::new(BufferedFileEventLogger::new(1024)));
    let logger: SharedEventLogger = match &buffered {
        Some(b) => b.clone(),
        None => Arc::new(NoopEventLogger),
    };

    let ctx = load_package_context(&cli.package)?;
    metrics.inc_context_loaded();

    let review_provider = config
        .review
        .map(|c| Arc::from(create_review_provider(c)));

    let semantic_timeout = config
        .runtime
        .and_then(|r| r.semantic_timeout_secs)
        .map(Duration::from_secs);

    let mut runner =
        ValidationRunner::new(review_provider, metrics.clone(), logger.clone(), semantic_timeout);
    if let Some(log_dir) = &cli.log_dir {
        runner = runner.with_report_dir(log_dir.display().to_string());
    }
    let results = runner.run(&doc, &ctx).await?;

    if let Some(log_dir) = &cli.log_dir {
        let snapshot = metrics.snapshot();
        logger.log(
            LogEvent::new(LogLevel::Info, "cli.run.completed")
                .with_package(ctx.name.clone())
                .with_report_dir(log_dir.display().to_string())
                .with_field("checks_run", snapshot.checks_run.to_string())
                .with_field("checks_failed", snapshot.checks_failed.to_string()),
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{}", render_feedback(&results));
    }

    if results.iter().any(|r| !r.valid) {
        std::process::exit(1);
    }
    Ok(())
}
