//! Command-line interface for thumbnail-dl

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use thumbnail_dl::{Config, DownloadLimit, DownloadPlan, SizeCodeTable, ThumbnailDownloader};
use tracing_subscriber::EnvFilter;

/// Download thumbnails from a JSON playlist feed
#[derive(Parser, Debug)]
#[command(name = "thumbnail-dl")]
#[command(about = "Download thumbnails from a JSON playlist feed at a chosen size")]
#[command(version)]
pub struct Cli {
    /// URL of the JSON playlist feed
    #[arg(value_name = "FEED_URL", required_unless_present = "list_sizes")]
    pub feed_url: Option<String>,

    /// Desired thumbnail width [default: 1280]
    #[arg(long)]
    pub width: Option<u32>,

    /// Desired thumbnail height [default: 720]
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum number of thumbnails to download, or "all" [default: 20]
    #[arg(long, value_name = "N|all")]
    pub limit: Option<DownloadLimit>,

    /// List all known thumbnail sizes and exit
    #[arg(long)]
    pub list_sizes: bool,

    /// Directory to write thumbnails to [default: current directory]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Load the configuration file, if any, and apply flag overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(width) = self.width {
            config.selection.width = width;
        }
        if let Some(height) = self.height {
            config.selection.height = height;
        }
        if let Some(limit) = self.limit {
            config.selection.limit = limit;
        }
        if let Some(dir) = &self.output_dir {
            config.download.output_dir = dir.clone();
        }

        Ok(config)
    }
}

/// Main CLI entry point
///
/// # Errors
/// - Configuration file or flag errors
/// - An invalid feed URL
/// - Failure to set up the output directory or HTTP clients
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.list_sizes {
        print!("{}", render_size_table(&SizeCodeTable::builtin()));
        return Ok(());
    }

    let Some(feed_url) = cli.feed_url.as_deref() else {
        bail!("FEED_URL is required");
    };
    check_feed_url(feed_url)?;

    let config = cli.load_config()?;
    let downloader = ThumbnailDownloader::new(config)
        .await
        .context("Failed to set up downloader")?;

    let Some(plan) = downloader.plan(feed_url).await else {
        println!("No data to process.");
        return Ok(());
    };
    print!("{}", render_plan(&plan));

    let summary = downloader.execute(&plan).await;
    if !summary.failed.is_empty() {
        tracing::warn!(
            failed = summary.failed.len(),
            attempted = summary.attempted(),
            "Some thumbnails could not be downloaded"
        );
    }

    Ok(())
}

/// Install the fmt subscriber on stderr, honoring `RUST_LOG`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reject URLs that reqwest could never fetch
fn check_feed_url(feed_url: &str) -> anyhow::Result<()> {
    let url = url::Url::parse(feed_url).with_context(|| format!("Invalid feed URL '{feed_url}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => bail!("Unsupported feed URL scheme '{other}' (expected http or https)"),
    }
}

/// `--list-sizes` output
pub fn render_size_table(table: &SizeCodeTable) -> String {
    let mut lines = vec![
        "Known thumbnail sizes:".to_string(),
        String::new(),
        "Format      Width × Height".to_string(),
        "-".repeat(40),
    ];
    for (category, sizes) in table.sizes_by_aspect() {
        lines.push(String::new());
        lines.push(format!("{}:", category.label()));
        lines.extend(
            sizes
                .iter()
                .map(|size| format!("  {:4} × {:4}", size.width, size.height)),
        );
    }
    join_lines(lines)
}

/// Summary printed before downloading
///
/// The size block is shown whenever the first entry lists thumbnails, even if
/// none of them carries a usable size.
pub fn render_plan(plan: &DownloadPlan) -> String {
    let mut lines = Vec::new();
    if plan.first_entry_has_thumbnails {
        lines.push(String::new());
        lines.push("Available sizes in the feed:".to_string());
        lines.extend(plan.sample_sizes.iter().map(|size| format!("- {size}")));
        lines.push(String::new());
        lines.push(format!("Proceeding with requested size: {}", plan.target));
        lines.push(String::new());
    }
    lines.push(format!(
        "Found {} thumbnails to download (out of {} available).",
        plan.urls.len(),
        plan.total_available
    ));
    join_lines(lines)
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
