mod indicator;
mod input;
mod render;
mod results;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use sma_client::AnalysisClient;
use sma_core::{AppConfig, ManualPlatform, Sentiment, SessionStore};

use crate::input::ManualSource;
use crate::render::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "sma")]
#[command(about = "Social media sentiment analysis client")]
struct Cli {
    /// Base address of the analysis service (overrides `SMA_API_BASE`)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a single comment source
    Analyze {
        #[command(subcommand)]
        command: AnalyzeCommands,
    },
    /// Analyze the service's built-in demo comments
    Demo,
    /// Analyze a creator across several URLs and pasted sources
    Creator {
        /// Creator name or handle
        #[arg(long, default_value = "")]
        name: String,

        /// Content URL to include (repeatable)
        #[arg(long = "url")]
        urls: Vec<String>,

        /// Manually collected comments as `PLATFORM=PATH` (repeatable);
        /// platform is one of instagram, tiktok, twitter, other
        #[arg(long = "manual", value_parser = parse_manual_source)]
        manual: Vec<ManualSource>,
    },
    /// Show the report for the current session
    Show {
        /// Which comment bucket to list
        #[arg(long, value_enum, default_value_t = SentimentFilter::Positive)]
        filter: SentimentFilter,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Export the current session's counts and comments to CSV
    Export {
        /// Output file; defaults to `<title>_analysis.csv` in `SMA_EXPORT_DIR`
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Forget the current session
    New,
}

#[derive(Debug, Subcommand)]
enum AnalyzeCommands {
    /// Analyze pasted comments, one per line (reads stdin without --file)
    Text {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Analyze the comments at a URL
    Url { url: String },
    /// Analyze a CSV upload, one comment per line
    Csv { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SentimentFilter {
    Positive,
    Negative,
    Neutral,
}

impl From<SentimentFilter> for Sentiment {
    fn from(filter: SentimentFilter) -> Self {
        match filter {
            SentimentFilter::Positive => Sentiment::Positive,
            SentimentFilter::Negative => Sentiment::Negative,
            SentimentFilter::Neutral => Sentiment::Neutral,
        }
    }
}

fn parse_manual_source(raw: &str) -> Result<ManualSource, String> {
    let (platform, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PLATFORM=PATH, got '{raw}'"))?;
    let platform: ManualPlatform = platform.parse().map_err(|e| format!("{e}"))?;
    if path.trim().is_empty() {
        return Err(format!("missing file path in '{raw}'"));
    }
    Ok(ManualSource {
        platform,
        path: PathBuf::from(path.trim()),
    })
}

fn build_client(config: &AppConfig) -> anyhow::Result<AnalysisClient> {
    Ok(AnalysisClient::new(
        &config.api_base,
        config.request_timeout_secs,
        &config.user_agent,
    )?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = sma_core::load_app_config()?;
    if let Some(api_base) = cli.api_base {
        sma_core::validate_api_base("--api-base", &api_base)?;
        config.api_base = api_base;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let Some(command) = cli.command else {
        println!("{}", results::START_HINT);
        return Ok(());
    };

    let open_store = || SessionStore::open(&config.state_path);

    match command {
        Commands::Analyze { command } => {
            let submission = match command {
                AnalyzeCommands::Text { title, file } => {
                    input::text_submission(&title, file.as_deref())?
                }
                AnalyzeCommands::Url { url } => input::url_submission(&url)?,
                AnalyzeCommands::Csv { path } => input::csv_submission(&path)?,
            };
            let client = build_client(&config)?;
            input::submit(&client, &mut open_store()?, submission).await?;
        }
        Commands::Demo => {
            let client = build_client(&config)?;
            input::submit(&client, &mut open_store()?, input::Submission::Demo).await?;
        }
        Commands::Creator { name, urls, manual } => {
            let submission = input::creator_submission(&name, &urls, &manual)?;
            let client = build_client(&config)?;
            input::submit(&client, &mut open_store()?, submission).await?;
        }
        Commands::Show { filter, format } => {
            let client = build_client(&config)?;
            results::run_show(&client, &mut open_store()?, filter.into(), format).await?;
        }
        Commands::Export { out } => {
            let client = build_client(&config)?;
            results::run_export(&client, &mut open_store()?, out, &config.export_dir).await?;
        }
        Commands::New => results::run_new(&config.state_path)?,
    }

    Ok(())
}
