//! swot-agent binary: the HTTP API plus one-shot CLI commands.
//!
//! ```text
//! swot-agent serve --port 8080
//! swot-agent analyze --mode pairwise --shop "Cafe A" --competitor "Cafe B" --data data/
//! swot-agent prompt --mode multi --shop "Cafe A" --competitor "Cafe B" --competitor "Cafe C"
//! ```
//!
//! Configuration comes from `SWOT_AGENT__*` environment variables (see
//! [`swot_agent::config`]). Results go to stdout, logs to stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use swot_agent::adapters::{
    app_router, exporter_for, provider_from_config, AnalysisAppState, CsvDatasetSource,
};
use swot_agent::application::{
    CompletionSettings, PreparePromptHandler, PreparePromptQuery, RunAnalysisError,
    RunAnalysisHandler,
};
use swot_agent::config::{self as app_config, AppConfig, ServerConfig};
use swot_agent::domain::context::{Dataset, SummaryOptions};
use swot_agent::domain::extraction::ExtractionOutcome;
use swot_agent::domain::foundation::{DomainError, ValidationError};
use swot_agent::domain::prompt::{AnalysisRequest, PromptBuilder, PromptProfile};
use swot_agent::domain::swot::{AnalysisMode, AnalysisResult, SwotCategory};
use swot_agent::ports::{
    CompletionError, DatasetError, DatasetSource, ExportError, ExportFormat,
};

#[derive(Parser)]
#[command(
    name = "swot-agent",
    version,
    about = "LLM-assisted SWOT analysis for cafes and restaurants"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// Overrides SWOT_AGENT__SERVER__HOST.
        #[arg(long)]
        host: Option<String>,
        /// Overrides SWOT_AGENT__SERVER__PORT.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one analysis and print the narrative and structured result.
    Analyze {
        #[command(flatten)]
        request: RequestArgs,
        /// Also write the report to this file. The extension picks the
        /// format: .json, .csv or .xlsx.
        #[arg(long)]
        export: Option<PathBuf>,
        /// Print the whole report as JSON instead of narrative plus result.
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt for a request without calling the model.
    Prompt {
        #[command(flatten)]
        request: RequestArgs,
    },
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// single, branch, pairwise, auto_detect or multi.
    #[arg(long, default_value = "single")]
    mode: AnalysisMode,

    /// The shop under analysis (the brand in branch mode).
    #[arg(long)]
    shop: Option<String>,

    /// Branch location, branch mode only.
    #[arg(long)]
    location: Option<String>,

    /// Competitor name. Pairwise takes one; repeat it for multi.
    #[arg(long = "competitor")]
    competitors: Vec<String>,

    /// Free-text context: reviews, notes, pasted data.
    #[arg(long, conflicts_with = "context_file")]
    context: Option<String>,

    /// Read the free-text context from a file.
    #[arg(long)]
    context_file: Option<PathBuf>,

    /// CSV file or directory of CSV files. Defaults to the configured data
    /// directory when it exists.
    #[arg(long)]
    data: Option<PathBuf>,
}

impl RequestArgs {
    fn to_request(&self) -> Result<AnalysisRequest, DomainError> {
        let shop = || {
            self.shop
                .clone()
                .ok_or_else(|| ValidationError::empty_field("shop"))
        };

        let request = match self.mode {
            AnalysisMode::Single => AnalysisRequest::single(shop()?)?,
            AnalysisMode::Branch => {
                let location = self
                    .location
                    .clone()
                    .ok_or_else(|| ValidationError::empty_field("location"))?;
                AnalysisRequest::branch(shop()?, location)?
            }
            AnalysisMode::Pairwise => match self.competitors.as_slice() {
                [competitor] => AnalysisRequest::pairwise(shop()?, competitor)?,
                _ => {
                    return Err(DomainError::validation(
                        "competitor",
                        "pairwise mode takes exactly one --competitor",
                    ))
                }
            },
            AnalysisMode::AutoDetect => AnalysisRequest::auto_detect(),
            AnalysisMode::Multi => AnalysisRequest::multi(shop()?, self.competitors.iter())?,
        };
        Ok(request)
    }

    fn context_text(&self) -> Result<Option<String>, CliError> {
        match (&self.context, &self.context_file) {
            (Some(text), _) => Ok(Some(text.clone())),
            (None, Some(path)) => Ok(Some(std::fs::read_to_string(path)?)),
            (None, None) => Ok(None),
        }
    }

    fn load_datasets(
        &self,
        source: &dyn DatasetSource,
        default_dir: &Path,
    ) -> Result<Vec<Dataset>, CliError> {
        let path = match &self.data {
            Some(path) => path.as_path(),
            None if default_dir.is_dir() => default_dir,
            None => return Ok(Vec::new()),
        };
        let report = source.load_path(path)?;
        tracing::debug!(
            path = %path.display(),
            loaded = report.datasets.len(),
            skipped = report.failures.len(),
            "Datasets loaded"
        );
        Ok(report.datasets)
    }

    fn query(&self, config: &AppConfig) -> Result<PreparePromptQuery, CliError> {
        let request = self.to_request()?;
        let datasets = self.load_datasets(&CsvDatasetSource::new(), &config.analysis.data_dir)?;
        let mut query = PreparePromptQuery::new(request).with_datasets(datasets);
        if let Some(context) = self.context_text()? {
            query = query.with_context(context);
        }
        Ok(query)
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] app_config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] app_config::ValidationError),

    #[error("{0}")]
    Request(#[from] DomainError),

    #[error(transparent)]
    Analysis(#[from] RunAnalysisError),

    #[error("provider setup failed: {0}")]
    Provider(#[from] CompletionError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.server);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if server.is_production() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), CliError> {
    match cli.command {
        Command::Serve { host, port } => serve(config, host, port).await,
        Command::Analyze {
            request,
            export,
            json,
        } => analyze(&config, &request, export.as_deref(), json).await,
        Command::Prompt { request } => print_prompt(&config, &request),
    }
}

async fn serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), CliError> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let handler = analysis_handler(&config)?;
    let state = AnalysisAppState::new(Arc::new(handler), Arc::new(CsvDatasetSource::new()));
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        provider = ?config.ai.provider,
        "swot-agent listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn analyze(
    config: &AppConfig,
    args: &RequestArgs,
    export: Option<&Path>,
    json_only: bool,
) -> Result<(), CliError> {
    config.validate()?;
    // Resolve the export format before spending a model call.
    let format = export.map(format_for_path).transpose()?;

    let handler = analysis_handler(config)?;
    let result = handler.handle(args.query(config)?).await?;

    if let ExtractionOutcome::Fallback(reason) = &result.outcome {
        eprintln!("note: showing default values ({})", reason);
    }

    if json_only {
        println!("{}", serde_json::to_string_pretty(&result.report)?);
    } else {
        println!("{}", result.report.narrative);
        println!();
        print!("{}", scorecard(&result.report.result));
    }

    if let (Some(path), Some(format)) = (export, format) {
        let bytes = exporter_for(format).export(&result.report, chrono::Local::now().date_naive())?;
        std::fs::write(path, bytes)?;
        tracing::info!(path = %path.display(), %format, "Report exported");
    }
    Ok(())
}

/// Scores and the top summary items per subject, then strategy lists.
fn scorecard(result: &AnalysisResult) -> String {
    let mut out = String::new();
    for subject in result.scored_subjects() {
        out.push_str(&format!(
            "{} (overall {:.1}/10)\n",
            subject.name,
            subject.scores.overall()
        ));
        for category in SwotCategory::all() {
            out.push_str(&format!(
                "  {}: {}/10\n",
                category.label(),
                subject.scores.get(*category)
            ));
            for item in subject.summary.for_display(*category) {
                out.push_str(&format!("    - {}\n", item));
            }
        }
        out.push('\n');
    }

    for (title, items) in result.strategy_sections() {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", title));
        for item in items {
            out.push_str(&format!("  - {}\n", item));
        }
    }
    out
}

fn print_prompt(config: &AppConfig, args: &RequestArgs) -> Result<(), CliError> {
    config.analysis.validate()?;
    let prepared = prompt_handler(config).handle(&args.query(config)?)?;
    println!("{}", prepared.prompt);
    Ok(())
}

fn format_for_path(path: &Path) -> Result<ExportFormat, ExportError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    extension.parse()
}

fn prompt_handler(config: &AppConfig) -> PreparePromptHandler {
    let builder = PromptBuilder::new(PromptProfile {
        market: config.analysis.market.clone(),
    });
    PreparePromptHandler::new(
        builder,
        SummaryOptions {
            sample_rows: config.analysis.sample_rows,
            full_content: false,
        },
    )
}

fn analysis_handler(config: &AppConfig) -> Result<RunAnalysisHandler, CliError> {
    let provider = provider_from_config(&config.ai)?;
    Ok(
        RunAnalysisHandler::new(provider, prompt_handler(config)).with_settings(CompletionSettings {
            temperature: config.ai.temperature,
            max_output_tokens: config.ai.max_output_tokens,
        }),
    )
}
