//! Execution Stack Binary
//!
//! Runs one execution request against the paper broker, or prints the
//! post-trade report for a telemetry stream.
//!
//! # Usage
//!
//! ```bash
//! execution-stack execute request.json
//! execution-stack report [paper|live]
//! ```
//!
//! # Environment Variables
//!
//! - `EXECUTION_CONFIG`: Path to the YAML config (default: `config.yaml`,
//!   missing file means defaults)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use execution_stack::application::ports::{BookSnapshot, MarketDataPort};
use execution_stack::application::services::TcaReport;
use execution_stack::application::use_cases::{ExecutionOrchestrator, OrchestratorConfig};
use execution_stack::config::{Config, DEFAULT_CONFIG_PATH, load_config_or_default};
use execution_stack::domain::market_impact::ProxyImpactModel;
use execution_stack::domain::order_execution::{ExecutionIntent, ExecutionRequest};
use execution_stack::domain::shared::{Symbol, TradingMode};
use execution_stack::error::ExecutionError;
use execution_stack::infrastructure::broker::PaperBroker;
use execution_stack::infrastructure::market_data::StaticMarketData;
use execution_stack::infrastructure::telemetry::{TelemetryRegistry, read_records, stream_path};
use execution_stack::observability::{MetricsConfig, init_logging, init_metrics};

/// Request file: an execution intent plus an optional book table. When the
/// table has the intent's symbol, that snapshot replaces the intent's book.
#[derive(Debug, Deserialize)]
struct RequestFile {
    #[serde(flatten)]
    intent: ExecutionIntent,
    #[serde(default)]
    market: BTreeMap<String, BookSnapshot>,
}

enum Command {
    Execute(String),
    Report(Option<TradingMode>),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Command> {
    match args.next().as_deref() {
        Some("execute") => {
            let path = args
                .next()
                .context("usage: execution-stack execute <request.json>")?;
            Ok(Command::Execute(path))
        }
        Some("report") => {
            let mode = args
                .next()
                .map(|m| m.parse::<TradingMode>())
                .transpose()
                .map_err(anyhow::Error::msg)?;
            Ok(Command::Report(mode))
        }
        _ => bail!("usage: execution-stack <execute <request.json> | report [paper|live]>"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config_path =
        std::env::var("EXECUTION_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            let err = ExecutionError::config(e.to_string()).with_context("path", &config_path);
            eprintln!("{}", serde_json::to_string_pretty(&err.to_response())?);
            return Ok(ExitCode::from(err.code().exit_code()));
        }
    };

    init_logging(&config.observability.logging);
    start_metrics(&config)?;

    match parse_args(std::env::args().skip(1))? {
        Command::Execute(path) => execute(&config, &path).await,
        Command::Report(mode) => {
            report(&config, mode.unwrap_or(config.environment.mode))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn start_metrics(config: &Config) -> anyhow::Result<()> {
    let settings = &config.observability.metrics;
    if !settings.enabled {
        return Ok(());
    }
    let addr: SocketAddr = settings
        .listen_addr
        .parse()
        .with_context(|| format!("invalid metrics listen_addr {}", settings.listen_addr))?;
    init_metrics(&MetricsConfig::with_addr(addr))?;
    Ok(())
}

async fn execute(config: &Config, path: &str) -> anyhow::Result<ExitCode> {
    if config.environment.mode.is_live() {
        bail!("execute runs against the paper broker; set environment.mode to PAPER");
    }

    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let file: RequestFile =
        serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;

    let request = match build_request(file).await {
        Ok(request) => request,
        Err(err) => return Ok(fail(&err)),
    };

    let registry = TelemetryRegistry::new(&config.telemetry);
    let recorder = match registry.recorder(TradingMode::Paper) {
        Ok(recorder) => recorder,
        Err(e) => return Ok(fail(&ExecutionError::telemetry(e.to_string()))),
    };

    let orchestrator = ExecutionOrchestrator::new(
        Arc::new(PaperBroker::new()),
        recorder,
        Arc::new(ProxyImpactModel::new(config.impact.clone())),
        OrchestratorConfig::from_config(config),
    );

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling remaining children");
            on_signal.cancel();
        }
    });

    match orchestrator.execute_with_cancel(request, cancel).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(fail(&err)),
    }
}

async fn build_request(file: RequestFile) -> Result<ExecutionRequest, ExecutionError> {
    let RequestFile { intent, market } = file;
    if market.is_empty() {
        return Ok(ExecutionRequest::new(intent)?);
    }

    let feed = market
        .into_iter()
        .fold(StaticMarketData::new(), |feed, (symbol, snapshot)| {
            feed.with_snapshot(&symbol, snapshot)
        });
    let symbol = Symbol::new(intent.symbol.as_str());
    let snapshot = feed
        .snapshot(&symbol)
        .await
        .map_err(|e| ExecutionError::precondition(e.to_string()).with_context("field", "market"))?;
    Ok(ExecutionRequest::from_snapshot(intent, snapshot)?)
}

fn report(config: &Config, mode: TradingMode) -> anyhow::Result<()> {
    let path = stream_path(&config.telemetry.base_dir, mode);
    let records = read_records(&path)?;
    let report = TcaReport::from_records(&records);

    write_report(&config.telemetry.base_dir, mode, &report)?;
    println!("{report}");
    Ok(())
}

fn write_report(base_dir: &Path, mode: TradingMode, report: &TcaReport) -> anyhow::Result<()> {
    std::fs::create_dir_all(base_dir)?;
    let path = base_dir.join(format!("tca_report_{}.json", mode.stream_key()));
    std::fs::write(&path, serde_json::to_vec_pretty(report)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn fail(err: &ExecutionError) -> ExitCode {
    tracing::error!(code = %err.code(), error = %err.message(), "Execution request failed");
    match serde_json::to_string_pretty(&err.to_response()) {
        Ok(body) => eprintln!("{body}"),
        Err(_) => eprintln!("{err}"),
    }
    ExitCode::from(err.code().exit_code())
}
