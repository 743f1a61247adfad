//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::CsvTradeAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_adapter::JsonTradeAdapter;
use crate::adapters::json_report::JsonReportAdapter;
use crate::adapters::text_report::TextReportAdapter;
use crate::domain::band::FractionPolicy;
use crate::domain::config_validation::{parse_large_loss_threshold, validate_rating_config};
use crate::domain::error::VRatingError;
use crate::domain::rating::{RatingBreakdown, RatingConfig, VRatingEngine};
use crate::domain::risk::DEFAULT_LARGE_LOSS_THRESHOLD;
use crate::domain::trade::DEFAULT_DATE_FORMAT;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::trade_port::TradePort;

#[derive(Parser, Debug)]
#[command(name = "vrating", about = "Rate a trading journal on a 0-10 scale")]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(
        long,
        global = true,
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rate the trades in a CSV or JSON file
    Rate {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overrides [report] format
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include matched bands and category statistics
        #[arg(long)]
        explain: bool,
    },
    /// Validate a configuration file and print the resolved settings
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Rate {
            trades,
            config,
            format,
            output,
            explain,
        } => run_rate(&trades, config.as_ref(), format, output.as_ref(), explain),
        Command::Validate { config } => run_validate(&config),
    }
}

fn fail(err: &VRatingError) -> ExitCode {
    error!("{err}");
    err.into()
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, VRatingError> {
    FileConfigAdapter::from_file(path).map_err(|e| VRatingError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_rating_config(config: &dyn ConfigPort) -> Result<RatingConfig, VRatingError> {
    let fraction_policy = match config.get_string("rating", "fraction_policy") {
        Some(raw) => raw
            .parse::<FractionPolicy>()
            .map_err(|reason| VRatingError::ConfigInvalid {
                section: "rating".into(),
                key: "fraction_policy".into(),
                reason,
            })?,
        None => FractionPolicy::default(),
    };
    let large_loss_threshold = match config.get_string("rating", "large_loss_threshold") {
        Some(raw) => parse_large_loss_threshold(&raw)?,
        None => DEFAULT_LARGE_LOSS_THRESHOLD,
    };

    Ok(RatingConfig {
        fraction_policy,
        large_loss_threshold,
    })
}

pub fn date_format(config: &dyn ConfigPort) -> String {
    config
        .get_string("input", "date_format")
        .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string())
}

/// CLI flags win over `[report]`; an `--explain` flag can only turn details on.
pub fn resolve_report(
    config: &dyn ConfigPort,
    format: Option<ReportFormat>,
    explain: bool,
) -> (ReportFormat, bool) {
    let format = format
        .or_else(|| {
            config
                .get_string("report", "format")
                .and_then(|raw| ReportFormat::from_str(raw.trim(), true).ok())
        })
        .unwrap_or(ReportFormat::Text);
    (format, explain || config.get_bool("report", "explain", false))
}

pub fn trade_port_for(path: &Path, date_format: &str) -> Box<dyn TradePort> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Box::new(JsonTradeAdapter::new(path.to_path_buf()))
    } else {
        Box::new(CsvTradeAdapter::new(path.to_path_buf(), date_format))
    }
}

pub fn report_port_for(format: ReportFormat) -> Box<dyn ReportPort> {
    match format {
        ReportFormat::Text => Box::new(TextReportAdapter),
        ReportFormat::Json => Box::new(JsonReportAdapter),
    }
}

/// Validate `config`, load the trade file and rate it.
pub fn rate_trades(
    trades_path: &Path,
    config: &dyn ConfigPort,
) -> Result<RatingBreakdown, VRatingError> {
    validate_rating_config(config)?;
    let rating_config = build_rating_config(config)?;

    let source = trade_port_for(trades_path, &date_format(config));
    info!("Loading trades from {}", source.source_name());
    let trades = source.load_trades()?;
    info!("Rating {} trades", trades.len());

    Ok(VRatingEngine::new(rating_config).rate_with_breakdown(&trades))
}

fn run_rate(
    trades_path: &Path,
    config_path: Option<&PathBuf>,
    format: Option<ReportFormat>,
    output_path: Option<&PathBuf>,
    explain: bool,
) -> ExitCode {
    let adapter = match config_path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => a,
                Err(e) => return fail(&e),
            }
        }
        None => FileConfigAdapter::empty(),
    };

    let breakdown = match rate_trades(trades_path, &adapter) {
        Ok(b) => b,
        Err(e) => return fail(&e),
    };
    info!("Overall rating {:.2}", breakdown.result.overall_rating);

    let (format, explain) = resolve_report(&adapter, format, explain);
    let reporter = report_port_for(format);
    let detail = explain.then_some(&breakdown);

    match output_path {
        Some(path) => {
            if let Err(e) = reporter.write(&breakdown.result, detail, path) {
                return fail(&e);
            }
            info!("Report written to {}", path.display());
        }
        None => match reporter.render(&breakdown.result, detail) {
            Ok(report) => print!("{report}"),
            Err(e) => return fail(&e),
        },
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    info!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(&e),
    };

    if let Err(e) = validate_rating_config(&adapter) {
        return fail(&e);
    }
    let rating = match build_rating_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let (format, explain) = resolve_report(&adapter, None, false);

    println!("fraction_policy      = {}", rating.fraction_policy);
    println!("large_loss_threshold = {}", rating.large_loss_threshold);
    println!("date_format          = {}", date_format(&adapter));
    println!("report format        = {:?}", format);
    println!("report explain       = {}", explain);
    info!("Config is valid");

    ExitCode::SUCCESS
}
