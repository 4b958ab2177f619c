use clap::{Parser, ValueEnum};
use clause_risk_core::config::AnalyzerConfig;
use clause_risk_core::error::{CoreError, ErrorKind};
use clause_risk_core::model::RiskLabel;
use clause_risk_core::pipeline::{AnalysisReport, ContractAnalyzer};
use clause_risk_core::risk::{ModelRiskScorer, RiskBand};
use clause_risk_core::segmentation::build_segmenter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    Rules,
    Model,
}

#[derive(Parser)]
#[command(about = "Segment a decoded contract and score each clause for risk")]
struct Args {
    /// UTF-8 text file holding the decoded contract
    file: PathBuf,
    #[arg(long, value_enum, default_value_t = Backend::Rules)]
    backend: Backend,
    /// JSON config overriding any subset of the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Artifact directory for the model backend (overrides artifacts.dir)
    #[arg(long)]
    artifacts: Option<PathBuf>,
    /// Only list clauses labelled Risky
    #[arg(long)]
    risky_only: bool,
    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<CoreError>() {
            Some(core) => {
                debug!(kind = ?core.kind(), "analysis failed");
                eprintln!("{}", user_message(core));
                ExitCode::from(exit_code(core.kind()))
            }
            None => {
                eprintln!("error: {:#}", e);
                ExitCode::from(1)
            }
        },
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(dir) = &args.artifacts {
        cfg.artifacts.dir = dir.clone();
    }

    let analyzer = match args.backend {
        Backend::Rules => ContractAnalyzer::with_rules(&cfg),
        Backend::Model => ContractAnalyzer::new(
            build_segmenter(&cfg.segmentation),
            Box::new(ModelRiskScorer::load(&cfg.artifacts)?),
        ),
    };

    info!(backend = analyzer.backend(), "analyzer ready");

    let text = std::fs::read_to_string(&args.file).map_err(CoreError::from)?;
    debug!(path = %args.file.display(), bytes = text.len(), "read contract text");
    let report = analyzer.analyze(&text)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, args.risky_only);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport, risky_only: bool) {
    let s = &report.summary;
    let band = match s.band() {
        RiskBand::High => "HIGH",
        RiskBand::Elevated => "ELEVATED",
        RiskBand::Low => "LOW",
    };
    println!(
        "clauses={} risky={} safe={} risk={:.1}% band={} backend={}",
        s.total, s.risky_count, s.safe_count, s.risk_percentage, band, report.backend
    );

    let verdicts: Vec<_> = if risky_only {
        report.with_label(RiskLabel::Risky).collect()
    } else {
        report.verdicts.iter().collect()
    };
    for v in verdicts {
        let keywords = if v.matched_keywords.is_empty() {
            String::new()
        } else {
            let list: Vec<&str> = v.matched_keywords.iter().map(String::as_str).collect();
            format!(" [{}]", list.join(", "))
        };
        println!(
            "#{:<3} {:<5} {:>5.1}%{}  {}",
            v.clause.id,
            v.label.as_str(),
            v.confidence * 100.0,
            keywords,
            v.clause.text
        );
    }
}

/// The only place error kinds become human-facing text.
fn user_message(e: &CoreError) -> String {
    match e.kind() {
        ErrorKind::EMPTY_INPUT => "The document contains no text to analyze.".to_string(),
        ErrorKind::NO_CLAUSES_FOUND => {
            "No clauses were found. The document may lack numbered sections or full sentences."
                .to_string()
        }
        ErrorKind::ARTIFACT_MISMATCH => format!(
            "The trained model and feature extractor do not belong together; retrain with risk_trainer. ({})",
            e
        ),
        ErrorKind::UNFITTED_EXTRACTOR => {
            format!("The feature extractor cannot be used for prediction. ({})", e)
        }
        ErrorKind::INVALID_CONFIG => format!("Configuration rejected: {}", e),
        ErrorKind::IO => format!("Could not read input: {}", e),
        ErrorKind::JSON | ErrorKind::CSV | ErrorKind::TRAINING_DATA => format!("error: {}", e),
    }
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::INVALID_CONFIG => 2,
        _ => 1,
    }
}
