use clap::Parser;
use clause_risk_core::config::AnalyzerConfig;
use clause_risk_core::error::{CoreError, ErrorKind};
use clause_risk_core::training::{demo_corpus, load_corpus_csv, run_training};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Train and select the clause risk classifier")]
struct Args {
    /// Labelled CSV with columns clause_text,is_risky
    #[arg(long, conflicts_with = "demo", required_unless_present = "demo")]
    corpus: Option<PathBuf>,
    /// Train on the built-in ten-clause demo corpus
    #[arg(long)]
    demo: bool,
    /// JSON config overriding any subset of the defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Artifact directory (overrides artifacts.dir)
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = match e.downcast_ref::<CoreError>().map(CoreError::kind) {
                Some(ErrorKind::INVALID_CONFIG) => 2,
                _ => 1,
            };
            tracing::error!(exit_code = code, "training failed");
            eprintln!("training failed: {:#}", e);
            ExitCode::from(code)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(dir) = &args.out_dir {
        cfg.artifacts.dir = dir.clone();
    }

    let examples = match &args.corpus {
        Some(path) => {
            let examples = load_corpus_csv(path)?;
            info!(path = %path.display(), examples = examples.len(), "loaded corpus");
            examples
        }
        None => {
            info!("using built-in demo corpus");
            demo_corpus()
        }
    };
    println!("=== Clause Risk Classifier Training ===");
    println!("Dataset size: {} samples", examples.len());

    let outcome = run_training(&examples, &cfg)?;
    println!("Train: {}  |  Test: {}", outcome.train_size, outcome.test_size);
    for report in &outcome.evaluation.reports {
        println!("\n{}", report);
    }
    println!(
        "\nBest model: {}  (macro F1 = {:.4})",
        outcome.artifact.name, outcome.artifact.macro_f1
    );
    println!("Saved model      -> {}", outcome.paths.model_path.display());
    println!("Saved extractor  -> {}", outcome.paths.extractor_path.display());
    Ok(())
}
