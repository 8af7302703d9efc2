use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use contract_ai::analysis::{OutputLanguage, RuleBreakdown, RuleCatalog};
use contract_ai::config::{AppConfig, EscalationThresholds, TelemetryConfig};
use contract_ai::error::AppError;
use contract_ai::{telemetry, ContractRiskEngine};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Contract Risk Analyzer",
    about = "Assess legal risk in pre-segmented contract text using rules plus a reasoning service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full hybrid analysis and emit the JSON report
    Analyze(AnalyzeArgs),
    /// Run only the deterministic rule pass and emit the category breakdown
    Rules(RulesArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Pre-segmented contract document (JSON)
    input: PathBuf,
    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output language for narrative fields (english or hindi)
    #[arg(long, default_value = "english", value_parser = parse_language)]
    language: OutputLanguage,
}

#[derive(Args, Debug)]
struct RulesArgs {
    /// Pre-segmented contract document (JSON)
    input: PathBuf,
}

/// Input shape produced by the extraction/preprocessing collaborators.
#[derive(Debug, Deserialize)]
struct ContractDocument {
    original_clauses: Vec<String>,
    #[serde(default)]
    anonymised_clauses: Vec<String>,
    #[serde(default)]
    full_text: Option<String>,
    #[serde(default)]
    anonymisation_map: BTreeMap<String, String>,
}

impl ContractDocument {
    fn read(path: &PathBuf) -> Result<Self, AppError> {
        let raw = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&raw);
        let mut document: ContractDocument = serde_json::from_str(&text)?;
        if document.anonymised_clauses.is_empty() {
            document.anonymised_clauses = document.original_clauses.clone();
        }
        Ok(document)
    }

    fn full_text(&self) -> String {
        match &self.full_text {
            Some(text) => text.clone(),
            None => self.original_clauses.join("\n\n"),
        }
    }
}

fn parse_language(raw: &str) -> Result<OutputLanguage, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "english" | "en" => Ok(OutputLanguage::English),
        "hindi" | "hi" => Ok(OutputLanguage::Hindi),
        other => Err(format!("unsupported language '{other}' (expected english or hindi)")),
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => analyze(args).await,
        Command::Rules(args) => rules_only(args),
    }
}

async fn analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let document = ContractDocument::read(&args.input)?;
    info!(
        clauses = document.original_clauses.len(),
        input = %args.input.display(),
        "loaded contract document"
    );

    let engine = ContractRiskEngine::new(config.engine)?;
    let mut report = engine
        .analyze(
            &document.original_clauses,
            &document.anonymised_clauses,
            &document.full_text(),
            args.language,
        )
        .await;
    report.anonymisation_map = document.anonymisation_map;

    let rendered = serde_json::to_string_pretty(&report)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!(output = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }

    info!(
        overall_risk = report.summary.overall_risk_final.label(),
        completeness = report.summary.contract_completeness_score,
        "analysis finished"
    );
    Ok(())
}

fn rules_only(args: RulesArgs) -> Result<(), AppError> {
    telemetry::init(&TelemetryConfig {
        log_level: "info".to_string(),
    })?;

    let document = ContractDocument::read(&args.input)?;
    let catalog = RuleCatalog::builtin();
    let thresholds = EscalationThresholds::default();

    let mut findings = Vec::new();
    for clause in &document.original_clauses {
        findings.extend(catalog.evaluate(clause));
    }
    let breakdown = RuleBreakdown::from_findings(&findings, &thresholds);

    println!("{}", serde_json::to_string_pretty(&breakdown)?);
    Ok(())
}
