//! Hybrid legal risk assessment for contract text: a deterministic
//! pattern-matching engine and an external reasoning service, reconciled
//! into a single conservative verdict per clause and per contract.
//!
//! Text extraction, clause segmentation, anonymization, and report
//! rendering are external collaborators; this crate consumes pre-segmented,
//! order-aligned clause lists and produces the analysis report.

pub mod analysis;
pub mod config;
pub mod error;
pub mod telemetry;

pub use analysis::{ContractReport, ContractRiskEngine, OutputLanguage, RiskLevel};
pub use config::{AppConfig, EngineConfig};
pub use error::AppError;
