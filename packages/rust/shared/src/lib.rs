//! Shared types, error model, and configuration for scenport.
//!
//! This crate is the foundation depended on by all other scenport crates.
//! It provides:
//! - [`ScenportError`] — the unified error type
//! - Domain types ([`StepRecord`], [`StepNode`], [`ExportEnvelope`], [`ImportDetail`])
//! - The [`IdGenerator`] capability for step id regeneration
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod idgen;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{Result, ScenportError};
pub use idgen::{IdGenerator, SequenceIdGenerator, UuidIdGenerator};
pub use types::{
    ExportEnvelope, ImportAnalysis, ImportDetail, SCENARIO_REF_STEP_TYPE, ScenarioCsv,
    ScenarioDetail, StepNode, StepParseResult, StepRecord,
};
