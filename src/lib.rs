pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{ExportSink, HttpDeviceSink, LocalStorage};
pub use config::toml_config::TomlConfig;
pub use crate::core::engine::SeedEngine;
pub use domain::model::{DeviceRecord, ExportFormat, Place, ReferenceData, RunSummary, SeedPlan};
pub use utils::error::{Result, SeederError};
