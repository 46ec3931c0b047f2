pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{etl::EtlEngine, join::join_states, pipeline::JoinPipeline};
pub use domain::model::{
    CityMapping, MergedRecord, MissingCities, RunSummary, StateRecord, WriteOutcome,
};
pub use utils::error::{EtlError, Result};
