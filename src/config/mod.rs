pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, MissingCities};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_json_file, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "state-city-join")]
#[command(about = "Join a list of states with their cities and write newStates.json")]
pub struct CliConfig {
    /// State dataset: a JSON array of objects with a `name` field
    #[arg(long, default_value = "states.json", conflicts_with = "config")]
    pub states: String,

    /// City dataset: a JSON object mapping state names to city lists
    #[arg(long, default_value = "cities.json", conflicts_with = "config")]
    pub cities: String,

    #[arg(long, default_value = "newStates.json", conflicts_with = "config")]
    pub output: String,

    /// Directory the input and output paths are resolved against
    #[arg(long, default_value = ".", conflicts_with = "config")]
    pub base_dir: String,

    /// What to write in `cities` for states missing from the city dataset
    #[arg(
        long,
        value_enum,
        default_value_t = MissingCities::Omit,
        conflicts_with = "config"
    )]
    pub missing_cities: MissingCities,

    #[arg(long, help = "Indent the output file", conflicts_with = "config")]
    pub pretty: bool,

    #[arg(long, help = "Do not print the merged records to stdout")]
    pub quiet: bool,

    /// Load settings from a TOML file instead of the path, join and format flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn states_path(&self) -> &str {
        &self.states
    }

    fn cities_path(&self) -> &str {
        &self.cities
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn missing_cities(&self) -> MissingCities {
        self.missing_cities
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_json_file("states", &self.states)?;
        validate_json_file("cities", &self.cities)?;
        validate_json_file("output", &self.output)?;
        validate_path("base_dir", &self.base_dir)
    }
}
