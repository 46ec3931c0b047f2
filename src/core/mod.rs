pub mod etl;
pub mod join;
pub mod pipeline;

pub use crate::domain::model::{
    CityMapping, JoinInput, MergedRecord, MissingCities, RunSummary, StateRecord, WriteOutcome,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
