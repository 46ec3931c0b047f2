use crate::core::join::{count_matches, join_states};
use crate::core::{
    CityMapping, ConfigProvider, JoinInput, MergedRecord, Pipeline, StateRecord, Storage,
};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

pub struct JoinPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> JoinPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Unreadable files and invalid JSON are errors; the document's shape is
    /// not checked here.
    async fn read_dataset(&self, path: &str) -> Result<Value> {
        tracing::debug!("Reading dataset: {}", path);
        let bytes = self
            .storage
            .read_file(path)
            .await
            .map_err(|e| EtlError::InputError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_slice(&bytes).map_err(|e| EtlError::InputError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Encode records the way they are written to the output file.
    pub fn encode(&self, records: &[MergedRecord]) -> Result<Vec<u8>> {
        let bytes = if self.config.pretty() {
            serde_json::to_vec_pretty(records)?
        } else {
            serde_json::to_vec(records)?
        };
        Ok(bytes)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for JoinPipeline<S, C> {
    async fn extract(&self) -> Result<JoinInput> {
        let states_path = self.config.states_path();
        let states = match self.read_dataset(states_path).await? {
            Value::Array(items) => items
                .into_iter()
                .map(StateRecord::from_value)
                .collect::<Vec<_>>(),
            other => {
                return Err(EtlError::InputError {
                    path: states_path.to_string(),
                    message: format!(
                        "expected a JSON array of states, found {}",
                        json_kind(&other)
                    ),
                })
            }
        };

        // 非物件的城市資料視為空對照表，所有州都查無城市
        let cities_doc = self.read_dataset(self.config.cities_path()).await?;
        let cities = CityMapping::from_value(cities_doc);

        tracing::debug!(
            "Loaded {} states and {} city lists",
            states.len(),
            cities.len()
        );

        Ok(JoinInput { states, cities })
    }

    async fn transform(&self, input: JoinInput) -> Result<Vec<MergedRecord>> {
        let policy = self.config.missing_cities();
        let matched = count_matches(&input.states, &input.cities);
        let merged = join_states(&input.states, &input.cities, policy);

        tracing::debug!(
            "Joined {} states, {} with cities, missing policy {:?}",
            merged.len(),
            matched,
            policy
        );

        Ok(merged)
    }

    async fn load(&self, records: &[MergedRecord]) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        let data = self.encode(records)?;

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage
            .write_file(&output_path, &data)
            .await
            .map_err(|e| match e {
                EtlError::IoError(source) => EtlError::WriteError {
                    path: output_path.clone(),
                    source,
                },
                other => other,
            })?;

        Ok(output_path)
    }
}
