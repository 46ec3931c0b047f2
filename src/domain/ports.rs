use crate::domain::model::{JoinInput, MergedRecord, MissingCities};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn states_path(&self) -> &str;
    fn cities_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn missing_cities(&self) -> MissingCities;
    fn pretty(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<JoinInput>;
    async fn transform(&self, input: JoinInput) -> Result<Vec<MergedRecord>>;
    async fn load(&self, records: &[MergedRecord]) -> Result<String>;
}
