use crate::domain::model::{NameFields, NameOrder, RawRecord, RosterResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The shape every name-carrying type shares: anything exposing a first and
/// last name can stand in for a plain pair.
pub trait FullName {
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;

    fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn name_order(&self) -> NameOrder;
    fn titlecase(&self) -> bool;
    fn max_records(&self) -> Option<usize>;
    fn name_fields(&self) -> NameFields;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawRecord>>;
    async fn transform(&self, data: Vec<RawRecord>) -> Result<RosterResult>;
    async fn load(&self, result: RosterResult) -> Result<String>;
}
