use crate::model::{NewYarn, Yarn, YarnFilter, YarnId, YarnWeight};
use anyhow::Result;

#[async_trait::async_trait]
pub trait YarnStore: Send + Sync {
    /// List yarns matching the filter, ordered by id
    async fn list_yarns(&self, filter: &YarnFilter) -> Result<Vec<Yarn>>;
    async fn get_yarn(&self, id: YarnId) -> Result<Option<Yarn>>;
    /// Exact lookup used to keep seeding idempotent
    async fn find_by_color_and_weight(&self, color: &str, weight: YarnWeight) -> Result<Option<Yarn>>;
    /// Validate and insert a yarn, returning it with its assigned id
    async fn insert_yarn(&self, yarn: NewYarn) -> Result<Yarn>;
    async fn count_yarns(&self) -> Result<i64>;
}
