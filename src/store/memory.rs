use anyhow::Result;
use parking_lot::RwLock;

use crate::model::{NewYarn, Yarn, YarnFilter, YarnId, YarnWeight};
use crate::store::traits::YarnStore;

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Yarn>,
    last_id: YarnId,
}

/// Process-local yarn table, used by tests and by the `memory` backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl YarnStore for MemoryStore {
    async fn list_yarns(&self, filter: &YarnFilter) -> Result<Vec<Yarn>> {
        let inner = self.inner.read();
        Ok(inner
            .rows
            .iter()
            .filter(|yarn| filter.matches(yarn))
            .cloned()
            .collect())
    }

    async fn get_yarn(&self, id: YarnId) -> Result<Option<Yarn>> {
        let inner = self.inner.read();
        Ok(inner.rows.iter().find(|yarn| yarn.id == id).cloned())
    }

    async fn find_by_color_and_weight(&self, color: &str, weight: YarnWeight) -> Result<Option<Yarn>> {
        let inner = self.inner.read();
        Ok(inner
            .rows
            .iter()
            .find(|yarn| yarn.color == color && yarn.weight == weight)
            .cloned())
    }

    async fn insert_yarn(&self, yarn: NewYarn) -> Result<Yarn> {
        yarn.validate()?;

        let mut inner = self.inner.write();
        inner.last_id += 1;
        let yarn = Yarn::from_new(inner.last_id, yarn);
        inner.rows.push(yarn.clone());
        Ok(yarn)
    }

    async fn count_yarns(&self) -> Result<i64> {
        Ok(self.inner.read().rows.len() as i64)
    }
}
