//! In-process record store for development runs and tests

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::RecordId;
use tokio::sync::RwLock;

use crate::domain::listing::{ListQuery, Page};
use crate::domain::record::{Record, RecordFields};
use crate::domain::repository::RecordRepository;
use crate::error::RecordsResult;

/// Ordered by id, matching the database ordering
#[derive(Clone, Default)]
pub struct InMemoryRecordRepository {
    records: Arc<RwLock<BTreeMap<RecordId, Record>>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

impl RecordRepository for InMemoryRecordRepository {
    async fn list(&self, query: &ListQuery) -> RecordsResult<Page<Record>> {
        let records = self.records.read().await;
        let matching: Vec<&Record> = records
            .values()
            .filter(|record| query.matches(&record.name))
            .collect();

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let items = matching
            .iter()
            .skip(offset)
            .take(query.page_size() as usize)
            .map(|record| (*record).clone())
            .collect();

        Ok(Page {
            items,
            total_count: matching.len() as u64,
            page: query.page(),
            page_size: query.page_size(),
        })
    }

    async fn list_all(&self) -> RecordsResult<Vec<Record>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find(&self, id: &RecordId) -> RecordsResult<Option<Record>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn insert(&self, fields: &RecordFields) -> RecordsResult<Record> {
        let record = Record::new(RecordId::new(), fields.clone());
        self.records
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: &RecordId, fields: &RecordFields) -> RecordsResult<bool> {
        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(record) => {
                *record = Record::new(*id, fields.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &RecordId) -> RecordsResult<bool> {
        Ok(self.records.write().await.remove(id).is_some())
    }
}
