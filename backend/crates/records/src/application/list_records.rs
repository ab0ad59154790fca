//! Listing Use Case

use std::sync::Arc;

use crate::application::config::RecordsConfig;
use crate::domain::listing::{ListQuery, Page};
use crate::domain::record::Record;
use crate::domain::repository::RecordRepository;
use crate::error::RecordsResult;

pub struct ListRecordsUseCase<R>
where
    R: RecordRepository,
{
    repo: Arc<R>,
    config: Arc<RecordsConfig>,
}

impl<R> ListRecordsUseCase<R>
where
    R: RecordRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<RecordsConfig>) -> Self {
        Self { repo, config }
    }

    /// One browser page; out-of-range pages come back empty
    pub async fn page(&self, search: Option<String>, page: u32) -> RecordsResult<Page<Record>> {
        let query = ListQuery::new(search, page, self.config.page_size);
        self.repo.list(&query).await
    }

    /// Every record, unpaginated (API listing)
    pub async fn all(&self) -> RecordsResult<Vec<Record>> {
        self.repo.list_all().await
    }
}
