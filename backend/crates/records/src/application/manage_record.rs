//! Record mutation Use Case
//!
//! Callers have already passed the guard; this layer validates input and
//! turns "no such id" into [`RecordsError::NotFound`].

use std::sync::Arc;

use crate::domain::record::{Record, RecordFields, parse_record_id};
use crate::domain::repository::RecordRepository;
use crate::error::{RecordsError, RecordsResult};

#[derive(Debug, Clone, Default)]
pub struct RecordInput {
    pub name: Option<String>,
    pub age: Option<String>,
    pub course: Option<String>,
}

impl RecordInput {
    fn validate(self) -> RecordsResult<RecordFields> {
        RecordFields::new(self.name, self.age, self.course)
    }
}

pub struct ManageRecordUseCase<R>
where
    R: RecordRepository,
{
    repo: Arc<R>,
}

impl<R> ManageRecordUseCase<R>
where
    R: RecordRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, raw_id: &str) -> RecordsResult<Record> {
        let id = parse_record_id(raw_id)?;
        self.repo.find(&id).await?.ok_or(RecordsError::NotFound)
    }

    pub async fn create(&self, input: RecordInput) -> RecordsResult<Record> {
        let fields = input.validate()?;
        let record = self.repo.insert(&fields).await?;
        tracing::info!(record_id = %record.id, "Record created");
        Ok(record)
    }

    /// Full replace of name, age and course
    pub async fn update(&self, raw_id: &str, input: RecordInput) -> RecordsResult<Record> {
        let id = parse_record_id(raw_id)?;
        let fields = input.validate()?;
        if !self.repo.update(&id, &fields).await? {
            return Err(RecordsError::NotFound);
        }
        tracing::info!(record_id = %id, "Record updated");
        Ok(Record::new(id, fields))
    }

    pub async fn delete(&self, raw_id: &str) -> RecordsResult<()> {
        let id = parse_record_id(raw_id)?;
        if !self.repo.delete(&id).await? {
            return Err(RecordsError::NotFound);
        }
        tracing::info!(record_id = %id, "Record deleted");
        Ok(())
    }
}
