//! Record store trait

use kernel::id::RecordId;

use crate::domain::listing::{ListQuery, Page};
use crate::domain::record::{Record, RecordFields};
use crate::error::RecordsResult;

/// Record persistence
///
/// Each call is atomic on its own; nothing spans calls. `list` counts and
/// fetches separately, so a page and its total may disagree under
/// concurrent writes.
#[trait_variant::make(RecordRepository: Send)]
pub trait LocalRecordRepository {
    async fn list(&self, query: &ListQuery) -> RecordsResult<Page<Record>>;
    async fn list_all(&self) -> RecordsResult<Vec<Record>>;
    async fn find(&self, id: &RecordId) -> RecordsResult<Option<Record>>;
    async fn insert(&self, fields: &RecordFields) -> RecordsResult<Record>;
    /// `false` when no record has this id
    async fn update(&self, id: &RecordId, fields: &RecordFields) -> RecordsResult<bool>;
    /// `false` when no record has this id
    async fn delete(&self, id: &RecordId) -> RecordsResult<bool>;
}
