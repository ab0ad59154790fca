//! PostgreSQL record store
//!
//! Every call is bounded by the configured timeout; expiry surfaces as
//! [`RecordsError::StoreUnavailable`](crate::error::RecordsError).

use std::future::Future;
use std::time::Duration;

use kernel::id::RecordId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::listing::{ListQuery, Page, like_pattern};
use crate::domain::record::{Record, RecordFields};
use crate::domain::repository::RecordRepository;
use crate::error::RecordsResult;

#[derive(Clone)]
pub struct PgRecordRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, call: F) -> RecordsResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        Ok(tokio::time::timeout(self.timeout, call).await??)
    }
}

impl RecordRepository for PgRecordRepository {
    async fn list(&self, query: &ListQuery) -> RecordsResult<Page<Record>> {
        let pattern = query.filter().map(like_pattern);

        let total_count = self
            .bounded(
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COUNT(*)
                    FROM records
                    WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')
                    "#,
                )
                .bind(pattern.as_deref())
                .fetch_one(&self.pool),
            )
            .await?;

        let rows = self
            .bounded(
                sqlx::query_as::<_, RecordRow>(
                    r#"
                    SELECT record_id, name, age, course
                    FROM records
                    WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\')
                    ORDER BY record_id ASC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(pattern.as_deref())
                .bind(i64::from(query.page_size()))
                .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(Page {
            items: rows.into_iter().map(RecordRow::into_record).collect(),
            total_count: u64::try_from(total_count).unwrap_or_default(),
            page: query.page(),
            page_size: query.page_size(),
        })
    }

    async fn list_all(&self) -> RecordsResult<Vec<Record>> {
        let rows = self
            .bounded(
                sqlx::query_as::<_, RecordRow>(
                    r#"
                    SELECT record_id, name, age, course
                    FROM records
                    ORDER BY record_id ASC
                    "#,
                )
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(RecordRow::into_record).collect())
    }

    async fn find(&self, id: &RecordId) -> RecordsResult<Option<Record>> {
        let row = self
            .bounded(
                sqlx::query_as::<_, RecordRow>(
                    r#"
                    SELECT record_id, name, age, course
                    FROM records
                    WHERE record_id = $1
                    "#,
                )
                .bind(*id.as_uuid())
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.map(RecordRow::into_record))
    }

    async fn insert(&self, fields: &RecordFields) -> RecordsResult<Record> {
        let id = RecordId::new();
        self.bounded(
            sqlx::query(
                r#"
                INSERT INTO records (record_id, name, age, course)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(*id.as_uuid())
            .bind(fields.name())
            .bind(fields.age())
            .bind(fields.course())
            .execute(&self.pool),
        )
        .await?;

        Ok(Record::new(id, fields.clone()))
    }

    async fn update(&self, id: &RecordId, fields: &RecordFields) -> RecordsResult<bool> {
        let result = self
            .bounded(
                sqlx::query(
                    r#"
                    UPDATE records
                    SET name = $2, age = $3, course = $4
                    WHERE record_id = $1
                    "#,
                )
                .bind(*id.as_uuid())
                .bind(fields.name())
                .bind(fields.age())
                .bind(fields.course())
                .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: &RecordId) -> RecordsResult<bool> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM records WHERE record_id = $1")
                    .bind(*id.as_uuid())
                    .execute(&self.pool),
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[derive(sqlx::FromRow)]
struct RecordRow {
    record_id: Uuid,
    name: String,
    age: String,
    course: String,
}

impl RecordRow {
    fn into_record(self) -> Record {
        Record {
            id: RecordId::from_uuid(self.record_id),
            name: self.name,
            age: self.age,
            course: self.course,
        }
    }
}
