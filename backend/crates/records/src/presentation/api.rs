//! JSON API handlers
//!
//! Guard failures, bad input and store failures all answer with a status
//! code and a problem document; nothing here redirects.

use auth::guard::{ApiAdmin, ApiUser};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::application::list_records::ListRecordsUseCase;
use crate::application::manage_record::ManageRecordUseCase;
use crate::domain::record::parse_record_id;
use crate::domain::repository::RecordRepository;
use crate::error::{RecordsError, RecordsResult};
use crate::presentation::dto::{MessageResponse, RecordPayload, RecordResponse};
use crate::presentation::router::RecordsAppState;

fn read_body(body: Result<Json<RecordPayload>, JsonRejection>) -> RecordsResult<RecordPayload> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| RecordsError::InvalidInput(rejection.body_text()))
}

/// GET /api/records
///
/// Unpaginated, unlike the browser listing.
pub async fn list<R>(
    _user: ApiUser,
    State(state): State<RecordsAppState<R>>,
) -> RecordsResult<Json<Vec<RecordResponse>>>
where
    R: RecordRepository + Send + Sync + 'static,
{
    let use_case = ListRecordsUseCase::new(state.repo.clone(), state.config.clone());
    let records = use_case.all().await?;
    Ok(Json(records.into_iter().map(RecordResponse::from).collect()))
}

/// POST /api/records
pub async fn create<R>(
    admin: ApiAdmin,
    State(state): State<RecordsAppState<R>>,
    body: Result<Json<RecordPayload>, JsonRejection>,
) -> RecordsResult<(StatusCode, Json<RecordResponse>)>
where
    R: RecordRepository + Send + Sync + 'static,
{
    let payload = read_body(body)?;
    let use_case = ManageRecordUseCase::new(state.repo.clone());
    let record = use_case.create(payload.into()).await?;
    tracing::debug!(user_name = %admin.identity.user_name, record_id = %record.id, "API create");
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// PUT /api/records/{id}
pub async fn update<R>(
    _admin: ApiAdmin,
    State(state): State<RecordsAppState<R>>,
    Path(id): Path<String>,
    body: Result<Json<RecordPayload>, JsonRejection>,
) -> RecordsResult<Json<MessageResponse>>
where
    R: RecordRepository + Send + Sync + 'static,
{
    parse_record_id(&id)?;
    let payload = read_body(body)?;
    let use_case = ManageRecordUseCase::new(state.repo.clone());
    use_case.update(&id, payload.into()).await?;
    Ok(Json(MessageResponse::new("Record updated")))
}

/// DELETE /api/records/{id}
pub async fn delete<R>(
    _admin: ApiAdmin,
    State(state): State<RecordsAppState<R>>,
    Path(id): Path<String>,
) -> RecordsResult<Json<MessageResponse>>
where
    R: RecordRepository + Send + Sync + 'static,
{
    let use_case = ManageRecordUseCase::new(state.repo.clone());
    use_case.delete(&id).await?;
    Ok(Json(MessageResponse::new("Record deleted")))
}
