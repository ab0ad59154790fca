//! Browser handlers
//!
//! Reads render a page and consume the pending flash message. Mutations end
//! in a redirect carrying a flash message, except validation failures which
//! re-render the form with the submitted values.

use auth::guard::{BrowserAdmin, BrowserUser};
use axum::Form;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use platform::flash::{Flash, clear_flash_cookie};
use platform::html::error_page;

use crate::application::list_records::ListRecordsUseCase;
use crate::application::manage_record::ManageRecordUseCase;
use crate::domain::record::parse_record_id;
use crate::domain::repository::RecordRepository;
use crate::error::{RecordsError, RecordsResult};
use crate::presentation::dto::{ListParams, RecordForm};
use crate::presentation::router::RecordsAppState;
use crate::presentation::views;

fn render(status: StatusCode, html: String, secure: bool) -> Response {
    (
        status,
        [(header::SET_COOKIE, clear_flash_cookie(secure))],
        Html(html),
    )
        .into_response()
}

fn redirect_with_flash(to: &str, flash: Flash, secure: bool) -> Response {
    (
        [(header::SET_COOKIE, flash.to_set_cookie(secure))],
        Redirect::to(to),
    )
        .into_response()
}

/// Map a failed record operation onto the browser surface
fn failure(err: RecordsError, secure: bool) -> Response {
    err.log();
    match err {
        RecordsError::InvalidId => {
            redirect_with_flash("/", Flash::danger("Invalid record id."), secure)
        }
        RecordsError::NotFound => {
            redirect_with_flash("/", Flash::danger("Record not found."), secure)
        }
        RecordsError::InvalidInput(msg) => redirect_with_flash("/", Flash::danger(msg), secure),
        RecordsError::StoreUnavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(error_page(
                "Service Unavailable",
                "The record store is temporarily unavailable. Please try again.",
            )),
        )
            .into_response(),
        RecordsError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(error_page("Internal Server Error", "Something went wrong.")),
        )
            .into_response(),
    }
}

/// Re-render a form after a validation error, or fall through to [`failure`]
fn form_failure(
    err: RecordsError,
    title: &str,
    action: &str,
    values: &RecordForm,
    secure: bool,
) -> Response {
    match err {
        RecordsError::InvalidInput(msg) => {
            tracing::debug!(error = %msg, "Record form rejected");
            render(
                StatusCode::BAD_REQUEST,
                views::record_form_page(title, action, values, Some(&Flash::danger(msg))),
                secure,
            )
        }
        other => failure(other, secure),
    }
}

fn read_form(form: Result<Form<RecordForm>, FormRejection>) -> RecordsResult<RecordForm> {
    form.map(|Form(f)| f)
        .map_err(|rejection| RecordsError::InvalidInput(rejection.body_text()))
}

/// GET /
pub async fn index<R>(
    user: BrowserUser,
    State(state): State<RecordsAppState<R>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response
where
    R: RecordRepository + Send + Sync + 'static,
{
    let secure = state.config.cookie_secure;
    let params = ListParams::from_query(query.as_deref());
    let use_case = ListRecordsUseCase::new(state.repo.clone(), state.config.clone());

    match use_case
        .page(params.search.clone(), params.page_number())
        .await
    {
        Ok(page) => {
            let flash = Flash::from_headers(&headers);
            let html = views::listing_page(
                &page,
                params.search.as_deref().map(str::trim),
                &user.identity,
                flash.as_ref(),
            );
            render(StatusCode::OK, html, secure)
        }
        Err(e) => failure(e, secure),
    }
}

/// GET /add
pub async fn add_form<R>(
    _admin: BrowserAdmin,
    State(state): State<RecordsAppState<R>>,
    headers: HeaderMap,
) -> Response
where
    R: RecordRepository + Send + Sync + 'static,
{
    let flash = Flash::from_headers(&headers);
    render(
        StatusCode::OK,
        views::record_form_page("Add Record", "/add", &RecordForm::default(), flash.as_ref()),
        state.config.cookie_secure,
    )
}

/// POST /add
pub async fn add<R>(
    _admin: BrowserAdmin,
    State(state): State<RecordsAppState<R>>,
    form: Result<Form<RecordForm>, FormRejection>,
) -> Response
where
    R: RecordRepository + Send + Sync + 'static,
{
    let secure = state.config.cookie_secure;
    let form = match read_form(form) {
        Ok(form) => form,
        Err(e) => return form_failure(e, "Add Record", "/add", &RecordForm::default(), secure),
    };
    let use_case = ManageRecordUseCase::new(state.repo.clone());

    match use_case.create(form.clone().into()).await {
        Ok(_) => redirect_with_flash("/", Flash::success("Record added."), secure),
        Err(e) => form_failure(e, "Add Record", "/add", &form, secure),
    }
}

/// GET /edit/{id}
pub async fn edit_form<R>(
    _admin: BrowserAdmin,
    State(state): State<RecordsAppState<R>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    R: RecordRepository + Send + Sync + 'static,
{
    let secure = state.config.cookie_secure;
    let use_case = ManageRecordUseCase::new(state.repo.clone());

    match use_case.get(&id).await {
        Ok(record) => {
            let flash = Flash::from_headers(&headers);
            let action = format!("/edit/{}", record.id);
            render(
                StatusCode::OK,
                views::record_form_page(
                    "Edit Record",
                    &action,
                    &RecordForm::from(&record),
                    flash.as_ref(),
                ),
                secure,
            )
        }
        Err(e) => failure(e, secure),
    }
}

/// POST /edit/{id}
pub async fn edit<R>(
    _admin: BrowserAdmin,
    State(state): State<RecordsAppState<R>>,
    Path(id): Path<String>,
    form: Result<Form<RecordForm>, FormRejection>,
) -> Response
where
    R: RecordRepository + Send + Sync + 'static,
{
    let secure = state.config.cookie_secure;
    if let Err(e) = parse_record_id(&id) {
        return failure(e, secure);
    }

    let action = format!("/edit/{}", id.trim());
    let form = match read_form(form) {
        Ok(form) => form,
        Err(e) => return form_failure(e, "Edit Record", &action, &RecordForm::default(), secure),
    };
    let use_case = ManageRecordUseCase::new(state.repo.clone());

    match use_case.update(&id, form.clone().into()).await {
        Ok(_) => redirect_with_flash("/", Flash::success("Record updated."), secure),
        Err(e) => form_failure(e, "Edit Record", &action, &form, secure),
    }
}

/// GET /delete/{id}
pub async fn delete<R>(
    _admin: BrowserAdmin,
    State(state): State<RecordsAppState<R>>,
    Path(id): Path<String>,
) -> Response
where
    R: RecordRepository + Send + Sync + 'static,
{
    let secure = state.config.cookie_secure;
    let use_case = ManageRecordUseCase::new(state.repo.clone());

    match use_case.delete(&id).await {
        Ok(()) => redirect_with_flash("/", Flash::success("Record deleted."), secure),
        Err(e) => failure(e, secure),
    }
}
