//! Records Backend Module
//!
//! - `domain/` - Record entity, field validation, listing rules, store trait
//! - `application/` - Listing and mutation use cases
//! - `infra/` - PostgreSQL and in-process record stores
//! - `presentation/` - Browser pages and the JSON API
//!
//! Every route is gated by the `auth` guard extractors: listing needs any
//! signed-in identity, mutations need the admin role.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::RecordsConfig;
pub use domain::listing::{ListQuery, Page};
pub use domain::record::{Record, RecordFields};
pub use domain::repository::RecordRepository;
pub use error::{RecordsError, RecordsResult};
pub use infra::memory::InMemoryRecordRepository;
pub use infra::postgres::PgRecordRepository;
pub use presentation::records_router;
