//! Presentation Layer
//!
//! Browser pages and the JSON API over the same guard and store.

pub mod api;
pub mod browser;
pub mod dto;
pub mod router;
pub mod views;

pub use router::{RecordsAppState, records_router};
