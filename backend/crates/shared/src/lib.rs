//! Shared Kernel
//!
//! Vocabulary shared by every crate in the record service:
//! - The unified error type and its HTTP classification
//! - Typed identifiers for stored entities
//!
//! Only things with the same meaning in the auth and records domains live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
