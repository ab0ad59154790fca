pub mod listing;
pub mod record;
pub mod repository;

pub use listing::{ListQuery, Page};
pub use record::{Record, RecordFields};
pub use repository::RecordRepository;
