pub mod config;
pub mod list_records;
pub mod manage_record;

pub use config::RecordsConfig;
pub use list_records::ListRecordsUseCase;
pub use manage_record::ManageRecordUseCase;
