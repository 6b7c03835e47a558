//! Contact records: storage seam and CRUD service.

pub mod repository;
pub mod service;

pub use models::record::{Model as Record, RecordFields};
pub use repository::{JsonRecordRepository, RecordRepository, SeaOrmRecordRepository};
pub use service::RecordService;
