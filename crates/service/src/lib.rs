//! Service layer for contact records.
//! - `record`: repository seam plus the CRUD service built on it.
//! - `upload`: persists attached files and hands back their public path.
//! - `storage`: file-backed collection used by the JSON repository.

pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod record;
pub mod upload;
