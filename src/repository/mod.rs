//! Repository layer: "load all / save all" persistence of circulation data

pub mod borrow_records;

use std::path::PathBuf;

use crate::config::DataConfig;

/// Main repository struct grouping the file-backed stores
#[derive(Clone, Debug)]
pub struct Repository {
    pub records: borrow_records::BorrowRecordsRepository,
}

impl Repository {
    pub fn new(records_path: impl Into<PathBuf>) -> Self {
        Self {
            records: borrow_records::BorrowRecordsRepository::new(records_path),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(config.records_path.clone())
    }
}
