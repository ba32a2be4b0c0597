//! Business logic services

pub mod activity;
pub mod export;
pub mod fines;
pub mod loans;

use std::sync::Arc;

use crate::{config::ReportsConfig, models::BorrowRecord};

pub use activity::ActivityReportService;
pub use export::{FsReportStorage, ReportExporter, ReportStorage};
pub use fines::{FineReportService, UserFines};
pub use loans::LoansService;

/// Container for all services built over one record snapshot
#[derive(Clone)]
pub struct Services {
    pub activity: Arc<ActivityReportService>,
    pub fines: Arc<FineReportService>,
    pub exporter: ReportExporter,
    pub loans: LoansService,
}

impl Services {
    /// Create all services over `records`, exporting to the local filesystem
    pub fn new(records: &[BorrowRecord], reports_config: &ReportsConfig) -> Self {
        Self::with_storage(records, reports_config, Arc::new(FsReportStorage))
    }

    pub fn with_storage(
        records: &[BorrowRecord],
        reports_config: &ReportsConfig,
        storage: Arc<dyn ReportStorage>,
    ) -> Self {
        let fines = Arc::new(FineReportService::new(records));
        Self {
            activity: Arc::new(ActivityReportService::new(records)),
            exporter: ReportExporter::new(fines.clone(), storage, reports_config.directory.clone()),
            fines,
            loans: LoansService::new(),
        }
    }
}
