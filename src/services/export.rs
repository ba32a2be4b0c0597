//! Fines report rendering and CSV export

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::MaterialType,
    services::fines::FineReportService,
};

/// Column order of the fines report. Consumers rely on it.
pub const FINES_REPORT_HEADER: [&str; 5] = ["User", "Total Fines", "Book", "CD", "Journal"];

/// Where exported reports are written
#[cfg_attr(test, mockall::automock)]
pub trait ReportStorage: Send + Sync {
    fn create_dir_all(&self, path: &Path) -> AppResult<()>;
    fn write_text(&self, path: &Path, content: &str) -> AppResult<()>;
}

/// Local filesystem storage
#[derive(Clone, Copy, Debug, Default)]
pub struct FsReportStorage;

impl ReportStorage for FsReportStorage {
    fn create_dir_all(&self, path: &Path) -> AppResult<()> {
        fs::create_dir_all(path).map_err(|e| AppError::io(path, e))
    }

    fn write_text(&self, path: &Path, content: &str) -> AppResult<()> {
        fs::write(path, content).map_err(|e| AppError::io(path, e))
    }
}

#[derive(Clone)]
pub struct ReportExporter {
    fines: Arc<FineReportService>,
    storage: Arc<dyn ReportStorage>,
    reports_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(
        fines: Arc<FineReportService>,
        storage: Arc<dyn ReportStorage>,
        reports_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fines,
            storage,
            reports_dir: reports_dir.into(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    /// Deterministic report path for a date: `<reports_dir>/fines_<YYYY-MM-DD>.csv`
    pub fn report_path(&self, as_of: NaiveDate) -> PathBuf {
        self.reports_dir
            .join(format!("fines_{}.csv", as_of.format("%Y-%m-%d")))
    }

    /// Render the fines report: one row per user with the total and the
    /// Book/CD/Journal breakdown, absent types rendered as 0.
    pub fn generate_fines_report(&self, as_of: NaiveDate) -> AppResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(FINES_REPORT_HEADER)?;

        for (user, fines) in self.fines.fine_breakdown_for_all_users(as_of) {
            let mut row = Vec::with_capacity(FINES_REPORT_HEADER.len());
            row.push(user.display_name().to_string());
            row.push(format_amount(fines.total));
            for material in MaterialType::ALL {
                row.push(format_amount(
                    fines
                        .by_material_type
                        .get(&material)
                        .copied()
                        .unwrap_or(Decimal::ZERO),
                ));
            }
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Csv(e.into_error().into()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write the fines report to the reports directory, creating it if needed.
    /// Returns the path written.
    pub fn export_fines_report_to_csv(&self, as_of: NaiveDate) -> AppResult<PathBuf> {
        let content = self.generate_fines_report(as_of)?;
        let path = self.report_path(as_of);

        self.storage.create_dir_all(&self.reports_dir)?;
        self.storage.write_text(&path, &content)?;

        tracing::info!("Fines report for {} written to {}", as_of, path.display());
        Ok(path)
    }
}

fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}
