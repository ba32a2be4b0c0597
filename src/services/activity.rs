//! Usage statistics over a snapshot of borrow records

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{
    error::AppResult,
    models::{BorrowRecord, User},
    repository::borrow_records::BorrowRecordsRepository,
};

/// Read-only activity statistics. The records are copied at construction;
/// later changes to the caller's list are not seen.
#[derive(Clone, Debug)]
pub struct ActivityReportService {
    records: Vec<BorrowRecord>,
}

impl ActivityReportService {
    pub fn new(records: &[BorrowRecord]) -> Self {
        Self {
            records: records.to_vec(),
        }
    }

    /// Build from the stored history, failing if it cannot be loaded
    pub fn from_source(source: &BorrowRecordsRepository) -> AppResult<Self> {
        Ok(Self {
            records: source.load_all()?,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of loans per user, in order of first appearance. Ties are not broken.
    pub fn top_borrowers(&self) -> IndexMap<User, usize> {
        let mut counts: IndexMap<User, usize> = IndexMap::new();
        for record in &self.records {
            *counts.entry(record.user().clone()).or_insert(0) += 1;
        }
        tracing::debug!("Counted loans for {} borrowers", counts.len());
        counts
    }

    /// Borrowers sorted by loan count, highest first; equal counts keep first-appearance order
    pub fn ranked_borrowers(&self) -> Vec<(User, usize)> {
        let mut ranked: Vec<(User, usize)> = self.top_borrowers().into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Number of loans per item label (`title (TYPE)`)
    pub fn most_borrowed_items(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for record in &self.records {
            *counts.entry(record.item_label()).or_insert(0) += 1;
        }
        tracing::debug!("Counted loans for {} distinct items", counts.len());
        counts
    }

    /// Records of `user` that are overdue at `as_of`, in snapshot order
    pub fn overdue_items_for_user(&self, user: &User, as_of: NaiveDate) -> Vec<BorrowRecord> {
        self.records
            .iter()
            .filter(|r| r.belongs_to(user) && r.is_overdue(as_of))
            .cloned()
            .collect()
    }
}
