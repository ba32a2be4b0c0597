//! Monetary statistics over a snapshot of borrow records

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{
    error::AppResult,
    models::{BorrowRecord, MaterialType, User},
    repository::borrow_records::BorrowRecordsRepository,
};

/// One user's fines at a date: the total and its split by material type
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserFines {
    pub total: Decimal,
    /// Only types the user borrowed appear
    pub by_material_type: IndexMap<MaterialType, Decimal>,
}

/// Read-only fine statistics. All sums are exact decimals, saturating at `Decimal::MAX`.
#[derive(Clone, Debug)]
pub struct FineReportService {
    records: Vec<BorrowRecord>,
}

impl FineReportService {
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

    fn records_of<'a>(&'a self, user: &'a User) -> impl Iterator<Item = &'a BorrowRecord> + 'a {
        self.records.iter().filter(move |r| r.belongs_to(user))
    }

    /// Sum of the user's fines at `as_of`; zero for a user without records
    pub fn total_fine_for_user(&self, user: &User, as_of: NaiveDate) -> Decimal {
        self.records_of(user)
            .map(|r| r.fine(as_of))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// The user's fines split by material type. Only types the user actually borrowed appear.
    pub fn fines_by_material_type(
        &self,
        user: &User,
        as_of: NaiveDate,
    ) -> IndexMap<MaterialType, Decimal> {
        let mut fines: IndexMap<MaterialType, Decimal> = IndexMap::new();
        for record in self.records_of(user) {
            let slot = fines
                .entry(record.item().material_type)
                .or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(record.fine(as_of));
        }
        fines
    }

    /// Total fine of every user owning at least one record, zero totals included
    pub fn total_fines_for_all_users(&self, as_of: NaiveDate) -> IndexMap<User, Decimal> {
        let mut totals: IndexMap<User, Decimal> = IndexMap::new();
        for record in &self.records {
            let slot = totals.entry(record.user().clone()).or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(record.fine(as_of));
        }
        tracing::debug!("Computed fines for {} users as of {}", totals.len(), as_of);
        totals
    }

    /// Total and per-type fines of every user, computed in a single pass over the snapshot
    pub fn fine_breakdown_for_all_users(&self, as_of: NaiveDate) -> IndexMap<User, UserFines> {
        let mut breakdown: IndexMap<User, UserFines> = IndexMap::new();
        for record in &self.records {
            let fine = record.fine(as_of);
            let entry = breakdown
                .entry(record.user().clone())
                .or_insert_with(|| UserFines {
                    total: Decimal::ZERO,
                    by_material_type: IndexMap::new(),
                });
            entry.total = entry.total.saturating_add(fine);
            let slot = entry
                .by_material_type
                .entry(record.item().material_type)
                .or_insert(Decimal::ZERO);
            *slot = slot.saturating_add(fine);
        }
        tracing::debug!("Computed fine breakdown for {} users as of {}", breakdown.len(), as_of);
        breakdown
    }
}
