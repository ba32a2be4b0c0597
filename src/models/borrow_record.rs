//! Borrow record: one historical loan event and its fine as of any date

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    fine_strategy::{FinePolicy, FineStrategy},
    item::Item,
    user::User,
};
use crate::error::{AppError, AppResult};

/// Label used when a record's item has no usable title
pub const UNKNOWN_ITEM_LABEL: &str = "Unknown item";

/// A loan event. Immutable once created; everything else is derived from the
/// borrow date, the strategy and the caller's reference date.
#[derive(Debug, Clone)]
pub struct BorrowRecord {
    user: Arc<User>,
    item: Arc<Item>,
    strategy: FineStrategy,
    borrow_date: NaiveDate,
}

impl BorrowRecord {
    pub fn new(
        user: Arc<User>,
        item: Arc<Item>,
        strategy: FineStrategy,
        borrow_date: NaiveDate,
    ) -> Self {
        Self {
            user,
            item,
            strategy,
            borrow_date,
        }
    }

    /// Record a loan with the standard strategy for the item's material type
    pub fn for_item(user: Arc<User>, item: Arc<Item>, borrow_date: NaiveDate) -> AppResult<Self> {
        let strategy = FineStrategy::for_material(item.material_type)?;
        Ok(Self::new(user, item, strategy, borrow_date))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn strategy(&self) -> &FineStrategy {
        &self.strategy
    }

    pub fn borrow_date(&self) -> NaiveDate {
        self.borrow_date
    }

    pub fn belongs_to(&self, user: &User) -> bool {
        self.user.as_ref() == user
    }

    pub fn due_date(&self) -> NaiveDate {
        self.borrow_date
            .checked_add_days(Days::new(u64::from(self.strategy.borrow_period_days())))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Overdue when the reference date is strictly after the due date
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        as_of > self.due_date()
    }

    pub fn overdue_days(&self, as_of: NaiveDate) -> i64 {
        (as_of - self.due_date()).num_days().max(0)
    }

    pub fn fine(&self, as_of: NaiveDate) -> Decimal {
        self.strategy.calculate_fine(self.overdue_days(as_of))
    }

    /// Grouping key for per-item statistics, e.g. `Dune (BOOK)`.
    /// Separate copies with the same title and material type share a label.
    pub fn item_label(&self) -> String {
        let title = self.item.title.trim();
        if title.is_empty() {
            return UNKNOWN_ITEM_LABEL.to_string();
        }
        format!("{} ({})", title, self.item.material_type)
    }
}

/// Persisted shape of a borrow record. Every field is optional so that
/// incomplete rows are reported as validation errors instead of parse errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorrowRecordRow {
    pub user: Option<User>,
    pub item: Option<Item>,
    pub borrow_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrow_period_days: Option<i64>,
}

impl TryFrom<BorrowRecordRow> for BorrowRecord {
    type Error = AppError;

    fn try_from(row: BorrowRecordRow) -> AppResult<Self> {
        let user = row
            .user
            .ok_or_else(|| AppError::Validation("borrow record has no user".to_string()))?;
        let item = row
            .item
            .ok_or_else(|| AppError::Validation("borrow record has no item".to_string()))?;
        let borrow_date = row
            .borrow_date
            .ok_or_else(|| AppError::Validation("borrow record has no borrow date".to_string()))?;

        let strategy = match (row.daily_rate, row.borrow_period_days) {
            (None, None) => FineStrategy::for_material(item.material_type)?,
            (rate, Some(period)) => {
                FineStrategy::with_policy(item.material_type, FinePolicy::new(rate, period)?)
            }
            (Some(_), None) => {
                return Err(AppError::Validation(
                    "borrow record has a daily rate but no borrow period".to_string(),
                ))
            }
        };

        Ok(BorrowRecord::new(
            Arc::new(user),
            Arc::new(item),
            strategy,
            borrow_date,
        ))
    }
}

impl From<&BorrowRecord> for BorrowRecordRow {
    fn from(record: &BorrowRecord) -> Self {
        Self {
            user: Some(record.user().clone()),
            item: Some(record.item().clone()),
            borrow_date: Some(record.borrow_date),
            daily_rate: Some(record.strategy.daily_rate()),
            borrow_period_days: Some(i64::from(record.strategy.borrow_period_days())),
        }
    }
}
