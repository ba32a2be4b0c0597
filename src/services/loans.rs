//! Loan lifecycle: borrowing creates a record, returning settles the fine

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, Item, User},
};

#[derive(Clone, Debug, Default)]
pub struct LoansService;

impl LoansService {
    pub fn new() -> Self {
        Self
    }

    /// Lend `item` to `user`. The strategy is chosen from the item's material type.
    pub fn borrow(&self, user: Arc<User>, item: &mut Item, date: NaiveDate) -> AppResult<BorrowRecord> {
        let record = BorrowRecord::for_item(user, Arc::new(item.clone()), date)?;
        item.mark_borrowed()?;

        tracing::info!(
            "Item {} lent to user {} until {}",
            item.id,
            record.user().id,
            record.due_date()
        );
        Ok(record)
    }

    /// Take `item` back and return the fine owed for this loan at `date`
    pub fn return_item(&self, record: &BorrowRecord, item: &mut Item, date: NaiveDate) -> AppResult<Decimal> {
        if record.item().id != item.id {
            return Err(AppError::Validation(format!(
                "item {} does not match the loan of item {}",
                item.id,
                record.item().id
            )));
        }
        if date < record.borrow_date() {
            return Err(AppError::Validation(format!(
                "return date {} is before borrow date {}",
                date,
                record.borrow_date()
            )));
        }
        item.mark_returned()?;

        let fine = record.fine(date);
        if fine.is_zero() {
            tracing::info!("Item {} returned on time by user {}", item.id, record.user().id);
        } else {
            tracing::info!(
                "Item {} returned {} days late by user {}, fine {}",
                item.id,
                record.overdue_days(date),
                record.user().id,
                fine
            );
        }
        Ok(fine)
    }
}
