//! Library circulation engine
//!
//! Borrowing rules, fine accrual per material type, and reporting over the
//! history of loans: activity statistics, fine totals and the CSV fines report.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
