//! Data models for the circulation engine

pub mod borrow_record;
pub mod enums;
pub mod fine_strategy;
pub mod item;
pub mod user;

// Re-export commonly used types
pub use borrow_record::{BorrowRecord, BorrowRecordRow, UNKNOWN_ITEM_LABEL};
pub use enums::MaterialType;
pub use fine_strategy::{FinePolicy, FineStrategy};
pub use item::Item;
pub use user::User;
