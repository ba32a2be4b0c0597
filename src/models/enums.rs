//! Shared domain enums

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

// ---------------------------------------------------------------------------
// MaterialType
// ---------------------------------------------------------------------------

/// Classification of a library item, selects the fine policy applied to its loans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaterialType {
    Book,
    Cd,
    Journal,
}

impl MaterialType {
    /// All material types, in report column order
    pub const ALL: [MaterialType; 3] = [MaterialType::Book, MaterialType::Cd, MaterialType::Journal];

    pub fn as_code(&self) -> &'static str {
        match self {
            MaterialType::Book => "BOOK",
            MaterialType::Cd => "CD",
            MaterialType::Journal => "JOURNAL",
        }
    }

    /// Column heading used in exported reports
    pub fn column_label(&self) -> &'static str {
        match self {
            MaterialType::Book => "Book",
            MaterialType::Cd => "CD",
            MaterialType::Journal => "Journal",
        }
    }
}

impl FromStr for MaterialType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOOK" => Ok(MaterialType::Book),
            "CD" => Ok(MaterialType::Cd),
            "JOURNAL" => Ok(MaterialType::Journal),
            other => Err(AppError::Configuration(format!(
                "unsupported material type '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}
