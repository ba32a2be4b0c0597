//! Catalog item model and its borrow/return lifecycle

use serde::{Deserialize, Serialize};

use super::enums::MaterialType;
use crate::error::{AppError, AppResult};

/// Catalog item (one physical copy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub title: String,
    pub material_type: MaterialType,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Item {
    pub fn new(id: i32, title: impl Into<String>, material_type: MaterialType) -> Self {
        Self {
            id,
            title: title.into(),
            material_type,
            available: true,
        }
    }

    /// Take the item off the shelf for a loan
    pub fn mark_borrowed(&mut self) -> AppResult<()> {
        if !self.available {
            return Err(AppError::BusinessRule(format!(
                "item {} ('{}') is already borrowed",
                self.id, self.title
            )));
        }
        self.available = false;
        Ok(())
    }

    /// Put the item back on the shelf
    pub fn mark_returned(&mut self) -> AppResult<()> {
        if self.available {
            return Err(AppError::BusinessRule(format!(
                "item {} ('{}') is not on loan",
                self.id, self.title
            )));
        }
        self.available = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut item = Item::new(7, "Dune", MaterialType::Book);
        assert!(item.available);

        item.mark_borrowed().unwrap();
        assert!(!item.available);
        assert!(matches!(item.mark_borrowed(), Err(AppError::BusinessRule(_))));

        item.mark_returned().unwrap();
        assert!(item.available);
        assert!(matches!(item.mark_returned(), Err(AppError::BusinessRule(_))));
    }

    #[test]
    fn test_available_defaults_to_true() {
        let item: Item =
            serde_json::from_str(r#"{"id": 1, "title": "Kind of Blue", "material_type": "CD"}"#)
                .unwrap();
        assert!(item.available);
        assert_eq!(item.material_type, MaterialType::Cd);
    }
}
