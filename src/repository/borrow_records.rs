//! Borrow records repository backed by a JSON file

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{
    error::{AppError, AppResult},
    models::borrow_record::{BorrowRecord, BorrowRecordRow},
};

#[derive(Clone, Debug)]
pub struct BorrowRecordsRepository {
    path: PathBuf,
}

impl BorrowRecordsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every borrow record. A missing file is an empty history.
    pub fn load_all(&self) -> AppResult<Vec<BorrowRecord>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No borrow records file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(AppError::io(&self.path, e)),
        };

        let rows: Option<Vec<BorrowRecordRow>> = serde_json::from_str(&raw)?;
        let rows = rows.ok_or_else(|| {
            AppError::Validation("borrow record collection is missing".to_string())
        })?;

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                BorrowRecord::try_from(row).map_err(|e| match e {
                    AppError::Validation(msg) => {
                        AppError::Validation(format!("record #{}: {}", idx + 1, msg))
                    }
                    other => other,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        tracing::info!("Loaded {} borrow records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Replace the stored history with `records`
    pub fn save_all(&self, records: &[BorrowRecord]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }

        let rows: Vec<BorrowRecordRow> = records.iter().map(BorrowRecordRow::from).collect();
        let json = serde_json::to_string_pretty(&rows)?;
        fs::write(&self.path, json).map_err(|e| AppError::io(&self.path, e))?;

        tracing::info!("Saved {} borrow records to {}", rows.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, MaterialType, User};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn sample_records() -> Vec<BorrowRecord> {
        let alice = Arc::new(User::new(1, "Alice"));
        let bob = Arc::new(User::new(2, "Bob"));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        vec![
            BorrowRecord::for_item(alice.clone(), Arc::new(Item::new(1, "Dune", MaterialType::Book)), date)
                .unwrap(),
            BorrowRecord::for_item(bob, Arc::new(Item::new(2, "Nature", MaterialType::Journal)), date)
                .unwrap(),
            BorrowRecord::for_item(alice, Arc::new(Item::new(3, "Help!", MaterialType::Cd)), date)
                .unwrap(),
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = BorrowRecordsRepository::new(dir.path().join("none.json"));
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = BorrowRecordsRepository::new(dir.path().join("nested/records.json"));
        let records = sample_records();

        repo.save_all(&records).unwrap();
        let loaded = repo.load_all().unwrap();

        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].user().name, "Alice");
        assert_eq!(loaded[1].item_label(), "Nature (JOURNAL)");
        assert_eq!(loaded[2].strategy().borrow_period_days(), 7);
    }

    #[test]
    fn test_null_collection_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "null").unwrap();

        let err = BorrowRecordsRepository::new(&path).load_all().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_incomplete_row_names_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            r#"[{"user": {"id": 1, "name": "Alice"}, "item": null, "borrow_date": "2024-01-01"}]"#,
        )
        .unwrap();

        match BorrowRecordsRepository::new(&path).load_all() {
            Err(AppError::Validation(msg)) => assert!(msg.contains("record #1")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_material_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(
            &path,
            r#"[{"user": {"id": 1, "name": "Alice"},
                 "item": {"id": 1, "title": "Heat", "material_type": "DVD"},
                 "borrow_date": "2024-01-01"}]"#,
        )
        .unwrap();

        let err = BorrowRecordsRepository::new(&path).load_all().unwrap_err();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
