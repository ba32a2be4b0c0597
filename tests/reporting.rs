//! End-to-end reporting tests: stored history -> statistics -> CSV export

use std::fs;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use circulation_engine::{
    config::ReportsConfig,
    models::{BorrowRecord, Item, MaterialType, User},
    repository::Repository,
    services::{ActivityReportService, FineReportService, LoansService, Services},
    AppError,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

/// Borrow through the loans service the way the front desk would
fn history() -> Vec<BorrowRecord> {
    let loans = LoansService::new();
    let alice = Arc::new(User::new(1, "Alice"));
    let bob = Arc::new(User::new(2, "Bob"));

    let mut dune = Item::new(1, "Dune", MaterialType::Book);
    let mut dune_copy = Item::new(2, "Dune", MaterialType::Book);
    let mut nature = Item::new(3, "Nature", MaterialType::Journal);
    let mut help = Item::new(4, "Help!", MaterialType::Cd);

    vec![
        loans.borrow(alice.clone(), &mut dune, today() - Days::new(40)).unwrap(),
        loans.borrow(alice.clone(), &mut nature, today() - Days::new(25)).unwrap(),
        loans.borrow(bob.clone(), &mut dune_copy, today() - Days::new(2)).unwrap(),
        loans.borrow(alice, &mut help, today() - Days::new(1)).unwrap(),
    ]
}

#[test]
fn test_stored_history_feeds_every_report() {
    let dir = tempfile::tempdir().unwrap();
    let repository = Repository::new(dir.path().join("data/borrow_records.json"));
    repository.records.save_all(&history()).unwrap();

    let activity = ActivityReportService::from_source(&repository.records).unwrap();
    let fines = FineReportService::from_source(&repository.records).unwrap();

    let borrowers = activity.top_borrowers();
    assert_eq!(borrowers[&User::new(1, "Alice")], 3);
    assert_eq!(borrowers[&User::new(2, "Bob")], 1);
    assert_eq!(activity.most_borrowed_items()["Dune (BOOK)"], 2);

    let overdue = activity.overdue_items_for_user(&User::new(1, "Alice"), today());
    let labels: Vec<_> = overdue.iter().map(|r| r.item_label()).collect();
    assert_eq!(labels, vec!["Dune (BOOK)", "Nature (JOURNAL)"]);

    // 12 days late on the book, 4 days late on the journal
    let alice = User::new(1, "Alice");
    assert_eq!(fines.total_fine_for_user(&alice, today()), Decimal::from(180));
    let by_type = fines.fines_by_material_type(&alice, today());
    assert_eq!(by_type[&MaterialType::Book], Decimal::from(120));
    assert_eq!(by_type[&MaterialType::Journal], Decimal::from(60));
    assert_eq!(by_type[&MaterialType::Cd], Decimal::ZERO);
}

#[test]
fn test_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let reports = ReportsConfig {
        directory: dir.path().join("reports"),
    };
    let services = Services::new(&history(), &reports);

    let generated = services.exporter.generate_fines_report(today()).unwrap();
    let path = services.exporter.export_fines_report_to_csv(today()).unwrap();

    assert_eq!(path, dir.path().join("reports").join("fines_2024-06-30.csv"));
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written.trim_end(), generated.trim_end());

    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("User,Total Fines,Book,CD,Journal"));
    assert_eq!(lines.next(), Some("Alice,180,120,0,60"));
    assert_eq!(lines.next(), Some("Bob,0,0,0,0"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_export_into_unwritable_location_fails_with_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "occupied").unwrap();

    let reports = ReportsConfig {
        directory: blocker.join("reports"),
    };
    let services = Services::new(&history(), &reports);

    match services.exporter.export_fines_report_to_csv(today()) {
        Err(AppError::Io { path, .. }) => assert_eq!(path, blocker.join("reports")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_null_history_builds_no_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("borrow_records.json");
    fs::write(&path, "null").unwrap();
    let repository = Repository::new(&path);

    assert!(matches!(
        ActivityReportService::from_source(&repository.records),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        FineReportService::from_source(&repository.records),
        Err(AppError::Validation(_))
    ));
}
