// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Smoke tests for swiftcodes-store-db.
//!
//! These tests verify the schema and basic operations work correctly
//! using an in-memory database.

use swiftcodes_store_db::{Error, OpenMode, RegisterCodeParams, StoreDb, SwiftCodeRecord};

fn fixture() -> StoreDb {
    let db = StoreDb::open_memory().unwrap();

    db.insert_record(&SwiftCodeRecord {
        code: "TESTBANKXXX".into(),
        bank_name: "TEST BANK".into(),
        address: "123 Test St, Test City".into(),
        country_iso2: "US".into(),
        country_name: "UNITED STATES".into(),
        is_headquarter: true,
        headquarter_code: None,
    })
    .unwrap();
    db.insert_record(&SwiftCodeRecord {
        code: "TESTBANK123".into(),
        bank_name: "TEST BANK BRANCH".into(),
        address: "456 Branch St, Test City".into(),
        country_iso2: "US".into(),
        country_name: "UNITED STATES".into(),
        is_headquarter: false,
        headquarter_code: Some("TESTBANKXXX".into()),
    })
    .unwrap();

    db
}

/// Verify schema creation and empty queries work.
#[test]
fn test_schema_creation() {
    let db = StoreDb::open_memory().unwrap();
    assert!(db.has_schema().unwrap());
    assert_eq!(db.count_codes().unwrap(), 0);
    assert!(db.list_headquarter_codes().unwrap().is_empty());
}

/// Verify lookups by code, country and headquarters.
#[test]
fn test_lookups() {
    let db = fixture();

    let hq = db.query_code("TESTBANKXXX").unwrap().unwrap();
    assert!(hq.is_headquarter);
    assert_eq!(hq.headquarter_code, None);

    let branches = db.query_branches("TESTBANKXXX").unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].code, "TESTBANK123");

    let country = db.query_country("US").unwrap();
    let codes: Vec<_> = country.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, ["TESTBANK123", "TESTBANKXXX"]);

    assert!(db.query_code("MISSINGXXXX").unwrap().is_none());
    assert!(db.query_country("PL").unwrap().is_empty());
    assert!(db.contains_code("TESTBANK123").unwrap());
    assert!(db.is_headquarters_code("TESTBANKXXX").unwrap());
    assert!(!db.is_headquarters_code("TESTBANK123").unwrap());
}

/// Verify the headquarters set only holds headquarters records.
#[test]
fn test_list_headquarter_codes() {
    let db = fixture();
    let hqs = db.list_headquarter_codes().unwrap();
    assert_eq!(hqs.into_iter().collect::<Vec<_>>(), ["TESTBANKXXX"]);
}

/// Verify that deleting a headquarters leaves no dangling links.
#[test]
fn test_delete_headquarters_cascade() {
    let mut db = fixture();

    assert_eq!(db.delete_code("TESTBANKXXX").unwrap(), 1);
    assert!(db.query_code("TESTBANKXXX").unwrap().is_none());

    let remaining = db.query_country("US").unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(
        remaining
            .iter()
            .all(|r| r.headquarter_code.as_deref() != Some("TESTBANKXXX"))
    );
}

/// Deleting twice yields success then not-found.
#[test]
fn test_delete_twice() {
    let mut db = fixture();

    assert_eq!(db.delete_code("TESTBANK123").unwrap(), 0);
    assert!(matches!(
        db.delete_code("TESTBANK123"),
        Err(Error::CodeNotFound(_))
    ));
}

/// The check constraint rejects a linked headquarters.
#[test]
fn test_linked_headquarters_rejected() {
    let db = fixture();
    let result = db.insert_record(&SwiftCodeRecord {
        code: "TESTBANKABC".into(),
        bank_name: "TEST BANK".into(),
        country_iso2: "US".into(),
        country_name: "UNITED STATES".into(),
        is_headquarter: true,
        headquarter_code: Some("TESTBANKXXX".into()),
        ..Default::default()
    });
    assert!(matches!(result, Err(Error::Sqlite(_))));
}

/// Records survive reopening an on-disk database.
#[test]
fn test_persisted_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("swift_codes.db");

    {
        let mut db = StoreDb::open(&path, OpenMode::Create).unwrap();
        db.register_code(&RegisterCodeParams {
            code: "NEWBANKXXX".into(),
            bank_name: "NEW TEST BANK".into(),
            address: "789 New St, New City".into(),
            country_iso2: "CA".into(),
            country_name: "CANADA".into(),
            is_headquarter: true,
        })
        .unwrap();
    }

    let db = StoreDb::open(&path, OpenMode::ReadWrite).unwrap();
    let record = db.query_code("NEWBANKXXX").unwrap().unwrap();
    assert_eq!(record.country_name, "CANADA");
    assert_eq!(record.address, "789 New St, New City");
}
