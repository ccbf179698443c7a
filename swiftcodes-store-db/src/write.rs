// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Write operations for the record store.

use rusqlite::{Connection, Transaction, TransactionBehavior, params};
use tracing::debug;

use crate::connection::StoreDb;
use crate::error::{Error, Result};
use crate::linkage::headquarters_candidate;
use crate::query::headquarters_exists;
use crate::types::SwiftCodeRecord;

/// Parameters for registering a single code.
///
/// The headquarters link is not part of the input: it is resolved against
/// the stored headquarters when the code is registered.
#[derive(Debug, Clone, Default)]
pub struct RegisterCodeParams {
    /// The SWIFT/BIC code
    pub code: String,
    /// Institution name
    pub bank_name: String,
    /// Postal address
    pub address: String,
    /// Two-letter country code
    pub country_iso2: String,
    /// Country name
    pub country_name: String,
    /// Whether the caller registers a headquarters entry
    pub is_headquarter: bool,
}

fn execute_insert(conn: &Connection, record: &SwiftCodeRecord) -> rusqlite::Result<usize> {
    conn.execute(
        r#"
        INSERT INTO swift_codes
            (swiftCode, bankName, address, countryISO2, countryName, isHeadquarter, headquarterCode)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            record.code,
            record.bank_name,
            record.address,
            record.country_iso2,
            record.country_name,
            record.is_headquarter,
            record.headquarter_code,
        ],
    )
}

impl StoreDb {
    /// Start a transaction holding the write lock from its first statement.
    ///
    /// A deferred transaction that reads before writing cannot upgrade its
    /// lock once another connection has committed, and fails with
    /// `SQLITE_BUSY` regardless of the busy timeout.
    fn begin_write(&mut self) -> rusqlite::Result<Transaction<'_>> {
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
    }

    /// Register a new code, linking branches to their stored headquarters.
    ///
    /// Returns the stored record. Fails with [`Error::DuplicateCode`] if the
    /// code already exists, including when a concurrent writer got there first.
    pub fn register_code(&mut self, params: &RegisterCodeParams) -> Result<SwiftCodeRecord> {
        let tx = self.begin_write()?;

        let headquarter_code = match headquarters_candidate(&params.code) {
            Some(candidate) if !params.is_headquarter => {
                headquarters_exists(&tx, &candidate)?.then_some(candidate)
            }
            _ => None,
        };

        let record = SwiftCodeRecord {
            code: params.code.clone(),
            bank_name: params.bank_name.clone(),
            address: params.address.clone(),
            country_iso2: params.country_iso2.clone(),
            country_name: params.country_name.clone(),
            is_headquarter: params.is_headquarter,
            headquarter_code,
        };

        execute_insert(&tx, &record).map_err(|e| Error::from_insert(e, &record.code))?;
        tx.commit()?;

        debug!(
            "Registered {} (headquarters link: {:?})",
            record.code, record.headquarter_code
        );
        Ok(record)
    }

    /// Insert a fully resolved record.
    ///
    /// Fails with [`Error::DuplicateCode`] if the code already exists.
    pub fn insert_record(&self, record: &SwiftCodeRecord) -> Result<()> {
        execute_insert(&self.conn, record).map_err(|e| Error::from_insert(e, &record.code))?;
        Ok(())
    }

    /// Insert a fully resolved record unless its code is already stored.
    ///
    /// Returns `false` when the code exists. Constraint failures other than
    /// the code's uniqueness are still reported as errors.
    pub fn insert_if_absent(&self, record: &SwiftCodeRecord) -> Result<bool> {
        let rows = self.conn.execute(
            r#"
            INSERT INTO swift_codes
                (swiftCode, bankName, address, countryISO2, countryName, isHeadquarter, headquarterCode)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (swiftCode) DO NOTHING
            "#,
            params![
                record.code,
                record.bank_name,
                record.address,
                record.country_iso2,
                record.country_name,
                record.is_headquarter,
                record.headquarter_code,
            ],
        )?;
        Ok(rows > 0)
    }

    /// Delete a record.
    ///
    /// Branches linked to it are unlinked (not deleted) in the same
    /// transaction. Returns the number of unlinked branches.
    pub fn delete_code(&mut self, code: &str) -> Result<usize> {
        let tx = self.begin_write()?;

        let unlinked = tx.execute(
            "UPDATE swift_codes SET headquarterCode = NULL WHERE headquarterCode = ?1",
            params![code],
        )?;
        let deleted = tx.execute("DELETE FROM swift_codes WHERE swiftCode = ?1", params![code])?;
        if deleted == 0 {
            // Dropping the transaction rolls back the (empty) unlink.
            return Err(Error::CodeNotFound(code.to_owned()));
        }

        tx.commit()?;
        debug!("Deleted {code}, unlinked {unlinked} branches");
        Ok(unlinked)
    }
}
