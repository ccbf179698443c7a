// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Read query operations for the record store.

use std::collections::BTreeSet;

use rusqlite::{Connection, OptionalExtension, params};

use crate::connection::StoreDb;
use crate::error::Result;
use crate::types::SwiftCodeRecord;

/// Headquarters lookup shared with writers holding a transaction.
pub(crate) fn headquarters_exists(conn: &Connection, code: &str) -> rusqlite::Result<bool> {
    conn.prepare_cached(
        "SELECT 1 FROM swift_codes WHERE swiftCode = ?1 AND isHeadquarter = 1 LIMIT 1",
    )?
    .exists(params![code])
}

impl StoreDb {
    /// Query a record by its code.
    ///
    /// Returns `None` if the code is not in the database.
    pub fn query_code(&self, code: &str) -> Result<Option<SwiftCodeRecord>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {} FROM swift_codes WHERE swiftCode = ?1",
            SwiftCodeRecord::COLUMNS
        ))?;

        Ok(stmt
            .query_row(params![code], SwiftCodeRecord::from_row)
            .optional()?)
    }

    /// Get all records registered for a country, ordered by code.
    pub fn query_country(&self, country_iso2: &str) -> Result<Vec<SwiftCodeRecord>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {} FROM swift_codes WHERE countryISO2 = ?1 ORDER BY swiftCode",
            SwiftCodeRecord::COLUMNS
        ))?;

        let records = stmt
            .query_map(params![country_iso2], SwiftCodeRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Get all branches linked to a headquarters, ordered by code.
    pub fn query_branches(&self, headquarter_code: &str) -> Result<Vec<SwiftCodeRecord>> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {} FROM swift_codes WHERE headquarterCode = ?1 ORDER BY swiftCode",
            SwiftCodeRecord::COLUMNS
        ))?;

        let records = stmt
            .query_map(params![headquarter_code], SwiftCodeRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Check if a code is stored.
    pub fn contains_code(&self, code: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT 1 FROM swift_codes WHERE swiftCode = ?1 LIMIT 1")?;

        Ok(stmt.exists(params![code])?)
    }

    /// Check if a code is stored as a headquarters record.
    pub fn is_headquarters_code(&self, code: &str) -> Result<bool> {
        Ok(headquarters_exists(&self.conn, code)?)
    }

    /// Get the codes of all headquarters records.
    pub fn list_headquarter_codes(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT swiftCode FROM swift_codes WHERE isHeadquarter = 1")?;

        let mut codes = BTreeSet::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            codes.insert(row.get(0)?);
        }
        Ok(codes)
    }

    /// Count the number of stored records.
    pub fn count_codes(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM swift_codes", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
