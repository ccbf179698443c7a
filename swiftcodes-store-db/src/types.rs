// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Database row types for SWIFT code records.

use rusqlite::Row;

/// A stored SWIFT/BIC code.
///
/// This represents a row from the `swift_codes` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwiftCodeRecord {
    /// The SWIFT/BIC code (primary key)
    pub code: String,
    /// Institution name
    pub bank_name: String,
    /// Postal address, empty when unknown
    pub address: String,
    /// Uppercase two-letter country code
    pub country_iso2: String,
    /// Uppercase country name
    pub country_name: String,
    /// Whether this is the institution's headquarters entry
    pub is_headquarter: bool,
    /// Code of the headquarters this branch belongs to
    pub headquarter_code: Option<String>,
}

impl SwiftCodeRecord {
    /// Column list matching [`SwiftCodeRecord::from_row`].
    pub(crate) const COLUMNS: &'static str =
        "swiftCode, bankName, address, countryISO2, countryName, isHeadquarter, headquarterCode";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            code: row.get(0)?,
            bank_name: row.get(1)?,
            address: row.get(2)?,
            country_iso2: row.get(3)?,
            country_name: row.get(4)?,
            is_headquarter: row.get::<_, i32>(5)? != 0,
            headquarter_code: row.get(6)?,
        })
    }
}
