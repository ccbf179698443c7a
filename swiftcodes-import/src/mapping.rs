//! Header normalization and the synonym table mapping columns to fields.

use std::fmt;

use crate::error::{ImportError, Result};

/// A record field a spreadsheet column can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Code,
    BankName,
    CountryIso2,
    CountryName,
    Address,
}

impl Field {
    /// Fields every import needs a column for.
    pub const REQUIRED: [Field; 4] = [
        Field::Code,
        Field::BankName,
        Field::CountryIso2,
        Field::CountryName,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Code => "swiftCode",
            Field::BankName => "bankName",
            Field::CountryIso2 => "countryISO2",
            Field::CountryName => "countryName",
            Field::Address => "address",
        })
    }
}

/// Recognized (normalized) column names per field, most specific first.
pub type SynonymTable<'a> = &'a [(Field, &'a [&'a str])];

pub const DEFAULT_SYNONYMS: SynonymTable<'static> = &[
    (
        Field::Code,
        &["swift_code", "swift", "bic", "swift_bic", "code"],
    ),
    (
        Field::BankName,
        &[
            "bank_name",
            "bank",
            "institution_name",
            "financial_institution",
            "name",
        ],
    ),
    (
        Field::CountryIso2,
        &[
            "country_iso2_code",
            "country_code",
            "iso2",
            "iso_code",
            "country_iso",
        ],
    ),
    (Field::CountryName, &["country_name", "country", "nation"]),
    (Field::Address, &["address"]),
];

/// Trim, lowercase and join the words of a header with `_`.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Column index of each field in one particular table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub code: usize,
    pub bank_name: usize,
    pub country_iso2: usize,
    pub country_name: usize,
    pub address: Option<usize>,
}

impl ColumnMapping {
    /// Map raw header cells to fields.
    ///
    /// For each field the first synonym present among the headers wins.
    /// Fails with [`ImportError::MissingColumns`] if a required field has no
    /// column.
    pub fn resolve(headers: &[String], synonyms: SynonymTable<'_>) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let find = |field: Field| {
            synonyms
                .iter()
                .filter(|(f, _)| *f == field)
                .flat_map(|(_, names)| names.iter())
                .find_map(|name| normalized.iter().position(|h| h == name))
        };

        let missing: Vec<Field> = Field::REQUIRED
            .into_iter()
            .filter(|field| find(*field).is_none())
            .collect();

        let address = find(Field::Address);
        match (
            find(Field::Code),
            find(Field::BankName),
            find(Field::CountryIso2),
            find(Field::CountryName),
        ) {
            (Some(code), Some(bank_name), Some(country_iso2), Some(country_name)) => Ok(Self {
                code,
                bank_name,
                country_iso2,
                country_name,
                address,
            }),
            _ => Err(ImportError::MissingColumns {
                missing,
                found: normalized,
            }),
        }
    }

    /// Column index for a field.
    pub fn column(&self, field: Field) -> Option<usize> {
        match field {
            Field::Code => Some(self.code),
            Field::BankName => Some(self.bank_name),
            Field::CountryIso2 => Some(self.country_iso2),
            Field::CountryName => Some(self.country_name),
            Field::Address => self.address,
        }
    }
}
