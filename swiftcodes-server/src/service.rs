//! Query and command operations on SWIFT codes.
//!
//! Codes and country identifiers are trimmed and upper-cased here, so the
//! lookups are case-insensitive for callers.

use serde::{Deserialize, Serialize};
use swiftcodes_store_db::{
    Error as StoreError, RegisterCodeParams, StoreDb, SwiftCodeRecord, is_headquarters,
};

use crate::error::{RegistryError, Result};

fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// A code as listed under a headquarters or a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftCodeSummary {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

impl From<SwiftCodeRecord> for SwiftCodeSummary {
    fn from(record: SwiftCodeRecord) -> Self {
        Self {
            address: record.address,
            bank_name: record.bank_name,
            country_iso2: record.country_iso2,
            is_headquarter: record.is_headquarter,
            swift_code: record.code,
        }
    }
}

/// Full details of one code.
///
/// `branches` is `None` for a branch and a (possibly empty) list for a
/// headquarters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftCodeDetails {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
    pub branches: Option<Vec<SwiftCodeSummary>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySwiftCodes {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub swift_codes: Vec<SwiftCodeSummary>,
}

/// Request body for creating a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSwiftCode {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

pub fn get_by_code(db: &StoreDb, code: &str) -> Result<SwiftCodeDetails> {
    let code = normalize(code);
    let record = db
        .query_code(&code)?
        .ok_or_else(|| RegistryError::NotFound(format!("SWIFT code {code} not found")))?;

    let branches = if record.is_headquarter {
        let branches = db.query_branches(&record.code)?;
        Some(branches.into_iter().map(SwiftCodeSummary::from).collect())
    } else {
        None
    };

    Ok(SwiftCodeDetails {
        address: record.address,
        bank_name: record.bank_name,
        country_iso2: record.country_iso2,
        country_name: record.country_name,
        is_headquarter: record.is_headquarter,
        swift_code: record.code,
        branches,
    })
}

/// List the codes of a country.
///
/// A country without codes is indistinguishable from an unknown one; both
/// are `NotFound`.
pub fn get_by_country(db: &StoreDb, country_iso2: &str) -> Result<CountrySwiftCodes> {
    let country_iso2 = normalize(country_iso2);
    let records = db.query_country(&country_iso2)?;

    let Some(first) = records.first() else {
        return Err(RegistryError::NotFound(format!(
            "No SWIFT codes found for country {country_iso2}"
        )));
    };

    Ok(CountrySwiftCodes {
        country_name: first.country_name.clone(),
        country_iso2,
        swift_codes: records.into_iter().map(SwiftCodeSummary::from).collect(),
    })
}

pub fn create(db: &mut StoreDb, input: NewSwiftCode) -> Result<Message> {
    let code = normalize(&input.swift_code);

    // The caller's flag wins over the suffix rule; only flag the mismatch.
    if input.is_headquarter != is_headquarters(&code) {
        log::warn!(
            "{code}: isHeadquarter={} does not match the code suffix",
            input.is_headquarter
        );
    }

    let params = RegisterCodeParams {
        code,
        bank_name: input.bank_name,
        address: input.address,
        country_iso2: normalize(&input.country_iso2),
        country_name: normalize(&input.country_name),
        is_headquarter: input.is_headquarter,
    };

    let record = db.register_code(&params).map_err(|e| match e {
        StoreError::DuplicateCode(code) => {
            RegistryError::Conflict(format!("SWIFT code {code} already exists"))
        }
        e => RegistryError::Store(e),
    })?;

    log::info!(
        "created {} (headquarters: {:?})",
        record.code,
        record.headquarter_code
    );
    Ok(Message {
        message: format!("SWIFT code {} created successfully", record.code),
    })
}

pub fn delete(db: &mut StoreDb, code: &str) -> Result<Message> {
    let code = normalize(code);

    let unlinked = db.delete_code(&code).map_err(|e| match e {
        StoreError::CodeNotFound(code) => {
            RegistryError::NotFound(format!("SWIFT code {code} not found"))
        }
        e => RegistryError::Store(e),
    })?;

    log::info!("deleted {code}, unlinked {unlinked} branches");
    Ok(Message {
        message: format!("SWIFT code {code} deleted successfully"),
    })
}
