use std::collections::BTreeSet;
use std::path::Path;

use swiftcodes_store_db::{StoreDb, SwiftCodeRecord, is_headquarters, resolve_headquarters};
use tracing::{debug, info, warn};

use crate::error::{Result, RowError};
use crate::mapping::{ColumnMapping, DEFAULT_SYNONYMS, Field, SynonymTable};
use crate::table::Table;

/// One data row after column mapping and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// Spreadsheet row number, counting the header as row 1.
    pub row: usize,
    pub code: String,
    pub bank_name: String,
    pub address: String,
    pub country_iso2: String,
    pub country_name: String,
}

impl ImportRow {
    /// Pick the mapped cells out of a row.
    ///
    /// Returns `Ok(None)` for a row without any content.
    pub fn parse(
        row: usize,
        cells: &[String],
        mapping: &ColumnMapping,
    ) -> std::result::Result<Option<Self>, RowError> {
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            return Ok(None);
        }

        let cell = |field: Field| {
            mapping
                .column(field)
                .and_then(|idx| cells.get(idx))
                .map(|value| value.trim())
                .unwrap_or_default()
        };
        let required = |field: Field| match cell(field) {
            "" => Err(RowError::MissingValue { row, field }),
            value => Ok(value),
        };

        Ok(Some(Self {
            row,
            code: required(Field::Code)?.to_uppercase(),
            bank_name: required(Field::BankName)?.to_string(),
            address: cell(Field::Address).to_string(),
            country_iso2: required(Field::CountryIso2)?.to_uppercase(),
            country_name: required(Field::CountryName)?.to_uppercase(),
        }))
    }

    pub fn is_headquarters(&self) -> bool {
        is_headquarters(&self.code)
    }

    fn into_record(self, headquarter_code: Option<String>) -> SwiftCodeRecord {
        SwiftCodeRecord {
            is_headquarter: is_headquarters(&self.code),
            code: self.code,
            bank_name: self.bank_name,
            address: self.address,
            country_iso2: self.country_iso2,
            country_name: self.country_name,
            headquarter_code,
        }
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records newly written to the store
    pub added: usize,
    /// Rows whose code was already stored
    pub already_present: usize,
    /// Rows skipped because they were malformed or failed to store
    pub rejected: usize,
}

/// Bulk loader from spreadsheet tables into the record store.
#[derive(Debug, Clone, Copy)]
pub struct Importer<'a> {
    synonyms: SynonymTable<'a>,
}

impl Default for Importer<'static> {
    fn default() -> Self {
        Self::with_synonyms(DEFAULT_SYNONYMS)
    }
}

impl<'a> Importer<'a> {
    /// Use a custom header synonym table instead of [`DEFAULT_SYNONYMS`].
    pub fn with_synonyms(synonyms: SynonymTable<'a>) -> Self {
        Self { synonyms }
    }

    /// Read `path` and import its first sheet.
    pub fn import_file(&self, db: &StoreDb, path: &Path) -> Result<ImportSummary> {
        let table = Table::read(path)?;
        info!(
            "read {} rows from {}",
            table.rows.len(),
            path.display()
        );
        self.import_table(db, &table)
    }

    /// Import every row of `table`.
    ///
    /// Fails before writing anything when a required column is missing.
    /// Otherwise bad rows are logged and skipped; rows already written stay
    /// written if a later row fails.
    pub fn import_table(&self, db: &StoreDb, table: &Table) -> Result<ImportSummary> {
        let mapping = ColumnMapping::resolve(&table.headers, self.synonyms)?;
        debug!("column mapping: {mapping:?}");

        let mut summary = ImportSummary::default();
        let mut headquarters = Vec::new();
        let mut branches = Vec::new();

        for (idx, cells) in table.rows.iter().enumerate() {
            match ImportRow::parse(idx + 2, cells, &mapping) {
                Ok(Some(row)) if row.is_headquarters() => headquarters.push(row),
                Ok(Some(row)) => branches.push(row),
                Ok(None) => {}
                Err(e) => {
                    warn!("skipping {e}");
                    summary.rejected += 1;
                }
            }
        }

        // Headquarters first so every branch link points at a stored row.
        let batch_headquarters: BTreeSet<String> =
            headquarters.iter().map(|row| row.code.clone()).collect();
        for row in headquarters {
            store_row(db, row, None, &mut summary);
        }

        let linkable: BTreeSet<String> = db
            .list_headquarter_codes()?
            .intersection(&batch_headquarters)
            .cloned()
            .collect();
        for row in branches {
            let headquarter_code = resolve_headquarters(&row.code, &linkable);
            store_row(db, row, headquarter_code, &mut summary);
        }

        info!(
            "import finished: {} added, {} already present, {} rejected",
            summary.added, summary.already_present, summary.rejected
        );
        Ok(summary)
    }
}

fn store_row(
    db: &StoreDb,
    row: ImportRow,
    headquarter_code: Option<String>,
    summary: &mut ImportSummary,
) {
    let row_number = row.row;
    let record = row.into_record(headquarter_code);
    match db.insert_if_absent(&record) {
        Ok(true) => summary.added += 1,
        Ok(false) => {
            debug!("{} already present", record.code);
            summary.already_present += 1;
        }
        Err(source) => {
            let e = RowError::Store {
                row: row_number,
                code: record.code,
                source,
            };
            warn!("skipping {e}");
            summary.rejected += 1;
        }
    }
}
