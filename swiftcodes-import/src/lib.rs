//! Bulk import of SWIFT/BIC codes from spreadsheet files.
//!
//! The first sheet of a `.csv`, `.xlsx`, `.xlsm`, `.xlsb`, `.xls` or `.ods`
//! file is read, its header row is matched against a synonym table and every
//! data row becomes a record in the store. Headquarters flags are derived
//! from the code and branches are linked to headquarters from the same file.
//!
//! ```ignore
//! use swiftcodes_import::Importer;
//! use swiftcodes_store_db::{OpenMode, StoreDb};
//!
//! let db = StoreDb::open("swift_codes.db", OpenMode::Create)?;
//! let summary = Importer::default().import_file(&db, "codes.xlsx".as_ref())?;
//! println!("Added {} new records", summary.added);
//! ```

pub mod error;
mod import;
pub mod mapping;
pub mod table;

pub use error::{ImportError, Result, RowError};
pub use import::{ImportRow, ImportSummary, Importer};
pub use mapping::{ColumnMapping, DEFAULT_SYNONYMS, Field};
pub use table::Table;
