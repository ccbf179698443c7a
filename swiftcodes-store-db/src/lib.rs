// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! SQLite record store for SWIFT/BIC bank identifier codes.
//!
//! This crate owns the `swift_codes` table and the one piece of domain logic
//! that sits next to it: the headquarters/branch linkage rule.
//!
//! # Key Features
//!
//! - Single-table schema with a self-referential headquarters link
//! - Lookups by code, by country and by headquarters
//! - Transactional create (link resolution + insert) and delete (unlink + remove)
//! - In-memory database for testing
//!
//! # Example
//!
//! ```ignore
//! use swiftcodes_store_db::{OpenMode, RegisterCodeParams, StoreDb};
//!
//! let mut db = StoreDb::open("swift_codes.db", OpenMode::Create)?;
//! db.register_code(&RegisterCodeParams {
//!     code: "BANKPLPWXXX".into(),
//!     bank_name: "EXAMPLE BANK".into(),
//!     country_iso2: "PL".into(),
//!     country_name: "POLAND".into(),
//!     is_headquarter: true,
//!     ..Default::default()
//! })?;
//!
//! if let Some(record) = db.query_code("BANKPLPWXXX")? {
//!     println!("{} ({})", record.bank_name, record.country_name);
//! }
//! ```

mod connection;
mod error;
pub mod linkage;
mod query;
mod schema;
mod types;
mod write;

pub use connection::{OpenMode, StoreDb};
pub use error::{Error, Result};
pub use linkage::{is_headquarters, resolve_headquarters};
pub use schema::TABLE_NAME;
pub use types::*;
pub use write::*;
