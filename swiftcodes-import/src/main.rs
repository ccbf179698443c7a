#![warn(clippy::dbg_macro)]

use std::path::PathBuf;

use clap::Parser;
use swiftcodes_import::{ImportError, Importer};
use swiftcodes_store_db::{OpenMode, StoreDb};

/// Load SWIFT/BIC codes from a spreadsheet into the registry database.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Spreadsheet to import (.csv, .xlsx, .xlsm, .xlsb, .xls or .ods)
    file: PathBuf,

    /// SQLite database to import into; created if missing
    #[arg(short, long, env = "DATABASE_PATH", default_value = "swift_codes.db")]
    database: PathBuf,
}

fn main() -> Result<(), ImportError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!(
        "importing {} into {}",
        cli.file.display(),
        cli.database.display()
    );

    let db = StoreDb::open(&cli.database, OpenMode::Create)?;
    let summary = Importer::default().import_file(&db, &cli.file)?;

    println!("Added {} new records", summary.added);
    Ok(())
}
