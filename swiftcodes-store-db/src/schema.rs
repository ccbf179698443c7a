// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Database schema definitions for the SWIFT code registry.

/// Name of the single records table.
pub const TABLE_NAME: &str = "swift_codes";

/// Records table plus the secondary indexes used by country and branch lookups.
pub const SCHEMA_SQL: &str = r#"
create table if not exists swift_codes (
    swiftCode       text primary key not null,
    bankName        text not null,
    address         text not null default '',
    countryISO2     text not null,
    countryName     text not null,
    isHeadquarter   integer not null default 0,
    headquarterCode text,
    foreign key (headquarterCode) references swift_codes(swiftCode),
    check (isHeadquarter = 0 or headquarterCode is null)
);

create index if not exists IndexCountryISO2 on swift_codes(countryISO2);
create index if not exists IndexHeadquarterCode on swift_codes(headquarterCode);
"#;
