pub mod csv_parser;
pub mod dataset;

pub use csv_parser::{LedgerCsvParser, EXTRA_FIELDS};
pub use dataset::Dataset;
