// Row model and value parsing shared by the engine and its presentation layer.

pub mod models;
pub mod utils;

pub use models::{columns, DepartmentTotal, LedgerRow, NatureTotal, ViewFilter, ViewSnapshot};
pub use utils::brazilian_format;
