// Engine library root: aggregation and drill-down over a ledger export.

pub mod aggregation;
pub mod config;
pub mod data;
pub mod error;
pub mod presentation;
pub mod services;

pub use error::EngineError;
pub use services::ViewController;
