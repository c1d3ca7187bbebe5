// Holds the rows of one session; immutable once built.
use crate::error::EngineError;
use shared::models::LedgerRow;
use std::sync::Arc;

/// The full ledger of a session.
///
/// Cloning is cheap: rows live behind an `Arc` and are never mutated after load.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Arc<[LedgerRow]>,
}

impl Dataset {
    /// Refuses an empty ledger: an export with no rows is "no data", not a zero total.
    pub fn new(rows: Vec<LedgerRow>) -> Result<Self, EngineError> {
        if rows.is_empty() {
            return Err(EngineError::EmptyDataset);
        }
        Ok(Dataset { rows: rows.into() })
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always `false`: `new` refuses empty input. Present to pair with `len`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose department column equals `department` exactly.
    pub fn rows_for_department(&self, department: &str) -> Vec<&LedgerRow> {
        self.rows
            .iter()
            .filter(|row| row.department() == Some(department))
            .collect()
    }
}
