use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Column names of the ledger export. These are fixed by the upstream system.
pub mod columns {
    pub const DEPARTMENT: &str = "DEPARTAMENTO";
    pub const NATURE: &str = "NATUREZA";
    pub const AMOUNT: &str = "VALOR DEPARTAMENTO";
    pub const PAID_ON: &str = "DT. PAGO";
}

/// One imported ledger record, kept verbatim.
///
/// Every column of the export is retained, including the ones the dashboard never reads,
/// so an issue row can be shown to the user exactly as it arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerRow {
    fields: BTreeMap<String, String>,
}

impl LedgerRow {
    pub fn new<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Field value only when present and non-empty. An empty cell counts as missing.
    pub fn non_empty(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|v| !v.is_empty())
    }

    pub fn department(&self) -> Option<&str> {
        self.non_empty(columns::DEPARTMENT)
    }

    pub fn nature(&self) -> Option<&str> {
        self.non_empty(columns::NATURE)
    }

    pub fn amount(&self) -> Option<&str> {
        self.get(columns::AMOUNT)
    }

    pub fn paid_on(&self) -> Option<&str> {
        self.get(columns::PAID_ON)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Aggregation scope of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewFilter {
    #[default]
    Unfiltered,
    Department(String),
}

impl ViewFilter {
    pub fn department(&self) -> Option<&str> {
        match self {
            ViewFilter::Unfiltered => None,
            ViewFilter::Department(name) => Some(name),
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, ViewFilter::Department(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatureTotal {
    pub name: String,
    pub total: f64,
    /// Share of the view's grand total, in [0, 100].
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentTotal {
    pub name: String,
    pub total: f64,
}

/// Everything the presentation layer needs to draw one state of the dashboard.
///
/// `top_departments`, `issues` and `latest_payment` always describe the whole dataset;
/// `grand_total` and `natures` describe the active filter only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub session_id: Uuid,
    pub filter: ViewFilter,
    pub grand_total: f64,
    pub natures: Vec<NatureTotal>,
    pub top_departments: Vec<DepartmentTotal>,
    pub department_count: usize,
    pub issues: Vec<LedgerRow>,
    pub latest_payment: Option<NaiveDate>,
}
