// Drill-down state of one dashboard session.
//
// The controller owns the dataset and the active filter. Every transition recomputes the
// derived totals from scratch and replaces the previous state; nothing is patched in place.
use crate::aggregation::{
    group_and_sum, latest_date, percentage_of, sort_descending_by_value, view_total,
};
use crate::config::EngineSettings;
use crate::data::dataset::Dataset;
use crate::error::EngineError;
use shared::models::{
    columns, DepartmentTotal, LedgerRow, NatureTotal, ViewFilter, ViewSnapshot,
};
use uuid::Uuid;

pub struct ViewController {
    session_id: Uuid,
    dataset: Dataset,
    top_departments: usize,
    snapshot: ViewSnapshot,
}

impl ViewController {
    /// Starts a session over `rows` in the unfiltered view.
    pub fn load(rows: Vec<LedgerRow>, settings: &EngineSettings) -> Result<Self, EngineError> {
        let dataset = Dataset::new(rows)?;
        let session_id = Uuid::new_v4();
        let snapshot = compute_snapshot(session_id, &dataset, ViewFilter::Unfiltered, settings.top_departments);
        tracing::info!(
            %session_id,
            rows = dataset.len(),
            departments = snapshot.department_count,
            issues = snapshot.issues.len(),
            "Ledger session started"
        );
        Ok(ViewController {
            session_id,
            dataset,
            top_departments: settings.top_departments,
            snapshot,
        })
    }

    /// Replaces the whole session with a new dataset. On error the current session stays.
    pub fn reload(&mut self, rows: Vec<LedgerRow>) -> Result<&ViewSnapshot, EngineError> {
        let settings = EngineSettings {
            top_departments: self.top_departments,
            ..EngineSettings::default()
        };
        *self = ViewController::load(rows, &settings)?;
        Ok(&self.snapshot)
    }

    /// Narrows nature totals and the grand total to one department.
    ///
    /// The department ranking, the issues list and the latest payment date keep describing
    /// the whole dataset so the overview stays visible while drilling down.
    pub fn filter_by_department(&mut self, name: &str) -> &ViewSnapshot {
        if name.trim().is_empty() {
            tracing::warn!(session_id = %self.session_id, "Ignoring filter with an empty department name");
            return &self.snapshot;
        }
        self.transition(ViewFilter::Department(name.to_string()))
    }

    /// Back to the unfiltered view.
    pub fn reset(&mut self) -> &ViewSnapshot {
        self.transition(ViewFilter::Unfiltered)
    }

    pub fn snapshot(&self) -> &ViewSnapshot {
        &self.snapshot
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.snapshot.filter
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn transition(&mut self, filter: ViewFilter) -> &ViewSnapshot {
        self.snapshot = compute_snapshot(self.session_id, &self.dataset, filter, self.top_departments);
        tracing::info!(
            session_id = %self.session_id,
            filter = ?self.snapshot.filter,
            grand_total = self.snapshot.grand_total,
            natures = self.snapshot.natures.len(),
            "View recomputed"
        );
        &self.snapshot
    }
}

fn compute_snapshot(
    session_id: Uuid,
    dataset: &Dataset,
    filter: ViewFilter,
    top_departments: usize,
) -> ViewSnapshot {
    let all_rows = dataset.rows();
    let view_rows: Vec<&LedgerRow> = match &filter {
        ViewFilter::Unfiltered => all_rows.iter().collect(),
        ViewFilter::Department(name) => dataset.rows_for_department(name),
    };

    // Filter-scoped
    let grand_total = view_total(view_rows.iter().copied(), columns::AMOUNT);
    let by_nature = group_and_sum(view_rows.iter().copied(), columns::NATURE, columns::AMOUNT);
    let natures: Vec<NatureTotal> = sort_descending_by_value(&by_nature.totals)
        .into_iter()
        .map(|(name, total)| NatureTotal {
            name,
            total,
            percentage: percentage_of(total, grand_total),
        })
        .collect();

    // Whole dataset, regardless of filter
    let by_department = group_and_sum(all_rows, columns::DEPARTMENT, columns::AMOUNT);
    let department_count = by_department.totals.len();
    let top_departments: Vec<DepartmentTotal> = sort_descending_by_value(&by_department.totals)
        .into_iter()
        .take(top_departments)
        .map(|(name, total)| DepartmentTotal { name, total })
        .collect();
    let latest_payment = latest_date(all_rows, columns::PAID_ON);

    tracing::debug!(
        %session_id,
        view_rows = view_rows.len(),
        department_count,
        "Snapshot computed"
    );

    ViewSnapshot {
        session_id,
        filter,
        grand_total,
        natures,
        top_departments,
        department_count,
        issues: by_department.unkeyed,
        latest_payment,
    }
}
