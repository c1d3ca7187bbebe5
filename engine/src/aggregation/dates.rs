use chrono::NaiveDate;
use shared::brazilian_format::parse_local_date;
use shared::models::LedgerRow;

/// Most recent date in `date_field`, skipping cells that are not valid dd/mm/yyyy dates.
pub fn latest_date<'a>(
    rows: impl IntoIterator<Item = &'a LedgerRow>,
    date_field: &str,
) -> Option<NaiveDate> {
    rows.into_iter()
        .filter_map(|row| row.get(date_field).and_then(parse_local_date))
        .max()
}
