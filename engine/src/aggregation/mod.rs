// Pure aggregation over ledger rows. Nothing here logs, allocates state, or fails:
// malformed values have already been neutralised by the brazilian_format parsers.
pub mod dates;
pub mod group;
pub mod ranking;

pub use dates::latest_date;
pub use group::{group_and_sum, group_and_sum_by, view_total, AggregationResult, Grouping};
pub use ranking::{percentage_of, sort_descending_by_value};
