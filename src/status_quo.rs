//! Status-quo view: ownership as the records stand today

use crate::logging::engine_log;
use crate::types::{DerivedRow, OwnershipRecord, StatusQuoView, ViewTotals};

/// Sum of shares across the records
pub fn total_shares(records: &[OwnershipRecord]) -> f64 {
    records.iter().map(|r| r.shares).sum()
}

/// Compute ownership percentage and price per share for every record
///
/// Rows keep the record order. With no shares outstanding the view is empty
/// and `total_shares` is 0.
pub fn compute_status_quo(records: &[OwnershipRecord]) -> StatusQuoView {
    let total = total_shares(records);
    if !(total.is_finite() && total > 0.0) {
        if !records.is_empty() {
            engine_log!(debug, "Status quo skipped: total shares is {}", total);
        }
        return StatusQuoView::default();
    }

    let rows: Vec<DerivedRow> = records
        .iter()
        .cloned()
        .map(|record| DerivedRow::derive(record, total))
        .collect();
    let totals = ViewTotals::from_rows(&rows);

    StatusQuoView {
        rows,
        total_shares: total,
        totals,
    }
}
