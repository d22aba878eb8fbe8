//! Commit a priced round back into the record list

use crate::config::EngineConfig;
use crate::error::{CapTableError, Result};
use crate::logging::engine_log;
use crate::pro_forma::synthetic_rows;
use crate::types::{NewRoundParameters, OwnershipRecord, ProFormaSummary};

/// Append the round's pool and investor rows to the records, default config
pub fn commit_pro_forma(
    records: &[OwnershipRecord],
    summary: &ProFormaSummary,
    params: &NewRoundParameters,
) -> Result<Vec<OwnershipRecord>> {
    commit_pro_forma_with_config(records, summary, params, &EngineConfig::default())
}

/// Append the round's pool and investor rows to the records
///
/// Returns the new status quo. The input records are left untouched, so a
/// rejected commit never mutates anything. Rejected when the summary has no
/// finite positive investor share count, or the round lacks a name, a
/// positive pre-money valuation or a positive investment.
pub fn commit_pro_forma_with_config(
    records: &[OwnershipRecord],
    summary: &ProFormaSummary,
    params: &NewRoundParameters,
    config: &EngineConfig,
) -> Result<Vec<OwnershipRecord>> {
    if !(summary.new_investor_shares.is_finite() && summary.new_investor_shares > 0.0) {
        return Err(CapTableError::CommitRejected(format!(
            "New investor shares must be a positive number, got {}",
            summary.new_investor_shares
        )));
    }
    params.validate_for_commit()?;

    let added = synthetic_rows(summary, params, config);
    let mut committed = Vec::with_capacity(records.len() + added.len());
    committed.extend_from_slice(records);
    committed.extend(added);

    engine_log!(
        info,
        "Committed round '{}': {:.2} new investor shares, {:.2} pool shares",
        params.name,
        summary.new_investor_shares,
        summary.esop_shares
    );

    Ok(committed)
}
