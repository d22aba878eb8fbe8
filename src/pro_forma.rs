//! Pro-forma view: ownership after pricing a new round with a pool top-up
//!
//! The pool target is a fraction of post-money fully diluted shares. Topping
//! up the pool dilutes the pre-money share count, which lowers the issue
//! price, which raises the new investor's share count, which grows the total
//! the target is measured against. Solving that loop gives
//!
//! ```text
//! K      = E / (1 - E)
//! S_esop = K * S_pre * (1 + I / V) / (1 - K * I / V)
//! price  = V / (S_pre + S_esop)
//! S_new  = I / price
//! ```
//!
//! with `S_pre` the current share total, `V` the pre-money valuation, `I` the
//! new investment and `E` the target pool fraction.

use crate::config::EngineConfig;
use crate::logging::engine_log;
use crate::types::{
    DerivedRow, NewRoundParameters, OwnershipRecord, ProFormaSummary, ProFormaView, ViewTotals,
};

/// Option pool shares needed so the pool is `esop_fraction` of post-money shares
///
/// Returns 0 when no pool is targeted, and also when the target can't be
/// reached at this investment-to-valuation ratio (non-positive denominator).
pub fn solve_esop_pool(
    pre_money_shares: f64,
    pre_money_valuation: f64,
    investment_amount: f64,
    esop_fraction: f64,
) -> f64 {
    if esop_fraction <= 0.0 {
        return 0.0;
    }

    let k = esop_fraction / (1.0 - esop_fraction);
    let ratio = investment_amount / pre_money_valuation;
    let denominator = 1.0 - k * ratio;
    if denominator <= 0.0 {
        engine_log!(
            debug,
            "Pool target of {:.4} unreachable at investment/valuation {:.4}; pool left at 0",
            esop_fraction,
            ratio
        );
        return 0.0;
    }

    let pool = k * pre_money_shares * (1.0 + ratio) / denominator;
    if pool.is_finite() && pool > 0.0 {
        pool
    } else {
        0.0
    }
}

/// Price the round: pool size, issue price and new investor shares
///
/// `None` when the inputs can't be priced (non-positive valuation, investment
/// or share total, non-finite values, or a pool target outside [0, 100)).
pub fn price_round(pre_money_shares: f64, params: &NewRoundParameters) -> Option<ProFormaSummary> {
    if !(pre_money_shares.is_finite() && pre_money_shares > 0.0) || !params.is_computable() {
        engine_log!(
            debug,
            "Round '{}' not priced: shares={}, valuation={}, investment={}, pool={}%",
            params.name,
            pre_money_shares,
            params.pre_money_valuation,
            params.investment_amount,
            params.target_esop_percent
        );
        return None;
    }

    let esop_shares = solve_esop_pool(
        pre_money_shares,
        params.pre_money_valuation,
        params.investment_amount,
        params.esop_fraction(),
    );
    let fully_diluted = pre_money_shares + esop_shares;
    let issue_price_per_share = params.pre_money_valuation / fully_diluted;
    let new_investor_shares = params.investment_amount / issue_price_per_share;
    let total_post_money_shares = fully_diluted + new_investor_shares;

    Some(ProFormaSummary {
        issue_price_per_share,
        new_investor_shares,
        esop_shares,
        total_post_money_shares,
        post_money_valuation: issue_price_per_share * total_post_money_shares,
    })
}

/// Project the cap table after the round using the default config
pub fn compute_pro_forma(
    total_shares: f64,
    records: &[OwnershipRecord],
    params: &NewRoundParameters,
) -> ProFormaView {
    compute_pro_forma_with_config(total_shares, records, params, &EngineConfig::default())
}

/// Project the cap table after the round
///
/// Existing records come first in their original order, then the pool row
/// (only when the pool is non-empty), then the new investor row (only when
/// its share count is finite and positive).
pub fn compute_pro_forma_with_config(
    total_shares: f64,
    records: &[OwnershipRecord],
    params: &NewRoundParameters,
    config: &EngineConfig,
) -> ProFormaView {
    let summary = match price_round(total_shares, params) {
        Some(summary) => summary,
        None => return ProFormaView::default(),
    };

    let total = summary.total_post_money_shares;
    let mut rows: Vec<DerivedRow> = records
        .iter()
        .cloned()
        .map(|record| DerivedRow::derive(record, total))
        .collect();

    for record in synthetic_rows(&summary, params, config) {
        rows.push(DerivedRow::derive(record, total));
    }

    let totals = ViewTotals::from_rows(&rows);
    ProFormaView {
        rows,
        summary: Some(summary),
        totals,
    }
}

/// Records a priced round introduces: the pool top-up and the new investor
///
/// Built directly rather than through `OwnershipRecord::new` since the
/// guards here already ensure positive share counts.
pub(crate) fn synthetic_rows(
    summary: &ProFormaSummary,
    params: &NewRoundParameters,
    config: &EngineConfig,
) -> Vec<OwnershipRecord> {
    let mut rows = Vec::with_capacity(2);

    if summary.esop_shares > 0.0 {
        rows.push(OwnershipRecord {
            name: config.esop_row_name.clone(),
            investment: 0.0,
            shares: summary.esop_shares,
            kind: config.esop_share_class,
        });
    }

    if summary.new_investor_shares.is_finite() && summary.new_investor_shares > 0.0 {
        rows.push(OwnershipRecord {
            name: params.name.clone(),
            investment: params.investment_amount,
            shares: summary.new_investor_shares,
            kind: config.round_share_class,
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status_quo::compute_status_quo;
    use crate::types::ShareClass;
    use proptest::prelude::{prop_assert, proptest};

    fn founders() -> Vec<OwnershipRecord> {
        vec![OwnershipRecord::new("Founders", 25_000.0, 1_000_000.0, ShareClass::Common).unwrap()]
    }

    fn assert_close(actual: f64, expected: f64) {
        let tol = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_series_a_scenario() {
        let records = founders();
        let params = NewRoundParameters::new("Series A", 1_000_000.0, 4_000_000.0, 10.0);
        let view = compute_pro_forma(1_000_000.0, &records, &params);
        let summary = view.summary.expect("priced round");

        // K = 1/9, I/V = 1/4: pool = (1/9 * 1e6 * 5/4) / (35/36) = 1e6 / 7
        assert_close(summary.esop_shares, 1_000_000.0 / 7.0);
        assert_close(summary.issue_price_per_share, 3.5);
        assert_close(summary.new_investor_shares, 2_000_000.0 / 7.0);
        assert_close(summary.total_post_money_shares, 10_000_000.0 / 7.0);
        assert_close(summary.post_money_valuation, 5_000_000.0);

        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.rows[0].record.name, "Founders");
        assert!(view.rows[0].ownership_percent < 100.0);
        assert_close(view.rows[0].ownership_percent, 70.0);

        assert_eq!(view.rows[1].record.name, "ESOP Pool");
        assert_eq!(view.rows[1].record.kind, ShareClass::Options);
        assert_eq!(view.rows[1].price_per_share, 0.0);
        assert_close(view.rows[1].ownership_percent, 10.0);

        assert_eq!(view.rows[2].record.name, "Series A");
        assert_eq!(view.rows[2].record.kind, ShareClass::Preferred);
        assert_close(view.rows[2].price_per_share, 3.5);
        assert_close(view.rows[2].ownership_percent, 20.0);
    }

    #[test]
    fn test_zero_pool_passes_through() {
        let params = NewRoundParameters::new("Seed", 500_000.0, 2_000_000.0, 0.0);
        let view = compute_pro_forma(1_000_000.0, &founders(), &params);
        let summary = view.summary.unwrap();

        assert_eq!(summary.esop_shares, 0.0);
        assert_eq!(summary.issue_price_per_share, 2.0);
        assert_eq!(summary.new_investor_shares, 250_000.0);
        // No pool row
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].record.name, "Seed");
    }

    #[test]
    fn test_unreachable_pool_target_degrades_to_zero() {
        // K = 1 at 50%, and I/V = 1, so the denominator is exactly 0
        assert_eq!(solve_esop_pool(1_000_000.0, 1_000_000.0, 1_000_000.0, 0.5), 0.0);
        // Denominator negative
        assert_eq!(solve_esop_pool(1_000_000.0, 1_000_000.0, 3_000_000.0, 0.6), 0.0);

        let params = NewRoundParameters::new("Series B", 3_000_000.0, 1_000_000.0, 60.0);
        let view = compute_pro_forma(1_000_000.0, &founders(), &params);
        let summary = view.summary.unwrap();
        assert_eq!(summary.esop_shares, 0.0);
        assert_eq!(summary.issue_price_per_share, 1.0);
        assert!(view.rows.iter().all(|r| r.record.kind != ShareClass::Options));
    }

    #[test]
    fn test_invalid_inputs_return_empty_view() {
        let records = founders();
        let cases = [
            (1_000_000.0, NewRoundParameters::new("A", 1_000_000.0, 0.0, 10.0)),
            (1_000_000.0, NewRoundParameters::new("A", 1_000_000.0, -5.0, 10.0)),
            (1_000_000.0, NewRoundParameters::new("A", 0.0, 4_000_000.0, 10.0)),
            (0.0, NewRoundParameters::new("A", 1_000_000.0, 4_000_000.0, 10.0)),
            (1_000_000.0, NewRoundParameters::new("A", f64::NAN, 4_000_000.0, 10.0)),
            (1_000_000.0, NewRoundParameters::new("A", 1_000_000.0, 4_000_000.0, 100.0)),
        ];

        for (shares, params) in cases.iter() {
            let view = compute_pro_forma(*shares, &records, params);
            assert!(view.is_empty(), "expected empty view for {:?}", params);
            assert!(view.summary.is_none());
        }
    }

    #[test]
    fn test_custom_row_labels() {
        let config = EngineConfig {
            esop_row_name: "Option Pool".to_string(),
            round_share_class: ShareClass::Common,
            ..EngineConfig::default()
        };
        let params = NewRoundParameters::new("Series A", 1_000_000.0, 4_000_000.0, 10.0);
        let view = compute_pro_forma_with_config(1_000_000.0, &founders(), &params, &config);

        assert_eq!(view.rows[1].record.name, "Option Pool");
        assert_eq!(view.rows[2].record.kind, ShareClass::Common);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(128))]

        #[test]
        fn prop_pro_forma_ownership_sums_to_100(
            founder_shares in 1u32..10_000_000,
            angel_shares in 1u32..5_000_000,
            valuation in 100_000u32..100_000_000,
            investment in 10_000u32..50_000_000,
            esop_bp in 0u32..3_000,
        ) {
            let records = vec![
                OwnershipRecord::new("Founders", 0.0, founder_shares as f64, ShareClass::Common).unwrap(),
                OwnershipRecord::new("Angels", 50_000.0, angel_shares as f64, ShareClass::Preferred).unwrap(),
            ];
            let total = compute_status_quo(&records).total_shares;
            let params = NewRoundParameters::new("Round", investment as f64, valuation as f64, esop_bp as f64 / 100.0);
            let view = compute_pro_forma(total, &records, &params);

            let sum: f64 = view.rows.iter().map(|r| r.ownership_percent).sum();
            prop_assert!((sum - 100.0).abs() < 1e-6, "sum was {}", sum);
        }

        #[test]
        fn prop_existing_holders_are_diluted(
            founder_shares in 1u32..10_000_000,
            valuation in 100_000u32..100_000_000,
            investment in 10_000u32..50_000_000,
            esop_bp in 0u32..3_000,
        ) {
            let records = vec![
                OwnershipRecord::new("Founders", 0.0, founder_shares as f64, ShareClass::Common).unwrap(),
                OwnershipRecord::new("Seed", 250_000.0, 400_000.0, ShareClass::Preferred).unwrap(),
            ];
            let before = compute_status_quo(&records);
            let params = NewRoundParameters::new("Round", investment as f64, valuation as f64, esop_bp as f64 / 100.0);
            let after = compute_pro_forma(before.total_shares, &records, &params);

            for (old, new) in before.rows.iter().zip(after.rows.iter()) {
                prop_assert!(new.ownership_percent <= old.ownership_percent);
            }
        }

        #[test]
        fn prop_pool_target_is_met(
            pre_shares in 1_000u32..10_000_000,
            valuation in 100_000u32..100_000_000,
            investment in 10_000u32..50_000_000,
            esop_bp in 1u32..5_000,
        ) {
            let esop_fraction = esop_bp as f64 / 10_000.0;
            let k = esop_fraction / (1.0 - esop_fraction);
            let reachable = 1.0 - k * (investment as f64 / valuation as f64) > 0.0;

            let params = NewRoundParameters::new("Round", investment as f64, valuation as f64, esop_bp as f64 / 100.0);
            let summary = price_round(pre_shares as f64, &params).unwrap();

            if reachable {
                let achieved = summary.esop_shares / summary.total_post_money_shares;
                prop_assert!(((achieved - esop_fraction) / esop_fraction).abs() < 1e-6);
            } else {
                prop_assert!(summary.esop_shares == 0.0);
            }
        }
    }
}
