//! JavaScript bindings
//!
//! The browser holds a `CapTable` handle that owns the record list; every
//! view is recomputed from scratch when asked for. Views come back as plain
//! JS objects, snapshots and config travel as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::commit::commit_pro_forma_with_config;
use crate::config::EngineConfig;
use crate::error::{CapTableError, Result};
use crate::pro_forma::compute_pro_forma_with_config;
use crate::sequencer::next_round_name_with_config;
use crate::status_quo::{compute_status_quo, total_shares};
use crate::types::{NewRoundParameters, OwnershipRecord, ProFormaView, ShareClass, StatusQuoView};

#[cfg(feature = "console_error_panic_hook")]
use crate::logging::set_panic_hook;

fn to_js<T: Serialize>(value: &T) -> std::result::Result<JsValue, JsError> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// Parse and validate a JSON array of records
pub fn parse_records(json: &str) -> Result<Vec<OwnershipRecord>> {
    let records: Vec<OwnershipRecord> = serde_json::from_str(json)?;
    for record in records.iter() {
        record.validate()?;
    }
    Ok(records)
}

// ============================================================================
// Cap Table Handle
// ============================================================================

/// Caller-owned cap table
///
/// # Example (JavaScript)
/// ```javascript
/// const table = new CapTable();
/// table.addRecord("Founders", 25000, 1000000, "common");
/// const view = table.proForma("Series A", 1000000, 4000000, 10);
/// const next = table.commit("Series A", 1000000, 4000000, 10); // "Series B"
/// ```
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct CapTable {
    records: Vec<OwnershipRecord>,
    config: EngineConfig,
}

#[wasm_bindgen]
impl CapTable {
    /// Create an empty cap table with the default config
    #[wasm_bindgen(constructor)]
    pub fn new() -> CapTable {
        #[cfg(feature = "console_error_panic_hook")]
        set_panic_hook();

        CapTable::default()
    }

    /// Create an empty cap table with a JSON config
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> std::result::Result<CapTable, JsError> {
        Ok(Self::try_with_config(config_json)?)
    }

    /// Restore a cap table from a `toJson` snapshot (array of records)
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(records_json: &str) -> std::result::Result<CapTable, JsError> {
        Ok(Self::try_from_json(records_json)?)
    }

    /// Snapshot of the records as a JSON array
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> std::result::Result<String, JsError> {
        Ok(self.snapshot_json()?)
    }

    /// Append a validated record
    #[wasm_bindgen(js_name = addRecord)]
    pub fn add_record(
        &mut self,
        name: &str,
        investment: f64,
        shares: f64,
        kind: &str,
    ) -> std::result::Result<(), JsError> {
        Ok(self.try_add_record(name, investment, shares, kind)?)
    }

    /// Remove the record at `index`; false if out of range
    #[wasm_bindgen(js_name = removeRecord)]
    pub fn remove_record(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.records.remove(index);
            true
        } else {
            false
        }
    }

    #[wasm_bindgen(getter, js_name = recordCount)]
    pub fn record_count(&self) -> u32 {
        self.records.len() as u32
    }

    #[wasm_bindgen(getter, js_name = totalShares)]
    pub fn total_shares(&self) -> f64 {
        total_shares(&self.records)
    }

    /// Records as an array of plain objects
    pub fn records(&self) -> std::result::Result<JsValue, JsError> {
        to_js(&self.records)
    }

    /// Current ownership view
    #[wasm_bindgen(js_name = statusQuo)]
    pub fn status_quo(&self) -> std::result::Result<JsValue, JsError> {
        to_js(&self.status_quo_view())
    }

    /// Projected ownership for a prospective round
    #[wasm_bindgen(js_name = proForma)]
    pub fn pro_forma(
        &self,
        name: &str,
        investment_amount: f64,
        pre_money_valuation: f64,
        target_esop_percent: f64,
    ) -> std::result::Result<JsValue, JsError> {
        let params = NewRoundParameters::new(
            name,
            investment_amount,
            pre_money_valuation,
            target_esop_percent,
        );
        to_js(&self.pro_forma_view(&params))
    }

    /// Commit the round and return the proposed name for the next one
    pub fn commit(
        &mut self,
        name: &str,
        investment_amount: f64,
        pre_money_valuation: f64,
        target_esop_percent: f64,
    ) -> std::result::Result<String, JsError> {
        let params = NewRoundParameters::new(
            name,
            investment_amount,
            pre_money_valuation,
            target_esop_percent,
        );
        Ok(self.try_commit(&params)?)
    }
}

// Rust-side API, usable off wasm32
impl CapTable {
    pub fn try_with_config(config_json: &str) -> Result<CapTable> {
        Ok(CapTable {
            records: Vec::new(),
            config: EngineConfig::from_json(config_json)?,
        })
    }

    pub fn try_from_json(records_json: &str) -> Result<CapTable> {
        Ok(CapTable {
            records: parse_records(records_json)?,
            config: EngineConfig::default(),
        })
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    pub fn try_add_record(&mut self, name: &str, investment: f64, shares: f64, kind: &str) -> Result<()> {
        let kind: ShareClass = kind.parse()?;
        let record = OwnershipRecord::new(name.trim(), investment, shares, kind)?;
        self.records.push(record);
        Ok(())
    }

    pub fn record_list(&self) -> &[OwnershipRecord] {
        &self.records
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status_quo_view(&self) -> StatusQuoView {
        compute_status_quo(&self.records)
    }

    pub fn pro_forma_view(&self, params: &NewRoundParameters) -> ProFormaView {
        compute_pro_forma_with_config(total_shares(&self.records), &self.records, params, &self.config)
    }

    /// Price the round against the current records and append its rows
    ///
    /// The records are only replaced once the commit has succeeded.
    pub fn try_commit(&mut self, params: &NewRoundParameters) -> Result<String> {
        let summary = self.pro_forma_view(params).summary.ok_or_else(|| {
            CapTableError::CommitRejected(format!("Round '{}' cannot be priced", params.name))
        })?;
        self.records = commit_pro_forma_with_config(&self.records, &summary, params, &self.config)?;
        Ok(next_round_name_with_config(&params.name, &self.config))
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Install the panic hook so Rust panics show up in the browser console
#[wasm_bindgen]
pub fn initialize() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();
}

/// Status-quo view for a JSON array of records
#[wasm_bindgen(js_name = computeStatusQuo)]
pub fn compute_status_quo_json(records_json: &str) -> std::result::Result<JsValue, JsError> {
    let records = parse_records(records_json)?;
    to_js(&compute_status_quo(&records))
}

/// Pro-forma view for a JSON array of records and JSON round parameters
#[wasm_bindgen(js_name = computeProForma)]
pub fn compute_pro_forma_json(
    total_shares: f64,
    records_json: &str,
    params_json: &str,
) -> std::result::Result<JsValue, JsError> {
    let records = parse_records(records_json)?;
    let params: NewRoundParameters =
        serde_json::from_str(params_json).map_err(CapTableError::from)?;
    to_js(&compute_pro_forma_with_config(
        total_shares,
        &records,
        &params,
        &EngineConfig::default(),
    ))
}

/// Proposed name for the round after `name`
#[wasm_bindgen(js_name = nextRoundName)]
pub fn next_round_name_js(name: &str) -> String {
    crate::sequencer::next_round_name(name)
}

/// Get the WASM module version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// WASM-specific Tests
// ============================================================================
