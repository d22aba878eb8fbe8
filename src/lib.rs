//! Cap Table Core - Client-Side Financing Round Modelling
//!
//! Computes ownership for a startup's cap table and projects the dilution
//! from a new priced round with an option pool top-up. Compiled to
//! WebAssembly for the browser calculator; the UI keeps the record list and
//! asks for fresh views on every input change.
//!
//! - Status quo: ownership percent and price per share for each record
//! - Pro forma: pool size and issue price solved together so the pool hits
//!   its post-money target, then ownership after the round
//! - Commit: append the round's pool and investor rows to the records
//! - Round naming: "Series A" is followed by "Series B"
//!
//! ## Usage in Rust
//!
//! ```rust
//! use cap_table_core::{
//!     commit_pro_forma, compute_pro_forma, compute_status_quo, next_round_name,
//!     NewRoundParameters, OwnershipRecord, ShareClass,
//! };
//!
//! let records = vec![
//!     OwnershipRecord::new("Founders", 25_000.0, 1_000_000.0, ShareClass::Common).unwrap(),
//! ];
//! let status_quo = compute_status_quo(&records);
//!
//! let params = NewRoundParameters::new("Series A", 1_000_000.0, 4_000_000.0, 10.0);
//! let pro_forma = compute_pro_forma(status_quo.total_shares, &records, &params);
//! let summary = pro_forma.summary.unwrap();
//! assert!((summary.issue_price_per_share - 3.5).abs() < 1e-9);
//!
//! let records = commit_pro_forma(&records, &summary, &params).unwrap();
//! assert_eq!(records.len(), 3);
//! assert_eq!(next_round_name(&params.name), "Series B");
//! ```
//!
//! ## Usage in JavaScript
//!
//! ```javascript
//! import init, { CapTable } from 'cap-table-core';
//!
//! await init();
//!
//! const table = new CapTable();
//! table.addRecord("Founders", 25000, 1000000, "common");
//! const { rows, summary } = table.proForma("Series A", 1000000, 4000000, 10);
//! ```
//!
//! ## Build
//!
//! ```bash
//! wasm-pack build --target web --out-dir pkg
//! ```

mod logging;

pub mod commit;
pub mod config;
pub mod error;
pub mod pro_forma;
pub mod sequencer;
pub mod status_quo;
pub mod types;
pub mod wasm;

pub use commit::{commit_pro_forma, commit_pro_forma_with_config};
pub use config::EngineConfig;
pub use error::{CapTableError, Result};
pub use pro_forma::{compute_pro_forma, compute_pro_forma_with_config, price_round, solve_esop_pool};
pub use sequencer::{next_round_name, next_round_name_with_config};
pub use status_quo::{compute_status_quo, total_shares};
pub use types::{
    DerivedRow, NewRoundParameters, OwnershipRecord, ProFormaSummary, ProFormaView, ShareClass,
    StatusQuoView, ViewTotals,
};
pub use wasm::CapTable;

#[cfg(feature = "console_error_panic_hook")]
pub use logging::set_panic_hook;
