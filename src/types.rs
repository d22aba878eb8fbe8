//! Cap table data model
//!
//! Records are immutable value objects owned by the caller. Everything else
//! in this module is derived on demand and never stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::error::{CapTableError, Result};

// =========================================================================
// Share Classes
// =========================================================================

/// Kind of holding a record represents
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShareClass {
    Common,
    Preferred,
    Options,
    Initial,
}

impl ShareClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareClass::Common => "common",
            ShareClass::Preferred => "preferred",
            ShareClass::Options => "options",
            ShareClass::Initial => "initial",
        }
    }
}

impl fmt::Display for ShareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareClass {
    type Err = CapTableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(ShareClass::Common),
            "preferred" => Ok(ShareClass::Preferred),
            "options" => Ok(ShareClass::Options),
            "initial" => Ok(ShareClass::Initial),
            other => Err(CapTableError::InvalidInput(format!(
                "Unknown share class: {}",
                other
            ))),
        }
    }
}

// =========================================================================
// Ownership Records
// =========================================================================

/// One line of the cap table: who put in how much for how many shares
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipRecord {
    pub name: String,
    pub investment: f64,
    pub shares: f64,
    pub kind: ShareClass,
}

impl OwnershipRecord {
    /// Create a validated record
    pub fn new(name: impl Into<String>, investment: f64, shares: f64, kind: ShareClass) -> Result<Self> {
        let record = Self {
            name: name.into(),
            investment,
            shares,
            kind,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the record is fit to enter the cap table
    ///
    /// Name must be non-blank, investment finite and non-negative,
    /// shares finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CapTableError::InvalidInput("Name is required".to_string()));
        }
        if !self.investment.is_finite() || self.investment < 0.0 {
            return Err(CapTableError::InvalidInput(format!(
                "Investment for '{}' must be a non-negative amount, got {}",
                self.name, self.investment
            )));
        }
        if !self.shares.is_finite() || self.shares <= 0.0 {
            return Err(CapTableError::InvalidInput(format!(
                "Shares for '{}' must be positive, got {}",
                self.name, self.shares
            )));
        }
        Ok(())
    }
}

// =========================================================================
// New Round Parameters
// =========================================================================

/// Inputs for a prospective financing round
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRoundParameters {
    pub name: String,
    pub investment_amount: f64,
    pub pre_money_valuation: f64,
    /// Target option pool as a percentage of post-money fully diluted shares
    #[serde(default)]
    pub target_esop_percent: f64,
}

impl NewRoundParameters {
    pub fn new(
        name: impl Into<String>,
        investment_amount: f64,
        pre_money_valuation: f64,
        target_esop_percent: f64,
    ) -> Self {
        Self {
            name: name.into(),
            investment_amount,
            pre_money_valuation,
            target_esop_percent,
        }
    }

    /// Target pool as a fraction in [0, 1)
    pub fn esop_fraction(&self) -> f64 {
        self.target_esop_percent / 100.0
    }

    /// Whether the numeric inputs describe a round that can be priced
    pub fn is_computable(&self) -> bool {
        self.investment_amount.is_finite()
            && self.investment_amount > 0.0
            && self.pre_money_valuation.is_finite()
            && self.pre_money_valuation > 0.0
            && self.target_esop_percent.is_finite()
            && (0.0..100.0).contains(&self.target_esop_percent)
    }

    /// Everything a commit needs beyond a priceable round: a usable name
    pub fn validate_for_commit(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CapTableError::CommitRejected(
                "Round name is required".to_string(),
            ));
        }
        if !(self.pre_money_valuation.is_finite() && self.pre_money_valuation > 0.0) {
            return Err(CapTableError::CommitRejected(format!(
                "Pre-money valuation must be positive, got {}",
                self.pre_money_valuation
            )));
        }
        if !(self.investment_amount.is_finite() && self.investment_amount > 0.0) {
            return Err(CapTableError::CommitRejected(format!(
                "Investment amount must be positive, got {}",
                self.investment_amount
            )));
        }
        Ok(())
    }
}

// =========================================================================
// Derived Views
// =========================================================================

/// Price paid per share, defined as 0 when there are no shares
pub fn price_per_share(investment: f64, shares: f64) -> f64 {
    if shares > 0.0 {
        investment / shares
    } else {
        0.0
    }
}

/// A record with its computed ownership and price
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRow {
    #[serde(flatten)]
    pub record: OwnershipRecord,
    pub ownership_percent: f64,
    pub price_per_share: f64,
}

impl DerivedRow {
    /// Derive a row against a share total; callers guarantee `total_shares > 0`
    pub fn derive(record: OwnershipRecord, total_shares: f64) -> Self {
        let ownership_percent = record.shares / total_shares * 100.0;
        let price_per_share = price_per_share(record.investment, record.shares);
        Self {
            record,
            ownership_percent,
            price_per_share,
        }
    }
}

/// Footer totals of a rendered view
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewTotals {
    pub total_shares: f64,
    pub total_investment: f64,
}

impl ViewTotals {
    pub fn from_rows(rows: &[DerivedRow]) -> Self {
        rows.iter().fold(Self::default(), |acc, row| Self {
            total_shares: acc.total_shares + row.record.shares,
            total_investment: acc.total_investment + row.record.investment,
        })
    }
}

/// Current ownership computed from the record list
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuoView {
    pub rows: Vec<DerivedRow>,
    pub total_shares: f64,
    pub totals: ViewTotals,
}

/// Aggregate figures for a priced round
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProFormaSummary {
    pub issue_price_per_share: f64,
    pub new_investor_shares: f64,
    pub esop_shares: f64,
    pub total_post_money_shares: f64,
    pub post_money_valuation: f64,
}

/// Projected ownership after the new round
///
/// An unpriceable round yields no rows and no summary.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProFormaView {
    pub rows: Vec<DerivedRow>,
    pub summary: Option<ProFormaSummary>,
    pub totals: ViewTotals,
}

impl ProFormaView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.summary.is_none()
    }
}
