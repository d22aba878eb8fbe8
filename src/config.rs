//! Engine configuration
//!
//! Controls the labels and share classes given to the synthetic rows a
//! pro-forma round introduces, and the fallback name the round sequencer
//! proposes.

use serde::{Deserialize, Serialize};

use crate::error::{CapTableError, Result};
use crate::types::ShareClass;

/// Configuration for the cap table engine
///
/// # Example
///
/// ```rust
/// use cap_table_core::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "esopRowName": "Option Pool" }"#).unwrap();
/// assert_eq!(config.esop_row_name, "Option Pool");
/// assert_eq!(config.default_round_name, "New Round");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Label for the option pool row added by a round
    #[serde(default = "default_esop_row_name")]
    pub esop_row_name: String,

    /// Name proposed after a round whose name doesn't follow "Series <letter>"
    #[serde(default = "default_round_name")]
    pub default_round_name: String,

    /// Share class of the option pool row
    #[serde(default = "default_esop_share_class")]
    pub esop_share_class: ShareClass,

    /// Share class of the new investor row
    #[serde(default = "default_round_share_class")]
    pub round_share_class: ShareClass,
}

fn default_esop_row_name() -> String {
    "ESOP Pool".to_string()
}

fn default_round_name() -> String {
    "New Round".to_string()
}

fn default_esop_share_class() -> ShareClass {
    ShareClass::Options
}

fn default_round_share_class() -> ShareClass {
    ShareClass::Preferred
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            esop_row_name: default_esop_row_name(),
            default_round_name: default_round_name(),
            esop_share_class: default_esop_share_class(),
            round_share_class: default_round_share_class(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.esop_row_name.trim().is_empty() {
            return Err(CapTableError::Config(
                "esopRowName must not be blank".to_string(),
            ));
        }
        if self.default_round_name.trim().is_empty() {
            return Err(CapTableError::Config(
                "defaultRoundName must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
