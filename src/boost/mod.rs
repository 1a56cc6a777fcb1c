//! XP-boost request/response schema, input collection and the derived
//! boost percentage.
//!
//! The boost formula itself belongs to the calculation service. Nothing in
//! this module applies modifiers to XP.

pub mod collect;
pub mod percentage;
pub mod modifiers;

use serde::{Deserialize, Serialize};

pub use collect::{collect, BoostInputs};
pub use percentage::{derive_boost_percentage, format_percentage};
pub use modifiers::{PortVars, VarsPct, PORT_VARS_KEYS, VARS_PCT_KEYS};

/// Body of `POST /api/calculate`.
///
/// `add_xp` is an absolute XP amount (already multiplied out from a
/// percentage of `base_xp`); `clan_avatar` is a 0-100 percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostRequest {
    pub base_xp: f64,
    pub add_xp: f64,
    pub clan_avatar: f64,
    pub dxpw: bool,
    pub bonusexp: bool,
    pub vars_pct: VarsPct,
    pub port_vars: PortVars,
    pub urn: bool,
    pub urn_enh: bool,
}

/// Response of `POST /api/calculate`. `steps` is display text only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostResult {
    pub total: f64,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_every_toggle_key() {
        let value = serde_json::to_value(BoostRequest::default()).expect("serialize");
        assert_eq!(value["vars_pct"].as_object().map(|m| m.len()), Some(9));
        assert_eq!(value["port_vars"].as_object().map(|m| m.len()), Some(6));
        assert_eq!(value["dxpw"], false);
        assert_eq!(value["urn_enh"], false);
    }

    #[test]
    fn result_without_steps_parses() {
        let result: BoostResult = serde_json::from_str(r#"{"total": 1200}"#).expect("parse");
        assert_eq!(result.total, 1200.0);
        assert!(result.steps.is_empty());
    }
}
