//! Named boolean modifiers carried in a [BoostRequest](super::BoostRequest).
//!
//! Both records serialize every key in a fixed order, so the remote service
//! always sees the full set of toggles. Deserializing accepts any subset.

use serde::{Deserialize, Serialize};

/// (display name, slug) for each `vars_pct` key, in wire order.
pub const VARS_PCT_KEYS: [(&str, &str); 9] = [
    ("Relic Powers", "relic"),
    ("Incense Sticks", "incense"),
    ("Wisdom Aura", "wisdom"),
    ("Desert Pantheon", "pantheon"),
    ("Pulse Core", "pulse"),
    ("Cinder Core", "cinder"),
    ("Coin of Enchantment", "coin"),
    ("Sceptre of Enchantment", "sceptre"),
    ("Premier Artifact", "artifact"),
];

/// (display name, slug) for each `port_vars` key, in wire order.
pub const PORT_VARS_KEYS: [(&str, &str); 6] = [
    ("Brazier", "brazier"),
    ("Crafter", "crafter"),
    ("Fletcher", "fletcher"),
    ("Range", "range"),
    ("Well", "well"),
    ("Workbench", "workbench"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VarsPct {
    #[serde(rename = "Relic Powers")]
    pub relic_powers: bool,
    #[serde(rename = "Incense Sticks")]
    pub incense_sticks: bool,
    #[serde(rename = "Wisdom Aura")]
    pub wisdom_aura: bool,
    #[serde(rename = "Desert Pantheon")]
    pub desert_pantheon: bool,
    #[serde(rename = "Pulse Core")]
    pub pulse_core: bool,
    #[serde(rename = "Cinder Core")]
    pub cinder_core: bool,
    #[serde(rename = "Coin of Enchantment")]
    pub coin_of_enchantment: bool,
    #[serde(rename = "Sceptre of Enchantment")]
    pub sceptre_of_enchantment: bool,
    #[serde(rename = "Premier Artifact")]
    pub premier_artifact: bool,
}

impl VarsPct {
    /// Enable the modifier matching `key` (display name or slug, any case).
    /// Returns false when the key is not a `vars_pct` modifier.
    pub fn enable(&mut self, key: &str) -> bool {
        let Some(index) = key_index(&VARS_PCT_KEYS, key) else {
            return false;
        };
        let slot = match index {
            0 => &mut self.relic_powers,
            1 => &mut self.incense_sticks,
            2 => &mut self.wisdom_aura,
            3 => &mut self.desert_pantheon,
            4 => &mut self.pulse_core,
            5 => &mut self.cinder_core,
            6 => &mut self.coin_of_enchantment,
            7 => &mut self.sceptre_of_enchantment,
            _ => &mut self.premier_artifact,
        };
        *slot = true;
        true
    }

    /// Every modifier with its current state, in wire order.
    pub fn entries(&self) -> [(&'static str, bool); 9] {
        let flags = [
            self.relic_powers,
            self.incense_sticks,
            self.wisdom_aura,
            self.desert_pantheon,
            self.pulse_core,
            self.cinder_core,
            self.coin_of_enchantment,
            self.sceptre_of_enchantment,
            self.premier_artifact,
        ];
        let mut out = [("", false); 9];
        for (i, flag) in flags.into_iter().enumerate() {
            out[i] = (VARS_PCT_KEYS[i].0, flag);
        }
        out
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortVars {
    #[serde(rename = "Brazier")]
    pub brazier: bool,
    #[serde(rename = "Crafter")]
    pub crafter: bool,
    #[serde(rename = "Fletcher")]
    pub fletcher: bool,
    #[serde(rename = "Range")]
    pub range: bool,
    #[serde(rename = "Well")]
    pub well: bool,
    #[serde(rename = "Workbench")]
    pub workbench: bool,
}

impl PortVars {
    pub fn enable(&mut self, key: &str) -> bool {
        let Some(index) = key_index(&PORT_VARS_KEYS, key) else {
            return false;
        };
        let slot = match index {
            0 => &mut self.brazier,
            1 => &mut self.crafter,
            2 => &mut self.fletcher,
            3 => &mut self.range,
            4 => &mut self.well,
            _ => &mut self.workbench,
        };
        *slot = true;
        true
    }
}

fn key_index(keys: &[(&str, &str)], key: &str) -> Option<usize> {
    let key = key.trim();
    keys.iter()
        .position(|(name, slug)| name.eq_ignore_ascii_case(key) || slug.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_accepts_display_name_and_slug() {
        let mut vars = VarsPct::default();
        assert!(vars.enable("Wisdom Aura"));
        assert!(vars.enable("CINDER"));
        assert!(!vars.enable("Brazier"));
        assert!(vars.wisdom_aura);
        assert!(vars.cinder_core);
        assert!(!vars.relic_powers);

        let mut port = PortVars::default();
        assert!(port.enable("workbench"));
        assert!(!port.enable("wisdom"));
        assert!(port.workbench);
    }

    #[test]
    fn entries_follow_wire_order() {
        let mut vars = VarsPct::default();
        vars.enable("artifact");
        let entries = vars.entries();
        assert_eq!(entries[0], ("Relic Powers", false));
        assert_eq!(entries[8], ("Premier Artifact", true));
    }

    #[test]
    fn partial_maps_deserialize_with_missing_keys_false() {
        let vars: VarsPct = serde_json::from_str(r#"{"Pulse Core": true}"#).expect("parse");
        assert!(vars.pulse_core);
        assert_eq!(vars.entries().iter().filter(|(_, on)| *on).count(), 1);
    }
}
