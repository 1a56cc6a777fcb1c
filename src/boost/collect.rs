use super::BoostRequest;

/// Raw calculator inputs as typed by a user. Any field may be missing or
/// non-numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoostInputs {
    pub base_xp: Option<String>,
    /// Additional XP as a percentage of `base_xp` (0-100).
    pub add_pct: Option<String>,
    /// Clan avatar bonus percentage (0-100).
    pub clan_avatar: Option<String>,
    /// Enabled toggles by display name or slug ("Wisdom Aura", "wisdom",
    /// "dxp", "bonus", "urn", "urn_enh", "brazier", ...).
    pub toggles: Vec<String>,
}

/// Normalize raw inputs into a request. Pure; unknown toggles are ignored.
pub fn collect(inputs: &BoostInputs) -> BoostRequest {
    let base_xp = parse_number(inputs.base_xp.as_deref());
    let add_pct = parse_number(inputs.add_pct.as_deref()).min(100.0);
    let clan_avatar = parse_number(inputs.clan_avatar.as_deref()).min(100.0);

    let mut request = BoostRequest {
        base_xp,
        add_xp: base_xp * (add_pct / 100.0),
        clan_avatar,
        ..BoostRequest::default()
    };

    for toggle in &inputs.toggles {
        if !apply_toggle(&mut request, toggle) {
            log::warn!("ignoring unknown boost toggle '{toggle}'");
        }
    }

    request
}

fn apply_toggle(request: &mut BoostRequest, toggle: &str) -> bool {
    match toggle.trim().to_ascii_lowercase().as_str() {
        "dxpw" | "dxp" => request.dxpw = true,
        "bonusexp" | "bonus" => request.bonusexp = true,
        "urn" => request.urn = true,
        "urn_enh" | "urn-enh" => request.urn_enh = true,
        _ => return request.vars_pct.enable(toggle) || request.port_vars.enable(toggle),
    }
    true
}

/// Finite, non-negative number or 0.
fn parse_number(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| value.max(0.0))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(base: &str, add: &str, clan: &str, toggles: &[&str]) -> BoostInputs {
        BoostInputs {
            base_xp: Some(base.to_string()),
            add_pct: Some(add.to_string()),
            clan_avatar: Some(clan.to_string()),
            toggles: toggles.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn unparseable_and_missing_numbers_become_zero() {
        let request = collect(&inputs("abc", "", "NaN", &[]));
        assert_eq!(request.base_xp, 0.0);
        assert_eq!(request.add_xp, 0.0);
        assert_eq!(request.clan_avatar, 0.0);

        let request = collect(&BoostInputs::default());
        assert_eq!(request, BoostRequest::default());

        let request = collect(&inputs("inf", "1e400", "-5", &[]));
        assert_eq!(request.base_xp, 0.0);
        assert_eq!(request.clan_avatar, 0.0);
    }

    #[test]
    fn add_pct_is_premultiplied_into_absolute_xp() {
        let request = collect(&inputs("2000", "5", "10", &[]));
        assert_eq!(request.base_xp, 2000.0);
        assert_eq!(request.add_xp, 100.0);
        assert_eq!(request.clan_avatar, 10.0);
    }

    #[test]
    fn add_xp_stays_finite_for_huge_base() {
        let request = collect(&inputs("1e307", "50", "0", &[]));
        assert!(request.add_xp.is_finite());
        assert_eq!(request.add_xp, 5e306);
        let value = serde_json::to_value(request).expect("serialize");
        assert!(value["add_xp"].is_number());

        let request = collect(&inputs(&f64::MAX.to_string(), "100", "0", &[]));
        assert_eq!(request.add_xp, f64::MAX);
    }

    #[test]
    fn percentages_clamp_to_one_hundred() {
        let request = collect(&inputs("100", "250", "300", &[]));
        assert_eq!(request.add_xp, 100.0);
        assert_eq!(request.clan_avatar, 100.0);
    }

    #[test]
    fn toggles_route_to_flags_and_modifier_maps() {
        let request = collect(&inputs(
            "1000",
            "0",
            "0",
            &["dxp", "Bonus", "urn_enh", "Wisdom Aura", "pulse", "Well", "bogus"],
        ));
        assert!(request.dxpw);
        assert!(request.bonusexp);
        assert!(!request.urn);
        assert!(request.urn_enh);
        assert!(request.vars_pct.wisdom_aura);
        assert!(request.vars_pct.pulse_core);
        assert!(request.port_vars.well);
        assert!(!request.port_vars.brazier);
    }

    #[test]
    fn maps_always_carry_the_fixed_key_sets() {
        for toggles in [&[][..], &["relic"][..], &["Range", "coin", "sceptre"][..]] {
            let value = serde_json::to_value(collect(&inputs("10", "0", "0", toggles)))
                .expect("serialize");
            assert_eq!(value["vars_pct"].as_object().map(|m| m.len()), Some(9));
            assert_eq!(value["port_vars"].as_object().map(|m| m.len()), Some(6));
        }
    }

    #[test]
    fn collect_is_idempotent() {
        let raw = inputs("1234.5", "3", "7", &["incense", "brazier"]);
        assert_eq!(collect(&raw), collect(&raw));
    }
}
