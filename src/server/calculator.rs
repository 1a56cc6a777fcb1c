//! Boost formula used by the reference backend.
//!
//! Stages apply in a fixed order, each one to the running total: additional
//! XP, clan avatar, the `vars_pct` modifiers (compounding, wire order),
//! double XP, then bonus XP. `port_vars` and the urn flags are accepted but
//! not applied.

use crate::boost::{BoostRequest, BoostResult};

/// Percent bonus of each `vars_pct` modifier, in wire order.
pub const VARS_PCT_RATES: [f64; 9] = [2.0, 2.0, 2.0, 3.0, 1.0, 1.5, 3.5, 2.5, 1.5];
pub const BONUS_XP_PCT: f64 = 5.0;

pub fn apply_boosts(request: &BoostRequest) -> BoostResult {
    let mut steps = Vec::new();
    let mut xp = request.base_xp;
    steps.push(format!("Base XP: {xp:.2}"));

    if request.add_xp != 0.0 {
        xp += request.add_xp;
        steps.push(format!("Additional XP: {:.2}", request.add_xp));
    }

    let clan_amt = xp * (request.clan_avatar / 100.0);
    xp += clan_amt;
    steps.push(format!(
        "Clan Avatar ({:.1}%): {clan_amt:.2}",
        request.clan_avatar
    ));

    for ((name, enabled), pct) in request.vars_pct.entries().into_iter().zip(VARS_PCT_RATES) {
        if !enabled {
            continue;
        }
        let boost = xp * (pct / 100.0);
        xp += boost;
        steps.push(format!("{name} ({pct}%): {boost:.2}"));
    }

    if request.dxpw {
        let boost = xp;
        xp *= 2.0;
        steps.push(format!("Double XP: +{boost:.2}"));
    }

    if request.bonusexp {
        let boost = xp * (BONUS_XP_PCT / 100.0);
        xp += boost;
        steps.push(format!("Bonus XP ({BONUS_XP_PCT}%): {boost:.2}"));
    }

    BoostResult { total: xp, steps }
}
