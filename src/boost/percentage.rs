/// Net boost implied by `total` relative to `base_xp` and the flat `add_xp`.
///
/// Returns 0 when `base_xp` is not positive; that value is a display fallback.
pub fn derive_boost_percentage(base_xp: f64, add_xp: f64, total: f64) -> f64 {
    if base_xp > 0.0 {
        (total - base_xp - add_xp) / base_xp * 100.0
    } else {
        0.0
    }
}

/// Two decimals with a percent sign, e.g. `15.00%`.
pub fn format_percentage(pct: f64) -> String {
    format!("{pct:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_formula_for_positive_base() {
        for (base, add, total) in [(1000.0, 50.0, 1200.0), (3.0, 0.0, 7.5), (250.0, 10.0, 100.0)] {
            let expected = (total - base - add) / base * 100.0;
            assert_eq!(derive_boost_percentage(base, add, total), expected);
        }
    }

    #[test]
    fn zero_base_is_guarded() {
        assert_eq!(derive_boost_percentage(0.0, 0.0, 0.0), 0.0);
        assert_eq!(derive_boost_percentage(0.0, 500.0, 9999.0), 0.0);
        assert_eq!(derive_boost_percentage(-10.0, 1.0, 5.0), 0.0);
    }

    #[test]
    fn scenario_percentages_format_to_two_decimals() {
        assert_eq!(format_percentage(derive_boost_percentage(1000.0, 0.0, 1000.0)), "0.00%");
        assert_eq!(format_percentage(derive_boost_percentage(1000.0, 50.0, 1200.0)), "15.00%");
    }
}
