//! Pricing Arithmetic
//!
//! Pure calculations behind the price engine. This is the single source of
//! truth for surcharge, discount and delivery-time math.

/// Surcharge produced by scaling `amount` with `multiplier`.
///
/// Delta = amount × (multiplier − 1)
///
/// # Arguments
/// * `amount` - Price before scaling
/// * `multiplier` - Scaling factor (e.g. 1.5 for +50%)
///
/// # Returns
/// The additive delta, or 0.0 when the multiplier does not increase the price
pub fn multiplier_delta(amount: f64, multiplier: f64) -> f64 {
    if multiplier <= 1.0 || amount <= 0.0 {
        return 0.0;
    }
    amount * (multiplier - 1.0)
}

/// Total discount amount for a set of percentages.
///
/// Every percentage is taken from the same `base`, so discounts add up
/// instead of compounding: 10% and 20% of 1000 is 300, not 280.
///
/// # Arguments
/// * `base` - Pre-discount price
/// * `percentages` - Eligible discount percentages (e.g. 10.0 for 10%)
pub fn additive_discount(base: f64, percentages: &[f64]) -> f64 {
    if base <= 0.0 {
        return 0.0;
    }
    percentages.iter().map(|p| base * p / 100.0).sum()
}

/// Final price after additive discounts, clamped to a floor.
///
/// Final = max(base − Σ(pᵢ% × base), floor)
///
/// # Arguments
/// * `base` - Pre-discount price
/// * `percentages` - Eligible discount percentages
/// * `floor` - Minimum price (the catalog entry's minimum)
pub fn discounted_price(base: f64, percentages: &[f64], floor: f64) -> f64 {
    (base - additive_discount(base, percentages)).max(floor)
}

/// Delivery estimate in whole time units.
///
/// Starts from the catalog maximum, adds ⌈volume / 3⌉ when the volume is
/// known, then scales by 1.5 for hard projects and rounds up.
///
/// # Arguments
/// * `max_units` - Upper bound of the catalog delivery window
/// * `volume` - Number of pieces, if known
/// * `hard` - Whether the project complexity is "hard"
pub fn delivery_units(max_units: u32, volume: Option<u32>, hard: bool) -> u32 {
    let volume_extra = volume.map(|v| v.div_ceil(3)).unwrap_or(0);
    let total = max_units + volume_extra;

    if hard {
        (total as f64 * 1.5).ceil() as u32
    } else {
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_delta() {
        assert_eq!(multiplier_delta(3000.0, 1.5), 1500.0);
        assert!((multiplier_delta(3000.0, 1.2) - 600.0).abs() < 1e-9);
        assert_eq!(multiplier_delta(3000.0, 1.0), 0.0);
    }

    #[test]
    fn test_additive_discount_does_not_compound() {
        // 10% + 20% of 1000 = 300 (compounding would give 280)
        assert_eq!(additive_discount(1000.0, &[10.0, 20.0]), 300.0);
    }

    #[test]
    fn test_discounted_price_floor() {
        assert_eq!(discounted_price(1000.0, &[10.0, 20.0], 500.0), 700.0);
        assert_eq!(discounted_price(1000.0, &[60.0], 500.0), 500.0);
    }

    #[test]
    fn test_discounted_price_no_discounts() {
        assert_eq!(discounted_price(4200.0, &[], 3000.0), 4200.0);
    }

    #[test]
    fn test_delivery_units() {
        // 5 + ceil(12/3) = 9, × 1.5 = 13.5 → 14
        assert_eq!(delivery_units(5, Some(12), true), 14);
        assert_eq!(delivery_units(5, Some(4), false), 7);
        assert_eq!(delivery_units(5, None, false), 5);
        assert_eq!(delivery_units(3, Some(1), false), 4);
    }
}
