/// Grams of ethanol in one millilitre of pure alcohol.
const ETHANOL_DENSITY: f64 = 0.789;
/// Grams of ethanol in one standard unit.
const GRAMS_PER_UNIT: f64 = 10.0;

/// Standard alcohol units in a drink, rounded to two decimals.
///
/// Inputs are expected to be validated by the caller; see
/// [`DrinkEntry::drink`](crate::core::entry::DrinkEntry::drink).
pub fn calculate_units(volume_ml: f64, abv_percent: f64) -> f64 {
    let grams = volume_ml * (abv_percent / 100.0) * ETHANOL_DENSITY;
    round2(grams / GRAMS_PER_UNIT)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores built from two-decimal units carry at most one decimal.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
