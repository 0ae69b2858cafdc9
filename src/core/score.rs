const PERFECT_SCORE: f64 = 100.0;
const UNIT_PENALTY: f64 = 10.0;
const DRINK_PENALTY: f64 = 2.0;

/// Score for one day's totals.
///
/// Zero units is always a perfect day, even when a zero-ABV drink was
/// logged. The result is not clamped and goes negative on heavy days.
pub fn calculate_score(total_units: f64, total_drinks: u32) -> f64 {
    if total_units == 0.0 {
        return PERFECT_SCORE;
    }

    PERFECT_SCORE - UNIT_PENALTY * total_units - DRINK_PENALTY * f64::from(total_drinks)
}

pub fn label_for_score(score: f64) -> &'static str {
    if score >= PERFECT_SCORE {
        "Sober"
    } else if score >= 75.0 {
        "Steady"
    } else if score >= 50.0 {
        "Wobbly"
    } else if score >= 0.0 {
        "Rough"
    } else {
        "Hangover"
    }
}
