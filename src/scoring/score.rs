/// Weighted mean of `(score, weight)` pairs.
///
/// Scores are clamped to `[0, 1]` and negative weights count as zero, so the
/// result is always a convex combination. Returns 0 when there is nothing to
/// average.
pub fn weighted_average(pairs: &[(f64, f64)]) -> f64 {
    let (total, weight_sum) = pairs
        .iter()
        .fold((0.0, 0.0), |(total, weight_sum), &(score, weight)| {
            let weight = weight.max(0.0);
            (total + clamp_unit(score) * weight, weight_sum + weight)
        });

    if weight_sum > 0.0 {
        clamp_unit(total / weight_sum)
    } else {
        0.0
    }
}

/// Clamps to `[0, 1]`, mapping non-finite values to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Rescales a unit score to a percentage rounded to two decimals.
pub fn to_percent(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}
