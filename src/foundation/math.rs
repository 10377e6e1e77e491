/// Threshold under which blend numerators and color deltas are treated as zero.
pub(crate) const EPSILON: f32 = 1e-6;

/// Largest magnitude a guarded division may produce.
pub(crate) const SAFE_DIV_MAX: f32 = 1e6;

/// Division that never yields NaN or infinity.
///
/// A numerator within [`EPSILON`] of zero gives `0`; otherwise the quotient is clamped
/// to `±SAFE_DIV_MAX`, which also covers a zero denominator.
pub(crate) fn safe_div(a: f32, b: f32) -> f32 {
    if a.abs() > EPSILON {
        (a / b).clamp(-SAFE_DIV_MAX, SAFE_DIV_MAX)
    } else {
        0.0
    }
}

pub(crate) fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
