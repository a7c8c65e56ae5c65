/// Reference refresh rate that per-frame smoothing factors are expressed against.
pub(crate) const REFERENCE_HZ: f64 = 60.0;

pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` inside `[a, b]`, clamped to `[0, 1]`.
///
/// A zero-length span behaves like a step at `b`.
pub(crate) fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span.abs() <= f64::EPSILON {
        return if v >= b { 1.0 } else { 0.0 };
    }
    clamp01((v - a) / span)
}

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// `factor` is the fraction of the remaining distance covered per 60 Hz frame, so
/// `damp(c, t, 0.1, 1.0 / 60.0)` equals the classic `c += (t - c) * 0.1`. The result always
/// lies between `current` and `target`.
pub(crate) fn damp(current: f64, target: f64, factor: f64, dt: f64) -> f64 {
    if dt.is_nan() || dt <= 0.0 {
        return current;
    }
    let keep = (1.0 - clamp01(factor)).powf(dt * REFERENCE_HZ);
    lerp(current, target, 1.0 - keep)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
