/// Coerce a non-finite value to zero.
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Per-frame blend factor for exponential smoothing that is independent of frame rate.
///
/// `k` is the fraction of the remaining distance covered in one reference frame; a tick of
/// `delta_ms` covers `1 - (1-k)^(delta/reference)`.
pub fn smoothing_factor(k: f64, delta_ms: f64, reference_frame_ms: f64) -> f64 {
    let k = finite_or_zero(k).clamp(0.0, 1.0);
    if reference_frame_ms <= 0.0 || !reference_frame_ms.is_finite() {
        return 1.0;
    }
    let frames = finite_or_zero(delta_ms).max(0.0) / reference_frame_ms;
    (1.0 - (1.0 - k).powf(frames)).clamp(0.0, 1.0)
}
