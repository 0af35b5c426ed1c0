//! Viridis colour scale.

/// Control points of the Viridis scale, sampled at equal steps.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Map `value` within `[min, max]` to an RGB triple.
///
/// A degenerate range maps to the middle of the scale.
pub fn viridis(value: f64, min: f64, max: f64) -> (u8, u8, u8) {
    let t = if (max - min).abs() < f64::EPSILON || !value.is_finite() {
        0.5
    } else {
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    };

    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - idx as f64;

    let (r0, g0, b0) = VIRIDIS[idx];
    let (r1, g1, b1) = VIRIDIS[idx + 1];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

    (lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
