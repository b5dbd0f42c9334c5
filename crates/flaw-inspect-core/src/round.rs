/// Round to `places` decimal digits with halves rounding up.
///
/// A plain `floor(v * 10^p + 0.5)` misrounds exact decimal halves because
/// they have no finite binary representation (`1.005 * 100` is slightly
/// below `100.5`). The scaled value is therefore nudged upward by a few
/// ULPs before the half-up floor, which is enough to recover the intended
/// decimal and far too small to move any value that is not a stored half.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    let scaled = value * scale;
    let nudged = scaled + scaled.abs() * f64::EPSILON * 4.0;
    (nudged + 0.5).floor() / scale
}
