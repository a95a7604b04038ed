/// Convert a major-unit price to minor units (cents), rounding to the
/// nearest unit. Lossless for inputs with at most two decimal places.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}
