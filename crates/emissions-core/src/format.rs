//! Human-scaled magnitude strings.

use crate::error::FormatError;

const SCALES: [(f64, &str); 3] = [
    (1_000_000_000.0, "b"),
    (1_000_000.0, "m"),
    (1_000.0, "k"),
];

/// Render a non-negative magnitude with a `k`/`m`/`b` suffix.
///
/// Values from one thousand upwards are scaled and printed with two
/// decimals (`1234.0` becomes `"1.23 k"`). Smaller values are printed as
/// plain numbers without a suffix (`200.0` becomes `"200"`).
///
/// # Errors
///
/// Negative and non-finite values are outside the domain.
pub fn format_magnitude(value: f64) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NotFinite);
    }
    if value < 0.0 {
        return Err(FormatError::Negative(value));
    }

    for (scale, suffix) in SCALES {
        if value >= scale {
            return Ok(format!("{:.2} {suffix}", value / scale));
        }
    }

    // -0.0 would otherwise print as "-0"
    Ok(if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    })
}
