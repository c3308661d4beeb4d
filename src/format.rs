//! Fixed-precision rendering of p-values.

use crate::error::{DemoError, DemoResult};
use crate::hypothesis::TestResult;

/// Digits after the decimal point in every rendered p-value.
pub const P_VALUE_DECIMALS: usize = 3;

/// Render a p-value with exactly three decimals (`0.538829` → `"0.539"`).
///
/// # Errors
///
/// Returns `InvalidArgument` if `p` is NaN or outside `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use circdemo::format::format_p;
///
/// assert_eq!(format_p(0.538_829).unwrap(), "0.539");
/// assert!(format_p(-0.1).is_err());
/// ```
pub fn format_p(p: f64) -> DemoResult<String> {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return Err(DemoError::invalid_argument(
            "p",
            format!("must be a probability in [0, 1], got {p}"),
        ));
    }
    Ok(format!("{:.*}", P_VALUE_DECIMALS, p))
}

/// Render `"<label> = <p>"`, e.g. `"p_rayleigh = 0.539"`.
///
/// # Errors
///
/// Same as [`format_p`].
pub fn format_line(label: &str, p: f64) -> DemoResult<String> {
    Ok(format!("{label} = {}", format_p(p)?))
}

/// The two report lines for a test result, uniformity first.
///
/// # Errors
///
/// Same as [`format_p`].
pub fn format_result(result: &TestResult) -> DemoResult<[String; 2]> {
    Ok([
        format_line("p_rayleigh", result.p_rayleigh)?,
        format_line("p_vtest", result.p_vtest)?,
    ])
}
