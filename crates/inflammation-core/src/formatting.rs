/// Format a reading with a fixed number of decimal places.
///
/// Negative zero is printed as zero so normalised output never shows `-0.00`.
///
/// # Examples
///
/// ```
/// use inflammation_core::formatting::format_reading;
///
/// assert_eq!(format_reading(0.3333, 2), "0.33");
/// assert_eq!(format_reading(12.0, 0), "12");
/// assert_eq!(format_reading(-0.0, 2), "0.00");
/// ```
pub fn format_reading(value: f64, decimals: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.prec$}", value, prec = decimals)
}

/// Format a whole row of readings, separated by `sep`.
///
/// # Examples
///
/// ```
/// use inflammation_core::formatting::format_row;
///
/// assert_eq!(format_row(&[1.0, 0.5], 1, ", "), "1.0, 0.5");
/// assert_eq!(format_row(&[], 1, ", "), "");
/// ```
pub fn format_row(values: &[f64], decimals: usize, sep: &str) -> String {
    values
        .iter()
        .map(|v| format_reading(*v, decimals))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Label used for a zero-based day index on axes and in tables.
///
/// # Examples
///
/// ```
/// use inflammation_core::formatting::day_label;
///
/// assert_eq!(day_label(0), "day 1");
/// ```
pub fn day_label(index: usize) -> String {
    format!("day {}", index + 1)
}

/// Return `(min, max)` over finite values, or `None` if there are none.
///
/// Used to size chart axes.
pub fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
