//! Date Label Formatting
//! Turns "DD/MM/YYYY HH:mm" reading labels into "DD/MM/YYYY - HH:mm" axis categories.

use tracing::warn;

/// Separator placed between the date and time parts of an axis label.
pub const DATE_TIME_SEPARATOR: &str = " - ";

/// Reformat a single reading label.
///
/// The label is split on spaces and the first two parts are joined with
/// [`DATE_TIME_SEPARATOR`]. Labels that do not hold exactly one space are
/// passed through the same split unchanged: a missing time part renders as
/// empty and anything after the second part is dropped.
///
/// A browser chart built with `split(" ")` would show a missing time part as
/// `"undefined"`; here it is an empty string, so `"01/05/2024"` becomes
/// `"01/05/2024 - "`.
pub fn format_date_label(label: &str) -> String {
    let mut parts = label.split(' ');
    let date_part = parts.next().unwrap_or_default();
    let time_part = parts.next().unwrap_or_default();

    if label.matches(' ').count() != 1 {
        warn!(label, "date label is not of the form \"<date> <time>\"");
    }

    format!("{}{}{}", date_part, DATE_TIME_SEPARATOR, time_part)
}

/// Reformat every label, preserving order.
pub fn format_date_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|label| format_date_label(label.as_ref()))
        .collect()
}
