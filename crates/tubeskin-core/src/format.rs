//! Time display helpers

/// Format seconds as `m:ss`, or `h:mm:ss` once there is a whole hour.
///
/// Fractions are truncated. Negative and non-finite values format as `0:00`.
///
/// ```
/// use tubeskin_core::format_time;
///
/// assert_eq!(format_time(0.0), "0:00");
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(3605.0), "1:00:05");
/// ```
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// `"current / duration"` label for the control bar
pub fn time_label(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}
