use chrono::{DateTime, Datelike, Utc};

/// Age of a history entry for the history panel:
/// - Relative under 7 days: "2h ago", "3d ago"
/// - Absolute otherwise: "Jan 15", "Dec 3, 2024"
pub fn format_age(created: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*created);

    if elapsed.num_days() < 7 {
        format_relative(elapsed.num_seconds())
    } else if created.year() == now.year() {
        created.format("%b %-d").to_string()
    } else {
        created.format("%b %-d, %Y").to_string()
    }
}

fn format_relative(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        // Also covers entries stamped slightly in the future by clock skew
        "just now".to_string()
    }
}
