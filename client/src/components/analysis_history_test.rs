use chrono::{FixedOffset, Utc};

use super::*;

#[test]
fn format_history_date_uses_twelve_hour_clock() {
    let at = Utc.with_ymd_and_hms(2026, 5, 4, 14, 5, 0).single().expect("valid timestamp");
    assert_eq!(format_history_date(&at), "May 4, 2026 2:05 PM");
}

#[test]
fn format_history_date_respects_offset() {
    let at = Utc.with_ymd_and_hms(2026, 1, 1, 23, 30, 0).single().expect("valid timestamp");
    let east = FixedOffset::east_opt(2 * 3600).expect("valid offset");
    assert_eq!(format_history_date(&at.with_timezone(&east)), "Jan 2, 2026 1:30 AM");
}
