use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Monotonic clock that also works in the browser
pub type AppInstant = web_time::Instant;

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    /// Wall-clock format shared by the prompt and setup expiries
    pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M";
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";
}

// Time Helper functions

pub fn now_timestamp_ms() -> i64 {
    Local::now().timestamp_millis()
}

fn to_local(epoch_ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(epoch_ms).single()
}

/// `YYYY-MM-DD HH:mm` in the user's local time zone
pub fn local_wall_clock(epoch_ms: i64) -> String {
    match to_local(epoch_ms) {
        Some(dt) => dt.format(TimeUtils::WALL_CLOCK_FORMAT).to_string(),
        None => String::from("-"),
    }
}

pub fn epoch_ms_to_local_date(epoch_ms: i64) -> String {
    // Used for display purposes
    match to_local(epoch_ms) {
        Some(dt) => dt.format(TimeUtils::STANDARD_DATE_FORMAT).to_string(),
        None => String::from("-"),
    }
}

/// (year, month 1..=12) of a timestamp in local time
pub fn local_year_month(epoch_ms: i64) -> Option<(i32, u32)> {
    use chrono::Datelike;
    to_local(epoch_ms).map(|dt| (dt.year(), dt.month()))
}

/// Parses a `YYYY-MM-DD HH:mm` local wall-clock string into epoch ms
pub fn parse_local_wall_clock(text: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), TimeUtils::WALL_CLOCK_FORMAT).ok()?;
    // DST gaps have no local mapping; the earliest candidate covers folds
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}s", secs);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m", mins);
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }
    let days = hours / 24;
    format!("{}d", days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_round_trips_through_parse() {
        let ms = Local
            .with_ymd_and_hms(2026, 3, 14, 9, 26, 0)
            .single()
            .map(|dt| dt.timestamp_millis())
            .unwrap();
        let text = local_wall_clock(ms);
        assert_eq!(text, "2026-03-14 09:26");
        assert_eq!(parse_local_wall_clock(&text), Some(ms));
    }

    #[test]
    fn parse_rejects_other_layouts() {
        assert_eq!(parse_local_wall_clock("14/03/2026 09:26"), None);
        assert_eq!(parse_local_wall_clock(""), None);
    }

    #[test]
    fn durations_pick_largest_unit() {
        assert_eq!(format_duration(42_000), "42s");
        assert_eq!(format_duration(TimeUtils::MS_IN_H * 5), "5h");
        assert_eq!(format_duration(TimeUtils::MS_IN_D * 3), "3d");
    }
}
