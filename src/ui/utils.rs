use crate::{
    domain::Direction,
    ui::ui_text::{ICON_NEUTRAL, ICON_TREND_DOWN, ICON_TREND_UP},
};

pub fn direction_icon(direction: Direction) -> &'static str {
    match direction {
        Direction::Buy => ICON_TREND_UP,
        Direction::Sell => ICON_TREND_DOWN,
        Direction::Neutral => ICON_NEUTRAL,
    }
}

/// `62.5%`, or a dash when nothing is resolved
pub fn format_win_rate(rate: Option<f64>, decimals: usize) -> String {
    match rate {
        Some(rate) => format!("{:.*}%", decimals, rate * 100.0),
        None => String::from("-"),
    }
}

/// Share of `part` in `total` as a 0..=1 fraction for progress bars
pub fn fraction(part: u32, total: u32) -> f32 {
    if total == 0 {
        0.0
    } else {
        part as f32 / total as f32
    }
}

/// Five-step gauge used next to the confidence figure
pub fn confidence_steps(confidence: u8) -> usize {
    (1..=5).filter(|i| i * 20 <= confidence as usize).count()
}

/// Stable egui image uri for a selected chart
pub fn preview_uri(file_name: &str, len: usize) -> String {
    format!("bytes://chart/{}/{}", len, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_formatting() {
        assert_eq!(format_win_rate(Some(0.5), 1), "50.0%");
        assert_eq!(format_win_rate(Some(2.0 / 3.0), 0), "67%");
        assert_eq!(format_win_rate(None, 1), "-");
    }

    #[test]
    fn gauge_steps_follow_twenty_point_bands() {
        assert_eq!(confidence_steps(0), 0);
        assert_eq!(confidence_steps(19), 0);
        assert_eq!(confidence_steps(72), 3);
        assert_eq!(confidence_steps(100), 5);
    }

    #[test]
    fn fraction_guards_empty_totals() {
        assert_eq!(fraction(3, 0), 0.0);
        assert_eq!(fraction(1, 4), 0.25);
    }
}
