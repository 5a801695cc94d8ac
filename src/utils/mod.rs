mod perf;
mod time_utils;

pub use time_utils::{
    AppInstant, TimeUtils, epoch_ms_to_local_date, format_duration, local_wall_clock,
    local_year_month, now_timestamp_ms, parse_local_wall_clock,
};
