use crate::env::parsed_or;

/// Hours covered by the weekly timetable: one row per hour from
/// `day_start_hour:00` up to, but excluding, `day_end_hour:00`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub day_start_hour: u32,
    pub day_end_hour: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            day_end_hour: 18,
        }
    }
}

impl ScheduleConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let start = parsed_or("SCHEDULE_DAY_START_HOUR", defaults.day_start_hour).min(23);
        let end = parsed_or("SCHEDULE_DAY_END_HOUR", defaults.day_end_hour).min(24);

        if start >= end {
            tracing::warn!(start, end, "Schedule hours are inverted, using defaults");
            return defaults;
        }

        Self {
            day_start_hour: start,
            day_end_hour: end,
        }
    }
}
