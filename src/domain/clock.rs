use super::enums::DayChapter;
use super::model::TOTAL_DAYS;
use chrono::Timelike;

/// Navigation state: which day is current and what hour it is
///
/// The day index here is separate from `DayProgress::day_index`; it selects
/// which day record receives new completions and which one is displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayClock {
    day_index: usize,
    hour_override: Option<u32>,
}

impl DayClock {
    pub fn new(hour_override: Option<u32>) -> Self {
        Self {
            day_index: 0,
            hour_override: hour_override.map(|h| h % 24),
        }
    }

    pub fn day_index(&self) -> usize {
        self.day_index
    }

    /// Jump to a day (clamped to the last day)
    pub fn set_day(&mut self, day_index: usize) {
        self.day_index = day_index.min(TOTAL_DAYS - 1);
    }

    pub fn set_hour_override(&mut self, hour: Option<u32>) {
        self.hour_override = hour.map(|h| h % 24);
    }

    /// Overridden hour, or the wall-clock hour
    pub fn hour(&self) -> u32 {
        self.hour_override
            .unwrap_or_else(|| chrono::Local::now().hour())
    }

    pub fn chapter(&self) -> DayChapter {
        DayChapter::from_hour(self.hour())
    }

    /// Morning -> Afternoon -> Evening -> Morning of the next day.
    ///
    /// Pins the hour to a representative value of the new chapter. The day
    /// index saturates at the last day.
    pub fn advance_chapter(&mut self) {
        let next_hour = match self.chapter() {
            DayChapter::Morning => 13,
            DayChapter::Afternoon => 19,
            DayChapter::Evening => {
                self.day_index = (self.day_index + 1).min(TOTAL_DAYS - 1);
                9
            }
        };
        self.hour_override = Some(next_hour);
    }

    /// Move to the next day, wrapping from the last day to the first
    pub fn next_day(&mut self) {
        self.day_index = (self.day_index + 1) % TOTAL_DAYS;
    }
}
