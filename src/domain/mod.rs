pub mod clock;
pub mod countdown;
pub mod demo;
pub mod drift;
pub mod enums;
pub mod model;
pub mod views;

pub use clock::DayClock;
pub use countdown::{tick_duration, Countdown};
pub use drift::DriftMonitor;
pub use enums::{DayChapter, MentalState, UiMode};
pub use model::{AppState, DayProgress, Slot, Task, TOTAL_DAYS};
pub use views::{
    candle_glyph, completed_task_count, format_minutes, lit_day_count, minutes_by_mode, mode_usage,
    progress_percent,
};
