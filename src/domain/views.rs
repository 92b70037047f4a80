use super::enums::MentalState;
use super::model::{DayProgress, Task};
use std::collections::BTreeMap;

/// Count of slots per mental state on one day
pub fn mode_usage(day: &DayProgress) -> BTreeMap<MentalState, u32> {
    let mut counts = BTreeMap::new();
    for slot in &day.slots {
        *counts.entry(slot.state).or_insert(0) += 1;
    }
    counts
}

/// Total slot minutes per mental state across the journey
pub fn minutes_by_mode(days: &[DayProgress]) -> BTreeMap<MentalState, u32> {
    let mut minutes = BTreeMap::new();
    for slot in days.iter().flat_map(|d| d.slots.iter()) {
        *minutes.entry(slot.state).or_insert(0) += slot.duration_minutes;
    }
    minutes
}

pub fn completed_task_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

/// Number of lit candles
pub fn lit_day_count(days: &[DayProgress]) -> usize {
    days.iter().filter(|d| d.is_intentional).count()
}

/// Progress of a task toward its estimate, capped at 100
pub fn progress_percent(task: &Task) -> u16 {
    let estimate = task.estimated_minutes.max(1) as f64;
    let pct = (task.time_spent as f64 / estimate * 100.0).round();
    pct.min(100.0) as u16
}

/// Format minutes as "Xh Ym" (omits 0 values)
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

/// Candle glyph for a day
pub fn candle_glyph(lit: bool, use_emoji: bool) -> &'static str {
    match (lit, use_emoji) {
        (true, true) => "🕯️",
        (false, true) => "▯",
        (true, false) => "*",
        (false, false) => "|",
    }
}
