use super::enums::MentalState;
use super::model::{AppState, DayProgress, Slot, Task, TOTAL_DAYS};
use chrono::{DateTime, Duration, Local};
use uuid::Uuid;

/// Day the demo journey opens on (Day 7)
pub const DEMO_DAY_INDEX: usize = 6;

/// Hour the demo journey is pinned to (afternoon)
pub const DEMO_HOUR: u32 = 13;

/// Number of lit days in the demo journey
const DEMO_LIT_DAYS: usize = 6;

fn demo_task(
    name: &str,
    category: MentalState,
    estimated_minutes: u32,
    time_spent: u32,
    completed: bool,
) -> Task {
    Task {
        time_spent,
        completed,
        ..Task::new(name.to_string(), category, estimated_minutes)
    }
}

/// Build a demonstration journey: seven tasks, days 1-6 lit
pub fn demo_state(now: DateTime<Local>) -> AppState {
    let tasks = vec![
        demo_task("Watch Avatar 2", MentalState::Soft, 180, 95, false),
        demo_task("Read novel before bed", MentalState::Soft, 45, 15, false),
        demo_task("Christmas music + journaling", MentalState::Soft, 30, 0, false),
        demo_task("Finish one Missing Semester lecture", MentalState::Focus, 90, 60, false),
        demo_task("Draft application essay outline", MentalState::Focus, 60, 10, false),
        demo_task("15-min workout / walk", MentalState::Sprint, 20, 20, true),
        demo_task("Tidy desk", MentalState::Sprint, 10, 0, false),
    ];

    // Slots reference the first task of their category
    let slot_task = |state: MentalState| -> Uuid {
        tasks
            .iter()
            .find(|t| t.category == state)
            .map(|t| t.id)
            .unwrap_or_else(Uuid::new_v4)
    };

    let days = (0..TOTAL_DAYS)
        .map(|i| {
            let mut day = DayProgress::new(i);
            if i < DEMO_LIT_DAYS {
                let state = match i % 3 {
                    0 => MentalState::Focus,
                    1 => MentalState::Soft,
                    _ => MentalState::Sprint,
                };
                let start = now - Duration::hours(i as i64 + 1);
                let slot = Slot {
                    duration_minutes: 30,
                    completed: true,
                    ..Slot::start(state, slot_task(state), start)
                };
                day.record(slot);
            }
            day
        })
        .collect();

    AppState {
        tasks,
        days,
        current_slot: None,
        setup_complete: true,
    }
}
