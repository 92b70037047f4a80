use super::enums::MentalState;
use chrono::{DateTime, Local};
use uuid::Uuid;

/// Number of tracked days in a journey
pub const TOTAL_DAYS: usize = 12;

/// Title of each day, one verse per day
pub const VERSES: [&str; TOTAL_DAYS] = [
    "A Partridge in a Pear Tree",
    "Two Turtle Doves",
    "Three French Hens",
    "Four Calling Birds",
    "Five Gold Rings",
    "Six Geese a-Laying",
    "Seven Swans a-Swimming",
    "Eight Maids a-Milking",
    "Nine Ladies Dancing",
    "Ten Lords a-Leaping",
    "Eleven Pipers Piping",
    "Twelve Drummers Drumming",
];

/// A task in the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub category: MentalState,
    /// Estimated effort in minutes (always >= 1)
    pub estimated_minutes: u32,
    /// Set outside the slot flow; never set to true here
    pub completed: bool,
    /// Accumulated minutes from completed slots
    pub time_spent: u32,
}

impl Task {
    pub fn new(name: String, category: MentalState, estimated_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            estimated_minutes,
            completed: false,
            time_spent: 0,
        }
    }

    /// Add minutes to the time spent. Saturates rather than wrapping.
    pub fn add_time(&mut self, minutes: u32) {
        self.time_spent = self.time_spent.saturating_add(minutes);
    }
}

/// One timed session against a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub id: Uuid,
    pub state: MentalState,
    /// Weak reference; the task may have been removed since
    pub task_id: Uuid,
    pub start_time: DateTime<Local>,
    pub duration_minutes: u32,
    pub completed: bool,
}

impl Slot {
    /// Start a slot in `state`, sized to the state's minimum minutes
    pub fn start(state: MentalState, task_id: Uuid, start_time: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4(),
            state,
            task_id,
            start_time,
            duration_minutes: state.config().min_minutes,
            completed: false,
        }
    }

    /// Owned, completed copy for the day history
    pub fn completed_copy(&self) -> Self {
        Self {
            completed: true,
            ..self.clone()
        }
    }
}

/// Progress record for one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayProgress {
    pub day_index: usize,
    /// Lit candle. Once true it stays true.
    pub is_intentional: bool,
    /// Completed slots in completion order
    pub slots: Vec<Slot>,
}

impl DayProgress {
    pub fn new(day_index: usize) -> Self {
        Self {
            day_index,
            is_intentional: false,
            slots: Vec::new(),
        }
    }

    /// Record an intentionally completed slot and light the day
    pub fn record(&mut self, slot: Slot) {
        self.is_intentional = true;
        self.slots.push(slot);
    }

    pub fn verse(&self) -> &'static str {
        VERSES[self.day_index]
    }
}

/// Aggregate root of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Task pool in insertion order
    pub tasks: Vec<Task>,
    /// Exactly TOTAL_DAYS records, index == day_index
    pub days: Vec<DayProgress>,
    pub current_slot: Option<Slot>,
    pub setup_complete: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            days: (0..TOTAL_DAYS).map(DayProgress::new).collect(),
            current_slot: None,
            setup_complete: false,
        }
    }
}

impl AppState {
    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Tasks that can be chosen for a slot in `mode`
    pub fn eligible_tasks(&self, mode: MentalState) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |t| t.category == mode && !t.completed)
    }
}
