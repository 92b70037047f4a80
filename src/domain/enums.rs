use serde::{Deserialize, Serialize};

/// Fixed configuration of a mental state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateConfig {
    pub label: &'static str,
    pub description: &'static str,
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub icon: &'static str,
}

const SOFT_CONFIG: StateConfig = StateConfig {
    label: "Soft Mode",
    description: "Intentional rest or low-pressure activity",
    min_minutes: 30,
    max_minutes: 45,
    icon: "🎶",
};

const FOCUS_CONFIG: StateConfig = StateConfig {
    label: "Focus Mode",
    description: "Sustained cognitive work",
    min_minutes: 45,
    max_minutes: 60,
    icon: "📖",
};

const SPRINT_CONFIG: StateConfig = StateConfig {
    label: "Sprint Mode",
    description: "Short, energetic effort",
    min_minutes: 25,
    max_minutes: 40,
    icon: "⚡",
};

/// Mental state a task belongs to and a slot runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MentalState {
    Soft,
    Focus,
    Sprint,
}

impl MentalState {
    /// Static configuration for this state
    pub fn config(&self) -> &'static StateConfig {
        match self {
            MentalState::Soft => &SOFT_CONFIG,
            MentalState::Focus => &FOCUS_CONFIG,
            MentalState::Sprint => &SPRINT_CONFIG,
        }
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    /// Upper-case tag, as used in prompts and the demo ids
    pub fn to_tag(&self) -> &'static str {
        match self {
            MentalState::Soft => "SOFT",
            MentalState::Focus => "FOCUS",
            MentalState::Sprint => "SPRINT",
        }
    }

    /// Next state in display order (wraps)
    pub fn next(&self) -> Self {
        match self {
            MentalState::Soft => MentalState::Focus,
            MentalState::Focus => MentalState::Sprint,
            MentalState::Sprint => MentalState::Soft,
        }
    }

    /// Previous state in display order (wraps)
    pub fn prev(&self) -> Self {
        match self {
            MentalState::Soft => MentalState::Sprint,
            MentalState::Focus => MentalState::Soft,
            MentalState::Sprint => MentalState::Focus,
        }
    }

    /// All states in display order
    pub fn all() -> &'static [MentalState] {
        &[MentalState::Soft, MentalState::Focus, MentalState::Sprint]
    }
}

/// Coarse time-of-day label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayChapter {
    Morning,
    Afternoon,
    Evening,
}

impl DayChapter {
    /// Chapter for an hour of the day: [0,12) morning, [12,18) afternoon, rest evening
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            DayChapter::Morning
        } else if hour < 18 {
            DayChapter::Afternoon
        } else {
            DayChapter::Evening
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DayChapter::Morning => "Morning",
            DayChapter::Afternoon => "Afternoon",
            DayChapter::Evening => "Evening",
        }
    }
}

/// Which screen the controller is currently presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Gathering the task pool before the journey begins
    Setup,
    AddingTask,
    /// Choosing a mode and a task (no active slot)
    Journey,
    /// "Ready to begin?" prompt before a slot starts
    ConfirmStart,
    ActiveSlot,
    /// "Shall we stay?" prompt before abandoning a slot
    ConfirmExit,
}
