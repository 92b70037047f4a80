use crate::domain::{
    completed_task_count, demo, mode_usage, AppState, Countdown, DayChapter, DayClock, DayProgress,
    DriftMonitor, MentalState, Slot, Task, UiMode,
};
use crate::notifications;
use crate::oracle::{Broker, MessageTag, ReflectionRequest, Reply};
use chrono::Local;
use std::time::Instant;
use uuid::Uuid;

/// Field of the add-task form that has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Category,
    Hours,
    Minutes,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Category,
            FormField::Category => FormField::Hours,
            FormField::Hours => FormField::Minutes,
            FormField::Minutes => FormField::Name,
        }
    }
}

/// Input form state for adding tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub name: String,
    pub category: MentalState,
    pub hours: String,
    pub minutes: String,
    pub field: FormField,
}

impl Default for InputFormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: MentalState::Soft,
            hours: "0".to_string(),
            minutes: "30".to_string(),
            field: FormField::Name,
        }
    }
}

/// Convert an hour + minute entry into whole minutes, clamped to at least 1
pub fn estimate_from_parts(hours: u32, minutes: u32) -> u32 {
    hours.saturating_mul(60).saturating_add(minutes).max(1)
}

/// Session controller. Owns the journey state; its methods are the only
/// way to change it.
pub struct App {
    state: AppState,
    clock: DayClock,

    // Ephemeral selection and prompt state
    selected_mode: Option<MentalState>,
    selected_task: Option<Uuid>,
    start_prompt: bool,
    exit_prompt: bool,

    // Active slot machinery
    countdown: Option<Countdown>,
    drift: DriftMonitor,
    expiry_notified: bool,

    // Surfaced messages
    reflection: Option<String>,
    drift_message: Option<String>,
    /// (day index, slot id) of the latest intentional completion; a newer
    /// slot start clears it so late reflections are dropped
    last_completed: Option<(usize, Uuid)>,
    broker: Broker,

    pub input_form: Option<InputFormState>,
    pub pool_cursor: usize,
    pub use_emoji: bool,
}

impl App {
    pub fn new(broker: Broker, clock: DayClock, drift: DriftMonitor) -> Self {
        Self {
            state: AppState::default(),
            clock,
            selected_mode: None,
            selected_task: None,
            start_prompt: false,
            exit_prompt: false,
            countdown: None,
            drift,
            expiry_notified: false,
            reflection: None,
            drift_message: None,
            last_completed: None,
            broker,
            input_form: None,
            pool_cursor: 0,
            use_emoji: true,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn clock(&self) -> &DayClock {
        &self.clock
    }

    pub fn selected_mode(&self) -> Option<MentalState> {
        self.selected_mode
    }

    pub fn selected_task(&self) -> Option<Uuid> {
        self.selected_task
    }

    pub fn reflection(&self) -> Option<&str> {
        self.reflection.as_deref()
    }

    pub fn drift_message(&self) -> Option<&str> {
        self.drift_message.as_deref()
    }

    /// Reflection to draw. Only shown on the journey screens, where its
    /// dismiss key is bound.
    pub fn visible_reflection(&self) -> Option<&str> {
        match self.ui_mode() {
            UiMode::Journey | UiMode::ConfirmStart => self.reflection(),
            _ => None,
        }
    }

    /// Drift nudge to draw, only while a slot is running
    pub fn visible_drift_message(&self) -> Option<&str> {
        match self.ui_mode() {
            UiMode::ActiveSlot | UiMode::ConfirmExit => self.drift_message(),
            _ => None,
        }
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn chapter(&self) -> DayChapter {
        self.clock.chapter()
    }

    /// Day record that receives completions and is displayed
    pub fn current_day(&self) -> &DayProgress {
        &self.state.days[self.clock.day_index()]
    }

    /// Task of the active slot, if it still exists
    pub fn active_task(&self) -> Option<&Task> {
        let slot = self.state.current_slot.as_ref()?;
        self.state.task(slot.task_id)
    }

    /// Tasks selectable under the selected mode
    pub fn eligible_tasks(&self) -> Vec<&Task> {
        match self.selected_mode {
            Some(mode) => self.state.eligible_tasks(mode).collect(),
            None => Vec::new(),
        }
    }

    /// Screen to present, derived from state and prompt flags
    pub fn ui_mode(&self) -> UiMode {
        if !self.state.setup_complete {
            return if self.input_form.is_some() {
                UiMode::AddingTask
            } else {
                UiMode::Setup
            };
        }
        if self.state.current_slot.is_some() {
            return if self.exit_prompt {
                UiMode::ConfirmExit
            } else {
                UiMode::ActiveSlot
            };
        }
        if self.start_prompt {
            UiMode::ConfirmStart
        } else {
            UiMode::Journey
        }
    }

    fn is_idle(&self) -> bool {
        self.state.current_slot.is_none()
    }

    // ---- Task pool ----

    /// Add a task to the pool. Blank names and zero estimates are ignored.
    pub fn add_task(&mut self, name: &str, category: MentalState, estimated_minutes: u32) {
        let name = name.trim();
        if name.is_empty() || estimated_minutes == 0 {
            tracing::debug!(name, estimated_minutes, "rejected task input");
            return;
        }
        let task = Task::new(name.to_string(), category, estimated_minutes);
        tracing::info!(id = %task.id, name, category = category.to_tag(), "task added");
        self.state.tasks.push(task);
    }

    /// Remove a task if present. Past slots keep their (now dangling) reference.
    pub fn remove_task(&mut self, id: Uuid) {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|t| t.id != id);
        if self.state.tasks.len() == before {
            return;
        }
        tracing::info!(%id, "task removed");

        if self.selected_task == Some(id) {
            self.selected_task = None;
        }
        if self.pool_cursor >= self.state.tasks.len() {
            self.pool_cursor = self.state.tasks.len().saturating_sub(1);
        }
    }

    pub fn remove_task_at_cursor(&mut self) {
        if let Some(id) = self.state.tasks.get(self.pool_cursor).map(|t| t.id) {
            self.remove_task(id);
        }
    }

    pub fn move_pool_cursor_up(&mut self) {
        self.pool_cursor = self.pool_cursor.saturating_sub(1);
    }

    pub fn move_pool_cursor_down(&mut self) {
        if self.pool_cursor + 1 < self.state.tasks.len() {
            self.pool_cursor += 1;
        }
    }

    /// Leave setup. Needs at least one task in the pool.
    pub fn begin_journey(&mut self) {
        if self.state.tasks.is_empty() {
            return;
        }
        self.input_form = None;
        self.state.setup_complete = true;
        tracing::info!(tasks = self.state.tasks.len(), "journey begun");
    }

    /// Return to setup to edit the pool. Not while a slot is active.
    pub fn adjust_task_pool(&mut self) {
        if !self.is_idle() {
            return;
        }
        self.start_prompt = false;
        self.state.setup_complete = false;
    }

    pub fn start_add_task(&mut self) {
        if self.state.setup_complete {
            return;
        }
        self.input_form = Some(InputFormState::default());
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.field = form.field.next();
        }
    }

    /// Cycle the category when the category field has focus
    pub fn form_cycle_category(&mut self, forward: bool) {
        if let Some(form) = &mut self.input_form {
            if form.field == FormField::Category {
                form.category = if forward {
                    form.category.next()
                } else {
                    form.category.prev()
                };
            }
        }
    }

    pub fn form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.field {
                FormField::Name => form.name.push(c),
                FormField::Hours if c.is_ascii_digit() && form.hours.len() < 3 => {
                    form.hours.push(c)
                }
                FormField::Minutes if c.is_ascii_digit() && form.minutes.len() < 4 => {
                    form.minutes.push(c)
                }
                _ => {}
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.field {
                FormField::Name => {
                    form.name.pop();
                }
                FormField::Hours => {
                    form.hours.pop();
                }
                FormField::Minutes => {
                    form.minutes.pop();
                }
                FormField::Category => {}
            }
        }
    }

    /// Submit the add-task form. A blank name keeps the form open.
    pub fn submit_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        if form.name.trim().is_empty() {
            self.input_form = Some(form);
            return;
        }
        let hours = form.hours.parse().unwrap_or(0);
        let minutes = form.minutes.parse().unwrap_or(0);
        self.add_task(&form.name, form.category, estimate_from_parts(hours, minutes));
        self.pool_cursor = self.state.tasks.len().saturating_sub(1);
    }

    pub fn cancel_form(&mut self) {
        self.input_form = None;
    }

    // ---- Slot controller ----

    /// Choose a mental state. Clears the chosen task.
    pub fn select_mode(&mut self, mode: MentalState) {
        if !self.is_idle() || self.start_prompt {
            tracing::debug!("mode change ignored outside idle");
            return;
        }
        self.selected_mode = Some(mode);
        self.selected_task = None;
    }

    /// Choose a task. Must match the selected mode and not be completed.
    pub fn select_task(&mut self, id: Uuid) {
        if !self.is_idle() || self.start_prompt {
            return;
        }
        let Some(mode) = self.selected_mode else {
            return;
        };
        let eligible = self
            .state
            .task(id)
            .map(|t| t.category == mode && !t.completed)
            .unwrap_or(false);
        if eligible {
            self.selected_task = Some(id);
        } else {
            tracing::debug!(%id, "task not eligible for selected mode");
        }
    }

    /// Move the task selection through the eligible list
    pub fn select_adjacent_task(&mut self, forward: bool) {
        let ids: Vec<Uuid> = self.eligible_tasks().iter().map(|t| t.id).collect();
        if ids.is_empty() {
            return;
        }
        let position = self
            .selected_task
            .and_then(|id| ids.iter().position(|t| *t == id));
        let next = match position {
            None => 0,
            Some(i) if forward => (i + 1).min(ids.len() - 1),
            Some(i) => i.saturating_sub(1),
        };
        self.select_task(ids[next]);
    }

    /// Raise the "ready to begin?" prompt
    pub fn request_start(&mut self) {
        if self.is_idle() && self.selected_task.is_some() {
            self.start_prompt = true;
        }
    }

    pub fn decline_start(&mut self) {
        self.start_prompt = false;
    }

    /// Start a slot for the selected mode and task
    pub fn confirm_start(&mut self, now: Instant) {
        let (Some(mode), Some(task_id)) = (self.selected_mode, self.selected_task) else {
            return;
        };
        if !self.is_idle() {
            return;
        }

        let slot = Slot::start(mode, task_id, Local::now());
        tracing::info!(
            slot = %slot.id,
            task = %task_id,
            mode = mode.to_tag(),
            minutes = slot.duration_minutes,
            "slot started"
        );

        self.countdown = Some(Countdown::new(slot.duration_minutes, now));
        self.drift.arm();
        self.start_prompt = false;
        self.expiry_notified = false;
        self.drift_message = None;
        self.reflection = None;
        self.last_completed = None;
        self.state.current_slot = Some(slot);
    }

    /// True once the active slot's countdown reached zero
    pub fn time_expired(&self) -> bool {
        self.countdown.as_ref().map_or(false, |c| c.is_expired())
    }

    /// Raise the "shall we stay?" prompt before ending early
    pub fn request_exit(&mut self) {
        if !self.is_idle() && !self.time_expired() {
            self.exit_prompt = true;
        }
    }

    pub fn stay(&mut self) {
        self.exit_prompt = false;
    }

    /// Finish the active slot. Intentional completion lights the day and
    /// asks for a reflection; otherwise the slot is dropped.
    pub fn complete_slot(&mut self, intentional: bool) {
        let Some(slot) = self.state.current_slot.take() else {
            tracing::debug!("complete_slot without an active slot");
            return;
        };
        self.countdown = None;
        self.drift.disarm();
        self.exit_prompt = false;
        self.drift_message = None;

        if !intentional {
            tracing::info!(slot = %slot.id, "slot abandoned");
            return;
        }

        let day_index = self.clock.day_index();
        let day = &mut self.state.days[day_index];
        day.record(slot.completed_copy());
        let usage = mode_usage(day);

        if let Some(task) = self.state.task_mut(slot.task_id) {
            task.add_time(slot.duration_minutes);
        }

        tracing::info!(slot = %slot.id, day = day_index, "slot completed");

        self.broker.request_reflection(
            slot.id,
            ReflectionRequest {
                day_index,
                completed_tasks: completed_task_count(&self.state.tasks),
                mode_usage: usage,
            },
        );
        self.last_completed = Some((day_index, slot.id));
        self.selected_mode = None;
        self.selected_task = None;
    }

    /// Advance the countdown
    pub fn tick(&mut self, now: Instant) {
        let Some(countdown) = &mut self.countdown else {
            return;
        };
        countdown.advance(now);

        if countdown.is_expired() && !self.expiry_notified {
            self.expiry_notified = true;
            let name = self
                .active_task()
                .map(|t| t.name.clone())
                .unwrap_or_default();
            tracing::info!("slot time reached");
            notifications::notify_slot_finished(&name);
        }
    }

    // ---- Drift ----

    pub fn attention_lost(&mut self, now: Instant) {
        self.drift.attention_lost(now);
    }

    pub fn attention_regained(&mut self, now: Instant) {
        if !self.drift.attention_regained(now) {
            return;
        }
        if let Some(slot) = &self.state.current_slot {
            tracing::info!(slot = %slot.id, "drift detected");
            self.broker.request_drift(slot.id, slot.state.label());
        }
    }

    // ---- Messages ----

    /// Apply every reply that has arrived
    pub fn poll_messages(&mut self) {
        while let Some(reply) = self.broker.try_recv() {
            self.apply_reply(reply);
        }
    }

    fn apply_reply(&mut self, reply: Reply) {
        match reply.tag {
            MessageTag::Reflection { day_index, slot_id } => {
                let current = self.last_completed == Some((day_index, slot_id))
                    && self.clock.day_index() == day_index;
                if current {
                    self.reflection = Some(reply.text);
                } else {
                    tracing::warn!(%slot_id, day = day_index, "dropping stale reflection");
                }
            }
            MessageTag::Drift { slot_id } => {
                let current = self
                    .state
                    .current_slot
                    .as_ref()
                    .map_or(false, |s| s.id == slot_id);
                if current {
                    self.drift_message = Some(reply.text);
                } else {
                    tracing::warn!(%slot_id, "dropping stale drift nudge");
                }
            }
        }
    }

    pub fn dismiss_reflection(&mut self) {
        self.reflection = None;
    }

    pub fn dismiss_drift(&mut self) {
        self.drift_message = None;
    }

    // ---- Day clock ----

    pub fn advance_chapter(&mut self) {
        if self.is_idle() {
            self.clock.advance_chapter();
        }
    }

    pub fn next_day(&mut self) {
        if self.is_idle() {
            self.clock.next_day();
        }
    }

    /// Replace everything with the demonstration journey
    pub fn seed_demo(&mut self) {
        if !self.is_idle() {
            return;
        }
        self.state = demo::demo_state(Local::now());
        self.clock.set_day(demo::DEMO_DAY_INDEX);
        self.clock.set_hour_override(Some(demo::DEMO_HOUR));
        self.selected_mode = None;
        self.selected_task = None;
        self.start_prompt = false;
        self.reflection = None;
        self.drift_message = None;
        self.last_completed = None;
        self.input_form = None;
        self.pool_cursor = 0;
        tracing::info!("demo journey seeded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TOTAL_DAYS;
    use crate::oracle::testing::ScriptedGenerator;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn create_test_app() -> App {
        let broker = Broker::new(Arc::new(ScriptedGenerator::answering("Two doves rest."))).unwrap();
        App::new(broker, DayClock::new(Some(9)), DriftMonitor::new(Duration::from_secs(10)))
    }

    /// Wait for one reply and apply it
    fn apply_next_reply(app: &mut App) -> bool {
        match app.broker.recv_timeout(WAIT) {
            Some(reply) => {
                app.apply_reply(reply);
                true
            }
            None => false,
        }
    }

    fn task_id(app: &App, name: &str) -> Uuid {
        app.state().tasks.iter().find(|t| t.name == name).unwrap().id
    }

    /// Add a task, begin the journey and start a slot on it
    fn start_slot(app: &mut App, name: &str, mode: MentalState) -> Uuid {
        app.add_task(name, mode, 60);
        app.begin_journey();
        let id = task_id(app, name);
        app.select_mode(mode);
        app.select_task(id);
        app.request_start();
        app.confirm_start(Instant::now());
        id
    }

    #[test]
    fn test_app_new() {
        let app = create_test_app();
        assert!(app.state().tasks.is_empty());
        assert_eq!(app.state().days.len(), TOTAL_DAYS);
        assert_eq!(app.ui_mode(), UiMode::Setup);
        assert!(app.reflection().is_none());
    }

    #[test]
    fn test_add_and_remove_preserve_order() {
        let mut app = create_test_app();
        for name in ["a", "b", "c", "d"] {
            app.add_task(name, MentalState::Soft, 10);
        }
        app.remove_task(task_id(&app, "b"));
        app.remove_task(Uuid::new_v4());
        app.add_task("e", MentalState::Focus, 10);
        app.remove_task(task_id(&app, "d"));

        let names: Vec<&str> = app.state().tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_add_task_rejects_invalid_input() {
        let mut app = create_test_app();
        app.add_task("   ", MentalState::Soft, 30);
        app.add_task("Read", MentalState::Soft, 0);
        assert!(app.state().tasks.is_empty());

        app.add_task("  Read  ", MentalState::Soft, 30);
        let task = &app.state().tasks[0];
        assert_eq!(task.name, "Read");
        assert_eq!(task.time_spent, 0);
        assert!(!task.completed);
    }

    #[test]
    fn test_estimate_from_parts() {
        assert_eq!(estimate_from_parts(1, 30), 90);
        assert_eq!(estimate_from_parts(0, 0), 1);
        assert_eq!(estimate_from_parts(0, 45), 45);
    }

    #[test]
    fn test_input_form_flow() {
        let mut app = create_test_app();
        app.start_add_task();
        assert_eq!(app.ui_mode(), UiMode::AddingTask);

        for c in "Walk".chars() {
            app.form_add_char(c);
        }
        app.form_next_field();
        app.form_cycle_category(true);
        app.form_next_field();
        app.form_backspace();
        app.form_add_char('1');
        app.form_next_field();
        app.form_backspace();
        app.form_backspace();
        app.form_add_char('x');
        app.form_add_char('5');
        app.submit_form();

        assert!(app.input_form.is_none());
        let task = &app.state().tasks[0];
        assert_eq!(task.name, "Walk");
        assert_eq!(task.category, MentalState::Focus);
        assert_eq!(task.estimated_minutes, 65);
    }

    #[test]
    fn test_submit_blank_form_keeps_it_open() {
        let mut app = create_test_app();
        app.start_add_task();
        app.submit_form();
        assert!(app.input_form.is_some());
        assert!(app.state().tasks.is_empty());
    }

    #[test]
    fn test_begin_journey_needs_tasks() {
        let mut app = create_test_app();
        app.begin_journey();
        assert!(!app.state().setup_complete);

        app.add_task("Read", MentalState::Soft, 30);
        app.begin_journey();
        assert!(app.state().setup_complete);
        assert_eq!(app.ui_mode(), UiMode::Journey);
    }

    #[test]
    fn test_select_mode_clears_task() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        app.begin_journey();
        app.select_mode(MentalState::Soft);
        app.select_task(task_id(&app, "Read"));
        assert!(app.selected_task().is_some());

        app.select_mode(MentalState::Focus);
        assert_eq!(app.selected_mode(), Some(MentalState::Focus));
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn test_select_task_rejections() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        app.add_task("Study", MentalState::Focus, 30);
        app.begin_journey();
        let read = task_id(&app, "Read");
        let study = task_id(&app, "Study");

        // No mode selected yet
        app.select_task(read);
        assert!(app.selected_task().is_none());

        app.select_mode(MentalState::Soft);
        app.select_task(study);
        assert!(app.selected_task().is_none());

        app.state.task_mut(read).unwrap().completed = true;
        app.select_task(read);
        assert!(app.selected_task().is_none());
        assert!(app.eligible_tasks().is_empty());
    }

    #[test]
    fn test_select_adjacent_task() {
        let mut app = create_test_app();
        app.add_task("a", MentalState::Sprint, 10);
        app.add_task("x", MentalState::Soft, 10);
        app.add_task("b", MentalState::Sprint, 10);
        app.begin_journey();
        app.select_mode(MentalState::Sprint);

        app.select_adjacent_task(true);
        assert_eq!(app.selected_task(), Some(task_id(&app, "a")));
        app.select_adjacent_task(true);
        assert_eq!(app.selected_task(), Some(task_id(&app, "b")));
        app.select_adjacent_task(true);
        assert_eq!(app.selected_task(), Some(task_id(&app, "b")));
        app.select_adjacent_task(false);
        assert_eq!(app.selected_task(), Some(task_id(&app, "a")));
    }

    #[test]
    fn test_request_start_needs_task_and_decline_creates_nothing() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        app.begin_journey();
        app.select_mode(MentalState::Soft);

        app.request_start();
        assert_eq!(app.ui_mode(), UiMode::Journey);

        app.select_task(task_id(&app, "Read"));
        app.request_start();
        assert_eq!(app.ui_mode(), UiMode::ConfirmStart);

        app.decline_start();
        assert_eq!(app.ui_mode(), UiMode::Journey);
        assert!(app.state().current_slot.is_none());
        assert!(app.selected_task().is_some());
    }

    #[test]
    fn test_confirm_start_uses_minimum_minutes() {
        for mode in MentalState::all() {
            let mut app = create_test_app();
            start_slot(&mut app, "Task", *mode);

            let slot = app.state().current_slot.as_ref().unwrap();
            assert_eq!(slot.duration_minutes, mode.config().min_minutes);
            assert_eq!(slot.state, *mode);
            assert!(!slot.completed);
            assert_eq!(app.ui_mode(), UiMode::ActiveSlot);
            assert_eq!(
                app.countdown().unwrap().remaining_secs(),
                u64::from(mode.config().min_minutes) * 60
            );
        }
    }

    #[test]
    fn test_soft_slot_scenario() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        app.begin_journey();
        let id = task_id(&app, "Read");

        app.select_mode(MentalState::Soft);
        app.select_task(id);
        app.request_start();
        app.confirm_start(Instant::now());
        app.complete_slot(true);

        let state = app.state();
        assert!(state.current_slot.is_none());
        assert!(state.days[0].is_intentional);
        assert_eq!(state.days[0].slots.len(), 1);
        assert!(state.days[0].slots[0].completed);
        assert_eq!(state.task(id).unwrap().time_spent, 30);

        // Flow restarts at mode selection
        assert!(app.selected_mode().is_none());
        assert!(app.selected_task().is_none());

        assert!(apply_next_reply(&mut app));
        assert_eq!(app.reflection(), Some("Two doves rest."));
        app.dismiss_reflection();
        assert!(app.reflection().is_none());
    }

    #[test]
    fn test_reflection_request_counts_today() {
        let broker_gen = Arc::new(ScriptedGenerator::answering("ok"));
        let broker = Broker::new(broker_gen.clone()).unwrap();
        let mut app = App::new(broker, DayClock::new(Some(9)), DriftMonitor::default());

        start_slot(&mut app, "Read", MentalState::Soft);
        app.complete_slot(true);
        assert!(apply_next_reply(&mut app));

        app.select_mode(MentalState::Soft);
        app.select_task(task_id(&app, "Read"));
        app.confirm_start(Instant::now());
        app.complete_slot(true);
        assert!(apply_next_reply(&mut app));

        let prompts = broker_gen.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains(r#"{"SOFT":2}"#));
        assert!(prompts[1].contains("finishing day 1 "));
    }

    #[test]
    fn test_early_exit_changes_nothing() {
        let mut app = create_test_app();
        let id = start_slot(&mut app, "Read", MentalState::Focus);
        let days_before = app.state().days.clone();
        let tasks_before = app.state().tasks.clone();

        app.request_exit();
        assert_eq!(app.ui_mode(), UiMode::ConfirmExit);
        app.complete_slot(false);

        assert!(app.state().current_slot.is_none());
        assert_eq!(app.state().days, days_before);
        assert_eq!(app.state().tasks, tasks_before);
        assert!(!app.state().days[0].is_intentional);
        // Selections survive so the user can resume
        assert_eq!(app.selected_mode(), Some(MentalState::Focus));
        assert_eq!(app.selected_task(), Some(id));
        assert!(app.broker.recv_timeout(Duration::from_millis(200)).is_none());
    }

    #[test]
    fn test_stay_dismisses_exit_prompt() {
        let mut app = create_test_app();
        start_slot(&mut app, "Read", MentalState::Focus);
        app.request_exit();
        app.stay();
        assert_eq!(app.ui_mode(), UiMode::ActiveSlot);
        assert!(app.state().current_slot.is_some());
    }

    #[test]
    fn test_complete_without_slot_is_noop() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        let before = app.state().clone();
        app.complete_slot(true);
        app.complete_slot(false);
        assert_eq!(app.state(), &before);
    }

    #[test]
    fn test_intentional_day_stays_lit() {
        let mut app = create_test_app();
        let id = start_slot(&mut app, "Read", MentalState::Sprint);
        app.complete_slot(true);
        assert!(app.state().days[0].is_intentional);

        app.select_mode(MentalState::Sprint);
        app.select_task(id);
        app.confirm_start(Instant::now());
        app.complete_slot(false);
        assert!(app.state().days[0].is_intentional);
        assert_eq!(app.state().days[0].slots.len(), 1);
    }

    #[test]
    fn test_removed_task_skips_time_accounting() {
        let mut app = create_test_app();
        let id = start_slot(&mut app, "Read", MentalState::Soft);
        app.state.tasks.clear();
        app.complete_slot(true);

        assert!(app.state().days[0].is_intentional);
        assert_eq!(app.state().days[0].slots[0].task_id, id);
        assert!(app.state().task(id).is_none());
    }

    #[test]
    fn test_completion_goes_to_current_day() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        app.begin_journey();
        app.next_day();
        app.next_day();

        app.select_mode(MentalState::Soft);
        app.select_task(task_id(&app, "Read"));
        app.confirm_start(Instant::now());
        app.complete_slot(true);

        assert!(!app.state().days[0].is_intentional);
        assert!(app.state().days[2].is_intentional);
        assert!(app.current_day().is_intentional);
    }

    #[test]
    fn test_stale_reflection_is_dropped_after_new_slot() {
        let mut app = create_test_app();
        let id = start_slot(&mut app, "Read", MentalState::Soft);
        app.complete_slot(true);

        // A new slot starts before the reflection arrives
        app.select_mode(MentalState::Soft);
        app.select_task(id);
        app.confirm_start(Instant::now());

        assert!(apply_next_reply(&mut app));
        assert!(app.reflection().is_none());
        assert!(app.state().current_slot.is_some());
    }

    #[test]
    fn test_new_slot_clears_shown_reflection() {
        let mut app = create_test_app();
        let id = start_slot(&mut app, "Read", MentalState::Soft);
        app.complete_slot(true);
        assert!(apply_next_reply(&mut app));
        assert_eq!(app.visible_reflection(), Some("Two doves rest."));

        app.select_mode(MentalState::Soft);
        app.select_task(id);
        app.confirm_start(Instant::now());

        assert_eq!(app.ui_mode(), UiMode::ActiveSlot);
        assert!(app.reflection().is_none());
        assert!(app.visible_reflection().is_none());
    }

    #[test]
    fn test_reflection_only_visible_on_journey_screens() {
        let mut app = create_test_app();
        start_slot(&mut app, "Read", MentalState::Soft);
        app.complete_slot(true);
        assert!(apply_next_reply(&mut app));

        app.adjust_task_pool();
        assert_eq!(app.ui_mode(), UiMode::Setup);
        assert!(app.visible_reflection().is_none());
        assert!(app.reflection().is_some());

        app.begin_journey();
        assert_eq!(app.visible_reflection(), Some("Two doves rest."));
    }

    #[test]
    fn test_stale_reflection_is_dropped_after_day_change() {
        let mut app = create_test_app();
        start_slot(&mut app, "Read", MentalState::Soft);
        app.complete_slot(true);
        app.next_day();

        assert!(apply_next_reply(&mut app));
        assert!(app.reflection().is_none());
    }

    #[test]
    fn test_countdown_expiry() {
        let mut app = create_test_app();
        let start = Instant::now();
        start_slot(&mut app, "Run", MentalState::Sprint);
        assert!(!app.time_expired());

        app.tick(start + Duration::from_secs(25 * 60 + 5));
        assert!(app.time_expired());
        assert_eq!(app.countdown().unwrap().remaining_secs(), 0);

        app.tick(start + Duration::from_secs(60 * 60));
        assert_eq!(app.countdown().unwrap().remaining_secs(), 0);
        // Expiry does not complete the slot by itself
        assert!(app.state().current_slot.is_some());

        // Ending early is not offered once time is up
        app.request_exit();
        assert_eq!(app.ui_mode(), UiMode::ActiveSlot);
    }

    #[test]
    fn test_drift_requests_nudge_for_active_slot() {
        let mut app = create_test_app();
        start_slot(&mut app, "Read", MentalState::Focus);
        let now = Instant::now();

        app.attention_lost(now);
        app.attention_regained(now + Duration::from_secs(30));

        assert!(apply_next_reply(&mut app));
        assert_eq!(app.drift_message(), Some("Two doves rest."));
        app.dismiss_drift();
        assert!(app.drift_message().is_none());
    }

    #[test]
    fn test_short_absence_and_idle_events_are_ignored() {
        let mut app = create_test_app();
        let now = Instant::now();

        // No slot yet
        app.attention_lost(now);
        app.attention_regained(now + Duration::from_secs(60));

        start_slot(&mut app, "Read", MentalState::Focus);
        app.attention_lost(now);
        app.attention_regained(now + Duration::from_secs(5));

        assert!(app.broker.recv_timeout(Duration::from_millis(200)).is_none());
    }

    #[test]
    fn test_stale_drift_is_dropped() {
        let mut app = create_test_app();
        start_slot(&mut app, "Read", MentalState::Focus);
        let now = Instant::now();
        app.attention_lost(now);
        app.attention_regained(now + Duration::from_secs(30));
        app.complete_slot(false);

        assert!(apply_next_reply(&mut app));
        assert!(app.drift_message().is_none());
    }

    #[test]
    fn test_navigation_blocked_during_slot() {
        let mut app = create_test_app();
        start_slot(&mut app, "Read", MentalState::Soft);

        app.advance_chapter();
        app.next_day();
        app.adjust_task_pool();
        app.seed_demo();
        app.select_mode(MentalState::Focus);

        assert_eq!(app.chapter(), DayChapter::Morning);
        assert_eq!(app.clock().day_index(), 0);
        assert!(app.state().setup_complete);
        assert_eq!(app.state().tasks.len(), 1);
        assert_eq!(app.state().current_slot.as_ref().unwrap().state, MentalState::Soft);
    }

    #[test]
    fn test_advance_chapter_moves_day_after_evening() {
        let mut app = create_test_app();
        app.advance_chapter();
        app.advance_chapter();
        assert_eq!(app.chapter(), DayChapter::Evening);
        assert_eq!(app.clock().day_index(), 0);
        app.advance_chapter();
        assert_eq!(app.chapter(), DayChapter::Morning);
        assert_eq!(app.clock().day_index(), 1);
    }

    #[test]
    fn test_adjust_task_pool_returns_to_setup() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        app.begin_journey();
        app.adjust_task_pool();
        assert_eq!(app.ui_mode(), UiMode::Setup);
    }

    #[test]
    fn test_removing_selected_task_clears_selection() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        app.begin_journey();
        let id = task_id(&app, "Read");
        app.select_mode(MentalState::Soft);
        app.select_task(id);

        app.adjust_task_pool();
        app.remove_task_at_cursor();
        assert!(app.selected_task().is_none());
        assert!(app.state().tasks.is_empty());
        assert_eq!(app.pool_cursor, 0);
    }

    #[test]
    fn test_seed_demo() {
        let mut app = create_test_app();
        app.add_task("Read", MentalState::Soft, 30);
        app.seed_demo();

        assert_eq!(app.state().tasks.len(), 7);
        assert!(app.state().setup_complete);
        assert_eq!(app.clock().day_index(), 6);
        assert_eq!(app.chapter(), DayChapter::Afternoon);
        assert_eq!(app.ui_mode(), UiMode::Journey);
        assert!(app.selected_mode().is_none());
    }
}
