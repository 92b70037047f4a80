use crate::app::App;
use crate::ui::styles::{border_style, gauge_style, hint_style, mode_style, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the running slot: countdown, progress and the available action
pub fn render_slot_pane(f: &mut Frame, app: &App, area: Rect) {
    let (Some(slot), Some(countdown)) = (app.state().current_slot.as_ref(), app.countdown()) else {
        return;
    };
    let config = slot.state.config();
    let task_name = app
        .active_task()
        .map(|t| t.name.as_str())
        .unwrap_or("(removed task)");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" {} {} ", if app.use_emoji { config.icon } else { "" }, config.label),
            mode_style(slot.state),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Task
            Constraint::Length(2), // Countdown
            Constraint::Length(1), // Gauge
            Constraint::Length(2), // Action
            Constraint::Min(0),
        ])
        .split(inner);

    let task = Paragraph::new(Line::styled(task_name.to_string(), title_style()))
        .alignment(Alignment::Center);
    f.render_widget(task, chunks[0]);

    let time = Paragraph::new(Line::raw(countdown.formatted())).alignment(Alignment::Center);
    f.render_widget(time, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(countdown.progress_ratio().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[2]);

    let action = if countdown.is_expired() {
        Line::styled("Enter  Complete the Verse", title_style())
    } else {
        Line::styled("Enter  End Early", hint_style())
    };
    f.render_widget(
        Paragraph::new(vec![Line::raw(""), action]).alignment(Alignment::Center),
        chunks[3],
    );
}
