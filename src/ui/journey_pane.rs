use crate::app::App;
use crate::domain::{progress_percent, MentalState, Task};
use crate::ui::styles::{
    border_style, default_style, hint_style, mode_style, selected_style, title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const BAR_WIDTH: usize = 20;

/// Text progress bar, e.g. "█████░░░░░"
fn progress_bar(percent: u16) -> String {
    let filled = (usize::from(percent) * BAR_WIDTH / 100).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Render mode selection and, once a mode is chosen, task selection
pub fn render_journey_pane(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    render_mode_choices(f, app, chunks[0]);
    render_task_choices(f, app, chunks[1]);
}

fn render_mode_choices(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (i, mode) in MentalState::all().iter().enumerate() {
        let config = mode.config();
        let selected = app.selected_mode() == Some(*mode);
        let border = if selected {
            title_style()
        } else {
            border_style()
        };
        let lines = vec![
            Line::from(vec![
                Span::raw(if app.use_emoji { config.icon } else { "" }),
                Span::raw(" "),
                Span::styled(config.label, mode_style(*mode)),
            ]),
            Line::styled(config.description, hint_style()),
            Line::styled(
                format!("{}-{} min", config.min_minutes, config.max_minutes),
                hint_style(),
            ),
        ];
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(format!(" {} ", i + 1)),
            );
        f.render_widget(paragraph, columns[i]);
    }
}

fn task_lines(task: &Task, selected: bool) -> Vec<Line<'static>> {
    let pct = progress_percent(task);
    let marker = if selected { "●" } else { "○" };
    let style = if selected {
        selected_style()
    } else {
        default_style()
    };
    vec![
        Line::styled(format!(" {} {}", marker, task.name), style),
        Line::from(vec![
            Span::raw("   "),
            Span::styled(progress_bar(pct), mode_style(task.category)),
            Span::styled(
                format!("  {} / {} mins", task.time_spent, task.estimated_minutes),
                hint_style(),
            ),
        ]),
    ]
}

fn render_task_choices(f: &mut Frame, app: &App, area: Rect) {
    let Some(mode) = app.selected_mode() else {
        let paragraph = Paragraph::new(Line::styled(
            "  First, choose your mental state (1, 2 or 3)",
            hint_style(),
        ));
        f.render_widget(paragraph, area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" Then, select a task for {} ", mode.label()),
            title_style(),
        ));

    let tasks = app.eligible_tasks();
    let mut lines = Vec::new();
    if tasks.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "  No tasks found in your pool for this mode. Press t to add verses.",
            hint_style(),
        ));
    } else {
        for task in tasks {
            lines.extend(task_lines(task, app.selected_task() == Some(task.id)));
        }
        if app.selected_task().is_some() {
            lines.push(Line::raw(""));
            lines.push(Line::styled("  Enter  Start the Verse", title_style()));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
