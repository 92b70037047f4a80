use crate::app::App;
use crate::domain::format_minutes;
use crate::ui::styles::{border_style, default_style, hint_style, mode_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task pool shown during setup
pub fn render_pool_pane(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" The Task Pool ", title_style()));

    let tasks = &app.state().tasks;
    if tasks.is_empty() {
        let paragraph = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("  No tasks gathered yet. Press a to add one.", hint_style()),
        ])
        .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let config = task.category.config();
            let line = Line::from(vec![
                Span::raw(if app.use_emoji { config.icon } else { "*" }),
                Span::raw(" "),
                Span::raw(task.name.clone()),
                Span::raw("  "),
                Span::styled(
                    format!("{} · {}", config.label, format_minutes(task.estimated_minutes)),
                    mode_style(task.category),
                ),
            ]);
            let style = if i == app.pool_cursor {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
