use crate::app::{FormField, InputFormState};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_line<'a>(label: &'a str, value: &'a str, editing: bool) -> Line<'a> {
    Line::from(vec![
        Span::raw(label),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}

/// Render the input form for adding a task to the pool
pub fn render_input_form(f: &mut Frame, form: &InputFormState, area: Rect) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let category = format!("◀ {} ▶", form.category.label());
    let lines = vec![
        Line::raw(""),
        field_line("Task:     ", &form.name, form.field == FormField::Name),
        field_line("Mode:     ", &category, form.field == FormField::Category),
        field_line("Hours:    ", &form.hours, form.field == FormField::Hours),
        field_line("Minutes:  ", &form.minutes, form.field == FormField::Minutes),
        Line::raw(""),
        Line::raw("Tab to switch fields  ·  Enter to add  ·  Esc to cancel"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add to Pool ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
