use crate::app::App;
use crate::ui::{
    layout::{create_modal_area, create_toast_area},
    styles::{message_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn render_prompt(f: &mut Frame, area: Rect, title: &str, mut lines: Vec<Line>) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    lines.insert(0, Line::raw(""));
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title.to_string(), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the entry friction prompt
pub fn render_confirm_start_modal(f: &mut Frame, area: Rect) {
    render_prompt(
        f,
        area,
        " \u{1F56F} Ready to begin? ",
        vec![
            Line::styled(
                "  \"You're about to begin this verse. Are you ready to stay with it for a while?\"",
                message_style(),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [y]", modal_title_style()),
                Span::raw(" Yes, I am present  "),
                Span::styled("[n]", modal_title_style()),
                Span::raw(" Wait, I need a moment"),
            ]),
        ],
    );
}

/// Render the exit friction prompt
pub fn render_confirm_exit_modal(f: &mut Frame, area: Rect) {
    render_prompt(
        f,
        area,
        " Shall we stay? ",
        vec![
            Line::styled(
                "  \"This verse has only just begun. Leaving now means this Day won't be kept \
                 with the same intention. Shall we stay?\"",
                message_style(),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [s]", modal_title_style()),
                Span::raw(" Stay and finish  "),
                Span::styled("[e]", modal_title_style()),
                Span::raw(" Exit intentionally"),
            ]),
        ],
    );
}

fn render_toast(f: &mut Frame, area: Rect, title: &str, text: &str, dismiss: &str) {
    let toast_area = create_toast_area(area);
    f.render_widget(Clear, toast_area);

    let paragraph = Paragraph::new(vec![
        Line::styled(format!("\"{}\"", text), message_style()),
        Line::raw(""),
        Line::styled(dismiss.to_string(), modal_title_style()),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title.to_string(), modal_title_style()))
            .style(modal_bg_style()),
    )
    .wrap(Wrap { trim: true });

    f.render_widget(paragraph, toast_area);
}

/// Render whichever generated message is waiting to be dismissed
pub fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    if let Some(text) = app.visible_drift_message() {
        render_toast(f, area, " Chirp ", text, "[h] I am here");
    } else if let Some(text) = app.visible_reflection() {
        render_toast(f, area, " Reflections from the Hearth ", text, "[x] Dismiss");
    }
}
