use crate::app::App;
use crate::domain::{
    candle_glyph, completed_task_count, format_minutes, lit_day_count, minutes_by_mode,
    MentalState, TOTAL_DAYS,
};
use crate::ui::styles::{
    border_style, default_style, hint_style, lit_style, mode_style, title_style, today_style,
    unlit_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the header: day title and chapter
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let lines = if app.state().setup_complete {
        let day = app.current_day();
        vec![
            Line::from(vec![Span::styled(
                format!("Day {}: {}", day.day_index + 1, day.verse()),
                title_style(),
            )]),
            Line::raw(format!("{} Chapter", app.chapter().name())),
            summary_line(app),
        ]
    } else {
        vec![
            Line::from(vec![Span::styled("Twelve Days", title_style())]),
            Line::raw("\u{201C}A Partridge in a Pear Tree\u{201D} begins the song of your intentions."),
        ]
    };

    f.render_widget(Paragraph::new(lines).style(default_style()), area);
}

/// Minutes spent per mode across the journey, plus finished tasks
fn summary_line(app: &App) -> Line<'static> {
    let minutes = minutes_by_mode(&app.state().days);
    let mut spans = Vec::new();
    for mode in MentalState::all() {
        let total = minutes.get(mode).copied().unwrap_or(0);
        spans.push(Span::styled(
            format!("{} {}", mode.label(), format_minutes(total)),
            mode_style(*mode),
        ));
        spans.push(Span::styled("  ·  ", hint_style()));
    }
    spans.push(Span::styled(
        format!("{} tasks finished", completed_task_count(&app.state().tasks)),
        hint_style(),
    ));
    Line::from(spans)
}

/// Render the row of twelve candles
pub fn render_candle_pane(f: &mut Frame, app: &App, area: Rect) {
    let days = &app.state().days;
    let today = app.clock().day_index();

    let mut glyphs = Vec::with_capacity(TOTAL_DAYS);
    let mut numbers = Vec::with_capacity(TOTAL_DAYS);
    for day in days {
        let style = if day.is_intentional {
            lit_style()
        } else {
            unlit_style()
        };
        glyphs.push(Span::styled(
            format!(" {:^3} ", candle_glyph(day.is_intentional, app.use_emoji)),
            style,
        ));

        let number_style = if day.day_index == today && app.state().setup_complete {
            today_style()
        } else {
            style
        };
        numbers.push(Span::styled(format!(" {:^3} ", day.day_index + 1), number_style));
    }

    let title = format!(" Candles {}/{} ", lit_day_count(days), TOTAL_DAYS);
    let paragraph = Paragraph::new(vec![Line::from(glyphs), Line::from(numbers)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(paragraph, area);
}
