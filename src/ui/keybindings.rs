use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

fn hints_for(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Setup => " ↑/↓ select   a add   x remove   Enter begin the journey   D demo   q quit",
        UiMode::AddingTask => " Tab next field   ←/→ mode   Enter add   Esc cancel",
        UiMode::Journey => {
            " 1/2/3 mode   ↑/↓ task   Enter start   n next day   c next chapter   t task pool   x dismiss   D demo   q quit"
        }
        UiMode::ConfirmStart => " y yes, I am present   n wait, I need a moment",
        UiMode::ActiveSlot => " Enter complete / end early   h I am here   q quit",
        UiMode::ConfirmExit => " s stay and finish   e exit intentionally   h I am here",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, mode: UiMode) {
    let paragraph = Paragraph::new(Line::raw(hints_for(mode))).style(hint_style());
    f.render_widget(paragraph, area);
}
