use crate::domain::MentalState;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Lit candle style
pub fn lit_style() -> Style {
    Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD)
}

/// Unlit candle style
pub fn unlit_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Marker for the current day
pub fn today_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Progress gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Yellow).bg(Color::DarkGray)
}

/// Quote style for generated messages
pub fn message_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::ITALIC)
}

/// Accent color per mental state
pub fn mode_style(mode: MentalState) -> Style {
    let color = match mode {
        MentalState::Soft => Color::Green,
        MentalState::Focus => Color::Blue,
        MentalState::Sprint => Color::Red,
    };
    Style::default().fg(color)
}
