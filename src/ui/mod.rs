pub mod candle_pane;
pub mod input_form;
pub mod journey_pane;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod pool_pane;
pub mod slot_pane;
pub mod styles;

use crate::app::App;
use crate::domain::UiMode;
use candle_pane::{render_candle_pane, render_header};
use input_form::render_input_form;
use journey_pane::render_journey_pane;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_confirm_exit_modal, render_confirm_start_modal, render_messages};
use pool_pane::render_pool_pane;
use ratatui::Frame;
use slot_pane::render_slot_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &App) {
    let size = f.size();
    let layout = create_layout(size);
    let mode = app.ui_mode();

    render_keybindings(f, layout.keybindings_area, mode);
    render_header(f, app, layout.header_area);
    render_candle_pane(f, app, layout.candle_area);

    match mode {
        UiMode::Setup | UiMode::AddingTask => render_pool_pane(f, app, layout.main_area),
        UiMode::Journey | UiMode::ConfirmStart => render_journey_pane(f, app, layout.main_area),
        UiMode::ActiveSlot | UiMode::ConfirmExit => render_slot_pane(f, app, layout.main_area),
    }

    render_messages(f, app, size);

    match mode {
        UiMode::AddingTask => {
            if let Some(form) = &app.input_form {
                render_input_form(f, form, size);
            }
        }
        UiMode::ConfirmStart => render_confirm_start_modal(f, size),
        UiMode::ConfirmExit => render_confirm_exit_modal(f, size),
        _ => {}
    }
}
