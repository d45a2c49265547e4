use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::Paragraph,
};

use crate::{app::state::AppState, ui::theme::DUSK};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints = if state.search_open {
        " Enter search · Backspace edit · Esc close"
    } else {
        " / search · g current location · r refresh · x dismiss error · q quit"
    };
    let footer = Paragraph::new(hints).style(Style::default().fg(DUSK.muted_text));
    frame.render_widget(footer, area);
}
