use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::state::AppState, ui::theme::DUSK};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(message) = state.last_error.as_deref() else {
        return;
    };
    if area.height == 0 {
        return;
    }

    let theme = DUSK;
    let line = Line::from(vec![
        Span::styled(
            format!(" {message}"),
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (x to dismiss)", Style::default().fg(theme.muted_text)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
