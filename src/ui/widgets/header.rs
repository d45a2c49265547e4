use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::state::AppState, ui::theme::DUSK};

use super::shared::panel_block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = DUSK;
    let label = state
        .report_label
        .as_deref()
        .unwrap_or("No location selected");

    let line = Line::from(vec![
        Span::styled(
            label.to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  ", Style::default().fg(theme.muted_text)),
        Span::styled(state.status_line(), Style::default().fg(theme.muted_text)),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Left)
        .block(panel_block("Sunset Dashboard", theme));
    frame.render_widget(header, area);
}
