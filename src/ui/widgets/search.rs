use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{app::state::AppState, ui::theme::DUSK};

use super::shared::popup_block;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Clear, area);

    let theme = DUSK;
    let block = popup_block("Search location", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(inner);

    let query = if state.search_query.is_empty() {
        Span::styled(
            "Type a place and press Enter",
            Style::default().fg(theme.muted_text),
        )
    } else {
        Span::styled(
            format!("{}_", state.search_query),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )
    };
    let query_line = Paragraph::new(Line::from(vec![
        Span::styled("Search: ", Style::default().fg(theme.muted_text)),
        query,
    ]));
    frame.render_widget(query_line, chunks[0]);

    let hint = Paragraph::new("Esc closes · g in the dashboard uses your current location")
        .style(Style::default().fg(theme.muted_text));
    frame.render_widget(hint, chunks[1]);
}
