use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    app::state::{AppMode, AppState},
    domain::solar::RenderSection,
    ui::theme::{DUSK, Theme},
};

use super::shared::panel_block;

const TITLE_WIDTH: usize = 18;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let theme = DUSK;
    let lines = if state.sections.is_empty() {
        vec![placeholder_line(state, theme)]
    } else {
        state
            .sections
            .iter()
            .flat_map(|section| section_lines(section, theme))
            .collect()
    };

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel_block("Today", theme));
    frame.render_widget(body, area);
}

fn section_lines(section: &RenderSection, theme: Theme) -> [Line<'static>; 2] {
    [
        Line::from(vec![
            Span::styled(
                format!(" {:<TITLE_WIDTH$}", section.title),
                Style::default()
                    .fg(theme.muted_text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(section.content.clone(), Style::default().fg(theme.text)),
        ]),
        Line::default(),
    ]
}

fn placeholder_line(state: &AppState, theme: Theme) -> Line<'static> {
    let text = match state.mode {
        AppMode::Loading => state.stage.describe(),
        _ => "Press / to search for a place or g to use your current location",
    };
    Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(theme.muted_text),
    ))
}
