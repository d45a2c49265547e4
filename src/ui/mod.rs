pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(Block::default().borders(Borders::ALL).title("sunset-dashboard"));
        frame.render_widget(warning, area);
        return;
    }

    let banner_height = u16::from(state.last_error.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(7),
            Constraint::Length(1),
        ])
        .split(area);

    widgets::header::render(frame, chunks[0], state);
    widgets::error_banner::render(frame, chunks[1], state);
    widgets::sections::render(frame, chunks[2], state);
    widgets::footer::render(frame, chunks[3], state);

    if state.search_open {
        widgets::search::render(frame, popup_area(area, 60, 30), state);
    }
}

/// Centres a box of the given percentage size inside `area`.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
