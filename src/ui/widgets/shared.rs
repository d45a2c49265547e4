use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};

use crate::ui::theme::Theme;

pub(super) fn panel_block(title: &'static str, theme: Theme) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
}

pub(super) fn popup_block(title: &'static str, theme: Theme) -> Block<'static> {
    panel_block(title, theme).style(Style::default().fg(theme.text).bg(theme.popup_surface))
}
