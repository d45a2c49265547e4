use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted_text: Color,
    pub accent: Color,
    pub border: Color,
    pub danger: Color,
    pub popup_surface: Color,
}

pub const DUSK: Theme = Theme {
    text: Color::White,
    muted_text: Color::Gray,
    accent: Color::Rgb(255, 179, 71),
    border: Color::Rgb(120, 94, 160),
    danger: Color::LightRed,
    popup_surface: Color::Rgb(28, 22, 44),
};
