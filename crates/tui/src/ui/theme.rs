use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface_bright: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            surface_bright: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(170, 170, 170),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(90, 180, 110),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
