use ratatui::style::Color;

// Dark card palette with a single indigo accent. Add roles here rather than
// scattering colors through the components.
pub const SURFACE: Color = Color::Rgb(24, 24, 24);
pub const HEADER_BG: Color = Color::Rgb(31, 31, 31);
pub const BORDER: Color = Color::Rgb(57, 57, 57);

pub const FG: Color = Color::Rgb(255, 255, 255);
pub const MUTED: Color = Color::Rgb(191, 191, 191);
pub const DIM: Color = Color::Rgb(102, 102, 102);

pub const ACCENT: Color = Color::Rgb(85, 104, 254);
pub const MARKER: Color = Color::Rgb(119, 119, 119);
pub const BADGE: Color = Color::Rgb(208, 208, 208);

// Semantic colors (keep minimal).
pub const ERROR: Color = Color::Rgb(241, 118, 118);
pub const TOOLTIP_BG: Color = Color::Rgb(0, 0, 0);
