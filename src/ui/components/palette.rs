//! Fixed color palette.

use ratatui::style::Color;

pub const BG_BASE: Color = Color::Rgb(17, 24, 39);
pub const BG_SURFACE: Color = Color::Rgb(31, 41, 55);
pub const BG_FOOTER: Color = Color::Rgb(24, 32, 46);
pub const KEY_HINT_BG: Color = Color::Rgb(55, 65, 81);

pub const TEXT_BRIGHT: Color = Color::Rgb(243, 244, 246);
pub const TEXT_PRIMARY: Color = Color::Rgb(209, 213, 219);
pub const TEXT_SECONDARY: Color = Color::Rgb(156, 163, 175);
pub const TEXT_MUTED: Color = Color::Rgb(107, 114, 128);
pub const TEXT_FAINT: Color = Color::Rgb(75, 85, 99);

pub const ACCENT_PRIMARY: Color = Color::Rgb(96, 165, 250);
pub const ACCENT_SUCCESS: Color = Color::Rgb(74, 222, 128);
pub const ACCENT_WARNING: Color = Color::Rgb(250, 204, 21);
pub const ACCENT_ERROR: Color = Color::Rgb(248, 113, 113);

pub const BORDER_DEFAULT: Color = Color::Rgb(55, 65, 81);

// Maze cells
pub const CELL_WALL: Color = Color::Rgb(75, 85, 99);
pub const CELL_OPEN_BG: Color = Color::Rgb(31, 41, 55);
pub const CELL_EXPANDED_BG: Color = Color::Rgb(107, 114, 128);
pub const CELL_PATH_BG: Color = Color::Rgb(239, 68, 68);
pub const CELL_START_BG: Color = Color::Rgb(34, 197, 94);
pub const CELL_END_BG: Color = Color::Rgb(59, 130, 246);
pub const CELL_AGENT_FG: Color = Color::Rgb(250, 204, 21);
