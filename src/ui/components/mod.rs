mod key_hints;
mod maze_view;
mod palette;
mod solution_panel;
mod status_bar;

pub use key_hints::{render_key_hints, KeyHintBarStyle};
pub use maze_view::{MazeView, CELL_WIDTH};
pub use palette::*;
pub use solution_panel::SolutionPanel;
pub use status_bar::StatusBar;
