use ratatui::prelude::{Color, Style};

use qa_lens::TestStatus;

// Catppuccin Mocha palette
pub const SURFACE0: Color = Color::Rgb(49, 50, 68);
pub const SURFACE1: Color = Color::Rgb(69, 71, 90);
pub const SURFACE2: Color = Color::Rgb(88, 91, 112);
pub const TEXT: Color = Color::Rgb(205, 214, 244);
pub const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
pub const OVERLAY0: Color = Color::Rgb(108, 112, 134);
pub const RED: Color = Color::Rgb(243, 139, 168);
pub const GREEN: Color = Color::Rgb(166, 227, 161);
pub const YELLOW: Color = Color::Rgb(249, 226, 175);
pub const BLUE: Color = Color::Rgb(137, 180, 250);
pub const TEAL: Color = Color::Rgb(148, 226, 213);
pub const MAUVE: Color = Color::Rgb(203, 166, 247);
pub const PEACH: Color = Color::Rgb(250, 179, 135);

pub fn status_color(status: &TestStatus) -> Color {
    match status {
        TestStatus::Passed => GREEN,
        TestStatus::Failed => RED,
        TestStatus::Skipped => TEAL,
        TestStatus::Error => PEACH,
        TestStatus::Other(_) => OVERLAY0,
    }
}

/// Green at or above 80%, yellow from 50%, red below.
pub fn rate_color(rate: f64) -> Color {
    if rate >= 80.0 {
        GREEN
    } else if rate >= 50.0 {
        YELLOW
    } else {
        RED
    }
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(BLUE)
    } else {
        Style::default().fg(SURFACE2)
    }
}
