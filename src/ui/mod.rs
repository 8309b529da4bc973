use ratatui::prelude::*;

use crate::app::App;

mod analysis_panel;
mod environment_panel;
mod filter_bar;
mod layout;
mod metrics_panel;
mod module_table;
mod notifications;
mod results_table;
mod status_bar;
mod summary_panel;
mod theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    layout::draw(frame, app);
    notifications::draw(frame, app);
}
