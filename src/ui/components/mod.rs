pub mod celebration;
pub mod drill_panel;
pub mod history_list;
pub mod progress_bar;
pub mod stats_sidebar;
