pub use todos_tui::cli;
pub use todos_tui::commands;
pub use todos_tui::config;
pub use todos_tui::logging;
pub use todos_tui::script;
pub use todos_tui::tui;
pub use todos_tui::AppConfig;

pub use todos_core as core;
pub use todos_core::model;
pub use todos_core::prompt;
pub use todos_core::row;
pub use todos_core::store;
