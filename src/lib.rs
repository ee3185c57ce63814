pub use tido_tui::cli;
pub use tido_tui::config;
pub use tido_tui::tui;

pub use tido_core as core;
pub use tido_core::model;
pub use tido_core::persist;
pub use tido_core::store;
pub use tido_core::AppConfig;
