pub mod collect;
pub mod config;
pub mod console;
pub mod datetime;
pub mod db;
pub mod interrupt;
pub mod logging;
pub mod menu;
pub mod model;
pub mod paths;
pub mod report;
pub mod validate;

// Re-export commonly used types
pub use config::{Config, Variant};
pub use console::Console;
pub use db::{ConnectionProvider, SqliteProvider};
pub use menu::Menu;
