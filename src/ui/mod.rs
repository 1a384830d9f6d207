pub mod components;
pub mod controller;
pub mod host;
pub mod monitor_list;

pub use controller::DebugPanel;
