pub mod adapters;
pub mod config_manager;
