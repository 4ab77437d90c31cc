pub mod connection_manager;
pub mod migrations;
