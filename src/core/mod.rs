pub mod config;
pub mod cp437;
pub mod mapping;
