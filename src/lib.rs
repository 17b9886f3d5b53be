pub mod commands;
pub mod config;
pub mod inspect;
pub mod logging;
pub mod plan;
pub mod render;
pub mod report;
pub mod suite;
