pub mod app;
pub mod banner;
pub mod error;
pub mod flags;
pub mod logging;

pub mod config;
pub mod engine;
pub mod highlight;
pub mod input;
pub mod shell;
