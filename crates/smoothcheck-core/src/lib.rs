pub mod config;
pub mod logging;

pub mod batch;
pub mod loader;
pub mod manifest;
pub mod probe;
pub mod report;
pub mod resolver;
pub mod retry;
pub mod verify;
