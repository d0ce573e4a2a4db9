// Library modules for integration tests
pub mod config;
pub mod error;
pub mod fst;
pub mod grammar;
pub mod logging;
mod models; // Internal module, not exported
pub mod server;
pub mod text_processing;
