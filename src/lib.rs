// Library exports for the Snokas bot
// This allows the replay tool and other utilities to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod grid;
pub mod replay;
pub mod search;
pub mod types;
