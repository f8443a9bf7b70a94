pub mod channel_list;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod playlist;
pub mod resolver;
pub mod retry;
