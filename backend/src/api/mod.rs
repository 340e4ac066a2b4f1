//! HTTP API module.
//!
//! Server, response helpers and the live log stream.

pub mod server;
pub mod types;
pub mod logs;

pub use server::{router, start_server, AppState};
pub use types::*;
pub use logs::*;
