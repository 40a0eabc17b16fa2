//! VoteSense Server
//!
//! Thin HTTP/JSON boundary over the sentiment analyzer. Request parsing,
//! status mapping and metrics live here; all analysis happens in
//! `votesense-engine`.

pub mod config;
pub mod routes;
pub mod state;

pub use config::{ConfigOverrides, LogFormat, ModelLoadMode, ServerConfig};
pub use routes::create_router;
pub use state::AppState;
