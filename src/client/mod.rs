//! Realtime conversation client configuration and selection
//!
//! Resolves environment-style settings into exactly one authenticated
//! client handle, or fails with an operator-actionable error.

pub mod config;
pub mod handle;
pub mod select;

pub use config::{ClientConfig, ConnectionMode};
pub use handle::{ClientMode, Credential, RealtimeClientHandle};
pub use select::select_client;
