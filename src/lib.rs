//! Minimal backend service for demonstrating load-balancer behavior.
//!
//! Each instance echoes back the caller's observed IP address and the
//! value of the forwarding headers, so a request fanned out by a reverse
//! proxy shows which backend served it and which hop forwarded it:
//!
//! ```text
//! GET / via nginx →
//! {
//!   "status": "success",
//!   "server_id": "Backend-1",
//!   "client_ip": "203.0.113.7",
//!   "load_balancer_ip": "10.0.0.2"
//! }
//! ```
//!
//! Run one process per backend with a distinct `SERVER_ID`/`PORT`.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`resolver`]: Client/load-balancer IP resolution
//! - [`api`]: HTTP API for echo and health endpoints
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod resolver;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
