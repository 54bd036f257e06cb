//! Demo endpoints used to exercise the dispatcher.
//!
//! # Endpoints
//! - slow: waits a fixed delay, then answers `Slow Response`
//! - fast: answers `error` when `?error=true`, otherwise `ok`
//!
//! Both stand in for arbitrary remote services; nothing in the client depends on them.

pub mod servers;

pub use servers::{fast_router, slow_router, spawn_fast, spawn_slow, DemoServer};
