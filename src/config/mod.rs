//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → client::build_sender / Dispatcher::from_config
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Validation reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ClientConfig;
pub use schema::DemoConfig;
pub use schema::DispatchConfig;
pub use schema::HeaderConfig;
pub use schema::HeaderEntry;
pub use schema::ObservabilityConfig;
pub use schema::RetryConfig;
pub use schema::TransportConfig;
