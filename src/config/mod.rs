//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → PortalConfig (validated, immutable)
//!     → ThrottleConfig handed to every AttemptThrottle
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    AccountRecord, CountingPolicy, GateConfig, ObservabilityConfig, PortalConfig, StorageConfig,
    ThrottleConfig, FIXED_LOCK_DURATION,
};
pub use validation::ValidationError;
