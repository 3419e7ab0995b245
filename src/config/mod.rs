//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!
//! redirect sources (inline records + YAML/JSON document)
//!     → loader.rs (read bytes, decode, fold)
//!     → PathMapping handed to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Everything is read once at startup; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    load_config, load_redirects, read_config, resolve_config, ConfigError, ConfigOverrides,
};
pub use schema::{FallbackConfig, ListenerConfig, RedirectsConfig, ServerConfig};
