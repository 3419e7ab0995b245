//! Redirect subsystem.
//!
//! # Data Flow
//! ```text
//! redirect document (YAML/JSON bytes) or in-memory table
//!     → record.rs (parse_config → Vec<PathRecord>)
//!     → record.rs (build_mapping → PathMapping, last write wins)
//!     → dispatcher.rs (RedirectService over Arc<PathMapping> + fallback)
//!
//! Per request:
//!     path found with non-empty target → 308 Permanent Redirect
//!     otherwise                        → fallback service
//! ```

pub mod dispatcher;
pub mod record;

pub use dispatcher::{make_handler, make_handler_from_config, RedirectLayer, RedirectService};
pub use record::{build_mapping, parse_config, ConfigFormat, ParseError, PathMapping, PathRecord};
