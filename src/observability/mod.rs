//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     → logging.rs (install tracing subscriber)
//!     → metrics.rs (optional Prometheus scrape listener)
//!
//! Per request:
//!     → tower-http TraceLayer span (method, uri, status, latency)
//!     → dispatcher events + redirect/fallback counters
//! ```
//!
//! # Design Decisions
//! - Structured events only, never println!
//! - Counters are no-ops until a recorder is installed, so the library
//!   can be embedded without pulling in an exporter

pub mod logging;
pub mod metrics;
