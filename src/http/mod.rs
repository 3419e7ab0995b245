//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (axum::serve)
//!     → request ID, trace span, timeout (tower-http)
//!     → RedirectService (lookup by path)
//!     → 308 Permanent Redirect, or the fallback handler's response
//! ```

pub mod server;

pub use server::HttpServer;
