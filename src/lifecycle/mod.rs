//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load settings → Validate → Load redirects → Bind listener → Serve
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → stop accepting → drain in-flight requests → exit
//! ```

pub mod signals;

pub use signals::shutdown_signal;
