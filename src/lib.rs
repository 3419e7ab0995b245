//! Path-to-URL redirect service.
//!
//! A request whose path has a configured target is answered with a
//! permanent redirect; every other request goes to a fallback handler.
//! The redirect table comes from an in-memory map or a YAML/JSON document.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod redirect;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use redirect::{
    build_mapping, make_handler, make_handler_from_config, parse_config, ConfigFormat, ParseError,
    PathMapping, PathRecord, RedirectLayer, RedirectService,
};
