//! A viewer-request edge function.
//!
//! Sets `x-frame-options`, `x-content-type-options` and `x-xss-protection` on every
//! request and rewrites directory-style uris to their index document.
//!
//! ```
//! use edgefn::event::{Event, Request};
//!
//! let request = edgefn::transform::handler(Event::new(Request::new("/docs/")));
//! assert_eq!(request.uri, "/docs/index.html");
//! assert_eq!(request.header("x-frame-options"), Some("DENY"));
//! ```
pub mod cli;
pub mod config;
pub mod event;
pub mod lang;
pub mod log;
pub mod once;
pub mod serde;
#[cfg(feature = "serve-static")]
pub mod serve;
pub mod serve_static;
pub mod transform;

pub use event::{Event, Request};
pub use transform::{handler, RequestTransformer};
