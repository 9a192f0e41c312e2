//! # archview-error
//!
//! Unified error handling for the archview graph view engine.
//!
//! ## Design
//!
//! - **ErrorKind**: what went wrong (e.g. UnknownZoomLevel, LoadFailed)
//! - **ErrorStatus**: whether a caller may retry (Permanent, Temporary, Persistent)
//! - **Error Context**: key/value pairs that locate the cause
//! - **Error Source**: wrapped underlying error, never leaked as a raw type
//!
//! ## Usage
//!
//! ```rust
//! use archview_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::UnknownZoomLevel, "zoom level 9 is out of range")
//!         .with_operation("store::set_zoom_level")
//!         .with_context("level", "9"))
//! }
//! ```
//!
//! ## Principles
//!
//! - Fallible functions return `Result<T, archview_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - An error is handled once; callers further up only append context
//! - Invalid input never mutates state: the operation fails before touching it

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using archview Error
pub type Result<T> = std::result::Result<T, Error>;
