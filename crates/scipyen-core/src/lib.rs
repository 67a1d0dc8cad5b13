//! # Scipyen Core
//!
//! Core types shared by the Scipyen planar-graphics crates:
//! the error taxonomy, single-threaded shared-reference aliases and the
//! explicit configuration structs passed at construction time.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CursorDefaults, FrameSettings, GeometrySettings, LabelSettings, PlanarConfig};
pub use error::{Error, FrameError, LookupError, Result, SchemaError};
pub use types::{shared, Shared, WeakShared};
