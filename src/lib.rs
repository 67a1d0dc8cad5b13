//! # Scipyen
//!
//! Frame-aware planar graphics annotations for image and data volumes:
//! - Descriptor states bound to frames by the visibility rules
//! - Primitives, cursors and paths with control-point geometry
//! - Links between objects and weakly held frontends
//! - Snapshots, JSON documents and an HDF5-style export tree
//!
//! ## Architecture
//!
//! Scipyen is organized as a workspace with multiple crates:
//!
//! 1. **scipyen-core** - Error types, shared-reference aliases, configuration
//! 2. **scipyen-planar** - States, visibility rules, shapes, links, persistence
//! 3. **scipyen** - Re-exports, logging setup and the `scipyen` inspector binary

pub mod inspect;

pub use scipyen_planar as planar;

pub use scipyen_core::{
    CursorDefaults, Error, FrameError, FrameSettings, GeometrySettings, LabelSettings,
    LookupError, PlanarConfig, Result, SchemaError, Shared, WeakShared,
};

pub use scipyen_planar::{
    CursorKind, DescriptorState, DescriptorValue, FrameIndexSpec, Frontend, GraphicsSnapshot,
    GraphicsType, GroupNode, Path, PathFrameSpec, PathItem, PlanarDocument, PlanarGraphics,
    PlanarShape, Point, Primitive, PrimitiveKind, Rect, Shape, ShapeKind,
};

pub use inspect::{inspect, FrameVisibility, InspectReport, ObjectSummary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("SCIPYEN_BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
