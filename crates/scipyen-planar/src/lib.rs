//! # Scipyen Planar Graphics
//!
//! Frame-aware 2D graphics annotations for image and data volumes. Each
//! object stores one or more descriptor states, and each state is bound to
//! the frames (depth or time slices) in which it is visible.
//!
//! ## Core Components
//!
//! ### State Model
//! - **DescriptorState**: named descriptor values plus `z_frame` and `angle`
//! - **Visibility rules**: ubiquitous, frame-avoiding and single-frame states
//!
//! ### Shapes
//! - **Primitives**: Move, Line, Cubic, Quad, Arc, ArcMove, Ellipse, Rect, Text
//! - **Cursors**: vertical, horizontal, crosshair and point cursors
//! - **Path**: ordered primitives starting with a Move, never nested
//!
//! ### Objects and Persistence
//! - **PlanarGraphics**: a shape with links to other objects and frontends
//! - **Snapshots**: reduce/restore and JSON documents
//! - **Export**: group/dataset tree following the HDF5 layout
//! - **Migration**: repair of legacy records at load time
//!
//! ## Architecture
//!
//! ```text
//! PlanarGraphics (id, links, frontends)
//!   └── Shape
//!         ├── Primitive ── states ── visibility rules
//!         └── Path ── Primitive elements
//!
//! GraphicsSnapshot / PlanarDocument / GroupNode (persistence)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scipyen_planar::{FrameIndexSpec, Primitive};
//!
//! let mut line = Primitive::line(0.0, 0.0, 10.0, 10.0);
//! line.set_frame_indices(&FrameIndexSpec::Frames(vec![0, 1, 2]))?;
//! assert_eq!(line.frame_indices(), vec![Some(0), Some(1), Some(2)]);
//! ```

pub mod cursor;
pub mod export;
pub mod geometry;
pub mod graphics;
pub mod kind;
pub mod migrate;
pub mod path;
pub mod primitive;
pub mod render;
pub mod serialization;
pub mod shape;
pub mod state;
pub mod visibility;

pub use cursor::CursorKind;
pub use export::{AttrValue, Dataset, GroupNode};
pub use geometry::{ControlPoints, Point, Rect};
pub use graphics::{follow_position, Frontend, LinkMapping, PlanarGraphics};
pub use kind::{GraphicsType, PrimitiveKind, ShapeKind, ValueKind};
pub use path::{Path, PathFrameSpec, PathItem};
pub use primitive::Primitive;
pub use serialization::{DocumentMetadata, GraphicsSnapshot, PlanarDocument, DOCUMENT_VERSION};
pub use shape::{PlanarShape, Shape};
pub use state::{DescriptorState, DescriptorValue};
pub use visibility::FrameIndexSpec;
