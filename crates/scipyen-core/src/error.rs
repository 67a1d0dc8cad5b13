//! Error handling for Scipyen planar graphics
//!
//! Provides the error types raised by the planar-graphics core:
//! - Schema errors (wrong descriptor set, arity or value type)
//! - Frame errors (ambiguous or conflicting frame/state associations)
//! - Lookup errors (legacy parameter access on a frame without a state)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Lookups that simply find nothing are not errors; they return `None`.

use thiserror::Error;

/// Schema error type
///
/// Raised when descriptor values do not match the schema declared by a
/// primitive kind, or when an object is used where its kind is not allowed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Wrong number of descriptor values
    #[error("{kind} expects {expected} descriptor values, got {actual}")]
    Arity {
        /// The primitive kind name.
        kind: String,
        /// Number of descriptors declared by the kind.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Descriptor name not declared by the kind
    #[error("{kind} has no descriptor named '{name}'")]
    UnknownDescriptor {
        /// The primitive kind name.
        kind: String,
        /// The offending descriptor name.
        name: String,
    },

    /// Descriptor value has the wrong type
    #[error("Descriptor '{name}' of {kind} expects a {expected} value")]
    ValueType {
        /// The primitive kind name.
        kind: String,
        /// The descriptor name.
        name: String,
        /// The expected value type ("number" or "text").
        expected: String,
    },

    /// Descriptor set differs from the declared schema
    #[error("Descriptor mismatch for {kind}: missing {missing:?}, unexpected {unexpected:?}")]
    DescriptorMismatch {
        /// The primitive kind name.
        kind: String,
        /// Declared descriptors absent from the state.
        missing: Vec<String>,
        /// State fields not declared by the kind.
        unexpected: Vec<String>,
    },

    /// `z_frame` is neither an integer nor null
    #[error("Invalid z_frame value: {value}")]
    InvalidFrameType {
        /// Textual form of the rejected value.
        value: String,
    },

    /// Rotation outside the closed interval [-2, 2]
    #[error("Angle {value} is outside [-2, 2]")]
    AngleOutOfRange {
        /// The rejected angle (multiples of pi).
        value: f64,
    },

    /// Cursor kinds cannot be placed on a path
    #[error("{kind} cannot be a path element")]
    NotPathElement {
        /// The rejected kind name.
        kind: String,
    },

    /// Cursor objects may only link to cursors, shapes only to shapes
    #[error("Cannot link {source_kind} to {target_kind}")]
    IncompatibleLink {
        /// Kind of the link source.
        source_kind: String,
        /// Kind of the link target.
        target_kind: String,
    },

    /// Wrong number of control points to rebuild a primitive
    #[error("{kind} needs {expected} control points, got {actual}")]
    ControlPointCount {
        /// The primitive kind name.
        kind: String,
        /// Points required.
        expected: usize,
        /// Points supplied.
        actual: usize,
    },

    /// Malformed input at a deserialization boundary
    #[error("Malformed {what}: {reason}")]
    Malformed {
        /// What was being read.
        what: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Frame error type
///
/// Raised when a requested frame/state association is ambiguous or would
/// break the visibility rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// The same frame index was given twice
    #[error("Duplicate frame index {0}")]
    DuplicateFrame(i32),

    /// Two remapped states would land on the same frame
    #[error("Duplicate target frame {0:?} in frame remap")]
    DuplicateTarget(Option<i32>),

    /// A negative index where only single-frame indices are accepted
    #[error("Negative frame index {0} is not allowed here")]
    NegativeFrame(i32),

    /// More than one frame-avoiding state
    #[error("Frame-avoiding states {first} and {second} conflict")]
    AvoidingConflict {
        /// First avoiding z_frame.
        first: i32,
        /// Second avoiding z_frame.
        second: i32,
    },

    /// A ubiquitous state next to other states
    #[error("A ubiquitous state cannot coexist with other states")]
    UbiquitousConflict,

    /// A frame already shows another state
    #[error("Frame {frame} already has a visible state")]
    Occupied {
        /// The contested frame.
        frame: i32,
    },

    /// Per-element frame specifications do not match the element count
    #[error("Expected {expected} frame specifications, got {actual}")]
    SpecCount {
        /// Number of elements.
        expected: usize,
        /// Number of specifications supplied.
        actual: usize,
    },

    /// Frame index list does not match the state list
    #[error("{actual} frame indices given for {expected} states")]
    IndexCount {
        /// Number of states.
        expected: usize,
        /// Number of frame indices.
        actual: usize,
    },
}

/// Lookup error type
///
/// Only the legacy parameter accessors raise this; every other lookup
/// returns `None` or an empty collection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// No state is visible in the requested frame
    #[error("No state for frame {0}")]
    NoStateForFrame(i32),
}

/// Main error type for Scipyen planar graphics
///
/// A unified error type that can represent any error from the core.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Schema error
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Frame error
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Lookup error
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a schema error
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::Schema(_))
    }

    /// Check if this is a frame error
    pub fn is_frame_error(&self) -> bool {
        matches!(self, Error::Frame(_))
    }

    /// Check if this is a lookup error
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Error::Lookup(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
