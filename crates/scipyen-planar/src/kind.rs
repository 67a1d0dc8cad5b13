//! Primitive kinds and their descriptor schemas.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of primitive shapes and cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Move,
    Line,
    Cubic,
    Quad,
    Arc,
    ArcMove,
    Ellipse,
    Rect,
    Text,
    VerticalCursor,
    HorizontalCursor,
    CrosshairCursor,
    PointCursor,
}

/// Value type of a single descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Text,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Number => "number",
            ValueKind::Text => "text",
        }
    }
}

/// Coarse category used by link compatibility and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphicsType {
    Shape,
    Cursor,
    Path,
}

/// Class of a whole planar graphics object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Primitive(PrimitiveKind),
    Path,
}

const CURSOR_DESCRIPTORS: &[&str] = &["x", "y", "width", "height", "xwindow", "ywindow", "radius"];

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 13] = [
        PrimitiveKind::Move,
        PrimitiveKind::Line,
        PrimitiveKind::Cubic,
        PrimitiveKind::Quad,
        PrimitiveKind::Arc,
        PrimitiveKind::ArcMove,
        PrimitiveKind::Ellipse,
        PrimitiveKind::Rect,
        PrimitiveKind::Text,
        PrimitiveKind::VerticalCursor,
        PrimitiveKind::HorizontalCursor,
        PrimitiveKind::CrosshairCursor,
        PrimitiveKind::PointCursor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Move => "Move",
            PrimitiveKind::Line => "Line",
            PrimitiveKind::Cubic => "Cubic",
            PrimitiveKind::Quad => "Quad",
            PrimitiveKind::Arc => "Arc",
            PrimitiveKind::ArcMove => "ArcMove",
            PrimitiveKind::Ellipse => "Ellipse",
            PrimitiveKind::Rect => "Rect",
            PrimitiveKind::Text => "Text",
            PrimitiveKind::VerticalCursor => "VerticalCursor",
            PrimitiveKind::HorizontalCursor => "HorizontalCursor",
            PrimitiveKind::CrosshairCursor => "CrosshairCursor",
            PrimitiveKind::PointCursor => "PointCursor",
        }
    }

    /// Look up a kind by its name; `Point` is accepted for `Move`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "Point" {
            return Some(PrimitiveKind::Move);
        }
        Self::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Declared descriptor names, in constructor order.
    pub fn descriptors(&self) -> &'static [&'static str] {
        match self {
            PrimitiveKind::Move => &["x", "y"],
            PrimitiveKind::Line => &["x0", "y0", "x1", "y1"],
            PrimitiveKind::Cubic => &["c0x", "c0y", "c1x", "c1y", "c2x", "c2y", "c3x", "c3y"],
            PrimitiveKind::Quad => &["c0x", "c0y", "c1x", "c1y", "c2x", "c2y"],
            PrimitiveKind::Arc => &["x", "y", "w", "h", "s", "l"],
            PrimitiveKind::ArcMove => &["x", "y", "w", "h", "s"],
            PrimitiveKind::Ellipse | PrimitiveKind::Rect => &["x", "y", "w", "h"],
            PrimitiveKind::Text => &["text", "x", "y"],
            PrimitiveKind::VerticalCursor
            | PrimitiveKind::HorizontalCursor
            | PrimitiveKind::CrosshairCursor
            | PrimitiveKind::PointCursor => CURSOR_DESCRIPTORS,
        }
    }

    /// Value type of a declared descriptor, `None` for undeclared names.
    pub fn value_kind(&self, descriptor: &str) -> Option<ValueKind> {
        if !self.descriptors().contains(&descriptor) {
            return None;
        }
        if *self == PrimitiveKind::Text && descriptor == "text" {
            Some(ValueKind::Text)
        } else {
            Some(ValueKind::Number)
        }
    }

    /// Descriptors holding x coordinates.
    pub fn x_fields(&self) -> &'static [&'static str] {
        match self {
            PrimitiveKind::Line => &["x0", "x1"],
            PrimitiveKind::Cubic => &["c0x", "c1x", "c2x", "c3x"],
            PrimitiveKind::Quad => &["c0x", "c1x", "c2x"],
            _ => &["x"],
        }
    }

    /// Descriptors holding y coordinates.
    pub fn y_fields(&self) -> &'static [&'static str] {
        match self {
            PrimitiveKind::Line => &["y0", "y1"],
            PrimitiveKind::Cubic => &["c0y", "c1y", "c2y", "c3y"],
            PrimitiveKind::Quad => &["c0y", "c1y", "c2y"],
            _ => &["y"],
        }
    }

    /// Short prefix used for auto-naming.
    pub fn label_prefix(&self) -> &'static str {
        match self {
            PrimitiveKind::Move => "pt",
            PrimitiveKind::Line => "ln",
            PrimitiveKind::Cubic => "cb",
            PrimitiveKind::Quad => "qd",
            PrimitiveKind::Arc => "arc",
            PrimitiveKind::ArcMove => "am",
            PrimitiveKind::Ellipse => "el",
            PrimitiveKind::Rect => "rc",
            PrimitiveKind::Text => "tx",
            PrimitiveKind::VerticalCursor => "vc",
            PrimitiveKind::HorizontalCursor => "hc",
            PrimitiveKind::CrosshairCursor => "cc",
            PrimitiveKind::PointCursor => "pc",
        }
    }

    pub fn is_cursor(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::VerticalCursor
                | PrimitiveKind::HorizontalCursor
                | PrimitiveKind::CrosshairCursor
                | PrimitiveKind::PointCursor
        )
    }

    pub fn graphics_type(&self) -> GraphicsType {
        if self.is_cursor() {
            GraphicsType::Cursor
        } else {
            GraphicsType::Shape
        }
    }

    pub fn closed_by_default(&self) -> bool {
        matches!(self, PrimitiveKind::Ellipse | PrimitiveKind::Rect)
    }

    /// Whether the first control point is the end point of the previous
    /// path element.
    pub fn has_origin(&self) -> bool {
        matches!(
            self,
            PrimitiveKind::Line | PrimitiveKind::Cubic | PrimitiveKind::Quad
        )
    }

    /// Number of control points produced outside a path.
    pub fn control_point_count(&self) -> usize {
        match self {
            PrimitiveKind::Move | PrimitiveKind::Text => 1,
            PrimitiveKind::Line => 2,
            PrimitiveKind::Cubic => 4,
            PrimitiveKind::Quad => 3,
            PrimitiveKind::Arc
            | PrimitiveKind::ArcMove
            | PrimitiveKind::Ellipse
            | PrimitiveKind::Rect => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ShapeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "Path" {
            Some(ShapeKind::Path)
        } else {
            PrimitiveKind::from_name(name).map(ShapeKind::Primitive)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Primitive(kind) => kind.name(),
            ShapeKind::Path => "Path",
        }
    }

    pub fn graphics_type(&self) -> GraphicsType {
        match self {
            ShapeKind::Primitive(kind) => kind.graphics_type(),
            ShapeKind::Path => GraphicsType::Path,
        }
    }

    pub fn label_prefix(&self) -> &'static str {
        match self {
            ShapeKind::Primitive(kind) => kind.label_prefix(),
            ShapeKind::Path => "path",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
