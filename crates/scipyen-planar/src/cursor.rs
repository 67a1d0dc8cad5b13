//! Cursor kinds and their hit-test window geometry.

use scipyen_core::CursorDefaults;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::kind::PrimitiveKind;
use crate::state::DescriptorState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorKind {
    Vertical,
    Horizontal,
    Crosshair,
    Point,
}

impl CursorKind {
    pub fn from_primitive(kind: PrimitiveKind) -> Option<Self> {
        match kind {
            PrimitiveKind::VerticalCursor => Some(CursorKind::Vertical),
            PrimitiveKind::HorizontalCursor => Some(CursorKind::Horizontal),
            PrimitiveKind::CrosshairCursor => Some(CursorKind::Crosshair),
            PrimitiveKind::PointCursor => Some(CursorKind::Point),
            _ => None,
        }
    }
}

impl From<CursorKind> for PrimitiveKind {
    fn from(kind: CursorKind) -> Self {
        match kind {
            CursorKind::Vertical => PrimitiveKind::VerticalCursor,
            CursorKind::Horizontal => PrimitiveKind::HorizontalCursor,
            CursorKind::Crosshair => PrimitiveKind::CrosshairCursor,
            CursorKind::Point => PrimitiveKind::PointCursor,
        }
    }
}

/// Descriptor values for a cursor at `(x, y)` using configured defaults.
pub(crate) fn cursor_values(x: f64, y: f64, defaults: &CursorDefaults) -> [f64; 7] {
    [
        x,
        y,
        defaults.width,
        defaults.height,
        defaults.xwindow,
        defaults.ywindow,
        defaults.radius,
    ]
}

/// Hit-test window of a cursor state.
pub fn cursor_window(kind: CursorKind, state: &DescriptorState) -> Rect {
    let x = state.num("x");
    let y = state.num("y");
    let xwindow = state.num("xwindow");
    let ywindow = state.num("ywindow");
    match kind {
        CursorKind::Vertical => Rect::new(x - xwindow / 2.0, y, xwindow, state.num("height")),
        CursorKind::Horizontal => Rect::new(x, y - ywindow / 2.0, state.num("width"), ywindow),
        CursorKind::Crosshair => Rect::new(x - xwindow / 2.0, y - ywindow / 2.0, xwindow, ywindow),
        CursorKind::Point => {
            let r = state.num("radius");
            Rect::new(x - r, y - r, 2.0 * r, 2.0 * r)
        }
    }
}
