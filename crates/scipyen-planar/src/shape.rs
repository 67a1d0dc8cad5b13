//! The closed set of planar shapes and the behaviour they share.

use lyon::path::Path as LyonPath;

use crate::geometry::Point;
use crate::kind::{GraphicsType, ShapeKind};
use crate::path::Path;
use crate::primitive::Primitive;

/// Behaviour common to primitives and paths.
pub trait PlanarShape {
    fn shape_kind(&self) -> ShapeKind;
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
    fn current_frame(&self) -> i32;
    fn set_current_frame(&mut self, frame: i32);
    fn is_closed(&self) -> bool;
    fn frame_indices(&self) -> Vec<Option<i32>>;
    fn has_state_for_frame(&self, frame: i32) -> bool;
    fn x(&self) -> Option<f64>;
    fn y(&self) -> Option<f64>;
    fn set_x(&mut self, value: f64);
    fn set_y(&mut self, value: f64);
    fn translate(&mut self, dx: f64, dy: f64);
    fn curve_length(&self) -> f64;
    fn control_points(&self, frame: Option<i32>) -> Vec<Point>;
    fn render(&self, frame: Option<i32>) -> Option<LyonPath>;
    fn approximate_length(&self, frame: Option<i32>, tolerance: f64) -> f64;

    fn graphics_type(&self) -> GraphicsType {
        self.shape_kind().graphics_type()
    }

    fn is_cursor(&self) -> bool {
        self.graphics_type() == GraphicsType::Cursor
    }
}

impl PlanarShape for Primitive {
    fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Primitive(self.kind())
    }

    fn name(&self) -> &str {
        Primitive::name(self)
    }

    fn set_name(&mut self, name: String) {
        Primitive::set_name(self, name);
    }

    fn current_frame(&self) -> i32 {
        Primitive::current_frame(self)
    }

    fn set_current_frame(&mut self, frame: i32) {
        Primitive::set_current_frame(self, frame);
    }

    fn is_closed(&self) -> bool {
        Primitive::is_closed(self)
    }

    fn frame_indices(&self) -> Vec<Option<i32>> {
        Primitive::frame_indices(self)
    }

    fn has_state_for_frame(&self, frame: i32) -> bool {
        Primitive::has_state_for_frame(self, frame)
    }

    fn x(&self) -> Option<f64> {
        Primitive::x(self)
    }

    fn y(&self) -> Option<f64> {
        Primitive::y(self)
    }

    fn set_x(&mut self, value: f64) {
        Primitive::set_x(self, value);
    }

    fn set_y(&mut self, value: f64) {
        Primitive::set_y(self, value);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        Primitive::translate(self, dx, dy);
    }

    fn curve_length(&self) -> f64 {
        Primitive::curve_length(self, None)
    }

    fn control_points(&self, frame: Option<i32>) -> Vec<Point> {
        Primitive::control_points(self, frame, false).into_vec()
    }

    fn render(&self, frame: Option<i32>) -> Option<LyonPath> {
        Primitive::render(self, frame)
    }

    fn approximate_length(&self, frame: Option<i32>, tolerance: f64) -> f64 {
        Primitive::approximate_length(self, frame, tolerance)
    }
}

impl PlanarShape for Path {
    fn shape_kind(&self) -> ShapeKind {
        ShapeKind::Path
    }

    fn name(&self) -> &str {
        Path::name(self)
    }

    fn set_name(&mut self, name: String) {
        Path::set_name(self, name);
    }

    fn current_frame(&self) -> i32 {
        Path::current_frame(self)
    }

    fn set_current_frame(&mut self, frame: i32) {
        Path::set_current_frame(self, frame);
    }

    fn is_closed(&self) -> bool {
        Path::is_closed(self)
    }

    fn frame_indices(&self) -> Vec<Option<i32>> {
        Path::frame_indices(self)
    }

    fn has_state_for_frame(&self, frame: i32) -> bool {
        Path::has_state_for_frame(self, frame)
    }

    fn x(&self) -> Option<f64> {
        Path::x(self)
    }

    fn y(&self) -> Option<f64> {
        Path::y(self)
    }

    fn set_x(&mut self, value: f64) {
        Path::set_x(self, value);
    }

    fn set_y(&mut self, value: f64) {
        Path::set_y(self, value);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        Path::translate(self, dx, dy);
    }

    fn curve_length(&self) -> f64 {
        Path::curve_length(self)
    }

    fn control_points(&self, frame: Option<i32>) -> Vec<Point> {
        Path::control_points(self, frame)
    }

    fn render(&self, frame: Option<i32>) -> Option<LyonPath> {
        Path::render(self, frame)
    }

    fn approximate_length(&self, frame: Option<i32>, tolerance: f64) -> f64 {
        Path::approximate_length(self, frame, tolerance)
    }
}

/// A primitive or a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Primitive(Primitive),
    Path(Path),
}

impl From<Primitive> for Shape {
    fn from(p: Primitive) -> Self {
        Shape::Primitive(p)
    }
}

impl From<Path> for Shape {
    fn from(p: Path) -> Self {
        Shape::Path(p)
    }
}

impl Shape {
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Shape::Primitive(p) => Some(p),
            Shape::Path(_) => None,
        }
    }

    pub fn as_primitive_mut(&mut self) -> Option<&mut Primitive> {
        match self {
            Shape::Primitive(p) => Some(p),
            Shape::Path(_) => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Shape::Path(p) => Some(p),
            Shape::Primitive(_) => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut Path> {
        match self {
            Shape::Path(p) => Some(p),
            Shape::Primitive(_) => None,
        }
    }
}

impl PlanarShape for Shape {
    fn shape_kind(&self) -> ShapeKind {
        match self {
            Shape::Primitive(s) => s.shape_kind(),
            Shape::Path(s) => s.shape_kind(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Shape::Primitive(s) => PlanarShape::name(s),
            Shape::Path(s) => PlanarShape::name(s),
        }
    }

    fn set_name(&mut self, name: String) {
        match self {
            Shape::Primitive(s) => PlanarShape::set_name(s, name),
            Shape::Path(s) => PlanarShape::set_name(s, name),
        }
    }

    fn current_frame(&self) -> i32 {
        match self {
            Shape::Primitive(s) => PlanarShape::current_frame(s),
            Shape::Path(s) => PlanarShape::current_frame(s),
        }
    }

    fn set_current_frame(&mut self, frame: i32) {
        match self {
            Shape::Primitive(s) => PlanarShape::set_current_frame(s, frame),
            Shape::Path(s) => PlanarShape::set_current_frame(s, frame),
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Shape::Primitive(s) => PlanarShape::is_closed(s),
            Shape::Path(s) => PlanarShape::is_closed(s),
        }
    }

    fn frame_indices(&self) -> Vec<Option<i32>> {
        match self {
            Shape::Primitive(s) => PlanarShape::frame_indices(s),
            Shape::Path(s) => PlanarShape::frame_indices(s),
        }
    }

    fn has_state_for_frame(&self, frame: i32) -> bool {
        match self {
            Shape::Primitive(s) => PlanarShape::has_state_for_frame(s, frame),
            Shape::Path(s) => PlanarShape::has_state_for_frame(s, frame),
        }
    }

    fn x(&self) -> Option<f64> {
        match self {
            Shape::Primitive(s) => PlanarShape::x(s),
            Shape::Path(s) => PlanarShape::x(s),
        }
    }

    fn y(&self) -> Option<f64> {
        match self {
            Shape::Primitive(s) => PlanarShape::y(s),
            Shape::Path(s) => PlanarShape::y(s),
        }
    }

    fn set_x(&mut self, value: f64) {
        match self {
            Shape::Primitive(s) => PlanarShape::set_x(s, value),
            Shape::Path(s) => PlanarShape::set_x(s, value),
        }
    }

    fn set_y(&mut self, value: f64) {
        match self {
            Shape::Primitive(s) => PlanarShape::set_y(s, value),
            Shape::Path(s) => PlanarShape::set_y(s, value),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Primitive(s) => PlanarShape::translate(s, dx, dy),
            Shape::Path(s) => PlanarShape::translate(s, dx, dy),
        }
    }

    fn curve_length(&self) -> f64 {
        match self {
            Shape::Primitive(s) => PlanarShape::curve_length(s),
            Shape::Path(s) => PlanarShape::curve_length(s),
        }
    }

    fn control_points(&self, frame: Option<i32>) -> Vec<Point> {
        match self {
            Shape::Primitive(s) => PlanarShape::control_points(s, frame),
            Shape::Path(s) => PlanarShape::control_points(s, frame),
        }
    }

    fn render(&self, frame: Option<i32>) -> Option<LyonPath> {
        match self {
            Shape::Primitive(s) => PlanarShape::render(s, frame),
            Shape::Path(s) => PlanarShape::render(s, frame),
        }
    }

    fn approximate_length(&self, frame: Option<i32>, tolerance: f64) -> f64 {
        match self {
            Shape::Primitive(s) => PlanarShape::approximate_length(s, frame, tolerance),
            Shape::Path(s) => PlanarShape::approximate_length(s, frame, tolerance),
        }
    }
}
