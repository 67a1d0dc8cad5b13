//! Primitive planar graphics: shapes and cursors with frame-bound states.
//!
//! A [`Primitive`] owns its descriptor states. References returned by
//! [`Primitive::get_state_mut`] point straight into the owning object, so
//! edits through them change the primitive with no copy. Use
//! [`Primitive::snapshot_state`] when an independent copy is needed.

use scipyen_core::{CursorDefaults, FrameError, LookupError, Result, SchemaError};
use smallvec::smallvec;

use crate::cursor::{self, CursorKind};
use crate::geometry::{self, ControlPoints, Point, Rect};
use crate::kind::PrimitiveKind;
use crate::path::Path;
use crate::state::{DescriptorState, DescriptorValue};
use crate::visibility::{self, FrameIndexSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    kind: PrimitiveKind,
    states: Vec<DescriptorState>,
    name: String,
    current_frame: i32,
    closed: bool,
}

impl Primitive {
    /// Build from descriptor values in the kind's declared order; the
    /// single state is ubiquitous.
    pub fn new(kind: PrimitiveKind, values: Vec<DescriptorValue>) -> Result<Self> {
        let state = DescriptorState::from_values(kind, values, None)?;
        Ok(Self::with_validated_states(kind, vec![state]))
    }

    /// Build from one existing state, keeping its frame binding.
    pub fn from_state(kind: PrimitiveKind, state: DescriptorState) -> Result<Self> {
        state.validate(kind)?;
        Ok(Self::with_validated_states(kind, vec![state]))
    }

    /// Build from several states (typically one per frame).
    ///
    /// States that break the visibility rules are discarded by the usual
    /// normalization pass.
    pub fn from_states(kind: PrimitiveKind, states: Vec<DescriptorState>) -> Result<Self> {
        for state in &states {
            state.validate(kind)?;
        }
        let mut primitive = Self::with_validated_states(kind, states);
        primitive.check_states();
        Ok(primitive)
    }

    pub(crate) fn with_validated_states(kind: PrimitiveKind, states: Vec<DescriptorState>) -> Self {
        Self {
            kind,
            states,
            name: kind.name().to_string(),
            current_frame: 0,
            closed: kind.closed_by_default(),
        }
    }

    fn from_numbers(kind: PrimitiveKind, values: &[f64]) -> Self {
        Self::with_validated_states(kind, vec![DescriptorState::from_numbers(kind, values)])
    }

    /// Bind the states to explicit frames.
    ///
    /// With as many indices as states (and more than one state) each state
    /// takes the matching index. Otherwise the visible state is distributed
    /// across the listed frames.
    pub fn with_frame_indices(mut self, frames: &[i32]) -> Result<Self> {
        if self.states.len() > 1 && frames.len() == self.states.len() {
            let mut rebound = self.states.clone();
            for (state, frame) in rebound.iter_mut().zip(frames) {
                state.z_frame = Some(*frame);
            }
            visibility::validate_states(&rebound)?;
            self.states = rebound;
        } else if self.states.len() > 1 && frames.len() > 1 {
            return Err(FrameError::IndexCount {
                expected: self.states.len(),
                actual: frames.len(),
            }
            .into());
        } else if !frames.is_empty() {
            self.set_frame_indices(&FrameIndexSpec::Frames(frames.to_vec()))?;
        }
        Ok(self)
    }

    pub fn with_current_frame(mut self, frame: i32) -> Self {
        self.current_frame = frame;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self::from_numbers(PrimitiveKind::Move, &[x, y])
    }

    pub fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::from_numbers(PrimitiveKind::Line, &[x0, y0, x1, y1])
    }

    pub fn cubic(c0: Point, c1: Point, c2: Point, c3: Point) -> Self {
        Self::from_numbers(
            PrimitiveKind::Cubic,
            &[c0.x, c0.y, c1.x, c1.y, c2.x, c2.y, c3.x, c3.y],
        )
    }

    pub fn quad(c0: Point, c1: Point, c2: Point) -> Self {
        Self::from_numbers(PrimitiveKind::Quad, &[c0.x, c0.y, c1.x, c1.y, c2.x, c2.y])
    }

    /// Arc of the ellipse inscribed in `(x, y, w, h)`, starting at `start`
    /// degrees and sweeping `sweep` degrees.
    pub fn arc(x: f64, y: f64, w: f64, h: f64, start: f64, sweep: f64) -> Self {
        Self::from_numbers(PrimitiveKind::Arc, &[x, y, w, h, start, sweep])
    }

    pub fn arc_move(x: f64, y: f64, w: f64, h: f64, start: f64) -> Self {
        Self::from_numbers(PrimitiveKind::ArcMove, &[x, y, w, h, start])
    }

    pub fn ellipse(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_numbers(PrimitiveKind::Ellipse, &[x, y, w, h])
    }

    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::from_numbers(PrimitiveKind::Rect, &[x, y, w, h])
    }

    pub fn text(text: impl Into<String>, x: f64, y: f64) -> Self {
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("text".to_string(), DescriptorValue::Text(text.into()));
        fields.insert("x".to_string(), DescriptorValue::Number(x));
        fields.insert("y".to_string(), DescriptorValue::Number(y));
        Self::with_validated_states(
            PrimitiveKind::Text,
            vec![DescriptorState::from_fields(fields, None, 0.0)],
        )
    }

    pub fn cursor(kind: CursorKind, x: f64, y: f64, defaults: &CursorDefaults) -> Self {
        Self::from_numbers(kind.into(), &cursor::cursor_values(x, y, defaults))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cursor_with(
        kind: CursorKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        xwindow: f64,
        ywindow: f64,
        radius: f64,
    ) -> Self {
        Self::from_numbers(
            kind.into(),
            &[x, y, width, height, xwindow, ywindow, radius],
        )
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn is_cursor(&self) -> bool {
        self.kind.is_cursor()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn current_frame(&self) -> i32 {
        self.current_frame
    }

    pub fn set_current_frame(&mut self, frame: i32) {
        self.current_frame = frame;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn states(&self) -> &[DescriptorState] {
        &self.states
    }

    fn resolve(&self, frame: Option<i32>) -> i32 {
        frame.unwrap_or(self.current_frame)
    }

    pub fn is_state_visible(state: &DescriptorState, frame: i32) -> bool {
        visibility::is_state_visible(state, frame)
    }

    /// Normalize the state list; see [`visibility::check_states`].
    pub fn check_states(&mut self) {
        visibility::check_states(&mut self.states);
    }

    /// State shown in `frame` (current frame when `None`).
    pub fn get_state(&self, frame: Option<i32>, visible: bool) -> Option<&DescriptorState> {
        visibility::get_state(&self.states, self.resolve(frame), visible)
    }

    /// Live mutable reference to the state shown in `frame`.
    pub fn get_state_mut(&mut self, frame: Option<i32>, visible: bool) -> Option<&mut DescriptorState> {
        let frame = self.resolve(frame);
        visibility::get_state_mut(&mut self.states, frame, visible)
    }

    pub fn current_state(&self) -> Option<&DescriptorState> {
        self.get_state(None, true)
    }

    pub fn current_state_mut(&mut self) -> Option<&mut DescriptorState> {
        self.get_state_mut(None, true)
    }

    /// Owned copy of the state shown in `frame`.
    pub fn snapshot_state(&self, frame: Option<i32>) -> Option<DescriptorState> {
        self.get_state(frame, true).cloned()
    }

    pub fn state_index(&self, frame: Option<i32>) -> Option<usize> {
        visibility::state_index(&self.states, self.resolve(frame), true)
    }

    pub fn has_state_for_frame(&self, frame: i32) -> bool {
        self.state_index(Some(frame)).is_some()
    }

    pub fn frame_indices(&self) -> Vec<Option<i32>> {
        visibility::frame_indices(&self.states)
    }

    pub fn set_frame_indices(&mut self, spec: &FrameIndexSpec) -> Result<()> {
        visibility::set_frame_indices(&mut self.states, spec, self.current_frame)
    }

    pub fn set_state(
        &mut self,
        state: DescriptorState,
        frame: Option<i32>,
        n_frames: Option<usize>,
    ) -> Result<()> {
        state.validate(self.kind)?;
        visibility::set_state(&mut self.states, state, frame, n_frames);
        Ok(())
    }

    pub fn set_frame_index(
        &mut self,
        index: usize,
        new_frame: Option<i32>,
        check_visible: bool,
        n_frames: Option<usize>,
    ) -> Result<bool> {
        visibility::set_frame_index(&mut self.states, index, new_frame, check_visible, n_frames)
    }

    pub fn remove_state(&mut self, z_frame: Option<i32>) -> Option<DescriptorState> {
        visibility::remove_state(&mut self.states, z_frame)
    }

    pub fn propagate_state(
        &mut self,
        source: &DescriptorState,
        frames: &[i32],
        n_frames: Option<usize>,
    ) -> Result<()> {
        source.validate(self.kind)?;
        visibility::propagate_state(&mut self.states, source, frames, n_frames)
    }

    pub fn remap_frame_state_associations(
        &mut self,
        map: &std::collections::BTreeMap<Option<i32>, Option<i32>>,
    ) -> Result<()> {
        visibility::remap_frame_state_associations(&mut self.states, map)
    }

    /// Add copies of `other`'s states, then normalize.
    pub fn append_states(&mut self, other: &Primitive) -> Result<()> {
        for state in &other.states {
            state.validate(self.kind)?;
        }
        self.states.extend(other.states.iter().cloned());
        self.check_states();
        Ok(())
    }

    /// Value of a descriptor in the state shown in `frame`.
    pub fn parameter(&self, name: &str, frame: Option<i32>) -> Option<&DescriptorValue> {
        self.get_state(frame, true).and_then(|s| s.get(name))
    }

    /// Legacy setter: fails with a lookup error when `frame` shows no state.
    pub fn set_parameter(
        &mut self,
        name: &str,
        value: impl Into<DescriptorValue>,
        frame: Option<i32>,
    ) -> Result<()> {
        let value = value.into();
        let kind = self.kind;
        let Some(expected) = kind.value_kind(name) else {
            return Err(SchemaError::UnknownDescriptor {
                kind: kind.name().to_string(),
                name: name.to_string(),
            }
            .into());
        };
        if value.value_kind() != expected {
            return Err(SchemaError::ValueType {
                kind: kind.name().to_string(),
                name: name.to_string(),
                expected: expected.as_str().to_string(),
            }
            .into());
        }

        let resolved = self.resolve(frame);
        let state = self
            .get_state_mut(Some(resolved), true)
            .ok_or(LookupError::NoStateForFrame(resolved))?;
        state.set(name, value)?;
        Ok(())
    }

    /// Defining points in the state shown in `frame`.
    ///
    /// With `in_path`, the leading origin point that a path element shares
    /// with its predecessor is left out.
    pub fn control_points(&self, frame: Option<i32>, in_path: bool) -> ControlPoints {
        let Some(state) = self.get_state(frame, true) else {
            return ControlPoints::new();
        };
        let mut points = control_points_of(self.kind, state);
        if in_path && self.kind.has_origin() && !points.is_empty() {
            points.remove(0);
        }
        points
    }

    /// Last control point in `frame`; where the next path element starts.
    pub fn end_point(&self, frame: Option<i32>) -> Option<Point> {
        let state = self.get_state(frame, true)?;
        match self.kind {
            PrimitiveKind::Arc => {
                let r = state_rect(state);
                Some(geometry::ellipse_point(r, state.num("s") + state.num("l")))
            }
            PrimitiveKind::ArcMove => {
                Some(geometry::ellipse_point(state_rect(state), state.num("s")))
            }
            _ => control_points_of(self.kind, state).last().copied(),
        }
    }

    /// Length measure in the current frame, relative to the end of the
    /// previous path element when `prev` is given.
    pub fn curve_length(&self, prev: Option<Point>) -> f64 {
        self.curve_length_at(self.current_frame, prev)
    }

    /// Length measure in `frame`.
    ///
    /// Curves use the norm of their definite integral translated to start
    /// at `prev` (or at their own origin), not a numerical arclength; see
    /// [`Primitive::approximate_length`] for the flattened length.
    pub fn curve_length_at(&self, frame: i32, prev: Option<Point>) -> f64 {
        let Some(state) = self.get_state(Some(frame), true) else {
            return 0.0;
        };
        match self.kind {
            PrimitiveKind::Move
            | PrimitiveKind::ArcMove
            | PrimitiveKind::Text
            | PrimitiveKind::VerticalCursor
            | PrimitiveKind::HorizontalCursor
            | PrimitiveKind::CrosshairCursor
            | PrimitiveKind::PointCursor => 0.0,
            PrimitiveKind::Line => {
                let origin = prev.unwrap_or(Point::new(state.num("x0"), state.num("y0")));
                origin.distance_to(&Point::new(state.num("x1"), state.num("y1")))
            }
            PrimitiveKind::Cubic | PrimitiveKind::Quad => {
                let points = control_points_of(self.kind, state);
                let integral = geometry::bezier_integral(&points);
                let origin = prev.unwrap_or(points[0]);
                integral.distance_to(&origin)
            }
            PrimitiveKind::Rect => 2.0 * state.num("w") + 2.0 * state.num("h"),
            PrimitiveKind::Ellipse => geometry::ellipse_perimeter(state.num("w"), state.num("h")),
            // Sweep in degrees plus the distance from `prev` to the
            // bounding-rect corner; not an arc length.
            PrimitiveKind::Arc => {
                let corner = Point::new(state.num("x"), state.num("y"));
                state.num("l") + prev.map(|p| p.distance_to(&corner)).unwrap_or(0.0)
            }
        }
    }

    /// Smallest x coordinate in the current state.
    pub fn x(&self) -> Option<f64> {
        self.x_at(self.current_frame)
    }

    /// Smallest y coordinate in the current state.
    pub fn y(&self) -> Option<f64> {
        self.y_at(self.current_frame)
    }

    pub fn x_at(&self, frame: i32) -> Option<f64> {
        let state = self.get_state(Some(frame), true)?;
        min_coordinate(self.kind.x_fields().iter().filter_map(|f| state.number(f)))
    }

    pub fn y_at(&self, frame: i32) -> Option<f64> {
        let state = self.get_state(Some(frame), true)?;
        min_coordinate(self.kind.y_fields().iter().filter_map(|f| state.number(f)))
    }

    /// Move the current state so that its smallest x is `value`.
    pub fn set_x(&mut self, value: f64) {
        if let Some(x) = self.x() {
            self.translate(value - x, 0.0);
        }
    }

    /// Move the current state so that its smallest y is `value`.
    pub fn set_y(&mut self, value: f64) {
        if let Some(y) = self.y() {
            self.translate(0.0, value - y);
        }
    }

    /// Shift every coordinate of the current state.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.translate_frame(self.current_frame, dx, dy);
    }

    /// Shift every coordinate of the state shown in `frame`.
    pub fn translate_frame(&mut self, frame: i32, dx: f64, dy: f64) {
        let kind = self.kind;
        if let Some(state) = self.get_state_mut(Some(frame), true) {
            for f in kind.x_fields() {
                state.shift(f, dx);
            }
            for f in kind.y_fields() {
                state.shift(f, dy);
            }
        }
    }

    /// Rebuild the state shown in `frame` from a full set of control points.
    ///
    /// Returns `false` when `frame` shows no state.
    pub fn from_control_points(&mut self, points: &[Point], frame: Option<i32>) -> Result<bool> {
        let kind = self.kind;
        let expected = kind.control_point_count();
        if points.len() != expected {
            return Err(SchemaError::ControlPointCount {
                kind: kind.name().to_string(),
                expected,
                actual: points.len(),
            }
            .into());
        }
        let Some(state) = self.get_state_mut(frame, true) else {
            return Ok(false);
        };

        let set = |state: &mut DescriptorState, name: &str, v: f64| state.set(name, v);
        match kind {
            PrimitiveKind::Line => {
                set(state, "x0", points[0].x)?;
                set(state, "y0", points[0].y)?;
                set(state, "x1", points[1].x)?;
                set(state, "y1", points[1].y)?;
            }
            PrimitiveKind::Cubic | PrimitiveKind::Quad => {
                for (i, p) in points.iter().enumerate() {
                    set(state, &format!("c{}x", i), p.x)?;
                    set(state, &format!("c{}y", i), p.y)?;
                }
            }
            PrimitiveKind::Arc
            | PrimitiveKind::ArcMove
            | PrimitiveKind::Ellipse
            | PrimitiveKind::Rect => {
                set(state, "x", points[0].x)?;
                set(state, "y", points[0].y)?;
                set(state, "w", points[1].x - points[0].x)?;
                set(state, "h", points[1].y - points[0].y)?;
            }
            _ => {
                set(state, "x", points[0].x)?;
                set(state, "y", points[0].y)?;
            }
        }
        Ok(true)
    }

    /// Inverse of [`Primitive::control_path`].
    pub fn from_control_path(&mut self, path: &Path, frame: Option<i32>) -> Result<bool> {
        self.from_control_points(&path.control_points(None), frame)
    }

    /// Move/Line path through the control points shown in `frame`.
    pub fn control_path(&self, frame: Option<i32>) -> Path {
        Path::from_points(&self.control_points(frame, false))
    }

    /// Hit-test window for cursors; `None` for shapes or when no state shows.
    pub fn cursor_window(&self, frame: Option<i32>) -> Option<Rect> {
        let kind = CursorKind::from_primitive(self.kind)?;
        let state = self.get_state(frame, true)?;
        Some(cursor::cursor_window(kind, state))
    }
}

pub(crate) fn state_rect(state: &DescriptorState) -> Rect {
    Rect::new(state.num("x"), state.num("y"), state.num("w"), state.num("h"))
}

pub(crate) fn control_points_of(kind: PrimitiveKind, state: &DescriptorState) -> ControlPoints {
    let p = |x: &str, y: &str| Point::new(state.num(x), state.num(y));
    match kind {
        PrimitiveKind::Line => smallvec![p("x0", "y0"), p("x1", "y1")],
        PrimitiveKind::Cubic => smallvec![
            p("c0x", "c0y"),
            p("c1x", "c1y"),
            p("c2x", "c2y"),
            p("c3x", "c3y")
        ],
        PrimitiveKind::Quad => smallvec![p("c0x", "c0y"), p("c1x", "c1y"), p("c2x", "c2y")],
        PrimitiveKind::Arc
        | PrimitiveKind::ArcMove
        | PrimitiveKind::Ellipse
        | PrimitiveKind::Rect => {
            let r = state_rect(state);
            smallvec![Point::new(r.x, r.y), Point::new(r.x + r.w, r.y + r.h)]
        }
        _ => smallvec![p("x", "y")],
    }
}

pub(crate) fn min_coordinate(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
}
