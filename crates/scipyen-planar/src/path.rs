//! Paths: ordered sequences of primitives.
//!
//! A non-empty [`Path`] always starts with a `Move`. Paths never nest;
//! appending or inserting a path splices its elements in. Each element keeps
//! its own frame bindings, so different parts of a path can show in
//! different frames.

use scipyen_core::{FrameError, Result, SchemaError};
use std::ops::Range;

use crate::geometry::{self, Point};
use crate::kind::PrimitiveKind;
use crate::primitive::{self, Primitive};
use crate::state::DescriptorState;
use crate::visibility::FrameIndexSpec;

/// Something that can be added to a path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathItem {
    Element(Primitive),
    Path(Path),
}

impl From<Primitive> for PathItem {
    fn from(element: Primitive) -> Self {
        PathItem::Element(element)
    }
}

impl From<Path> for PathItem {
    fn from(path: Path) -> Self {
        PathItem::Path(path)
    }
}

/// Frame-index assignment for a whole path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathFrameSpec {
    /// Same spec for every element.
    Uniform(FrameIndexSpec),
    /// One spec per element, matched by position.
    PerElement(Vec<FrameIndexSpec>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    elements: Vec<Primitive>,
    name: String,
    current_frame: i32,
    closed: bool,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            name: "Path".to_string(),
            current_frame: 0,
            closed: false,
        }
    }

    /// `Move` to the first point, then a `Line` to each following point.
    pub fn from_points(points: &[Point]) -> Self {
        let mut path = Self::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path.elements.push(Primitive::point(first.x, first.y));
            let mut prev = *first;
            for p in iter {
                path.elements.push(Primitive::line(prev.x, prev.y, p.x, p.y));
                prev = *p;
            }
        }
        path
    }

    pub fn from_elements(elements: impl IntoIterator<Item = PathItem>) -> Result<Self> {
        let mut path = Self::new();
        for item in elements {
            path.append(item)?;
        }
        Ok(path)
    }

    /// Reassemble a path from stored parts, keeping each element as given.
    pub(crate) fn from_parts(
        elements: Vec<Primitive>,
        name: String,
        current_frame: i32,
        closed: bool,
    ) -> Result<Self> {
        if let Some(cursor) = elements.iter().find(|e| e.is_cursor()) {
            return Err(SchemaError::NotPathElement {
                kind: cursor.kind().name().to_string(),
            }
            .into());
        }
        let mut path = Self {
            elements,
            name,
            current_frame,
            closed,
        };
        path.ensure_leading_move();
        Ok(path)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_current_frame(mut self, frame: i32) -> Self {
        self.set_current_frame(frame);
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
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

    /// Set the current frame of the path and of every element.
    pub fn set_current_frame(&mut self, frame: i32) {
        self.current_frame = frame;
        for element in &mut self.elements {
            element.set_current_frame(frame);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.elements.get(index)
    }

    /// Live reference to an element.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Primitive> {
        self.elements.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Primitive> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[Primitive] {
        &self.elements
    }

    /// Add an element at the end. A path is spliced in element by element.
    pub fn append(&mut self, item: impl Into<PathItem>) -> Result<()> {
        let index = self.elements.len();
        self.insert(index, item)
    }

    /// Insert at `index` (clamped to the length).
    ///
    /// Cursors are rejected. When the result would not start with a `Move`,
    /// one is added at the start point of the new first element.
    pub fn insert(&mut self, index: usize, item: impl Into<PathItem>) -> Result<()> {
        let incoming = match item.into() {
            PathItem::Element(element) => vec![element],
            PathItem::Path(path) => path.elements,
        };
        if let Some(cursor) = incoming.iter().find(|e| e.is_cursor()) {
            return Err(SchemaError::NotPathElement {
                kind: cursor.kind().name().to_string(),
            }
            .into());
        }

        let index = index.min(self.elements.len());
        let frame = self.current_frame;
        self.elements.splice(
            index..index,
            incoming.into_iter().map(|e| e.with_current_frame(frame)),
        );
        self.ensure_leading_move();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<Primitive> {
        if index >= self.elements.len() {
            return None;
        }
        let removed = self.elements.remove(index);
        self.ensure_leading_move();
        Some(removed)
    }

    pub fn index(&self, element: &Primitive) -> Option<usize> {
        self.elements.iter().position(|e| e == element)
    }

    pub fn count(&self, element: &Primitive) -> usize {
        self.elements.iter().filter(|e| *e == element).count()
    }

    /// New path holding copies of the elements in `range` (clamped).
    pub fn slice(&self, range: Range<usize>) -> Path {
        let end = range.end.min(self.elements.len());
        let start = range.start.min(end);
        let mut path = Path {
            elements: self.elements[start..end].to_vec(),
            name: self.name.clone(),
            current_frame: self.current_frame,
            closed: false,
        };
        path.ensure_leading_move();
        path
    }

    fn ensure_leading_move(&mut self) {
        let Some(first) = self.elements.first() else {
            return;
        };
        if first.kind() == PrimitiveKind::Move {
            return;
        }
        let states: Vec<DescriptorState> = first
            .states()
            .iter()
            .map(|s| {
                let start = start_point(first.kind(), s);
                let mut moved = DescriptorState::from_numbers(PrimitiveKind::Move, &[start.x, start.y]);
                moved.z_frame = s.z_frame();
                moved
            })
            .collect();
        let leading = Primitive::with_validated_states(PrimitiveKind::Move, states)
            .with_current_frame(self.current_frame);
        self.elements.insert(0, leading);
    }

    /// Union of the elements' `z_frame` values, in order of first appearance.
    pub fn frame_indices(&self) -> Vec<Option<i32>> {
        let mut out = Vec::new();
        for z in self.elements.iter().flat_map(|e| e.frame_indices()) {
            if !out.contains(&z) {
                out.push(z);
            }
        }
        out
    }

    /// Per-element `z_frame` lists.
    pub fn elements_frame_indices(&self) -> Vec<Vec<Option<i32>>> {
        self.elements.iter().map(Primitive::frame_indices).collect()
    }

    /// Apply frame indices to the elements. Nothing changes on error.
    pub fn set_frame_indices(&mut self, spec: &PathFrameSpec) -> Result<()> {
        let mut updated = self.elements.clone();
        match spec {
            PathFrameSpec::Uniform(spec) => {
                for element in &mut updated {
                    element.set_frame_indices(spec)?;
                }
            }
            PathFrameSpec::PerElement(specs) => {
                if specs.len() != updated.len() {
                    return Err(FrameError::SpecCount {
                        expected: updated.len(),
                        actual: specs.len(),
                    }
                    .into());
                }
                for (element, spec) in updated.iter_mut().zip(specs) {
                    element.set_frame_indices(spec)?;
                }
            }
        }
        self.elements = updated;
        Ok(())
    }

    /// Normalize every element's state list.
    pub fn check_states(&mut self) {
        for element in &mut self.elements {
            element.check_states();
        }
    }

    /// State of every element that shows in `frame`; empty when none does.
    ///
    /// With `visible == false` the match is on exact frame bindings.
    pub fn get_state(&self, frame: Option<i32>, visible: bool) -> Vec<&DescriptorState> {
        let frame = frame.unwrap_or(self.current_frame);
        self.elements
            .iter()
            .filter_map(|e| e.get_state(Some(frame), visible))
            .collect()
    }

    /// Per-element index of the state visible in `frame`.
    pub fn state_index(&self, frame: Option<i32>) -> Vec<Option<usize>> {
        let frame = frame.unwrap_or(self.current_frame);
        self.elements
            .iter()
            .map(|e| e.state_index(Some(frame)))
            .collect()
    }

    /// Whether any element shows in `frame`.
    pub fn has_state_for_frame(&self, frame: i32) -> bool {
        self.elements.iter().any(|e| e.has_state_for_frame(frame))
    }

    /// Give each element the state at the same position in `states`.
    ///
    /// `states` must hold one state per element, each valid for that
    /// element's kind. Nothing changes on error.
    pub fn set_state(
        &mut self,
        states: Vec<DescriptorState>,
        frame: Option<i32>,
        n_frames: Option<usize>,
    ) -> Result<()> {
        if states.len() != self.elements.len() {
            return Err(FrameError::SpecCount {
                expected: self.elements.len(),
                actual: states.len(),
            }
            .into());
        }
        let mut updated = self.elements.clone();
        for (element, state) in updated.iter_mut().zip(states) {
            element.set_state(state, frame, n_frames)?;
        }
        self.elements = updated;
        Ok(())
    }

    /// Move the state at `index` of every element to `new_frame`.
    ///
    /// Returns, per element, whether it had a state at `index`. Nothing
    /// changes on error.
    pub fn set_frame_index(
        &mut self,
        index: usize,
        new_frame: Option<i32>,
        check_visible: bool,
        n_frames: Option<usize>,
    ) -> Result<Vec<bool>> {
        let mut updated = self.elements.clone();
        let moved = updated
            .iter_mut()
            .map(|e| e.set_frame_index(index, new_frame, check_visible, n_frames))
            .collect::<Result<Vec<bool>>>()?;
        self.elements = updated;
        Ok(moved)
    }

    /// Remove the state bound exactly to `z_frame` from every element.
    pub fn remove_state(&mut self, z_frame: Option<i32>) -> Vec<Option<DescriptorState>> {
        self.elements
            .iter_mut()
            .map(|e| e.remove_state(z_frame))
            .collect()
    }

    /// Copy each element's state shown in `frame` into `frames`.
    ///
    /// Elements that do not show in `frame` are left alone. Nothing changes
    /// on error.
    pub fn propagate_state(
        &mut self,
        frame: Option<i32>,
        frames: &[i32],
        n_frames: Option<usize>,
    ) -> Result<()> {
        let frame = frame.unwrap_or(self.current_frame);
        let mut updated = self.elements.clone();
        for element in &mut updated {
            let Some(source) = element.snapshot_state(Some(frame)) else {
                continue;
            };
            element.propagate_state(&source, frames, n_frames)?;
        }
        self.elements = updated;
        Ok(())
    }

    /// New path made of the parts shown in `frame`; `None` when nothing shows.
    ///
    /// With `visible == false` the match is on exact frame bindings.
    pub fn object_for_frame(&self, frame: i32, visible: bool) -> Option<Path> {
        let elements: Vec<Primitive> = self
            .elements
            .iter()
            .filter_map(|e| {
                let state = e.get_state(Some(frame), visible)?.clone();
                Some(
                    Primitive::with_validated_states(e.kind(), vec![state])
                        .with_name(e.name())
                        .with_current_frame(frame)
                        .with_closed(e.is_closed()),
                )
            })
            .collect();
        if elements.is_empty() {
            return None;
        }
        let mut path = Path {
            elements,
            name: self.name.clone(),
            current_frame: frame,
            closed: self.closed,
        };
        path.ensure_leading_move();
        Some(path)
    }

    /// Smallest x over the elements shown in the current frame.
    pub fn x(&self) -> Option<f64> {
        let frame = self.current_frame;
        primitive::min_coordinate(self.elements.iter().filter_map(|e| e.x_at(frame)))
    }

    /// Smallest y over the elements shown in the current frame.
    pub fn y(&self) -> Option<f64> {
        let frame = self.current_frame;
        primitive::min_coordinate(self.elements.iter().filter_map(|e| e.y_at(frame)))
    }

    pub fn set_x(&mut self, value: f64) {
        if let Some(x) = self.x() {
            self.translate(value - x, 0.0);
        }
    }

    pub fn set_y(&mut self, value: f64) {
        if let Some(y) = self.y() {
            self.translate(0.0, value - y);
        }
    }

    /// Shift every element's state shown in the current frame.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let frame = self.current_frame;
        for element in &mut self.elements {
            element.translate_frame(frame, dx, dy);
        }
    }

    pub fn curve_length(&self) -> f64 {
        self.curve_length_at(self.current_frame)
    }

    /// Sum of element lengths, each measured from its predecessor's end.
    pub fn curve_length_at(&self, frame: i32) -> f64 {
        let mut total = 0.0;
        let mut prev: Option<Point> = None;
        for element in &self.elements {
            if !element.has_state_for_frame(frame) {
                continue;
            }
            if prev.is_some() {
                total += element.curve_length_at(frame, prev);
            }
            prev = element.end_point(Some(frame));
        }
        total
    }

    /// Element count over the integer curve length; 0 for a zero length.
    pub fn density(&self) -> f64 {
        let length = self.curve_length().trunc();
        if length == 0.0 {
            0.0
        } else {
            self.elements.len() as f64 / length
        }
    }

    pub fn subpath_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| e.kind() == PrimitiveKind::Move)
            .count()
            .saturating_sub(1)
    }

    /// Control polygon of the whole path, without repeated shared points.
    pub fn control_points(&self, frame: Option<i32>) -> Vec<Point> {
        let frame = frame.unwrap_or(self.current_frame);
        self.elements
            .iter()
            .enumerate()
            .flat_map(|(i, e)| e.control_points(Some(frame), i > 0))
            .collect()
    }

    pub fn control_path(&self, frame: Option<i32>) -> Path {
        Path::from_points(&self.control_points(frame))
    }

    /// Rebuild the elements' states shown in `frame` from a control path.
    ///
    /// Returns `false` when some element shows no state in `frame`.
    pub fn from_control_path(&mut self, path: &Path, frame: Option<i32>) -> Result<bool> {
        let frame = frame.unwrap_or(self.current_frame);
        let points = path.control_points(None);
        let expected: usize = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| e.control_points(Some(frame), i > 0).len())
            .sum();
        if points.len() != expected {
            return Err(SchemaError::ControlPointCount {
                kind: "Path".to_string(),
                expected,
                actual: points.len(),
            }
            .into());
        }

        let mut rest = points.as_slice();
        let mut last: Option<Point> = None;
        let mut complete = true;
        for (i, element) in self.elements.iter_mut().enumerate() {
            let n = element.control_points(Some(frame), i > 0).len();
            if n == 0 {
                complete = false;
                continue;
            }
            let (taken, tail) = rest.split_at(n);
            rest = tail;
            let mut full: Vec<Point> = Vec::with_capacity(n + 1);
            if i > 0 && element.kind().has_origin() {
                full.push(last.unwrap_or(taken[0]));
            }
            full.extend_from_slice(taken);
            complete &= element.from_control_points(&full, Some(frame))?;
            last = taken.last().copied();
        }
        Ok(complete)
    }

    /// Merge another path's states into this one, element by element.
    ///
    /// Both paths must have the same element kinds in the same order.
    pub fn append_states(&mut self, other: &Path) -> Result<()> {
        if other.elements.len() != self.elements.len() {
            return Err(SchemaError::Malformed {
                what: "path states".to_string(),
                reason: format!(
                    "expected {} elements, got {}",
                    self.elements.len(),
                    other.elements.len()
                ),
            }
            .into());
        }
        if let Some((mine, theirs)) = self
            .elements
            .iter()
            .zip(&other.elements)
            .find(|(a, b)| a.kind() != b.kind())
        {
            return Err(SchemaError::Malformed {
                what: "path states".to_string(),
                reason: format!("cannot merge {} states into {}", theirs.kind(), mine.kind()),
            }
            .into());
        }
        for (element, source) in self.elements.iter_mut().zip(&other.elements) {
            element.append_states(source)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Where drawing of a primitive begins.
fn start_point(kind: PrimitiveKind, state: &DescriptorState) -> Point {
    match kind {
        PrimitiveKind::Arc | PrimitiveKind::ArcMove => {
            geometry::ellipse_point(primitive::state_rect(state), state.num("s"))
        }
        _ => primitive::control_points_of(kind, state)
            .first()
            .copied()
            .unwrap_or(Point::new(0.0, 0.0)),
    }
}
