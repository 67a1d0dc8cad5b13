//! Plain geometry helpers shared by primitives and paths.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::f64::consts::PI;

/// Control points of a single primitive; no primitive has more than four.
pub type ControlPoints = SmallVec<[Point; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Definite integral over `[0, 1]` of the Bezier (clamped single-segment
/// B-spline) curve with these control points.
///
/// Each Bernstein basis polynomial of degree `n` integrates to `1 / (n + 1)`,
/// so the integral is the mean of the control points.
pub fn bezier_integral(controls: &[Point]) -> Point {
    if controls.is_empty() {
        return Point::new(0.0, 0.0);
    }
    let n = controls.len() as f64;
    let (sx, sy) = controls
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

/// Complete elliptic integral of the second kind `E(m)`, parameter `m = k^2`,
/// by the arithmetic-geometric mean.
pub fn complete_elliptic_e(m: f64) -> f64 {
    if m >= 1.0 {
        return 1.0;
    }
    let mut a = 1.0_f64;
    let mut b = (1.0 - m).sqrt();
    let mut sum = 0.5 * m;
    let mut weight = 1.0;
    for _ in 0..64 {
        let c = 0.5 * (a - b);
        if c.abs() < 1e-15 {
            break;
        }
        sum += weight * c * c;
        weight *= 2.0;
        let next_a = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = next_a;
    }
    PI / (2.0 * a) * (1.0 - sum)
}

/// Perimeter of an ellipse inscribed in a `w` by `h` rectangle.
pub fn ellipse_perimeter(w: f64, h: f64) -> f64 {
    let (ra, rb) = (w.abs() / 2.0, h.abs() / 2.0);
    let (major, minor) = if ra >= rb { (ra, rb) } else { (rb, ra) };
    if major == 0.0 {
        return 0.0;
    }
    let m = 1.0 - (minor / major).powi(2);
    4.0 * major * complete_elliptic_e(m)
}

/// Point at `angle_deg` on the ellipse inscribed in `rect`, using the
/// y-down, counter-clockwise-positive angle convention of Qt arcs.
pub fn ellipse_point(rect: Rect, angle_deg: f64) -> Point {
    let (s, c) = angle_deg.to_radians().sin_cos();
    Point::new(
        rect.x + rect.w / 2.0 + rect.w / 2.0 * c,
        rect.y + rect.h / 2.0 - rect.h / 2.0 * s,
    )
}

/// Rotate `p` about `center` by `angle` radians.
pub fn rotate_point(p: Point, center: Point, angle: f64) -> Point {
    if angle.abs() < 1e-12 {
        return p;
    }
    let (s, c) = angle.sin_cos();
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    Point {
        x: center.x + dx * c - dy * s,
        y: center.y + dx * s + dy * c,
    }
}
