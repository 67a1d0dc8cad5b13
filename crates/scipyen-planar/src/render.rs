//! Drawable geometry for primitives and paths.
//!
//! Arc angles follow the Qt convention: degrees, counter-clockwise positive
//! on a y-down canvas. lyon measures angles clockwise on the same canvas, so
//! they are negated on the way in.

use lyon::geom::Arc;
use lyon::math::{point, vector, Angle, Box2D, Transform};
use lyon::path::iterator::PathIterator;
use lyon::path::{Event, Path as LyonPath, Winding};
use std::f64::consts::PI;

use crate::geometry::{self, Point};
use crate::kind::PrimitiveKind;
use crate::path::Path;
use crate::primitive::{self, Primitive};
use crate::state::DescriptorState;

type Builder = lyon::path::path::Builder;

impl Primitive {
    /// Geometry of the state shown in `frame`, rotated by its `angle`
    /// about the first control point.
    pub fn render(&self, frame: Option<i32>) -> Option<LyonPath> {
        let state = self.get_state(frame, true)?;
        let mut builder = LyonPath::builder();
        draw_standalone(&mut builder, self.kind(), state);
        let path = builder.build();

        let angle = state.angle();
        if angle == 0.0 {
            return Some(path);
        }
        let pivot = primitive::control_points_of(self.kind(), state)
            .first()
            .copied()
            .unwrap_or(Point::new(0.0, 0.0));
        let (cx, cy) = (pivot.x as f32, pivot.y as f32);
        let t = Transform::translation(-cx, -cy)
            .then_rotate(Angle::radians((angle * PI) as f32))
            .then_translate(vector(cx, cy));
        Some(path.transformed(&t))
    }

    /// Arclength of the rendered geometry, flattened at `tolerance`.
    pub fn approximate_length(&self, frame: Option<i32>, tolerance: f64) -> f64 {
        self.render(frame)
            .map(|p| flattened_length(&p, tolerance))
            .unwrap_or(0.0)
    }
}

impl Path {
    /// Geometry of the elements shown in `frame`.
    ///
    /// Elements continue from the previous element's end point, so the
    /// stored origin of a `Line`, `Cubic` or `Quad` is not used once a
    /// subpath is open. Element rotation is not applied inside a path.
    pub fn render(&self, frame: Option<i32>) -> Option<LyonPath> {
        let frame = frame.unwrap_or(self.current_frame());
        let mut builder = LyonPath::builder();
        let mut open = false;
        let mut drawn = false;

        for element in self.iter() {
            let Some(state) = element.get_state(Some(frame), true) else {
                continue;
            };
            drawn = true;
            let kind = element.kind();
            match kind {
                PrimitiveKind::Move | PrimitiveKind::ArcMove => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(start_of(kind, state).to_lyon());
                    open = true;
                }
                PrimitiveKind::Line | PrimitiveKind::Cubic | PrimitiveKind::Quad => {
                    let points = primitive::control_points_of(kind, state);
                    if !open {
                        builder.begin(points[0].to_lyon());
                        open = true;
                    }
                    match kind {
                        PrimitiveKind::Line => {
                            builder.line_to(points[1].to_lyon());
                        }
                        PrimitiveKind::Cubic => {
                            builder.cubic_bezier_to(
                                points[1].to_lyon(),
                                points[2].to_lyon(),
                                points[3].to_lyon(),
                            );
                        }
                        _ => {
                            builder.quadratic_bezier_to(points[1].to_lyon(), points[2].to_lyon());
                        }
                    }
                }
                PrimitiveKind::Arc => {
                    let start = start_of(kind, state).to_lyon();
                    if open {
                        builder.line_to(start);
                    } else {
                        builder.begin(start);
                        open = true;
                    }
                    arc_segments(&mut builder, state);
                }
                _ => {
                    if open {
                        builder.end(false);
                        open = false;
                    }
                    draw_standalone(&mut builder, kind, state);
                }
            }
        }

        if open {
            builder.end(self.is_closed());
        }
        drawn.then(|| builder.build())
    }

    pub fn approximate_length(&self, frame: Option<i32>, tolerance: f64) -> f64 {
        self.render(frame)
            .map(|p| flattened_length(&p, tolerance))
            .unwrap_or(0.0)
    }
}

fn start_of(kind: PrimitiveKind, state: &DescriptorState) -> Point {
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

fn arc_segments(builder: &mut Builder, state: &DescriptorState) {
    let r = primitive::state_rect(state);
    let arc = Arc {
        center: point((r.x + r.w / 2.0) as f32, (r.y + r.h / 2.0) as f32),
        radii: vector((r.w / 2.0).abs() as f32, (r.h / 2.0).abs() as f32),
        x_rotation: Angle::radians(0.0),
        start_angle: Angle::degrees(-state.num("s") as f32),
        sweep_angle: Angle::degrees(-state.num("l") as f32),
    };
    arc.for_each_cubic_bezier(&mut |seg| {
        builder.cubic_bezier_to(seg.ctrl1, seg.ctrl2, seg.to);
    });
}

fn segment(builder: &mut Builder, from: (f64, f64), to: (f64, f64)) {
    builder.begin(point(from.0 as f32, from.1 as f32));
    builder.line_to(point(to.0 as f32, to.1 as f32));
    builder.end(false);
}

fn draw_standalone(builder: &mut Builder, kind: PrimitiveKind, state: &DescriptorState) {
    let n = |name: &str| state.num(name);
    match kind {
        PrimitiveKind::Move | PrimitiveKind::ArcMove | PrimitiveKind::Text => {
            builder.begin(start_of(kind, state).to_lyon());
            builder.end(false);
        }
        PrimitiveKind::Line => segment(builder, (n("x0"), n("y0")), (n("x1"), n("y1"))),
        PrimitiveKind::Cubic => {
            builder.begin(point(n("c0x") as f32, n("c0y") as f32));
            builder.cubic_bezier_to(
                point(n("c1x") as f32, n("c1y") as f32),
                point(n("c2x") as f32, n("c2y") as f32),
                point(n("c3x") as f32, n("c3y") as f32),
            );
            builder.end(false);
        }
        PrimitiveKind::Quad => {
            builder.begin(point(n("c0x") as f32, n("c0y") as f32));
            builder.quadratic_bezier_to(
                point(n("c1x") as f32, n("c1y") as f32),
                point(n("c2x") as f32, n("c2y") as f32),
            );
            builder.end(false);
        }
        PrimitiveKind::Arc => {
            builder.begin(start_of(kind, state).to_lyon());
            arc_segments(builder, state);
            builder.end(false);
        }
        PrimitiveKind::Ellipse => {
            let r = primitive::state_rect(state);
            builder.add_ellipse(
                point((r.x + r.w / 2.0) as f32, (r.y + r.h / 2.0) as f32),
                vector((r.w / 2.0).abs() as f32, (r.h / 2.0).abs() as f32),
                Angle::radians(0.0),
                Winding::Positive,
            );
        }
        PrimitiveKind::Rect => {
            let r = primitive::state_rect(state);
            let (x0, x1) = (r.x.min(r.x + r.w), r.x.max(r.x + r.w));
            let (y0, y1) = (r.y.min(r.y + r.h), r.y.max(r.y + r.h));
            builder.add_rectangle(
                &Box2D::new(point(x0 as f32, y0 as f32), point(x1 as f32, y1 as f32)),
                Winding::Positive,
            );
        }
        PrimitiveKind::VerticalCursor => {
            let (x, y) = (n("x"), n("y"));
            segment(builder, (x, y), (x, y + n("height")));
        }
        PrimitiveKind::HorizontalCursor => {
            let (x, y) = (n("x"), n("y"));
            segment(builder, (x, y), (x + n("width"), y));
        }
        PrimitiveKind::CrosshairCursor => {
            let (x, y) = (n("x"), n("y"));
            let (hw, hh) = (n("width") / 2.0, n("height") / 2.0);
            segment(builder, (x - hw, y), (x + hw, y));
            segment(builder, (x, y - hh), (x, y + hh));
        }
        PrimitiveKind::PointCursor => {
            let (x, y, r) = (n("x"), n("y"), n("radius"));
            segment(builder, (x - r, y), (x + r, y));
            segment(builder, (x, y - r), (x, y + r));
        }
    }
}

/// Sum of segment lengths after flattening, closing edges included.
pub fn flattened_length(path: &LyonPath, tolerance: f64) -> f64 {
    let mut total = 0.0f64;
    for event in path.iter().flattened(tolerance as f32) {
        match event {
            Event::Line { from, to } => total += (to - from).length() as f64,
            Event::End {
                last,
                first,
                close: true,
            } => total += (first - last).length() as f64,
            _ => {}
        }
    }
    total
}
