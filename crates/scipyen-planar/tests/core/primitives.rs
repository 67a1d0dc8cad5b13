use scipyen_core::{CursorDefaults, PlanarConfig};
use scipyen_planar::{
    CursorKind, DescriptorState, DescriptorValue, Point, Primitive, PrimitiveKind, Rect,
};
use std::f64::consts::PI;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
}

#[test]
fn test_line_defaults_and_length() {
    let line = Primitive::line(0.0, 0.0, 10.0, 10.0);
    assert_eq!(line.frame_indices(), vec![None]);
    assert_eq!(line.name(), "Line");
    assert!(line.get_state(Some(5), true).is_some());

    let origin = Primitive::point(0.0, 0.0).end_point(None);
    assert_close(line.curve_length(origin), 200.0_f64.sqrt());
}

#[test]
fn test_new_rejects_bad_arity_and_types() {
    let err = Primitive::new(PrimitiveKind::Line, vec![1.0.into()]).unwrap_err();
    assert!(err.is_schema_error());

    let err = Primitive::new(
        PrimitiveKind::Text,
        vec![1.0.into(), 2.0.into(), 3.0.into()],
    )
    .unwrap_err();
    assert!(err.is_schema_error());

    let text = Primitive::new(
        PrimitiveKind::Text,
        vec!["label".into(), 2.0.into(), 3.0.into()],
    )
    .unwrap();
    assert_eq!(text.parameter("text", None).and_then(DescriptorValue::as_str), Some("label"));
}

#[test]
fn test_from_state_checks_schema() {
    let state = DescriptorState::from_values(PrimitiveKind::Move, vec![1.0.into(), 2.0.into()], Some(3)).unwrap();
    assert!(Primitive::from_state(PrimitiveKind::Line, state.clone()).is_err());

    let point = Primitive::from_state(PrimitiveKind::Move, state).unwrap();
    assert_eq!(point.frame_indices(), vec![Some(3)]);
}

#[test]
fn test_from_states_normalizes() {
    let a = DescriptorState::from_values(PrimitiveKind::Move, vec![1.0.into(), 2.0.into()], Some(0)).unwrap();
    let b = a.with_frame(Some(0));
    let c = a.with_frame(Some(1));
    let point = Primitive::from_states(PrimitiveKind::Move, vec![a, b, c]).unwrap();
    assert_eq!(point.frame_indices(), vec![Some(0), Some(1)]);
}

#[test]
fn test_with_frame_indices_binds_each_state() {
    let a = DescriptorState::from_values(PrimitiveKind::Move, vec![1.0.into(), 0.0.into()], None).unwrap();
    let b = a.with_frame(Some(7));
    let point = Primitive::from_states(PrimitiveKind::Move, vec![a.with_frame(Some(6)), b])
        .unwrap()
        .with_frame_indices(&[3, 4])
        .unwrap();
    assert_eq!(point.frame_indices(), vec![Some(3), Some(4)]);

    let states = vec![a.with_frame(Some(0)), a.with_frame(Some(1))];
    let err = Primitive::from_states(PrimitiveKind::Move, states)
        .unwrap()
        .with_frame_indices(&[0, 1, 2])
        .unwrap_err();
    assert!(err.is_frame_error());
}

#[test]
fn test_set_parameter_contract() {
    let mut line = Primitive::line(0.0, 0.0, 1.0, 1.0).with_frame_indices(&[0]).unwrap();

    line.set_parameter("x1", 20.0, None).unwrap();
    assert_eq!(line.parameter("x1", None), Some(&DescriptorValue::Number(20.0)));

    assert!(line.set_parameter("bogus", 1.0, None).unwrap_err().is_schema_error());
    assert!(line.set_parameter("x1", "text", None).unwrap_err().is_schema_error());
    assert!(line.set_parameter("x0", 1.0, Some(3)).unwrap_err().is_lookup_error());
}

#[test]
fn test_get_state_mut_is_live() {
    let mut rect = Primitive::rect(0.0, 0.0, 10.0, 5.0);
    let snapshot = rect.snapshot_state(None).unwrap();

    rect.get_state_mut(None, true).unwrap().set("w", 30.0).unwrap();
    assert_eq!(rect.current_state().unwrap().number("w"), Some(30.0));
    assert_eq!(snapshot.number("w"), Some(10.0));
}

#[test]
fn test_angle_is_bounded() {
    let mut point = Primitive::point(0.0, 0.0);
    let state = point.current_state_mut().unwrap();
    assert!(state.set_angle(2.0).is_ok());
    assert!(state.set_angle(-2.5).unwrap_err().is_schema_error());
    assert_eq!(state.angle(), 2.0);
}

#[test]
fn test_control_points() {
    let cubic = Primitive::cubic(
        Point::new(0.0, 0.0),
        Point::new(1.0, 2.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 0.0),
    );
    assert_eq!(cubic.control_points(None, false).len(), 4);
    let in_path = cubic.control_points(None, true);
    assert_eq!(in_path.len(), 3);
    assert_eq!(in_path[0], Point::new(1.0, 2.0));

    let ellipse = Primitive::ellipse(1.0, 2.0, 4.0, 6.0);
    assert_eq!(
        ellipse.control_points(None, true).into_vec(),
        vec![Point::new(1.0, 2.0), Point::new(5.0, 8.0)]
    );

    let framed = Primitive::point(0.0, 0.0).with_frame_indices(&[1]).unwrap();
    assert!(framed.control_points(Some(0), false).is_empty());
}

#[test]
fn test_curve_lengths() {
    assert_eq!(Primitive::point(3.0, 3.0).curve_length(None), 0.0);
    assert_eq!(Primitive::arc_move(0.0, 0.0, 10.0, 10.0, 45.0).curve_length(None), 0.0);
    assert_close(Primitive::rect(0.0, 0.0, 3.0, 4.0).curve_length(None), 14.0);
    assert_close(Primitive::ellipse(0.0, 0.0, 20.0, 20.0).curve_length(None), 20.0 * PI);

    let cubic = Primitive::cubic(
        Point::new(0.0, 0.0),
        Point::new(1.0, 2.0),
        Point::new(2.0, 2.0),
        Point::new(3.0, 0.0),
    );
    assert_close(cubic.curve_length(None), 3.25_f64.sqrt());
    assert_close(cubic.curve_length(Some(Point::new(1.5, 0.0))), 1.0);

    let quad = Primitive::quad(Point::new(0.0, 0.0), Point::new(3.0, 3.0), Point::new(6.0, 0.0));
    assert_close(quad.curve_length(None), 10.0_f64.sqrt());

    // Sweep plus the offset of the previous point from the bounding corner
    let arc = Primitive::arc(0.0, 0.0, 10.0, 10.0, 0.0, 90.0);
    assert_close(arc.curve_length(None), 90.0);
    assert_close(arc.curve_length(Some(Point::new(3.0, 4.0))), 95.0);
}

#[test]
fn test_curve_length_without_state_is_zero() {
    let line = Primitive::line(0.0, 0.0, 3.0, 4.0).with_frame_indices(&[2]).unwrap();
    assert_eq!(line.curve_length_at(0, None), 0.0);
    assert_close(line.curve_length_at(2, None), 5.0);
}

#[test]
fn test_end_points() {
    assert_eq!(Primitive::line(0.0, 0.0, 3.0, 4.0).end_point(None), Some(Point::new(3.0, 4.0)));

    let arc = Primitive::arc(0.0, 0.0, 10.0, 10.0, 0.0, 90.0);
    let end = arc.end_point(None).unwrap();
    assert_close(end.x, 5.0);
    assert_close(end.y, 0.0);
}

#[test]
fn test_position_and_translate() {
    let mut line = Primitive::line(5.0, 2.0, 1.0, 8.0);
    assert_eq!(line.x(), Some(1.0));
    assert_eq!(line.y(), Some(2.0));

    line.set_x(0.0);
    assert_eq!(line.parameter("x0", None), Some(&DescriptorValue::Number(4.0)));
    assert_eq!(line.parameter("x1", None), Some(&DescriptorValue::Number(0.0)));

    line.translate(1.0, -2.0);
    assert_eq!(line.x(), Some(1.0));
    assert_eq!(line.y(), Some(0.0));
}

#[test]
fn test_translate_only_touches_current_frame() {
    let mut point = Primitive::point(1.0, 1.0)
        .with_frame_indices(&[0, 1])
        .unwrap()
        .with_current_frame(1);
    point.translate(10.0, 0.0);
    assert_eq!(point.parameter("x", Some(0)), Some(&DescriptorValue::Number(1.0)));
    assert_eq!(point.parameter("x", Some(1)), Some(&DescriptorValue::Number(11.0)));
}

#[test]
fn test_from_control_points() {
    let mut rect = Primitive::rect(0.0, 0.0, 1.0, 1.0);
    assert!(rect
        .from_control_points(&[Point::new(1.0, 2.0), Point::new(4.0, 6.0)], None)
        .unwrap());
    let state = rect.current_state().unwrap();
    assert_eq!(state.number("w"), Some(3.0));
    assert_eq!(state.number("h"), Some(4.0));

    assert!(rect.from_control_points(&[Point::new(0.0, 0.0)], None).is_err());

    let mut framed = Primitive::point(0.0, 0.0).with_frame_indices(&[1]).unwrap();
    assert!(!framed.from_control_points(&[Point::new(5.0, 5.0)], Some(0)).unwrap());
}

#[test]
fn test_control_path_round_trip() {
    let line = Primitive::line(0.0, 0.0, 3.0, 4.0);
    let control = line.control_path(None);
    assert_eq!(control.len(), 2);
    assert_eq!(control.get(0).unwrap().kind(), PrimitiveKind::Move);

    let mut other = Primitive::line(9.0, 9.0, 9.0, 9.0);
    assert!(other.from_control_path(&control, None).unwrap());
    assert_eq!(other.states(), line.states());
}

#[test]
fn test_cursor_windows() {
    let defaults = CursorDefaults::default();

    let vertical = Primitive::cursor(CursorKind::Vertical, 10.0, 20.0, &defaults);
    assert!(vertical.is_cursor());
    assert_eq!(vertical.cursor_window(None), Some(Rect::new(5.0, 20.0, 10.0, 100.0)));

    let horizontal = Primitive::cursor(CursorKind::Horizontal, 10.0, 20.0, &defaults);
    assert_eq!(horizontal.cursor_window(None), Some(Rect::new(10.0, 15.0, 100.0, 10.0)));

    let crosshair = Primitive::cursor(CursorKind::Crosshair, 10.0, 20.0, &defaults);
    assert_eq!(crosshair.cursor_window(None), Some(Rect::new(5.0, 15.0, 10.0, 10.0)));

    let point = Primitive::cursor_with(CursorKind::Point, 10.0, 20.0, 0.0, 0.0, 0.0, 0.0, 3.0);
    assert_eq!(point.cursor_window(None), Some(Rect::new(7.0, 17.0, 6.0, 6.0)));

    assert_eq!(Primitive::point(0.0, 0.0).cursor_window(None), None);
}

#[test]
fn test_cursor_defaults_from_config() {
    let mut config = PlanarConfig::new();
    config.cursors.radius = 8.0;
    let cursor = Primitive::cursor(CursorKind::Point, 0.0, 0.0, &config.cursors);
    assert_eq!(cursor.parameter("radius", None), Some(&DescriptorValue::Number(8.0)));
    assert_eq!(cursor.kind(), PrimitiveKind::PointCursor);
}

#[test]
fn test_append_states() {
    let mut a = Primitive::point(0.0, 0.0).with_frame_indices(&[0]).unwrap();
    let b = Primitive::point(5.0, 5.0).with_frame_indices(&[1]).unwrap();
    a.append_states(&b).unwrap();
    assert_eq!(a.frame_indices(), vec![Some(0), Some(1)]);

    let line = Primitive::line(0.0, 0.0, 1.0, 1.0);
    assert!(a.append_states(&line).is_err());
}

#[test]
fn test_closed_defaults() {
    assert!(Primitive::rect(0.0, 0.0, 1.0, 1.0).is_closed());
    assert!(Primitive::ellipse(0.0, 0.0, 1.0, 1.0).is_closed());
    assert!(!Primitive::line(0.0, 0.0, 1.0, 1.0).is_closed());
}
