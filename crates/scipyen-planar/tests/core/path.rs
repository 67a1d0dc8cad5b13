use scipyen_core::CursorDefaults;
use scipyen_planar::{
    CursorKind, FrameIndexSpec, Path, PathFrameSpec, PathItem, Point, Primitive, PrimitiveKind,
};

fn pts(points: &[(f64, f64)]) -> Vec<Point> {
    points.iter().map(|p| Point::from(*p)).collect()
}

fn kinds(path: &Path) -> Vec<PrimitiveKind> {
    path.iter().map(Primitive::kind).collect()
}

#[test]
fn test_from_points() {
    let path = Path::from_points(&pts(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]));

    assert_eq!(
        kinds(&path),
        vec![PrimitiveKind::Move, PrimitiveKind::Line, PrimitiveKind::Line]
    );
    assert_eq!(path.get(0).unwrap().end_point(None), Some(Point::new(0.0, 0.0)));
    assert_eq!(path.x(), Some(0.0));
    assert_eq!(path.y(), Some(0.0));
    assert_eq!(path.subpath_count(), 0);
}

#[test]
fn test_append_path_flattens() {
    let mut a = Path::from_points(&pts(&[(0.0, 0.0), (1.0, 0.0)]));
    let b = Path::from_points(&pts(&[(10.0, 0.0), (11.0, 0.0), (11.0, 1.0)]));
    let before = a.len();

    a.append(b).unwrap();
    assert_eq!(a.len(), before + 3);
    assert_eq!(a.subpath_count(), 1);
    assert_eq!(kinds(&a)[2], PrimitiveKind::Move);
}

#[test]
fn test_first_element_is_coerced_to_move() {
    let mut path = Path::new();
    path.append(Primitive::line(2.0, 3.0, 4.0, 5.0)).unwrap();
    assert_eq!(kinds(&path), vec![PrimitiveKind::Move, PrimitiveKind::Line]);
    assert_eq!(path.get(0).unwrap().end_point(None), Some(Point::new(2.0, 3.0)));

    path.insert(0, Primitive::rect(0.0, 0.0, 1.0, 1.0)).unwrap();
    assert_eq!(path.get(0).unwrap().kind(), PrimitiveKind::Move);
    assert_eq!(path.get(1).unwrap().kind(), PrimitiveKind::Rect);
    assert_eq!(path.len(), 4);
}

#[test]
fn test_leading_move_keeps_element_frames() {
    let line = Primitive::line(1.0, 1.0, 2.0, 2.0).with_frame_indices(&[3]).unwrap();
    let path = Path::from_elements(vec![PathItem::from(line)]).unwrap();
    assert_eq!(path.get(0).unwrap().frame_indices(), vec![Some(3)]);
}

#[test]
fn test_cursor_cannot_join_path() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0)]));
    let cursor = Primitive::cursor(CursorKind::Crosshair, 0.0, 0.0, &CursorDefaults::default());
    assert!(path.append(cursor).unwrap_err().is_schema_error());
    assert_eq!(path.len(), 1);
}

#[test]
fn test_sequence_operations() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]));
    let second = path.get(1).unwrap().clone();

    assert_eq!(path.index(&second), Some(1));
    assert_eq!(path.count(&second), 1);
    assert_eq!(path.index(&Primitive::point(9.0, 9.0)), None);

    let slice = path.slice(1..3);
    assert_eq!(kinds(&slice), vec![PrimitiveKind::Move, PrimitiveKind::Line, PrimitiveKind::Line]);
    assert_eq!(slice.get(0).unwrap().end_point(None), Some(Point::new(0.0, 0.0)));

    let removed = path.remove(0).unwrap();
    assert_eq!(removed.kind(), PrimitiveKind::Move);
    assert_eq!(path.len(), 3);
    assert_eq!(path.get(0).unwrap().kind(), PrimitiveKind::Move);

    assert!(path.remove(10).is_none());
    assert_eq!((&path).into_iter().count(), 3);
}

#[test]
fn test_curve_length_and_density() {
    let path = Path::from_points(&pts(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]));
    assert!((path.curve_length() - 11.0).abs() < 1e-9);
    assert!((path.density() - 3.0 / 11.0).abs() < 1e-9);

    let single = Path::from_points(&pts(&[(1.0, 1.0)]));
    assert_eq!(single.curve_length(), 0.0);
    assert_eq!(single.density(), 0.0);
}

#[test]
fn test_per_element_frames() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
    path.set_frame_indices(&PathFrameSpec::PerElement(vec![
        FrameIndexSpec::Frames(vec![0, 1]),
        FrameIndexSpec::Frames(vec![1]),
    ]))
    .unwrap();

    assert_eq!(path.frame_indices(), vec![Some(0), Some(1)]);
    assert_eq!(
        path.elements_frame_indices(),
        vec![vec![Some(0), Some(1)], vec![Some(1)]]
    );
    assert_eq!(path.get_state(Some(0), true).len(), 1);
    assert_eq!(path.get_state(Some(1), true).len(), 2);
    assert!(path.get_state(Some(5), true).is_empty());

    let err = path
        .set_frame_indices(&PathFrameSpec::PerElement(vec![FrameIndexSpec::Ubiquitous]))
        .unwrap_err();
    assert!(err.is_frame_error());

    path.set_frame_indices(&PathFrameSpec::Uniform(FrameIndexSpec::Ubiquitous))
        .unwrap();
    assert_eq!(path.frame_indices(), vec![None]);
}

#[test]
fn test_object_for_frame() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
    path.set_frame_indices(&PathFrameSpec::PerElement(vec![
        FrameIndexSpec::Frames(vec![0, 1]),
        FrameIndexSpec::Frames(vec![1]),
    ]))
    .unwrap();

    let frame0 = path.object_for_frame(0, true).unwrap();
    assert_eq!(kinds(&frame0), vec![PrimitiveKind::Move]);

    let mut frame1 = path.object_for_frame(1, true).unwrap();
    assert_eq!(frame1.len(), 2);
    assert_eq!(frame1.current_frame(), 1);

    // Snapshot, not a view
    frame1.translate(100.0, 0.0);
    assert_eq!(path.with_current_frame(1).x(), Some(0.0));

    assert!(Path::from_points(&pts(&[(0.0, 0.0)]))
        .with_current_frame(0)
        .object_for_frame(0, true)
        .is_some());
}

#[test]
fn test_object_for_frame_without_match() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
    path.set_frame_indices(&PathFrameSpec::Uniform(FrameIndexSpec::Frames(vec![2])))
        .unwrap();
    assert!(path.object_for_frame(5, true).is_none());
}

#[test]
fn test_set_position_shifts_current_frame() {
    let mut path = Path::from_points(&pts(&[(1.0, 2.0), (5.0, 7.0)]));
    assert_eq!(path.x(), Some(1.0));
    assert_eq!(path.y(), Some(2.0));

    path.set_x(0.0);
    path.set_y(0.0);
    assert_eq!(path.x(), Some(0.0));
    assert_eq!(path.y(), Some(0.0));
    assert_eq!(path.get(1).unwrap().end_point(None), Some(Point::new(4.0, 5.0)));
}

#[test]
fn test_set_current_frame_propagates() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (1.0, 1.0)]));
    path.set_current_frame(4);
    assert!(path.iter().all(|e| e.current_frame() == 4));

    path.append(Primitive::line(1.0, 1.0, 2.0, 2.0)).unwrap();
    assert_eq!(path.get(2).unwrap().current_frame(), 4);
}

#[test]
fn test_control_points_skip_shared_origins() {
    let path = Path::from_points(&pts(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]));
    assert_eq!(path.control_points(None), pts(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]));

    let control = path.control_path(None);
    assert_eq!(control.len(), 3);
}

#[test]
fn test_from_control_path() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (3.0, 4.0), (3.0, 10.0)]));
    let edited = Path::from_points(&pts(&[(1.0, 1.0), (4.0, 5.0), (4.0, 11.0)]));

    assert!(path.from_control_path(&edited, None).unwrap());
    assert_eq!(path.control_points(None), edited.control_points(None));
    assert_eq!(
        path.get(2).unwrap().control_points(None, false).into_vec(),
        pts(&[(4.0, 5.0), (4.0, 11.0)])
    );

    let short = Path::from_points(&pts(&[(1.0, 1.0)]));
    assert!(path.from_control_path(&short, None).is_err());
}

#[test]
fn test_append_states_merges_elementwise() {
    let mut a = Path::from_points(&pts(&[(0.0, 0.0), (1.0, 1.0)]));
    a.set_frame_indices(&PathFrameSpec::Uniform(FrameIndexSpec::Frames(vec![0])))
        .unwrap();
    let mut b = Path::from_points(&pts(&[(5.0, 5.0), (6.0, 6.0)]));
    b.set_frame_indices(&PathFrameSpec::Uniform(FrameIndexSpec::Frames(vec![1])))
        .unwrap();

    a.append_states(&b).unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a.elements_frame_indices(), vec![vec![Some(0), Some(1)]; 2]);

    let mismatched = Path::from_points(&pts(&[(0.0, 0.0)]));
    assert!(a.append_states(&mismatched).is_err());
}

fn two_frame_path() -> Path {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
    path.set_frame_indices(&PathFrameSpec::PerElement(vec![
        FrameIndexSpec::Frames(vec![0, 1]),
        FrameIndexSpec::Frames(vec![1]),
    ]))
    .unwrap();
    path
}

#[test]
fn test_path_state_queries() {
    let mut path = two_frame_path();

    assert_eq!(path.state_index(Some(1)), vec![Some(1), Some(0)]);
    assert_eq!(path.state_index(Some(0)), vec![Some(0), None]);
    assert!(path.has_state_for_frame(0));
    assert!(!path.has_state_for_frame(3));
    assert_eq!(path.get_state(Some(1), false).len(), 2);
    assert!(path.get_state(Some(3), false).is_empty());

    path.check_states();
    assert_eq!(
        path.elements_frame_indices(),
        vec![vec![Some(0), Some(1)], vec![Some(1)]]
    );

    let removed = path.remove_state(Some(0));
    assert_eq!(removed[0].as_ref().and_then(|s| s.z_frame()), Some(0));
    assert!(removed[1].is_none());
    assert_eq!(path.elements_frame_indices(), vec![vec![Some(1)], vec![Some(1)]]);
}

#[test]
fn test_path_set_state_per_element() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
    let states: Vec<_> = path
        .iter()
        .map(|e| e.snapshot_state(None).unwrap())
        .collect();

    path.set_state(states.clone(), Some(2), None).unwrap();
    assert_eq!(
        path.elements_frame_indices(),
        vec![vec![Some(-3), Some(2)], vec![Some(-3), Some(2)]]
    );

    let err = path.set_state(states[..1].to_vec(), Some(4), None).unwrap_err();
    assert!(err.is_frame_error());

    let wrong_kind = vec![states[0].clone(), states[0].clone()];
    let err = path.set_state(wrong_kind, Some(4), None).unwrap_err();
    assert!(err.is_schema_error());
    assert_eq!(
        path.elements_frame_indices(),
        vec![vec![Some(-3), Some(2)], vec![Some(-3), Some(2)]]
    );
}

#[test]
fn test_path_set_frame_index() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
    path.set_frame_indices(&PathFrameSpec::Uniform(FrameIndexSpec::Frames(vec![0])))
        .unwrap();

    assert_eq!(path.set_frame_index(0, Some(3), false, None).unwrap(), vec![true, true]);
    assert_eq!(path.elements_frame_indices(), vec![vec![Some(3)], vec![Some(3)]]);
    assert_eq!(path.set_frame_index(5, Some(1), false, None).unwrap(), vec![false, false]);

    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
    path.set_frame_indices(&PathFrameSpec::PerElement(vec![
        FrameIndexSpec::Frames(vec![0, 1]),
        FrameIndexSpec::Frames(vec![0]),
    ]))
    .unwrap();
    assert!(path.set_frame_index(1, Some(0), false, None).is_err());
    assert_eq!(
        path.elements_frame_indices(),
        vec![vec![Some(0), Some(1)], vec![Some(0)]]
    );

    assert_eq!(
        path.set_frame_index(0, Some(i32::MIN), true, None).unwrap(),
        vec![true, true]
    );
    assert_eq!(
        path.elements_frame_indices(),
        vec![vec![Some(i32::MIN)], vec![Some(i32::MIN)]]
    );
}

#[test]
fn test_path_propagate_state() {
    let mut path = Path::from_points(&pts(&[(0.0, 0.0), (4.0, 0.0)]));
    path.set_frame_indices(&PathFrameSpec::PerElement(vec![
        FrameIndexSpec::Frames(vec![0]),
        FrameIndexSpec::Frames(vec![1]),
    ]))
    .unwrap();

    path.propagate_state(Some(0), &[2, 3], None).unwrap();
    assert_eq!(
        path.elements_frame_indices(),
        vec![vec![Some(0), Some(2), Some(3)], vec![Some(1)]]
    );
    assert_eq!(
        path.get(0).unwrap().get_state(Some(3), false),
        path.get(0).unwrap().get_state(Some(0), false).map(|s| s.with_frame(Some(3))).as_ref()
    );

    assert!(path.propagate_state(Some(0), &[-1], None).is_err());
    assert_eq!(
        path.elements_frame_indices(),
        vec![vec![Some(0), Some(2), Some(3)], vec![Some(1)]]
    );
}
