use scipyen_core::{shared, CursorDefaults, LabelSettings};
use scipyen_planar::{follow_position, CursorKind, Frontend, PlanarGraphics, PlanarShape, Primitive};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct MockFrontend {
    name: String,
    frame: i32,
    visible: Option<bool>,
    redraws: usize,
}

impl Frontend for MockFrontend {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn current_frame(&self) -> i32 {
        self.frame
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = Some(visible);
    }

    fn redraw(&mut self) {
        self.redraws += 1;
    }
}

fn point(x: f64, y: f64) -> PlanarGraphics {
    PlanarGraphics::new(Primitive::point(x, y))
}

#[test]
fn test_linked_target_follows_source() {
    let source = point(0.0, 0.0).into_shared();
    let target = point(0.0, 0.0).into_shared();
    let calls = Rc::new(Cell::new(0));

    let counter = calls.clone();
    source
        .borrow_mut()
        .link_to_object(
            &target,
            move |src, dst, args| {
                counter.set(counter.get() + 1);
                follow_position(src, dst, args);
            },
            vec![2.0, 3.0],
        )
        .unwrap();

    source.borrow_mut().set_x(10.0);
    assert_eq!(calls.get(), 1);
    assert_eq!(target.borrow().x(), Some(12.0));
    assert_eq!(target.borrow().y(), Some(3.0));

    source.borrow_mut().translate(1.0, 1.0);
    assert_eq!(calls.get(), 2);
    assert_eq!(target.borrow().x(), Some(13.0));
    assert_eq!(target.borrow().y(), Some(4.0));
}

#[test]
fn test_relinking_replaces_mapping() {
    let source = point(0.0, 0.0).into_shared();
    let target = point(0.0, 0.0).into_shared();

    source
        .borrow_mut()
        .link_to_object(&target, follow_position, vec![1.0, 0.0])
        .unwrap();
    source
        .borrow_mut()
        .link_to_object(&target, follow_position, vec![5.0, 0.0])
        .unwrap();

    assert_eq!(source.borrow().linked_objects().len(), 1);
    assert_eq!(source.borrow().update_linked_objects(), 1);
    assert_eq!(target.borrow().x(), Some(5.0));
}

#[test]
fn test_cursor_cannot_link_to_shape() {
    let cursor = PlanarGraphics::new(Primitive::cursor(
        CursorKind::Vertical,
        0.0,
        0.0,
        &CursorDefaults::default(),
    ))
    .into_shared();
    let line = PlanarGraphics::new(Primitive::line(0.0, 0.0, 1.0, 1.0)).into_shared();

    let err = cursor
        .borrow_mut()
        .link_to_object(&line, follow_position, Vec::new())
        .unwrap_err();
    assert!(err.is_schema_error());
    assert!(!cursor.borrow().is_linked_to(&line));
}

#[test]
fn test_link_to_self_is_rejected() {
    let object = point(0.0, 0.0).into_shared();
    let result = object
        .borrow_mut()
        .link_to_object(&object, follow_position, Vec::new());
    assert!(result.is_err());
}

#[test]
fn test_link_cycle_is_skipped() {
    let a = point(0.0, 0.0).into_shared();
    let b = point(0.0, 0.0).into_shared();

    a.borrow_mut()
        .link_to_object(&b, follow_position, vec![1.0, 0.0])
        .unwrap();
    b.borrow_mut()
        .link_to_object(&a, follow_position, vec![1.0, 0.0])
        .unwrap();

    a.borrow_mut().set_x(5.0);
    assert_eq!(b.borrow().x(), Some(6.0));
    assert_eq!(a.borrow().x(), Some(5.0));

    // b's link back to a is skipped while a is borrowed
    assert_eq!(a.borrow().update_linked_objects(), 1);
}

#[test]
fn test_dropped_target_and_unlink() {
    let source = point(0.0, 0.0).into_shared();
    let kept = point(0.0, 0.0).into_shared();

    {
        let dropped = point(0.0, 0.0).into_shared();
        source
            .borrow_mut()
            .link_to_object(&dropped, follow_position, Vec::new())
            .unwrap();
    }
    source
        .borrow_mut()
        .link_to_object(&kept, follow_position, Vec::new())
        .unwrap();

    assert_eq!(source.borrow().linked_objects().len(), 1);
    assert_eq!(source.borrow().update_linked_objects(), 1);

    assert!(source.borrow_mut().unlink_object(&kept));
    assert!(!source.borrow_mut().unlink_object(&kept));
    assert_eq!(source.borrow().update_linked_objects(), 0);

    source.borrow_mut().clear_links();
    assert!(source.borrow().linked_objects().is_empty());
}

#[test]
fn test_frontend_receives_name_and_visibility() {
    let primitive = Primitive::point(1.0, 2.0).with_frame_indices(&[0]).unwrap();
    let mut object = PlanarGraphics::new(primitive);

    let shown = Rc::new(RefCell::new(MockFrontend::default()));
    let hidden = Rc::new(RefCell::new(MockFrontend {
        frame: 3,
        ..Default::default()
    }));
    object.add_frontend(&shown);
    object.add_frontend(&hidden);

    object.set_name("marker");
    assert_eq!(shown.borrow().name, "marker");
    assert_eq!(shown.borrow().visible, Some(true));
    assert_eq!(shown.borrow().redraws, 1);
    assert_eq!(hidden.borrow().visible, Some(false));

    object.remove_frontend(&hidden);
    object.translate(1.0, 0.0);
    assert_eq!(shown.borrow().redraws, 2);
    assert_eq!(hidden.borrow().redraws, 1);
}

#[test]
fn test_dropped_frontend_is_pruned() {
    let mut object = point(0.0, 0.0);
    let frontend = Rc::new(RefCell::new(MockFrontend::default()));
    object.add_frontend(&frontend);
    assert_eq!(object.frontends().len(), 1);

    drop(frontend);
    object.update_frontends();
    assert!(object.frontends().is_empty());
}

#[test]
fn test_linked_target_frontend_is_redrawn() {
    let source = point(0.0, 0.0).into_shared();
    let target = point(0.0, 0.0).into_shared();
    let frontend = Rc::new(RefCell::new(MockFrontend::default()));
    target.borrow_mut().add_frontend(&frontend);

    source
        .borrow_mut()
        .link_to_object(&target, follow_position, Vec::new())
        .unwrap();
    source.borrow_mut().set_y(4.0);
    assert_eq!(frontend.borrow().redraws, 1);
}

#[test]
fn test_assign_default_name() {
    let labels = LabelSettings::default();
    let mut first = PlanarGraphics::new(Primitive::line(0.0, 0.0, 1.0, 1.0));
    let mut second = PlanarGraphics::new(Primitive::line(0.0, 0.0, 2.0, 2.0));

    first.assign_default_name(&labels, Vec::<&str>::new());
    assert_eq!(first.name(), "ln0");

    let taken = vec![first.name().to_string()];
    second.assign_default_name(&labels, taken.iter().map(String::as_str));
    assert_eq!(second.name(), "ln1");
}

#[test]
fn test_copy_shares_links_but_not_frontends() {
    let mut source = point(1.0, 1.0);
    let target = shared(point(0.0, 0.0));
    let frontend = Rc::new(RefCell::new(MockFrontend::default()));

    source
        .link_to_object(&target, follow_position, Vec::new())
        .unwrap();
    source.add_frontend(&frontend);

    let copy = source.copy();
    assert_ne!(copy.id(), source.id());
    assert_eq!(copy.shape(), source.shape());
    assert!(copy.is_linked_to(&target));
    assert!(copy.frontends().is_empty());
    assert_eq!(copy.shape().curve_length(), 0.0);
}
