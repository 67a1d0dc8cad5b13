//! Planar graphics objects: a shape plus its links and frontends.
//!
//! Links and frontends are non-owning. A link holds a weak reference to its
//! target and a mapping function; a frontend is any renderer implementing
//! [`Frontend`], held weakly and pruned once dropped.
//!
//! Link propagation is synchronous and recursive. A target that is already
//! borrowed (the caller itself, or an object further up a cycle) is skipped
//! with a warning instead of being re-entered.

use scipyen_core::{shared, LabelSettings, Result, SchemaError, Shared, WeakShared};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::kind::ShapeKind;
use crate::shape::{PlanarShape, Shape};

/// Renderer-side view of a planar graphics object.
pub trait Frontend {
    fn name(&self) -> String;
    fn set_name(&mut self, name: &str);
    fn current_frame(&self) -> i32;
    fn set_visible(&mut self, visible: bool);
    fn redraw(&mut self);
}

/// Maps a change of the link source onto the target.
pub type LinkMapping = Rc<dyn Fn(&PlanarGraphics, &mut PlanarGraphics, &[f64])>;

#[derive(Clone)]
struct Link {
    target: WeakShared<PlanarGraphics>,
    mapping: LinkMapping,
    args: Vec<f64>,
}

pub struct PlanarGraphics {
    id: Uuid,
    shape: Shape,
    links: Vec<Link>,
    frontends: Vec<Weak<RefCell<dyn Frontend>>>,
}

impl fmt::Debug for PlanarGraphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanarGraphics")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .field("links", &self.links.len())
            .field("frontends", &self.frontends.len())
            .finish()
    }
}

impl PlanarGraphics {
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self::with_id(Uuid::new_v4(), shape)
    }

    pub fn with_id(id: Uuid, shape: impl Into<Shape>) -> Self {
        Self {
            id,
            shape: shape.into(),
            links: Vec::new(),
            frontends: Vec::new(),
        }
    }

    pub fn into_shared(self) -> Shared<Self> {
        shared(self)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Direct access to the shape. Edits made here do not notify links or
    /// frontends; call [`PlanarGraphics::notify`] afterwards.
    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.shape_kind()
    }

    pub fn is_cursor(&self) -> bool {
        self.shape.is_cursor()
    }

    pub fn name(&self) -> &str {
        self.shape.name()
    }

    pub fn current_frame(&self) -> i32 {
        self.shape.current_frame()
    }

    pub fn x(&self) -> Option<f64> {
        self.shape.x()
    }

    pub fn y(&self) -> Option<f64> {
        self.shape.y()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.shape.set_name(name.into());
        self.notify();
    }

    pub fn set_current_frame(&mut self, frame: i32) {
        self.shape.set_current_frame(frame);
        self.notify();
    }

    pub fn set_x(&mut self, value: f64) {
        self.shape.set_x(value);
        self.notify();
    }

    pub fn set_y(&mut self, value: f64) {
        self.shape.set_y(value);
        self.notify();
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.shape.translate(dx, dy);
        self.notify();
    }

    /// Propagate to linked objects, then refresh frontends.
    pub fn notify(&mut self) {
        self.update_linked_objects();
        self.update_frontends();
    }

    /// Name this object `<prefix><separator><n>` with the smallest free `n`.
    pub fn assign_default_name<'a>(
        &mut self,
        labels: &LabelSettings,
        existing: impl IntoIterator<Item = &'a str>,
    ) {
        let name = labels.next_name(self.kind().label_prefix(), existing);
        self.shape.set_name(name);
    }

    /// Independent copy with a fresh id. Links are shared by reference;
    /// frontends are not carried over.
    pub fn copy(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape: self.shape.clone(),
            links: self.links.clone(),
            frontends: Vec::new(),
        }
    }

    /// Register `target` to follow this object through `mapping`.
    ///
    /// Linking again to the same target replaces the mapping and arguments.
    pub fn link_to_object<F>(&mut self, target: &Shared<PlanarGraphics>, mapping: F, args: Vec<f64>) -> Result<()>
    where
        F: Fn(&PlanarGraphics, &mut PlanarGraphics, &[f64]) + 'static,
    {
        let target_kind = {
            let Ok(target_ref) = target.try_borrow() else {
                return Err(scipyen_core::Error::other(format!(
                    "Cannot link {} to an object that is in use",
                    self.name()
                )));
            };
            if target_ref.is_cursor() != self.is_cursor() {
                return Err(SchemaError::IncompatibleLink {
                    source_kind: self.kind().name().to_string(),
                    target_kind: target_ref.kind().name().to_string(),
                }
                .into());
            }
            target_ref.kind()
        };

        let link = Link {
            target: Rc::downgrade(target),
            mapping: Rc::new(mapping),
            args,
        };
        match self
            .links
            .iter_mut()
            .find(|l| Weak::ptr_eq(&l.target, &link.target))
        {
            Some(existing) => *existing = link,
            None => self.links.push(link),
        }
        debug!(source = %self.name(), target = %target_kind, "Linked planar graphics");
        Ok(())
    }

    /// Drop the link to `target`; returns whether one existed.
    pub fn unlink_object(&mut self, target: &Shared<PlanarGraphics>) -> bool {
        let weak = Rc::downgrade(target);
        let before = self.links.len();
        self.links.retain(|l| !Weak::ptr_eq(&l.target, &weak));
        self.links.len() != before
    }

    pub fn clear_links(&mut self) {
        self.links.clear();
    }

    /// Link targets that are still alive, in registration order.
    pub fn linked_objects(&self) -> Vec<Shared<PlanarGraphics>> {
        self.links.iter().filter_map(|l| l.target.upgrade()).collect()
    }

    pub fn is_linked_to(&self, target: &Shared<PlanarGraphics>) -> bool {
        let weak = Rc::downgrade(target);
        self.links.iter().any(|l| Weak::ptr_eq(&l.target, &weak))
    }

    /// Run every link mapping in registration order, recursing into each
    /// target's own links. Returns the number of targets updated.
    pub fn update_linked_objects(&self) -> usize {
        let mut updated = 0;
        for link in &self.links {
            let Some(target_ref) = link.target.upgrade() else {
                warn!(source = %self.name(), "Skipping dropped link target");
                continue;
            };
            let Ok(mut target) = target_ref.try_borrow_mut() else {
                warn!(source = %self.name(), "Skipping link target already being updated");
                continue;
            };
            (link.mapping)(self, &mut *target, &link.args);
            debug!(source = %self.name(), target = %target.name(), "Updated linked object");
            updated += 1;
            updated += target.update_linked_objects();
            target.update_frontends();
        }
        updated
    }

    /// Attach a renderer. Only a weak reference is kept.
    pub fn add_frontend<F: Frontend + 'static>(&mut self, frontend: &Rc<RefCell<F>>) {
        let frontend: Rc<RefCell<dyn Frontend>> = frontend.clone();
        self.frontends.push(Rc::downgrade(&frontend));
    }

    pub fn remove_frontend<F: Frontend + 'static>(&mut self, frontend: &Rc<RefCell<F>>) {
        let frontend: Rc<RefCell<dyn Frontend>> = frontend.clone();
        self.frontends
            .retain(|f| !std::ptr::addr_eq(f.as_ptr(), Rc::as_ptr(&frontend)));
    }

    /// Live frontends.
    pub fn frontends(&self) -> Vec<Rc<RefCell<dyn Frontend>>> {
        self.frontends.iter().filter_map(Weak::upgrade).collect()
    }

    /// Push name and visibility to one frontend and ask it to redraw.
    pub fn update_frontend(&self, frontend: &RefCell<dyn Frontend>) {
        let Ok(mut frontend) = frontend.try_borrow_mut() else {
            warn!(name = %self.name(), "Skipping frontend already in use");
            return;
        };
        let visible = self.shape.has_state_for_frame(frontend.current_frame());
        frontend.set_name(self.name());
        frontend.set_visible(visible);
        frontend.redraw();
    }

    /// Update every live frontend and forget dropped ones.
    pub fn update_frontends(&mut self) {
        self.frontends.retain(|f| f.strong_count() > 0);
        for frontend in self.frontends() {
            self.update_frontend(&frontend);
        }
    }
}

/// Mapping that moves the target to the source position plus the offsets
/// `args[0]` (x) and `args[1]` (y).
pub fn follow_position(source: &PlanarGraphics, target: &mut PlanarGraphics, args: &[f64]) {
    let dx = args.first().copied().unwrap_or(0.0);
    let dy = args.get(1).copied().unwrap_or(0.0);
    if let Some(x) = source.x() {
        target.shape.set_x(x + dx);
    }
    if let Some(y) = source.y() {
        target.shape.set_y(y + dy);
    }
}
