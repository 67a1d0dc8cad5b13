//! Type aliases for the single-threaded sharing used by the planar core.
//!
//! Planar graphics objects live on one thread (the widget thread that owns
//! all mutation). Objects that other objects refer to are held in
//! `Shared<T>`; non-owning relations such as links hold `WeakShared<T>`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scipyen_core::types::*;
//!
//! let cursor: Shared<PlanarGraphics> = shared(graphics);
//! let handle: WeakShared<PlanarGraphics> = Rc::downgrade(&cursor);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// A non-owning handle to a `Shared<T>`.
///
/// Upgrading fails once every owner has dropped the value.
pub type WeakShared<T> = Weak<RefCell<T>>;

/// Wrap a value in `Shared<T>`.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
