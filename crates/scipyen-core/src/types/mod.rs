//! Common type aliases used across the planar-graphics crates.

pub mod aliases;

pub use aliases::{shared, Shared, WeakShared};
