#![forbid(unsafe_code)]

//! Core: geometry, viewport, element identity, and input primitives.
//!
//! # Role in the flyout stack
//! `flyout-core` is the leaf layer. It owns the value types every other crate
//! speaks in (rectangles, the keyboard-aware [`viewport::Viewport`], element
//! ids, key and focus events) and the read-only
//! [`viewport::GeometryProvider`] the placement code consumes.
//!
//! Nothing here holds flyout state; `flyout-layout` computes placements and
//! `flyout-widgets` orchestrates the cascade on top of these types.

pub mod element;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod viewport;

pub use element::{AnchorRef, ElementId, HasElement};
pub use event::{FocusChange, FocusStyle, KeyCode, KeyInput, Modifiers};
pub use geometry::{Point, PointerEvent, Rect, Size};
pub use viewport::{FlyoutBox, GeometryProvider, Viewport};

/// Monotonic clock used for deferred work.
pub use web_time::Instant;
