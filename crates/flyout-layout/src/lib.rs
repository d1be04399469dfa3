#![forbid(unsafe_code)]

//! Placement engine for anchored flyouts.
//!
//! - [`placement`]: strategy selection and fallback ([`place`]).
//! - [`keyboard`]: re-fitting a placement when an on-screen keyboard changes
//!   the visible area ([`check_keyboard_fit`]), and mapping placements onto
//!   edge offsets ([`ResolvedPosition`]).
//!
//! Everything here is a pure function of its inputs; hosts supply geometry
//! through [`flyout_core::GeometryProvider`].

pub mod keyboard;
pub mod placement;

pub use keyboard::{ResolvedPosition, check_keyboard_fit};
pub use placement::{
    Alignment, AnimationOffset, DEFAULT_POPUP_OFFSET, HorizontalEdge, ParseModeError,
    PlacementError, PlacementInput, PlacementMode, PlacementOutcome, Side, VerticalEdge, place,
};
