#![forbid(unsafe_code)]

//! Cascading flyouts public facade.
//!
//! Re-exports the types most hosts need from the internal crates and offers a
//! prelude. A host implements [`FlyoutHost`] (geometry, element tree, focus,
//! overlay rendering) and drives a single [`FlyoutManager`] from its event
//! loop:
//!
//! ```rust,ignore
//! use flyout::prelude::*;
//!
//! let mut flyouts = FlyoutManager::new();
//! let menu = flyouts.create(menu_element, FlyoutConfig::menu())?;
//! flyouts.show(&mut host, menu, ShowOptions::new().anchor(button))?;
//! // each turn:
//! flyouts.run_deferred(&mut host, Instant::now());
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use flyout_core::{
    AnchorRef, ElementId, FlyoutBox, FocusChange, FocusStyle, GeometryProvider, HasElement,
    Instant, KeyCode, KeyInput, Modifiers, Point, PointerEvent, Rect, Viewport,
};

// --- Layout re-exports -----------------------------------------------------

pub use flyout_layout::{
    Alignment, HorizontalEdge, PlacementError, PlacementInput, PlacementMode, PlacementOutcome,
    ResolvedPosition, VerticalEdge, check_keyboard_fit, place,
};

// --- Widget re-exports -----------------------------------------------------

pub use flyout_widgets::{
    CascadeStack, ConfigError, ElementTree, FlyoutCommand, FlyoutConfig, FlyoutError, FlyoutHost,
    FlyoutId, FlyoutInstance, FlyoutManager, FocusHost, LifecycleEvent, OverlayHost,
    PendingAction, ShowOptions, ShowRecipe, Transition, TransitionStart, Visibility,
};

#[cfg(feature = "tracing-json")]
pub use flyout_core::logging::init_json;

// --- Errors ---------------------------------------------------------------

/// Top-level error for flyout hosts.
#[derive(Debug)]
pub enum Error {
    /// Show, hide, or property assignment failed.
    Flyout(FlyoutError),
    /// Configuration could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flyout(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Flyout(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<FlyoutError> for Error {
    fn from(err: FlyoutError) -> Self {
        Self::Flyout(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for flyout hosts.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Alignment, AnchorRef, ElementId, Error, FlyoutConfig, FlyoutHost, FlyoutId,
        FlyoutManager, Instant, KeyCode, KeyInput, Modifiers, PlacementMode, Point, Rect, Result,
        ShowOptions, Viewport,
    };

    pub use crate::{core, layout, widgets};
}

pub use flyout_core as core;
pub use flyout_layout as layout;
pub use flyout_widgets as widgets;
