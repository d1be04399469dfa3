#![forbid(unsafe_code)]

//! Cascading flyouts: the cascade stack and the controller that shows, hides,
//! and reflows flyouts against a host.
//!
//! - [`cascade`]: ordered open flyouts with a collapse reentrancy guard.
//! - [`flyout`]: [`FlyoutManager`], the per-runtime owner of all flyouts.
//! - [`host`]: traits a host implements to back flyouts with real elements.
//! - [`config`]: per-flyout defaults, loadable from TOML/JSON with the
//!   `config` feature.

pub mod cascade;
pub mod config;
pub mod error;
pub mod flyout;
pub mod host;

pub use cascade::{CascadeStack, FlyoutId};
pub use config::{ConfigError, FlyoutConfig};
pub use error::{CascadeViolation, FlyoutError};
pub use flyout::{
    FlyoutInstance, FlyoutManager, PendingAction, ShowOptions, ShowRecipe, Visibility,
};
pub use host::{
    ElementTree, FlyoutCommand, FlyoutHost, FocusHost, LifecycleEvent, OverlayHost, Transition,
    TransitionStart,
};
