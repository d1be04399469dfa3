#![forbid(unsafe_code)]

//! Error taxonomy for flyout orchestration.
//!
//! - Configuration errors (`InvalidPlacement`, `InvalidAlignment`) are raised
//!   at assignment or show time; rejected assignments leave the prior value.
//! - `MissingAnchor` is raised before any state changes.
//! - `Reentrancy` marks a broken internal invariant (the cascade was mutated
//!   while locked). It is logged at error level and returned, never retried.
//!
//! Transient contention (a transition in flight, the cascade mid-collapse) is
//! not an error: the request is deferred instead.

use std::fmt;

use flyout_layout::{ParseModeError, PlacementError};

use crate::cascade::FlyoutId;

/// Invariant violations detected on the cascade stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeViolation {
    /// Append of an instance that is already in the cascade.
    AlreadyInCascade(FlyoutId),
    /// Append attempted while a collapse holds the lock.
    AppendWhileLocked(FlyoutId),
}

impl fmt::Display for CascadeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInCascade(id) => write!(f, "flyout {id} is already in the cascade"),
            Self::AppendWhileLocked(id) => {
                write!(f, "flyout {id} appended while the cascade is locked")
            }
        }
    }
}

impl std::error::Error for CascadeViolation {}

/// Errors reported by [`FlyoutManager`](crate::flyout::FlyoutManager).
#[derive(Debug, Clone, PartialEq)]
pub enum FlyoutError {
    /// Unsupported placement value.
    InvalidPlacement(String),
    /// Unsupported alignment value.
    InvalidAlignment(String),
    /// Show requested without a resolvable anchor or coordinates.
    MissingAnchor,
    /// The id does not name a live flyout.
    UnknownFlyout(FlyoutId),
    /// Internal cascade invariant violated.
    Reentrancy(CascadeViolation),
    /// Placement engine rejected the request.
    Placement(PlacementError),
    /// Defaults passed to `create` failed validation.
    InvalidConfig(Vec<String>),
}

impl fmt::Display for FlyoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlacement(value) => write!(
                f,
                "invalid flyout placement {value:?}: expected top, bottom, left, right, auto, autohorizontal, or autovertical"
            ),
            Self::InvalidAlignment(value) => write!(
                f,
                "invalid flyout alignment {value:?}: expected center, left, or right"
            ),
            Self::MissingAnchor => write!(f, "flyout anchor element not found"),
            Self::UnknownFlyout(id) => write!(f, "unknown flyout {id}"),
            Self::Reentrancy(violation) => write!(f, "cascade reentrancy hazard: {violation}"),
            Self::Placement(err) => write!(f, "placement failed: {err}"),
            Self::InvalidConfig(errors) => {
                write!(f, "invalid flyout config: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for FlyoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reentrancy(violation) => Some(violation),
            Self::Placement(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseModeError> for FlyoutError {
    fn from(err: ParseModeError) -> Self {
        match err {
            ParseModeError::Placement(value) => Self::InvalidPlacement(value),
            ParseModeError::Alignment(value) => Self::InvalidAlignment(value),
        }
    }
}

impl From<PlacementError> for FlyoutError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::UnsupportedAlignment { .. } => Self::InvalidAlignment("none".into()),
            other => Self::Placement(other),
        }
    }
}

impl From<CascadeViolation> for FlyoutError {
    fn from(violation: CascadeViolation) -> Self {
        Self::Reentrancy(violation)
    }
}
