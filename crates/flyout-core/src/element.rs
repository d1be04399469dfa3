#![forbid(unsafe_code)]

//! Element identity and anchor references.

use std::fmt;

/// Opaque identity of a host element (a node in the host's element tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Anything that is backed by a host element (controls, widgets).
pub trait HasElement {
    fn element(&self) -> ElementId;
}

impl HasElement for ElementId {
    fn element(&self) -> ElementId {
        *self
    }
}

/// An unresolved reference to an anchor element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnchorRef {
    /// A concrete element.
    Element(ElementId),
    /// A string identifier resolved through the host's element registry.
    Id(String),
}

impl AnchorRef {
    /// Reference the element backing a control.
    pub fn of(control: &impl HasElement) -> Self {
        Self::Element(control.element())
    }
}

impl From<ElementId> for AnchorRef {
    fn from(element: ElementId) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for AnchorRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_owned())
    }
}

impl From<String> for AnchorRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}
