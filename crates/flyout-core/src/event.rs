#![forbid(unsafe_code)]

//! Input and focus event types routed into the flyout system.

use bitflags::bitflags;

use crate::element::ElementId;

/// Keys the flyout system reacts to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Space bar.
    Space,
    /// Tab key (Shift+Tab is `Tab` with [`Modifiers::SHIFT`]).
    Tab,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// The Alt key pressed on its own (menu access key).
    Alt,
    /// Function key by number (F1..F24).
    F(u8),
    /// Any other key.
    Other,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A key-down event targeted at an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// Element that had focus when the key was pressed.
    pub target: ElementId,
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub const fn new(target: ElementId, code: KeyCode) -> Self {
        Self {
            target,
            code,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Shift held with no other modifier.
    pub fn is_shift_only(&self) -> bool {
        self.modifiers == Modifiers::SHIFT
    }
}

/// How focus should be presented when moved programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusStyle {
    /// Show a focus indicator (keyboard-driven focus).
    Visible,
    /// Move focus without a visible focus indicator.
    #[default]
    Quiet,
}

/// Focus moved from one element to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// Element that lost focus.
    pub from: Option<ElementId>,
    /// Element that gained focus.
    pub to: Option<ElementId>,
}

impl FocusChange {
    pub const fn new(from: Option<ElementId>, to: Option<ElementId>) -> Self {
        Self { from, to }
    }
}
