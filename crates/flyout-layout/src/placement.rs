#![forbid(unsafe_code)]

//! Anchor-relative flyout placement with fallback between strategies.
//!
//! [`place`] takes an anchor rectangle, the flyout's measured box, a requested
//! [`PlacementMode`] and [`Alignment`], and the current [`Viewport`], and
//! returns a [`PlacementOutcome`]: where the flyout's vertical and horizontal
//! edges go, and whether its height must be clamped with internal scrolling.
//!
//! # Strategies
//!
//! - `Top` / `Bottom`: try the named side. On failure pin to the near edge of
//!   the visible area and clamp height to the space between anchor and edge.
//! - `Left` / `Right`: try the named side. On failure pin to the near viewport
//!   edge. Width is never resized.
//! - `AutoVertical`: top, then bottom, then whichever of the two has more room
//!   (ties favor top), clamped.
//! - `AutoHorizontal`: left, then right, then x = 0.
//! - `Auto`: if the flyout would fit above the anchor were the anchor centered
//!   vertically, behave as `AutoVertical`. Otherwise try left then right, and
//!   fall back to the clamped vertical placement.
//! - `Cartesian`: the literal point, no fitting and no alignment.
//!
//! Vertical placements are then aligned horizontally per [`Alignment`];
//! horizontal placements are centered vertically on the anchor. Overflowing
//! the far edge flips to the trailing-edge marker
//! ([`VerticalEdge::PinnedBottom`] / [`HorizontalEdge::PinnedRight`]) instead
//! of clamping the position.
//!
//! # Invariants
//!
//! 1. `needs_scroll` implies `adjusted_height >= 0`.
//! 2. Without scrolling, `adjusted_height` is the flyout's content height.
//! 3. Horizontal positions are never negative.

use std::fmt;
use std::str::FromStr;

use flyout_core::geometry::{Point, Rect};
use flyout_core::viewport::{FlyoutBox, Viewport};
use serde::{Deserialize, Serialize};

/// Distance, in pixels, a popup travels during its show transition.
pub const DEFAULT_POPUP_OFFSET: f64 = 50.0;

/// Requested placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    Top,
    Bottom,
    Left,
    Right,
    #[default]
    Auto,
    #[serde(rename = "autohorizontal")]
    AutoHorizontal,
    #[serde(rename = "autovertical")]
    AutoVertical,
    /// Literal point placement; only produced by point-based shows.
    Cartesian,
}

impl PlacementMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Auto => "auto",
            Self::AutoHorizontal => "autohorizontal",
            Self::AutoVertical => "autovertical",
            Self::Cartesian => "cartesian",
        }
    }

    /// Whether callers may assign this mode as a flyout's default placement.
    pub const fn is_assignable(self) -> bool {
        !matches!(self, Self::Cartesian)
    }
}

impl fmt::Display for PlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlacementMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "auto" => Ok(Self::Auto),
            "autohorizontal" => Ok(Self::AutoHorizontal),
            "autovertical" => Ok(Self::AutoVertical),
            "cartesian" => Ok(Self::Cartesian),
            other => Err(ParseModeError::Placement(other.to_owned())),
        }
    }
}

/// Horizontal alignment of a vertically placed flyout against its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
    /// No alignment; only produced by point-based shows.
    None,
}

impl Alignment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        }
    }

    /// Whether callers may assign this alignment as a flyout's default.
    pub const fn is_assignable(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Self::Center),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "none" => Ok(Self::None),
            other => Err(ParseModeError::Alignment(other.to_owned())),
        }
    }
}

/// Unrecognized placement or alignment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseModeError {
    Placement(String),
    Alignment(String),
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placement(value) => write!(f, "unknown flyout placement {value:?}"),
            Self::Alignment(value) => write!(f, "unknown flyout alignment {value:?}"),
        }
    }
}

impl std::error::Error for ParseModeError {}

/// Errors the placement engine reports instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// An anchored placement needed an alignment but got `Alignment::None`.
    UnsupportedAlignment { mode: PlacementMode },
    /// `Cartesian` placement requested without a point.
    MissingPoint,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedAlignment { mode } => {
                write!(f, "placement {mode} requires center, left, or right alignment")
            }
            Self::MissingPoint => write!(f, "cartesian placement requires a point"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Side of the anchor a flyout was placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Where the flyout's top edge goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalEdge {
    /// Absolute top offset.
    Top(f64),
    /// Attach the flyout's bottom to the bottom of the visible area.
    PinnedBottom,
}

impl VerticalEdge {
    pub fn top(self) -> Option<f64> {
        match self {
            Self::Top(top) => Some(top),
            Self::PinnedBottom => None,
        }
    }
}

/// Where the flyout's left edge goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalEdge {
    /// Absolute left offset.
    Left(f64),
    /// Attach the flyout's right edge to the trailing edge of the viewport.
    PinnedRight,
}

impl HorizontalEdge {
    pub fn left(self) -> Option<f64> {
        match self {
            Self::Left(left) => Some(left),
            Self::PinnedRight => None,
        }
    }
}

/// Start offset of the show transition, relative to the final position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationOffset {
    pub top: f64,
    pub left: f64,
    /// Side the flyout was placed on; selects the entrance keyframe.
    pub keyframe: Side,
}

impl AnimationOffset {
    /// Offset that slides a flyout in from its anchor when placed on `side`.
    pub fn from_side(side: Side, distance: f64) -> Self {
        let (top, left) = match side {
            Side::Top => (distance, 0.0),
            Side::Bottom => (-distance, 0.0),
            Side::Left => (0.0, distance),
            Side::Right => (0.0, -distance),
        };
        Self {
            top,
            left,
            keyframe: side,
        }
    }
}

/// Everything the engine needs for one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    /// Anchor bounding rectangle.
    pub anchor: Rect,
    /// Literal point, required for `Cartesian`.
    pub point: Option<Point>,
    /// Measured flyout box.
    pub flyout: FlyoutBox,
    pub mode: PlacementMode,
    pub alignment: Alignment,
    /// Transition travel distance.
    pub popup_offset: f64,
}

impl PlacementInput {
    /// Anchored placement input with the default popup offset.
    pub fn anchored(
        anchor: Rect,
        flyout: FlyoutBox,
        mode: PlacementMode,
        alignment: Alignment,
    ) -> Self {
        Self {
            anchor,
            point: None,
            flyout,
            mode,
            alignment,
            popup_offset: DEFAULT_POPUP_OFFSET,
        }
    }

    /// Point placement input.
    pub fn at_point(point: Point, flyout: FlyoutBox) -> Self {
        Self {
            anchor: Rect::default(),
            point: Some(point),
            flyout,
            mode: PlacementMode::Cartesian,
            alignment: Alignment::None,
            popup_offset: DEFAULT_POPUP_OFFSET,
        }
    }
}

/// Result of a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOutcome {
    pub vertical: VerticalEdge,
    pub horizontal: HorizontalEdge,
    /// Height must be clamped to `adjusted_height` with internal scrolling.
    pub needs_scroll: bool,
    /// Content height: clamped when `needs_scroll`, natural otherwise.
    pub adjusted_height: f64,
    /// Vertical margin + border + padding of the flyout box.
    pub margin_border_padding: f64,
    /// Entrance transition offset (from the last side attempted).
    pub animation: AnimationOffset,
}

impl PlacementOutcome {
    /// Clamped content height, when clamping is required.
    pub fn clamped_height(&self) -> Option<f64> {
        self.needs_scroll.then_some(self.adjusted_height)
    }

    /// Margin-box height after clamping.
    pub fn margin_box_height(&self) -> f64 {
        self.adjusted_height + self.margin_border_padding
    }
}

/// Compute a placement.
pub fn place(input: &PlacementInput, viewport: &Viewport) -> Result<PlacementOutcome, PlacementError> {
    let mut fit = Fitter::new(input, viewport);

    match input.mode {
        PlacementMode::Top => {
            if !fit.fit_top() {
                fit.vertical = VerticalEdge::Top(viewport.visible_doc_top);
                fit.clamp_to(fit.space_above());
            }
            fit.align_horizontally()?;
        }
        PlacementMode::Bottom => {
            if !fit.fit_bottom() {
                fit.vertical = VerticalEdge::PinnedBottom;
                fit.clamp_to(fit.space_below());
            }
            fit.align_horizontally()?;
        }
        PlacementMode::Left => {
            if !fit.fit_left() {
                fit.horizontal = HorizontalEdge::Left(0.0);
            }
            fit.center_vertically();
        }
        PlacementMode::Right => {
            if !fit.fit_right() {
                fit.horizontal = HorizontalEdge::PinnedRight;
            }
            fit.center_vertically();
        }
        PlacementMode::AutoVertical => {
            fit.vertical_with_fallback();
            fit.align_horizontally()?;
        }
        PlacementMode::AutoHorizontal => {
            if !fit.fit_left() && !fit.fit_right() {
                fit.horizontal = HorizontalEdge::Left(0.0);
            }
            fit.center_vertically();
        }
        PlacementMode::Auto => {
            if fit.sometimes_fits_above() {
                fit.vertical_with_fallback();
                fit.align_horizontally()?;
            } else if fit.fit_left() || fit.fit_right() {
                fit.center_vertically();
            } else {
                fit.vertical_with_scroll();
                fit.align_horizontally()?;
            }
        }
        PlacementMode::Cartesian => {
            let point = input.point.ok_or(PlacementError::MissingPoint)?;
            fit.vertical = VerticalEdge::Top(point.y);
            fit.horizontal = HorizontalEdge::Left(point.x);
        }
    }

    Ok(fit.finish())
}

/// Working state for a single placement pass.
struct Fitter<'a> {
    input: &'a PlacementInput,
    viewport: &'a Viewport,
    vertical: VerticalEdge,
    horizontal: HorizontalEdge,
    needs_scroll: bool,
    adjusted_height: f64,
    last_side: Side,
}

impl<'a> Fitter<'a> {
    fn new(input: &'a PlacementInput, viewport: &'a Viewport) -> Self {
        Self {
            input,
            viewport,
            vertical: VerticalEdge::Top(0.0),
            horizontal: HorizontalEdge::Left(0.0),
            needs_scroll: false,
            adjusted_height: input.flyout.inner_height,
            last_side: Side::Top,
        }
    }

    fn finish(self) -> PlacementOutcome {
        PlacementOutcome {
            vertical: self.vertical,
            horizontal: self.horizontal,
            needs_scroll: self.needs_scroll,
            adjusted_height: self.adjusted_height,
            margin_border_padding: self.input.flyout.margin_border_padding(),
            animation: AnimationOffset::from_side(self.last_side, self.input.popup_offset),
        }
    }

    fn height(&self) -> f64 {
        self.input.flyout.outer_size().height
    }

    fn width(&self) -> f64 {
        self.input.flyout.outer_size().width
    }

    /// Content height available above the anchor.
    fn space_above(&self) -> f64 {
        self.input.anchor.top() - self.viewport.visible_doc_top - self.input.flyout.margin_border_padding()
    }

    /// Content height available below the anchor.
    fn space_below(&self) -> f64 {
        self.viewport.visible_doc_height
            - (self.input.anchor.bottom() - self.viewport.visible_doc_top)
            - self.input.flyout.margin_border_padding()
    }

    fn clamp_to(&mut self, height: f64) {
        self.needs_scroll = true;
        self.adjusted_height = height.max(0.0);
    }

    fn fits_vertically(&self, top: f64) -> bool {
        top >= self.viewport.visible_doc_top
            && top + self.height() <= self.viewport.visible_doc_bottom()
    }

    fn fits_horizontally(&self, left: f64) -> bool {
        left >= 0.0 && left + self.width() <= self.viewport.visual_width
    }

    fn fit_top(&mut self) -> bool {
        let top = self.input.anchor.top() - self.height();
        self.vertical = VerticalEdge::Top(top);
        self.last_side = Side::Top;
        self.fits_vertically(top)
    }

    fn fit_bottom(&mut self) -> bool {
        let top = self.input.anchor.bottom();
        self.vertical = VerticalEdge::Top(top);
        self.last_side = Side::Bottom;
        self.fits_vertically(top)
    }

    fn fit_left(&mut self) -> bool {
        let left = self.input.anchor.left() - self.width();
        self.horizontal = HorizontalEdge::Left(left.max(0.0));
        self.last_side = Side::Left;
        self.fits_horizontally(left)
    }

    fn fit_right(&mut self) -> bool {
        let left = self.input.anchor.right();
        self.horizontal = HorizontalEdge::Left(left.max(0.0));
        self.last_side = Side::Right;
        self.fits_horizontally(left)
    }

    /// Space above the anchor versus below it; ties favor the top.
    fn top_has_more_room(&self) -> bool {
        let above = self.input.anchor.top() - self.viewport.visible_doc_top;
        let below = self.viewport.visible_doc_bottom() - self.input.anchor.bottom();
        above >= below
    }

    /// Would the flyout fit above the anchor if the anchor sat in the
    /// vertical center of the visible area?
    fn sometimes_fits_above(&self) -> bool {
        (self.viewport.visible_doc_height - self.input.anchor.height) / 2.0 >= self.height()
    }

    fn vertical_with_scroll(&mut self) {
        if self.top_has_more_room() {
            self.vertical = VerticalEdge::Top(self.viewport.visible_doc_top);
            self.clamp_to(self.space_above());
        } else {
            self.vertical = VerticalEdge::PinnedBottom;
            self.clamp_to(self.space_below());
        }
    }

    fn vertical_with_fallback(&mut self) {
        if !self.fit_top() && !self.fit_bottom() {
            self.vertical_with_scroll();
        }
    }

    fn center_vertically(&mut self) {
        let anchor = self.input.anchor;
        let top = anchor.top() + anchor.height / 2.0 - self.height() / 2.0;
        self.vertical = if top < self.viewport.visible_doc_top {
            VerticalEdge::Top(self.viewport.visible_doc_top)
        } else if top + self.height() >= self.viewport.visible_doc_bottom() {
            VerticalEdge::PinnedBottom
        } else {
            VerticalEdge::Top(top)
        };
    }

    fn align_horizontally(&mut self) -> Result<(), PlacementError> {
        let anchor = self.input.anchor;
        let left = match self.input.alignment {
            Alignment::Center => anchor.left() + anchor.width / 2.0 - self.width() / 2.0,
            Alignment::Left => anchor.left(),
            Alignment::Right => anchor.right() - self.width(),
            Alignment::None => {
                return Err(PlacementError::UnsupportedAlignment {
                    mode: self.input.mode,
                });
            }
        };
        self.horizontal = if left < 0.0 {
            HorizontalEdge::Left(0.0)
        } else if left + self.width() >= self.viewport.visual_width {
            HorizontalEdge::PinnedRight
        } else {
            HorizontalEdge::Left(left)
        };
        Ok(())
    }
}
