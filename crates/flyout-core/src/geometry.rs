#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are CSS pixels in client coordinates (origin at the top-left of
//! the layout viewport). Unlike terminal cells these are fractional and may be
//! negative when an element scrolls partially off screen.

/// An axis-aligned rectangle, as reported by a bounding-box query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its four edges, the shape a client-rect query
    /// returns.
    #[inline]
    pub fn from_edges(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal midpoint.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical midpoint.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Pointer or mouse input carrying both client and generic coordinates.
///
/// Converting to a [`Point`] prefers the client coordinates and falls back to
/// the generic ones when a client coordinate is zero (i.e. unset).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub client_x: f64,
    pub client_y: f64,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    /// A pointer event that only reports client coordinates.
    pub const fn at_client(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl From<PointerEvent> for Point {
    fn from(event: PointerEvent) -> Self {
        let pick = |client: f64, generic: f64| if client != 0.0 { client } else { generic };
        Point::new(pick(event.client_x, event.x), pick(event.client_y, event.y))
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_roundtrip() {
        let r = Rect::from_edges(10.0, 50.0, 30.0, 20.0);
        assert_eq!(r, Rect::new(20.0, 10.0, 30.0, 20.0));
        assert_eq!(r.top(), 10.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 30.0);
        assert_eq!(r.left(), 20.0);
    }

    #[test]
    fn centers() {
        let r = Rect::new(10.0, 20.0, 40.0, 10.0);
        assert_eq!(r.center_x(), 30.0);
        assert_eq!(r.center_y(), 25.0);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.5, 9.5)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn empty_rect() {
        assert!(Rect::default().is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn pointer_prefers_client_coordinates() {
        let ev = PointerEvent {
            client_x: 12.0,
            client_y: 34.0,
            x: 1.0,
            y: 2.0,
        };
        assert_eq!(Point::from(ev), Point::new(12.0, 34.0));
    }

    #[test]
    fn pointer_falls_back_on_zero_client() {
        let ev = PointerEvent {
            client_x: 0.0,
            client_y: 34.0,
            x: 7.0,
            y: 2.0,
        };
        assert_eq!(Point::from(ev), Point::new(7.0, 34.0));
    }
}
