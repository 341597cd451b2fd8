//! Geometric primitives for scene description and rendering.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned box defined by minimum and maximum coordinates
//! - [`Viewport`] - Maps scene data units onto SVG user space
//!
//! # Coordinate Systems
//!
//! Scenes are described in **data units** with a plotting convention: the
//! origin is the bottom-left corner of the canvas and Y grows upward.
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! SVG output uses **points** with the origin at the top-left corner and Y
//! growing downward. [`Viewport`] converts between the two; one data unit is
//! [`Viewport::points_per_unit`] points.

/// A 2D point.
///
/// ```
/// # use labdraw_core::geometry::Point;
/// let a = Point::new(4.2, 8.5);
/// let b = Point::new(8.8, 8.5);
///
/// let mid = a.midpoint(b);
/// assert!((mid.x() - 6.5).abs() < 1e-6);
/// assert_eq!(mid.y(), 8.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the Euclidean length of the point as a vector
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns true if both coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rotates the point around the origin by `degrees`, counter-clockwise in a Y-up frame.
    pub fn rotate(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x.mul_add(cos, -self.y * sin),
            y: self.x.mul_add(sin, self.y * cos),
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if both dimensions are finite numbers
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Bounds are frame-agnostic: in data space `min_y` is the bottom edge, in
/// SVG space it is the top edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from explicit edges. Edges are reordered if needed.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Creates bounds from the minimum corner and a size
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Creates bounds from a center point and a size
    pub fn from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self::new(
            center.x - half_width,
            center.y - half_height,
            center.x + half_width,
            center.y + half_height,
        )
    }

    /// Smallest bounds containing every point, or `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let seed = Self::new(first.x, first.y, first.x, first.y);
        Some(points.fold(seed, |acc, p| {
            acc.merge(&Self::new(p.x, p.y, p.x, p.y))
        }))
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the four corners, starting at the minimum corner.
    pub fn corners(self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Merges two bounds into the smallest bounds containing both.
    ///
    /// ```
    /// # use labdraw_core::geometry::{Bounds, Point, Size};
    /// let banner = Bounds::from_origin(Point::new(1.0, 14.5), Size::new(22.0, 1.2));
    /// let zone = Bounds::from_origin(Point::new(1.0, 12.5), Size::new(22.0, 1.5));
    ///
    /// let combined = banner.merge(&zone);
    /// assert_eq!(combined.min_y(), 12.5);
    /// assert!((combined.max_y() - 15.7).abs() < 1e-5);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `amount` on every side.
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Returns true if `other` lies entirely inside these bounds.
    ///
    /// A small tolerance absorbs float rounding of hand-written coordinates.
    pub fn contains(&self, other: &Self) -> bool {
        const EPSILON: f32 = 1e-4;
        other.min_x >= self.min_x - EPSILON
            && other.min_y >= self.min_y - EPSILON
            && other.max_x <= self.max_x + EPSILON
            && other.max_y <= self.max_y + EPSILON
    }
}

/// Maps scene data units (Y-up) onto SVG user space in points (Y-down).
///
/// ```
/// # use labdraw_core::geometry::{Point, Size, Viewport};
/// let viewport = Viewport::new(Size::new(24.0, 16.0), 72.0);
///
/// // The bottom-left data origin is the bottom-left SVG corner
/// let p = viewport.to_svg(Point::new(0.0, 0.0));
/// assert_eq!(p.x(), 0.0);
/// assert_eq!(p.y(), 16.0 * 72.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    canvas: Size,
    points_per_unit: f32,
}

impl Viewport {
    pub fn new(canvas: Size, points_per_unit: f32) -> Self {
        Self {
            canvas,
            points_per_unit,
        }
    }

    /// Returns the canvas size in data units
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Returns how many points one data unit spans
    pub fn points_per_unit(&self) -> f32 {
        self.points_per_unit
    }

    /// Returns the canvas size in points
    pub fn svg_size(&self) -> Size {
        self.canvas.scale(self.points_per_unit)
    }

    /// Converts a data-space point to an SVG-space point
    pub fn to_svg(&self, point: Point) -> Point {
        Point::new(
            point.x * self.points_per_unit,
            (self.canvas.height - point.y) * self.points_per_unit,
        )
    }

    /// Converts data-space bounds to SVG-space bounds
    pub fn bounds_to_svg(&self, bounds: Bounds) -> Bounds {
        let min = self.to_svg(Point::new(bounds.min_x, bounds.max_y));
        let max = self.to_svg(Point::new(bounds.max_x, bounds.min_y));
        Bounds::new(min.x, min.y, max.x, max.y)
    }

    /// Converts SVG-space bounds back to data-space bounds
    pub fn bounds_from_svg(&self, bounds: Bounds) -> Bounds {
        Bounds::new(
            bounds.min_x / self.points_per_unit,
            self.canvas.height - bounds.max_y / self.points_per_unit,
            bounds.max_x / self.points_per_unit,
            self.canvas.height - bounds.min_y / self.points_per_unit,
        )
    }

    /// Converts a data-space length to points
    pub fn length_to_svg(&self, length: f32) -> f32 {
        length * self.points_per_unit
    }

    /// Converts a length in points to data units
    pub fn points_to_units(&self, points: f32) -> f32 {
        points / self.points_per_unit
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_bounds_new_reorders_edges() {
        let bounds = Bounds::new(16.0, 12.0, 8.0, 10.5);
        assert_approx_eq!(f32, bounds.min_x(), 8.0);
        assert_approx_eq!(f32, bounds.min_y(), 10.5);
        assert_approx_eq!(f32, bounds.max_x(), 16.0);
        assert_approx_eq!(f32, bounds.max_y(), 12.0);
    }

    #[test]
    fn test_bounds_from_center() {
        let bounds = Bounds::from_center(Point::new(10.0, 8.5), Size::new(2.4, 1.6));
        assert_approx_eq!(f32, bounds.min_x(), 8.8, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.max_y(), 9.3, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.center().x(), 10.0);
    }

    #[test]
    fn test_bounds_enclosing() {
        assert!(Bounds::enclosing(Vec::new()).is_none());

        let bounds = Bounds::enclosing([
            Point::new(3.0, 2.8),
            Point::new(3.0, 7.7),
            Point::new(2.2, 5.0),
        ])
        .unwrap();
        assert_approx_eq!(f32, bounds.min_x(), 2.2);
        assert_approx_eq!(f32, bounds.max_x(), 3.0);
        assert_approx_eq!(f32, bounds.height(), 4.9, epsilon = 1e-5);
    }

    #[test]
    fn test_bounds_contains() {
        let canvas = Bounds::new(0.0, 0.0, 24.0, 16.0);
        assert!(canvas.contains(&Bounds::new(0.5, 0.5, 23.5, 10.0)));
        assert!(canvas.contains(&canvas));
        assert!(!canvas.contains(&Bounds::new(23.0, 1.0, 24.5, 2.0)));
    }

    #[test]
    fn test_point_rotate_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotate(90.0);
        assert_approx_eq!(f32, p.x(), 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, p.y(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_viewport_flips_y_axis() {
        let viewport = Viewport::new(Size::new(20.0, 12.0), 72.0);
        let top_left = viewport.to_svg(Point::new(0.0, 12.0));
        assert_approx_eq!(f32, top_left.x(), 0.0);
        assert_approx_eq!(f32, top_left.y(), 0.0);

        let svg_bounds = viewport.bounds_to_svg(Bounds::new(1.0, 10.5, 19.0, 11.7));
        assert_approx_eq!(f32, svg_bounds.min_x(), 72.0);
        assert_approx_eq!(f32, svg_bounds.min_y(), 0.3 * 72.0, epsilon = 1e-3);
        assert_approx_eq!(f32, svg_bounds.height(), 1.2 * 72.0, epsilon = 1e-3);
    }

    #[test]
    fn test_viewport_length_conversions() {
        let viewport = Viewport::new(Size::new(24.0, 16.0), 72.0);
        assert_approx_eq!(f32, viewport.length_to_svg(0.5), 36.0);
        assert_approx_eq!(f32, viewport.points_to_units(36.0), 0.5);
        assert_approx_eq!(f32, viewport.svg_size().width(), 1728.0);
    }

    proptest! {
        #[test]
        fn merged_bounds_contain_both(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            aw in 0.0f32..50.0, ah in 0.0f32..50.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            bw in 0.0f32..50.0, bh in 0.0f32..50.0,
        ) {
            let a = Bounds::from_origin(Point::new(ax, ay), Size::new(aw, ah));
            let b = Bounds::from_origin(Point::new(bx, by), Size::new(bw, bh));
            let merged = a.merge(&b);
            prop_assert!(merged.contains(&a));
            prop_assert!(merged.contains(&b));
        }

        #[test]
        fn viewport_round_trips_bounds_size(
            x in 0.0f32..24.0, y in 0.0f32..16.0,
            w in 0.0f32..10.0, h in 0.0f32..10.0,
        ) {
            let viewport = Viewport::new(Size::new(24.0, 16.0), 72.0);
            let bounds = Bounds::from_origin(Point::new(x, y), Size::new(w, h));
            let svg = viewport.bounds_to_svg(bounds);
            prop_assert!((svg.width() - w * 72.0).abs() < 1e-2);
            prop_assert!((svg.height() - h * 72.0).abs() < 1e-2);
        }
    }
}
