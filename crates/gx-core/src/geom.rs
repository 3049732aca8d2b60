//! 2D model-space geometry.
//!
//! Model units are picometres; positive y points up.  `Vector2` is a plain
//! value type (`Copy`) and every operation returns a new value.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Default tolerance for [`Vector2::approx_eq`].
pub const EPSILON: f64 = 1e-9;

// ── Vector2 ──────────────────────────────────────────────────────────────────

/// A 2D point or displacement in model space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of length `magnitude` pointing at `angle` radians from +x.
    #[inline]
    pub fn from_polar(magnitude: f64, angle: f64) -> Self {
        Self::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Vector2) -> f64 {
        (self - other).magnitude()
    }

    /// Angle from +x in radians, in `(-π, π]`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector in the same direction, or `ZERO` for a zero-length input.
    pub fn normalized(self) -> Vector2 {
        let m = self.magnitude();
        if m > 0.0 { self * (1.0 / m) } else { Vector2::ZERO }
    }

    /// Rotate counter-clockwise by `angle` radians.
    pub fn rotated(self, angle: f64) -> Vector2 {
        let (sin, cos) = angle.sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// `true` if both components differ by at most `epsilon`.
    #[inline]
    pub fn approx_eq(self, other: Vector2, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    #[inline]
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    #[inline]
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── Rect ─────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle.
///
/// Used both for absolute regions (motion bounds) and for an entity's
/// bounding shape, which is expressed relative to the entity's position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vector2,
    pub max: Vector2,
}

impl Rect {
    /// Build from two corners in any order.
    pub fn new(a: Vector2, b: Vector2) -> Self {
        Self {
            min: Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// A `width × height` rectangle centred on `center`.
    pub fn centered(center: Vector2, width: f64, height: f64) -> Self {
        let half = Vector2::new(width * 0.5, height * 0.5);
        Self::new(center - half, center + half)
    }

    /// The rectangle covering the whole plane.
    pub fn everything() -> Self {
        Self {
            min: Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            max: Vector2::new(f64::INFINITY, f64::INFINITY),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vector2 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment test.
    #[inline]
    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// `true` if `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// The nearest point to `p` inside the rectangle.
    #[inline]
    pub fn clamp(&self, p: Vector2) -> Vector2 {
        Vector2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }

    /// Copy moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vector2) -> Rect {
        Rect { min: self.min + offset, max: self.max + offset }
    }

    /// `true` when the rectangle has positive, finite-or-infinite area.
    pub fn is_valid(&self) -> bool {
        self.max.x > self.min.x && self.max.y > self.min.y
    }
}
