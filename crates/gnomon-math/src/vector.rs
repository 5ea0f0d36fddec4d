//! Three-component vector type

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

/// A position or displacement in scene space.
///
/// Equality and hashing are structural over `(x, y, z)`. `-0.0` and `0.0`
/// compare and hash the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build a vector from a component slice.
    ///
    /// Missing components are zero; anything past index 2 is ignored.
    pub fn from_components(components: &[f64]) -> Self {
        let get = |i: usize| components.get(i).copied().unwrap_or(0.0);
        Self::new(get(0), get(1), get(2))
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Scale every component by `k`
    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    /// Cross product. Anti-commutative: `a.cross(b) == -b.cross(a)`.
    pub fn cross(self, other: Self) -> Self {
        DVec3::from(self).cross(DVec3::from(other)).into()
    }

    /// Squared magnitude
    pub fn mag2(self) -> f64 {
        self.dot(self)
    }

    pub fn mag(self) -> f64 {
        self.mag2().sqrt()
    }

    /// Unit vector in the same direction, or [`Vector::ZERO`] for a
    /// zero-length input.
    pub fn normalized(self) -> Self {
        let mag2 = self.mag2();
        if mag2 == 0.0 {
            return Self::ZERO;
        }
        self / mag2.sqrt()
    }

    /// `(1 - s) * a + s * b`
    pub fn lerp(self, other: Self, s: f64) -> Self {
        self.scale(1.0 - s) + other.scale(s)
    }
}

// ============================================================================
// Free-function forms (read better in construction code)
// ============================================================================

pub fn dot(a: Vector, b: Vector) -> f64 {
    a.dot(b)
}

pub fn cross(a: Vector, b: Vector) -> Vector {
    a.cross(b)
}

pub fn normalize(v: Vector) -> Vector {
    v.normalized()
}

pub fn lerp(a: Vector, b: Vector, s: f64) -> Vector {
    a.lerp(b, s)
}

// ============================================================================
// Operators
// ============================================================================

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        v.scale(self)
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, k: f64) -> Self {
        self.scale(1.0 / k)
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector index out of range: {index}"),
        }
    }
}

// NaN components make equality non-reflexive, same as the underlying floats.
impl Eq for Vector {}

impl Hash for Vector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for c in self.to_array() {
            // Fold -0.0 into 0.0 so hashing agrees with `==`
            let c = if c == 0.0 { 0.0 } else { c };
            c.to_bits().hash(state);
        }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<[f64; 3]> for Vector {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector> for [f64; 3] {
    fn from(v: Vector) -> Self {
        v.to_array()
    }
}

impl From<(f64, f64, f64)> for Vector {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<DVec3> for Vector {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector> for DVec3 {
    fn from(v: Vector) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn assert_vec_eq(a: Vector, b: Vector) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
    }

    #[test]
    fn test_cross_is_anti_commutative() {
        let samples = [
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(-0.5, 4.0, 0.25),
            Vector::new(0.0, -3.0, 7.5),
            Vector::ZERO,
        ];
        for a in samples {
            for b in samples {
                assert_vec_eq(a.cross(b), -b.cross(a));
            }
        }
    }

    #[test]
    fn test_cross_of_axes() {
        assert_eq!(Vector::X.cross(Vector::Y), Vector::Z);
        assert_eq!(Vector::Y.cross(Vector::X), -Vector::Z);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vector::ZERO.normalized(), Vector::ZERO);
        assert_eq!(normalize(Vector::ZERO), Vector::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = Vector::new(3.0, 4.0, 12.0).normalized();
        assert_relative_eq!(v.mag(), 1.0, epsilon = 1e-12);
        assert_vec_eq(v, Vector::new(3.0, 4.0, 12.0) / 13.0);
    }

    #[test]
    fn test_add_then_sub_round_trips() {
        let a = Vector::new(0.1, -2.7, 1e6);
        let b = Vector::new(3.3, 0.7, -4.2);
        assert_vec_eq((a + b) - b, a);
    }

    #[test]
    fn test_dot_and_scale_are_distinct() {
        let v = Vector::new(1.0, 2.0, 3.0);
        assert_relative_eq!(v.dot(v), 14.0);
        assert_eq!(v.scale(2.0), Vector::new(2.0, 4.0, 6.0));
        assert_eq!(0.5 * v, Vector::new(0.5, 1.0, 1.5));
        assert_eq!(v * 0.5, v / 2.0);
    }

    #[test]
    fn test_from_components_pads_and_truncates() {
        assert_eq!(Vector::from_components(&[1.0]), Vector::new(1.0, 0.0, 0.0));
        assert_eq!(Vector::from_components(&[]), Vector::ZERO);
        assert_eq!(
            Vector::from_components(&[1.0, 2.0, 3.0, 4.0]),
            Vector::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_lerp() {
        let a = Vector::new(0.0, 0.0, 0.0);
        let b = Vector::new(2.0, 4.0, -6.0);
        assert_eq!(a.lerp(b, 0.5), Vector::new(1.0, 2.0, -3.0));
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
    }

    #[test]
    fn test_structural_hash() {
        let mut set = HashSet::new();
        set.insert(Vector::new(1.0, 2.0, 3.0));
        set.insert(Vector::new(1.0, 2.0, 3.0));
        set.insert(Vector::new(0.0, -0.0, 0.0));
        set.insert(Vector::ZERO);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_glam_interop() {
        let v = Vector::new(1.0, -2.0, 0.5);
        let g: DVec3 = v.into();
        assert_eq!(Vector::from(g), v);
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&Vector::new(1.0, 2.5, -3.0)).unwrap();
        assert_eq!(json, "[1.0,2.5,-3.0]");
        let back: Vector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Vector::new(1.0, 2.5, -3.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector::new(1.0, 0.5, -2.0).to_string(), "<1, 0.5, -2>");
    }
}
