//! Points and vectors in 3-D space

use serde::{Deserialize, Serialize};

/// 3D point in space, also used as a displacement vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point3D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3D {
    /// Create a new 3D point
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a point in the `z = 0` plane
    pub const fn new_2d(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Origin
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub const fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        (*self - *other).length()
    }

    /// Create from spherical coordinates
    /// theta: polar angle (0 to PI)
    /// phi: azimuthal angle
    pub fn from_spherical(r: f64, theta: f64, phi: f64) -> Self {
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        Self::new(r * st * cp, r * st * sp, r * ct)
    }

    /// Dot product (treating both as vectors)
    pub fn dot(&self, other: &Point3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (treating both as vectors)
    pub fn cross(&self, other: &Point3D) -> Point3D {
        Point3D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Length (magnitude) of the vector
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Normalize the vector to unit length, `None` for (near) zero vectors
    pub fn normalize(&self) -> Option<Point3D> {
        let len = self.length();
        if len > 1e-12 {
            Some(self.scale(1.0 / len))
        } else {
            None
        }
    }

    /// Scale the vector by a scalar
    pub fn scale(&self, s: f64) -> Point3D {
        Point3D::new(self.x * s, self.y * s, self.z * s)
    }

    /// Linear interpolation, `t = 0` gives `self` and `t = 1` gives `other`
    pub fn lerp(&self, other: &Point3D, t: f64) -> Point3D {
        *self + (*other - *self) * t
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// True when all coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Point3D {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl std::ops::Add for Point3D {
    type Output = Point3D;
    fn add(self, other: Point3D) -> Point3D {
        Point3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Point3D {
    fn add_assign(&mut self, other: Point3D) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Point3D {
    type Output = Point3D;
    fn sub(self, other: Point3D) -> Point3D {
        Point3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for Point3D {
    type Output = Point3D;
    fn mul(self, s: f64) -> Point3D {
        self.scale(s)
    }
}

impl std::ops::Neg for Point3D {
    type Output = Point3D;
    fn neg(self) -> Point3D {
        self.scale(-1.0)
    }
}

/// Orthonormal pair `(u, v)` spanning the plane perpendicular to `normal`,
/// with `u × v` pointing along `normal`.
///
/// Returns `None` when `normal` is (nearly) zero.
pub fn orthonormal_basis(normal: &Point3D) -> Option<(Point3D, Point3D)> {
    let n = normal.normalize()?;
    // Seed with the coordinate axis least aligned with n
    let seed = if n.x.abs() <= n.y.abs() && n.x.abs() <= n.z.abs() {
        Point3D::unit_x()
    } else if n.y.abs() <= n.z.abs() {
        Point3D::unit_y()
    } else {
        Point3D::unit_z()
    };
    let u = n.cross(&seed).normalize()?;
    let v = n.cross(&u);
    Some((u, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_point_distance() {
        let p1 = Point3D::new(0.0, 0.0, 0.0);
        let p2 = Point3D::new(3.0, 4.0, 0.0);
        assert_relative_eq!(p1.distance_to(&p2), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_spherical() {
        let p = Point3D::from_spherical(2.0, PI / 2.0, 0.0);
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vector_ops() {
        let a = Point3D::unit_x();
        let b = Point3D::unit_y();
        assert_eq!(a.cross(&b), Point3D::unit_z());
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!((a + b) * 2.0, Point3D::new(2.0, 2.0, 0.0));
        assert_eq!(-a, Point3D::new(-1.0, 0.0, 0.0));
        assert_eq!(a.lerp(&b, 0.5), Point3D::new(0.5, 0.5, 0.0));
        assert!(Point3D::zero().normalize().is_none());
    }

    #[test]
    fn test_orthonormal_basis() {
        for n in [
            Point3D::unit_z(),
            Point3D::new(1.0, 2.0, 3.0),
            Point3D::new(-4.0, 0.1, 0.0),
        ] {
            let (u, v) = orthonormal_basis(&n).unwrap();
            let nn = n.normalize().unwrap();
            assert_relative_eq!(u.length(), 1.0, epsilon = 1e-14);
            assert_relative_eq!(v.length(), 1.0, epsilon = 1e-14);
            assert_relative_eq!(u.dot(&v), 0.0, epsilon = 1e-14);
            assert_relative_eq!(u.dot(&nn), 0.0, epsilon = 1e-14);
            assert_relative_eq!(u.cross(&v).dot(&nn), 1.0, epsilon = 1e-14);
        }
        assert!(orthonormal_basis(&Point3D::zero()).is_none());
    }
}
