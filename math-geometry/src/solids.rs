//! Three-dimensional shapes

use crate::error::{GeometryError, Result, check_params, check_unit_box};
use crate::parametrized::Parametrized;
use crate::revolution::AxisFrame;
use crate::surfaces::{SIMPLEX_TOLERANCE, check_radius};
use crate::types::Point3D;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Axis-aligned box between `min` and `max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CuboidData")]
pub struct Cuboid {
    pub min: Point3D,
    pub max: Point3D,
}

#[derive(Deserialize)]
struct CuboidData {
    min: Point3D,
    max: Point3D,
}

impl TryFrom<CuboidData> for Cuboid {
    type Error = GeometryError;

    fn try_from(data: CuboidData) -> Result<Self> {
        Self::new(data.min, data.max)
    }
}

impl Cuboid {
    pub fn new(min: Point3D, max: Point3D) -> Result<Self> {
        if !(min.x <= max.x && min.y <= max.y && min.z <= max.z) {
            return Err(GeometryError::degenerate(
                "Cuboid",
                format!("min {:?} must not exceed max {:?}", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn extent(&self) -> Point3D {
        self.max - self.min
    }
}

impl Parametrized for Cuboid {
    fn name(&self) -> &'static str {
        "Cuboid"
    }

    fn paramdim(&self) -> usize {
        3
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 3)?;
        let e = self.extent();
        Ok(self.min + Point3D::new(e.x * params[0], e.y * params[1], e.z * params[2]))
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 3)?;
        let e = self.extent();
        Ok(vec![
            Point3D::new(e.x, 0.0, 0.0),
            Point3D::new(0.0, e.y, 0.0),
            Point3D::new(0.0, 0.0, e.z),
        ])
    }

    fn measure(&self) -> Option<f64> {
        let e = self.extent();
        Some(e.x * e.y * e.z)
    }
}

/// Solid ball; `(ρ, θ, φ) ↦ center + r·ρ·(spherical direction of πθ, 2πφ)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BallData")]
pub struct Ball {
    pub center: Point3D,
    pub radius: f64,
}

#[derive(Deserialize)]
struct BallData {
    center: Point3D,
    radius: f64,
}

impl TryFrom<BallData> for Ball {
    type Error = GeometryError;

    fn try_from(data: BallData) -> Result<Self> {
        Self::new(data.center, data.radius)
    }
}

impl Ball {
    pub fn new(center: Point3D, radius: f64) -> Result<Self> {
        check_radius("Ball", radius)?;
        Ok(Self { center, radius })
    }
}

impl Parametrized for Ball {
    fn name(&self) -> &'static str {
        "Ball"
    }

    fn paramdim(&self) -> usize {
        3
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 3)?;
        let offset = Point3D::from_spherical(
            self.radius * params[0],
            PI * params[1],
            2.0 * PI * params[2],
        );
        Ok(self.center + offset)
    }

    fn measure(&self) -> Option<f64> {
        Some(4.0 / 3.0 * PI * self.radius.powi(3))
    }
}

/// Solid circular cylinder between `bottom` and `top`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cylinder {
    pub bottom: Point3D,
    pub top: Point3D,
    pub radius: f64,
    frame: AxisFrame,
}

impl Cylinder {
    pub fn new(bottom: Point3D, top: Point3D, radius: f64) -> Result<Self> {
        check_radius("Cylinder", radius)?;
        let frame = AxisFrame::new("Cylinder", bottom, top)?;
        Ok(Self {
            bottom,
            top,
            radius,
            frame,
        })
    }

    pub fn height(&self) -> f64 {
        self.bottom.distance_to(&self.top)
    }
}

impl Parametrized for Cylinder {
    fn name(&self) -> &'static str {
        "Cylinder"
    }

    fn paramdim(&self) -> usize {
        3
    }

    /// `(ρ, φ, h)`: radius fraction, turn fraction, height fraction
    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 3)?;
        let base = self.bottom.lerp(&self.top, params[2]);
        Ok(base + self.frame.radial(params[1]) * (self.radius * params[0]))
    }

    fn measure(&self) -> Option<f64> {
        Some(PI * self.radius * self.radius * self.height())
    }
}

/// Tetrahedron with barycentric parametrization
/// `a + u·(b - a) + v·(c - a) + w·(d - a)`, `u, v, w >= 0`, `u + v + w <= 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tetrahedron {
    pub a: Point3D,
    pub b: Point3D,
    pub c: Point3D,
    pub d: Point3D,
}

impl Tetrahedron {
    pub fn new(a: Point3D, b: Point3D, c: Point3D, d: Point3D) -> Self {
        Self { a, b, c, d }
    }

    /// Unsigned volume, `|det(b - a, c - a, d - a)| / 6`
    pub fn volume(&self) -> f64 {
        let (e1, e2, e3) = (self.b - self.a, self.c - self.a, self.d - self.a);
        e1.dot(&e2.cross(&e3)).abs() / 6.0
    }

    pub fn centroid(&self) -> Point3D {
        (self.a + self.b + self.c + self.d) * 0.25
    }
}

impl Parametrized for Tetrahedron {
    fn name(&self) -> &'static str {
        "Tetrahedron"
    }

    fn paramdim(&self) -> usize {
        3
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_params(self.name(), params, 3)?;
        let (u, v, w) = (params[0], params[1], params[2]);
        if !(u >= 0.0 && v >= 0.0 && w >= 0.0 && u + v + w <= 1.0 + SIMPLEX_TOLERANCE) {
            return Err(GeometryError::DomainViolation {
                geometry: self.name(),
                value: params.to_vec(),
                reason: "barycentric coordinates must satisfy u, v, w >= 0 and u + v + w <= 1"
                    .to_string(),
            });
        }
        Ok(self.a + (self.b - self.a) * u + (self.c - self.a) * v + (self.d - self.a) * w)
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 3)?;
        Ok(vec![self.b - self.a, self.c - self.a, self.d - self.a])
    }

    fn measure(&self) -> Option<f64> {
        Some(self.volume())
    }

    fn interior_params(&self) -> Vec<f64> {
        vec![0.25; 3]
    }

    fn interior_point(&self) -> Result<Point3D> {
        Ok(self.centroid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cuboid() {
        let c = Cuboid::new(Point3D::zero(), Point3D::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(c.measure(), Some(6.0));
        assert_eq!(c.point(&[1.0, 0.5, 0.0]).unwrap(), Point3D::new(1.0, 1.0, 0.0));
        assert!(Cuboid::new(Point3D::unit_x(), Point3D::zero()).is_err());
    }

    #[test]
    fn test_ball_and_cylinder() {
        let ball = Ball::new(Point3D::zero(), 2.0).unwrap();
        assert_relative_eq!(ball.measure().unwrap(), 32.0 / 3.0 * PI);
        assert_relative_eq!(ball.point(&[0.5, 0.3, 0.3]).unwrap().length(), 1.0, epsilon = 1e-14);

        let cyl = Cylinder::new(Point3D::zero(), Point3D::new(0.0, 3.0, 0.0), 1.0).unwrap();
        assert_relative_eq!(cyl.measure().unwrap(), 3.0 * PI);
        let p = cyl.point(&[1.0, 0.1, 1.0]).unwrap();
        assert_relative_eq!(p.y, 3.0, epsilon = 1e-14);
        assert_relative_eq!(p.x.hypot(p.z), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_tetrahedron() {
        let t = Tetrahedron::new(
            Point3D::zero(),
            Point3D::unit_x(),
            Point3D::unit_y(),
            Point3D::unit_z(),
        );
        assert_relative_eq!(t.measure().unwrap(), 1.0 / 6.0);
        assert_eq!(t.point(&[0.0, 0.0, 1.0]).unwrap(), t.d);
        assert!(t.point(&[0.5, 0.5, 0.5]).unwrap_err().is_domain_error());
        assert_eq!(t.interior_point().unwrap(), Point3D::new(0.25, 0.25, 0.25));
        assert_eq!(t.interior_params(), vec![0.25; 3]);
    }

    #[test]
    fn test_deserialization_validates() {
        let ball = Ball::new(Point3D::new(1.0, 0.0, 0.0), 2.0).unwrap();
        let json = serde_json::to_string(&ball).unwrap();
        assert_eq!(serde_json::from_str::<Ball>(&json).unwrap(), ball);

        let origin = r#"{"x": 0.0, "y": 0.0, "z": 0.0}"#;
        let bad_ball = format!(r#"{{"center": {}, "radius": -1.0}}"#, origin);
        assert!(serde_json::from_str::<Ball>(&bad_ball).is_err());
        let inverted = format!(r#"{{"min": {}, "max": {{"x": -1.0, "y": 1.0, "z": 1.0}}}}"#, origin);
        assert!(serde_json::from_str::<Cuboid>(&inverted).is_err());
    }
}
