//! Closed surfaces of revolution made of a lateral surface and flat caps
//!
//! The parametrization of each shape covers the lateral surface only; the
//! caps are separate [`Disk`]s. [`Parametrized::measure`] reports the whole
//! closed surface.

use crate::error::{GeometryError, Result, check_unit_box};
use crate::parametric::ParametricGeometry;
use crate::parametrized::Parametrized;
use crate::surfaces::{Disk, Plane, check_radius};
use crate::types::{Point3D, orthonormal_basis};
use serde::Serialize;
use std::f64::consts::PI;

/// Frame of a shape of revolution: unit axis and an orthonormal pair
/// perpendicular to it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct AxisFrame {
    pub axis: Point3D,
    pub u: Point3D,
    pub v: Point3D,
}

impl AxisFrame {
    pub fn new(geometry: &'static str, from: Point3D, to: Point3D) -> Result<Self> {
        let degenerate = || GeometryError::degenerate(geometry, "axis endpoints must be distinct");
        let axis = (to - from).normalize().ok_or_else(degenerate)?;
        let (u, v) = orthonormal_basis(&axis).ok_or_else(degenerate)?;
        Ok(Self { axis, u, v })
    }

    /// Unit radial direction at turn fraction `t`
    pub fn radial(&self, t: f64) -> Point3D {
        let (s, c) = (2.0 * PI * t).sin_cos();
        self.u * c + self.v * s
    }
}

fn cap(center: Point3D, normal: Point3D, radius: f64) -> Result<Disk> {
    Disk::new(Plane::from_normal(center, normal)?, radius)
}

/// Closed cylinder surface between `bottom` and `top`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CylinderSurface {
    pub bottom: Point3D,
    pub top: Point3D,
    pub radius: f64,
    frame: AxisFrame,
}

impl CylinderSurface {
    pub fn new(bottom: Point3D, top: Point3D, radius: f64) -> Result<Self> {
        check_radius("CylinderSurface", radius)?;
        let frame = AxisFrame::new("CylinderSurface", bottom, top)?;
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

    pub fn lateral_area(&self) -> f64 {
        2.0 * PI * self.radius * self.height()
    }

    /// Lateral surface as a `[0, 1]²` geometry
    pub fn lateral(&self) -> ParametricGeometry {
        let shape = *self;
        ParametricGeometry::new(2, move |t| shape.point(t)).with_measure(self.lateral_area())
    }

    pub fn bottom_cap(&self) -> Result<Disk> {
        cap(self.bottom, -self.frame.axis, self.radius)
    }

    pub fn top_cap(&self) -> Result<Disk> {
        cap(self.top, self.frame.axis, self.radius)
    }
}

impl Parametrized for CylinderSurface {
    fn name(&self) -> &'static str {
        "CylinderSurface"
    }

    fn paramdim(&self) -> usize {
        2
    }

    /// `(φ, h)`: turn fraction and height fraction on the lateral surface
    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 2)?;
        let base = self.bottom.lerp(&self.top, params[1]);
        Ok(base + self.frame.radial(params[0]) * self.radius)
    }

    fn measure(&self) -> Option<f64> {
        Some(self.lateral_area() + 2.0 * PI * self.radius * self.radius)
    }
}

/// Closed right circular cone: lateral surface from `apex` to a base disk
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConeSurface {
    pub apex: Point3D,
    pub base_center: Point3D,
    pub radius: f64,
    frame: AxisFrame,
}

impl ConeSurface {
    pub fn new(apex: Point3D, base_center: Point3D, radius: f64) -> Result<Self> {
        check_radius("ConeSurface", radius)?;
        let frame = AxisFrame::new("ConeSurface", apex, base_center)?;
        Ok(Self {
            apex,
            base_center,
            radius,
            frame,
        })
    }

    pub fn slant_height(&self) -> f64 {
        self.apex.distance_to(&self.base_center).hypot(self.radius)
    }

    pub fn lateral_area(&self) -> f64 {
        PI * self.radius * self.slant_height()
    }

    pub fn lateral(&self) -> ParametricGeometry {
        let shape = *self;
        ParametricGeometry::new(2, move |t| shape.point(t)).with_measure(self.lateral_area())
    }

    pub fn base(&self) -> Result<Disk> {
        cap(self.base_center, self.frame.axis, self.radius)
    }
}

impl Parametrized for ConeSurface {
    fn name(&self) -> &'static str {
        "ConeSurface"
    }

    fn paramdim(&self) -> usize {
        2
    }

    /// `(φ, s)`: turn fraction and fraction of the way from apex to rim
    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 2)?;
        let rim = self.base_center + self.frame.radial(params[0]) * self.radius;
        Ok(self.apex.lerp(&rim, params[1]))
    }

    fn measure(&self) -> Option<f64> {
        Some(self.lateral_area() + PI * self.radius * self.radius)
    }
}

/// Closed conical frustum between two parallel disks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrustumSurface {
    pub bottom: Point3D,
    pub bottom_radius: f64,
    pub top: Point3D,
    pub top_radius: f64,
    frame: AxisFrame,
}

impl FrustumSurface {
    pub fn new(bottom: Point3D, bottom_radius: f64, top: Point3D, top_radius: f64) -> Result<Self> {
        check_radius("FrustumSurface", bottom_radius)?;
        check_radius("FrustumSurface", top_radius)?;
        let frame = AxisFrame::new("FrustumSurface", bottom, top)?;
        Ok(Self {
            bottom,
            bottom_radius,
            top,
            top_radius,
            frame,
        })
    }

    pub fn slant_height(&self) -> f64 {
        self.bottom
            .distance_to(&self.top)
            .hypot(self.bottom_radius - self.top_radius)
    }

    pub fn lateral_area(&self) -> f64 {
        PI * (self.bottom_radius + self.top_radius) * self.slant_height()
    }

    pub fn lateral(&self) -> ParametricGeometry {
        let shape = *self;
        ParametricGeometry::new(2, move |t| shape.point(t)).with_measure(self.lateral_area())
    }

    pub fn bottom_cap(&self) -> Result<Disk> {
        cap(self.bottom, -self.frame.axis, self.bottom_radius)
    }

    pub fn top_cap(&self) -> Result<Disk> {
        cap(self.top, self.frame.axis, self.top_radius)
    }
}

impl Parametrized for FrustumSurface {
    fn name(&self) -> &'static str {
        "FrustumSurface"
    }

    fn paramdim(&self) -> usize {
        2
    }

    /// `(φ, h)`: turn fraction and height fraction on the lateral surface
    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 2)?;
        let radial = self.frame.radial(params[0]);
        let lower = self.bottom + radial * self.bottom_radius;
        let upper = self.top + radial * self.top_radius;
        Ok(lower.lerp(&upper, params[1]))
    }

    fn measure(&self) -> Option<f64> {
        let caps = PI * (self.bottom_radius.powi(2) + self.top_radius.powi(2));
        Some(self.lateral_area() + caps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_surface() {
        let c = CylinderSurface::new(Point3D::zero(), Point3D::new(0.0, 0.0, 2.0), 1.0).unwrap();
        assert_relative_eq!(c.measure().unwrap(), 4.0 * PI + 2.0 * PI);
        let p = c.point(&[0.3, 0.5]).unwrap();
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-14);
        assert_relative_eq!(p.x.hypot(p.y), 1.0, epsilon = 1e-14);
        assert_relative_eq!(c.bottom_cap().unwrap().plane.normal().z, -1.0, epsilon = 1e-14);
        assert_eq!(c.top_cap().unwrap().center(), c.top);
        assert_eq!(c.lateral().measure(), Some(c.lateral_area()));
        assert!(CylinderSurface::new(Point3D::zero(), Point3D::zero(), 1.0).is_err());
    }

    #[test]
    fn test_cone_surface() {
        let cone = ConeSurface::new(Point3D::new(0.0, 0.0, 4.0), Point3D::zero(), 3.0).unwrap();
        assert_relative_eq!(cone.slant_height(), 5.0);
        assert_relative_eq!(cone.measure().unwrap(), 15.0 * PI + 9.0 * PI);
        assert_eq!(cone.point(&[0.7, 0.0]).unwrap(), cone.apex);
        let rim = cone.point(&[0.2, 1.0]).unwrap();
        assert_relative_eq!(rim.z, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_frustum_surface() {
        let f = FrustumSurface::new(Point3D::zero(), 2.0, Point3D::new(0.0, 0.0, 4.0), 5.0).unwrap();
        assert_relative_eq!(f.slant_height(), 5.0);
        assert_relative_eq!(f.measure().unwrap(), 35.0 * PI + 29.0 * PI);
        let p = f.point(&[0.0, 1.0]).unwrap();
        assert_relative_eq!(p.x.hypot(p.y), 5.0, epsilon = 1e-14);
    }
}
