//! One-dimensional shapes: segments, lines, rays, circles and polylines

use crate::error::{GeometryError, Result, check_params, check_unit_box};
use crate::parametrized::Parametrized;
use crate::types::{Point3D, orthonormal_basis};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Straight segment from `a` (t = 0) to `b` (t = 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point3D,
    pub b: Point3D,
}

impl Segment {
    pub fn new(a: Point3D, b: Point3D) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(&self.b)
    }
}

impl Parametrized for Segment {
    fn name(&self) -> &'static str {
        "Segment"
    }

    fn paramdim(&self) -> usize {
        1
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 1)?;
        Ok(self.a.lerp(&self.b, params[0]))
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 1)?;
        Ok(vec![self.b - self.a])
    }

    fn measure(&self) -> Option<f64> {
        Some(self.length())
    }
}

/// Half-line `origin + t·direction`, `t ∈ [0, ∞)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RayData")]
pub struct Ray {
    pub origin: Point3D,
    pub direction: Point3D,
}

#[derive(Deserialize)]
struct RayData {
    origin: Point3D,
    direction: Point3D,
}

impl TryFrom<RayData> for Ray {
    type Error = GeometryError;

    fn try_from(data: RayData) -> Result<Self> {
        Self::new(data.origin, data.direction)
    }
}

impl Ray {
    pub fn new(origin: Point3D, direction: Point3D) -> Result<Self> {
        if direction.normalize().is_none() {
            return Err(GeometryError::degenerate("Ray", "direction must be non-zero"));
        }
        Ok(Self { origin, direction })
    }
}

impl Parametrized for Ray {
    fn name(&self) -> &'static str {
        "Ray"
    }

    fn paramdim(&self) -> usize {
        1
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_params(self.name(), params, 1)?;
        let t = params[0];
        if !(t >= 0.0) {
            return Err(GeometryError::DomainViolation {
                geometry: self.name(),
                value: params.to_vec(),
                reason: "parameter must be non-negative".to_string(),
            });
        }
        Ok(self.origin + self.direction * t)
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 1)?;
        Ok(vec![self.direction])
    }

    fn measure(&self) -> Option<f64> {
        Some(f64::INFINITY)
    }

    fn interior_point(&self) -> Result<Point3D> {
        Ok(self.origin)
    }
}

/// Infinite line through `a` (t = 0) and `b` (t = 1), `t ∈ ℝ`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineData")]
pub struct Line {
    pub a: Point3D,
    pub b: Point3D,
}

#[derive(Deserialize)]
struct LineData {
    a: Point3D,
    b: Point3D,
}

impl TryFrom<LineData> for Line {
    type Error = GeometryError;

    fn try_from(data: LineData) -> Result<Self> {
        Self::new(data.a, data.b)
    }
}

impl Line {
    pub fn new(a: Point3D, b: Point3D) -> Result<Self> {
        if (b - a).normalize().is_none() {
            return Err(GeometryError::degenerate("Line", "points must be distinct"));
        }
        Ok(Self { a, b })
    }
}

impl Parametrized for Line {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn paramdim(&self) -> usize {
        1
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_params(self.name(), params, 1)?;
        Ok(self.a + (self.b - self.a) * params[0])
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 1)?;
        Ok(vec![self.b - self.a])
    }

    fn measure(&self) -> Option<f64> {
        Some(f64::INFINITY)
    }

    fn interior_point(&self) -> Result<Point3D> {
        Ok(self.a)
    }
}

/// Circle of `radius` around `center`, in the plane spanned by `u` and `v`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point3D,
    pub radius: f64,
    u: Point3D,
    v: Point3D,
}

impl Circle {
    /// Circle perpendicular to `normal`
    pub fn new(center: Point3D, normal: Point3D, radius: f64) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(GeometryError::degenerate(
                "Circle",
                format!("radius must be positive, got {}", radius),
            ));
        }
        let (u, v) = orthonormal_basis(&normal)
            .ok_or_else(|| GeometryError::degenerate("Circle", "normal must be non-zero"))?;
        Ok(Self {
            center,
            radius,
            u,
            v,
        })
    }

    /// Circle in the `z = 0` plane
    pub fn xy(center: Point3D, radius: f64) -> Result<Self> {
        let mut circle = Self::new(center, Point3D::unit_z(), radius)?;
        circle.u = Point3D::unit_x();
        circle.v = Point3D::unit_y();
        Ok(circle)
    }

    pub fn normal(&self) -> Point3D {
        self.u.cross(&self.v)
    }
}

impl Parametrized for Circle {
    fn name(&self) -> &'static str {
        "Circle"
    }

    fn paramdim(&self) -> usize {
        1
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, 1)?;
        let (s, c) = (2.0 * PI * params[0]).sin_cos();
        Ok(self.center + (self.u * c + self.v * s) * self.radius)
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        check_params(self.name(), params, 1)?;
        let (s, c) = (2.0 * PI * params[0]).sin_cos();
        Ok(vec![(self.v * c - self.u * s) * (2.0 * PI * self.radius)])
    }

    fn measure(&self) -> Option<f64> {
        Some(2.0 * PI * self.radius)
    }
}

/// Polyline traversal shared by `Rope` and `Ring`
fn polyline_point(
    geometry: &'static str,
    vertices: &[Point3D],
    closed: bool,
    params: &[f64],
) -> Result<Point3D> {
    check_unit_box(geometry, params, 1)?;
    let n = vertices.len();
    let nseg = if closed { n } else { n - 1 };
    let s = params[0] * nseg as f64;
    let i = (s.floor() as usize).min(nseg - 1);
    let a = vertices[i];
    let b = vertices[(i + 1) % n];
    Ok(a.lerp(&b, s - i as f64))
}

/// Derivative of the polyline traversal: the active segment scaled by the
/// number of segments. At a vertex the following segment is used.
fn polyline_jacobian(
    geometry: &'static str,
    vertices: &[Point3D],
    closed: bool,
    params: &[f64],
) -> Result<Vec<Point3D>> {
    check_params(geometry, params, 1)?;
    let n = vertices.len();
    let nseg = if closed { n } else { n - 1 };
    let s = params[0].clamp(0.0, 1.0) * nseg as f64;
    let i = (s.floor() as usize).min(nseg - 1);
    Ok(vec![(vertices[(i + 1) % n] - vertices[i]) * nseg as f64])
}

fn polyline_segments(vertices: &[Point3D], closed: bool) -> Vec<Segment> {
    let mut segments: Vec<Segment> = vertices
        .windows(2)
        .map(|w| Segment::new(w[0], w[1]))
        .collect();
    if closed {
        if let (Some(&last), Some(&first)) = (vertices.last(), vertices.first()) {
            segments.push(Segment::new(last, first));
        }
    }
    segments
}

/// Open polyline through its vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolylineData")]
pub struct Rope {
    vertices: Vec<Point3D>,
}

#[derive(Deserialize)]
struct PolylineData {
    vertices: Vec<Point3D>,
}

impl TryFrom<PolylineData> for Rope {
    type Error = GeometryError;

    fn try_from(data: PolylineData) -> Result<Self> {
        Self::new(data.vertices)
    }
}

impl Rope {
    pub fn new(vertices: Vec<Point3D>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(GeometryError::degenerate(
                "Rope",
                format!("need at least 2 vertices, got {}", vertices.len()),
            ));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    /// Consecutive segments, in order
    pub fn segments(&self) -> Vec<Segment> {
        polyline_segments(&self.vertices, false)
    }
}

impl Parametrized for Rope {
    fn name(&self) -> &'static str {
        "Rope"
    }

    fn paramdim(&self) -> usize {
        1
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        polyline_point(self.name(), &self.vertices, false, params)
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        polyline_jacobian(self.name(), &self.vertices, false, params)
    }

    fn measure(&self) -> Option<f64> {
        Some(self.segments().iter().map(Segment::length).sum())
    }
}

/// Closed polyline; the last vertex connects back to the first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolylineData")]
pub struct Ring {
    vertices: Vec<Point3D>,
}

impl TryFrom<PolylineData> for Ring {
    type Error = GeometryError;

    fn try_from(data: PolylineData) -> Result<Self> {
        Self::new(data.vertices)
    }
}

impl Ring {
    /// Vertices must not repeat the first vertex at the end.
    pub fn new(vertices: Vec<Point3D>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::degenerate(
                "Ring",
                format!("need at least 3 vertices, got {}", vertices.len()),
            ));
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    /// Consecutive segments including the closing one
    pub fn segments(&self) -> Vec<Segment> {
        polyline_segments(&self.vertices, true)
    }
}

impl Parametrized for Ring {
    fn name(&self) -> &'static str {
        "Ring"
    }

    fn paramdim(&self) -> usize {
        1
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        polyline_point(self.name(), &self.vertices, true, params)
    }

    fn has_analytical_jacobian(&self) -> bool {
        true
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        polyline_jacobian(self.name(), &self.vertices, true, params)
    }

    fn measure(&self) -> Option<f64> {
        Some(self.segments().iter().map(Segment::length).sum())
    }
}
