//! Jacobians and differential elements of parametrized geometries
//!
//! The differential element at a parametric point is the magnitude of the
//! exterior product of the Jacobian columns. It converts an integral over
//! the parameter domain into an integral over physical length, area or
//! volume.

use crate::error::{IntegralError, Result};
use crate::wedge::wedge_magnitude;
use math_geometry::{Geometry, GeometryError, Parametrized, Point3D, Quantity, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default finite-difference step
pub const DEFAULT_FD_EPSILON: f64 = 1e-6;

/// Below this parameter value finite differences never step backward
const FORWARD_ONLY_BELOW: f64 = 0.01;
/// Above this parameter value finite differences never step forward
const BACKWARD_ONLY_ABOVE: f64 = 0.99;

/// How Jacobians are computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DiffMethod {
    /// Finite differences with step `epsilon`
    FiniteDifference { epsilon: f64 },
    /// Closed-form Jacobian provided by the geometry
    Analytical,
}

impl DiffMethod {
    /// Finite differences with the default step
    pub fn finite_difference() -> Self {
        DiffMethod::FiniteDifference {
            epsilon: DEFAULT_FD_EPSILON,
        }
    }

    /// Reject non-finite or non-positive steps
    pub fn validate(&self) -> Result<()> {
        if let DiffMethod::FiniteDifference { epsilon } = *self {
            if !(epsilon > 0.0 && epsilon.is_finite()) {
                return Err(IntegralError::InvalidParameter {
                    parameter: "epsilon",
                    message: format!("finite-difference step must be positive, got {}", epsilon),
                });
            }
        }
        Ok(())
    }
}

impl Default for DiffMethod {
    fn default() -> Self {
        Self::finite_difference()
    }
}

impl fmt::Display for DiffMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffMethod::FiniteDifference { epsilon } => write!(f, "FiniteDifference({:e})", epsilon),
            DiffMethod::Analytical => write!(f, "Analytical"),
        }
    }
}

/// Whether `geometry` can be integrated with [`DiffMethod::Analytical`].
///
/// Domains qualify when every piece they are integrated through does.
pub fn supports_analytical(geometry: &Geometry) -> bool {
    match geometry {
        // Always integrated through triangles
        Geometry::PolyArea(_) => true,
        Geometry::Mesh(mesh) => mesh.elements().iter().all(|e| e.has_analytical_jacobian()),
        Geometry::Set(set) => set.items().iter().all(supports_analytical),
        other => other.has_analytical_jacobian(),
    }
}

/// Analytical where a closed form exists, finite differences otherwise
pub fn default_diff_method(geometry: &Geometry) -> DiffMethod {
    if supports_analytical(geometry) {
        DiffMethod::Analytical
    } else {
        DiffMethod::finite_difference()
    }
}

fn check_dimension<G: Parametrized + ?Sized>(
    operation: &'static str,
    geometry: &G,
    params: &[f64],
) -> Result<()> {
    if params.len() != geometry.paramdim() {
        return Err(IntegralError::DimensionMismatch {
            operation,
            geometry: geometry.name(),
            expected: geometry.paramdim(),
            got: params.len(),
        });
    }
    Ok(())
}

/// Partial derivatives of the parametrization at `params`, one vector per
/// parametric axis.
///
/// With [`DiffMethod::Analytical`] on a geometry without a closed form this
/// falls back to finite differences with the default step.
pub fn jacobian<G: Parametrized + ?Sized>(
    geometry: &G,
    params: &[f64],
    method: DiffMethod,
) -> Result<Vec<Point3D>> {
    check_dimension("jacobian", geometry, params)?;
    method.validate()?;
    match method {
        DiffMethod::Analytical if geometry.has_analytical_jacobian() => {
            Ok(geometry.analytical_jacobian(params)?)
        }
        DiffMethod::Analytical => {
            log::debug!(
                "{} has no analytical jacobian, using finite differences",
                geometry.name()
            );
            finite_difference_jacobian(geometry, params, DEFAULT_FD_EPSILON)
        }
        DiffMethod::FiniteDifference { epsilon } => {
            finite_difference_jacobian(geometry, params, epsilon)
        }
    }
}

/// Central differences inside the domain, one-sided differences where a
/// step would leave it.
///
/// Along each axis the forward and backward neighbours are tried first; a
/// neighbour the geometry rejects as out of domain is dropped. When neither
/// survives, as at a simplex vertex, the axis is differenced around a base
/// pulled a few steps towards [`Parametrized::interior_params`].
fn finite_difference_jacobian<G: Parametrized + ?Sized>(
    geometry: &G,
    params: &[f64],
    epsilon: f64,
) -> Result<Vec<Point3D>> {
    let mut base: Option<Point3D> = None;
    let mut anchor: Option<(Vec<f64>, Option<Point3D>)> = None;
    let mut columns = Vec::with_capacity(params.len());

    for axis in 0..params.len() {
        let column = match axis_difference(geometry, params, axis, epsilon, &mut base)? {
            Some(column) => column,
            None => {
                let (anchor_params, anchor_base) =
                    anchor.get_or_insert_with(|| (pull_inward(geometry, params, epsilon), None));
                axis_difference(geometry, anchor_params, axis, epsilon, anchor_base)?.ok_or_else(
                    || GeometryError::DomainViolation {
                        geometry: geometry.name(),
                        value: params.to_vec(),
                        reason: format!(
                            "no finite-difference step of {:e} along axis {} stays in the domain",
                            epsilon, axis
                        ),
                    },
                )?
            }
        };
        columns.push(column);
    }
    Ok(columns)
}

/// Difference quotient along `axis`, or `None` when both neighbours fall
/// outside the domain
fn axis_difference<G: Parametrized + ?Sized>(
    geometry: &G,
    params: &[f64],
    axis: usize,
    epsilon: f64,
    base: &mut Option<Point3D>,
) -> Result<Option<Point3D>> {
    let t = params[axis];
    let mut shifted = params.to_vec();

    let forward = if t <= BACKWARD_ONLY_ABOVE {
        shifted[axis] = t + epsilon;
        point_in_domain(geometry, &shifted)?
    } else {
        None
    };
    let backward = if t >= FORWARD_ONLY_BELOW {
        shifted[axis] = t - epsilon;
        point_in_domain(geometry, &shifted)?
    } else {
        None
    };

    let column = match (forward, backward) {
        (Some(f), Some(b)) => Some((f - b) * (0.5 / epsilon)),
        (Some(f), None) => Some((f - base_point(geometry, params, base)?) * (1.0 / epsilon)),
        (None, Some(b)) => Some((base_point(geometry, params, base)? - b) * (1.0 / epsilon)),
        (None, None) => None,
    };
    Ok(column)
}

fn point_in_domain<G: Parametrized + ?Sized>(
    geometry: &G,
    params: &[f64],
) -> Result<Option<Point3D>> {
    match geometry.point(params) {
        Ok(p) => Ok(Some(p)),
        Err(e) if e.is_domain_error() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// `params` moved at most `4 epsilon` per axis towards the interior
fn pull_inward<G: Parametrized + ?Sized>(geometry: &G, params: &[f64], epsilon: f64) -> Vec<f64> {
    let center = geometry.interior_params();
    let reach = params
        .iter()
        .zip(&center)
        .map(|(p, c)| (c - p).abs())
        .fold(0.0, f64::max);
    if reach == 0.0 {
        return params.to_vec();
    }
    let lambda = (4.0 * epsilon / reach).min(1.0);
    params
        .iter()
        .zip(&center)
        .map(|(p, c)| p + lambda * (c - p))
        .collect()
}

fn base_point<G: Parametrized + ?Sized>(
    geometry: &G,
    params: &[f64],
    cache: &mut Option<Point3D>,
) -> Result<Point3D> {
    if let Some(p) = *cache {
        return Ok(p);
    }
    let p = geometry.point(params)?;
    *cache = Some(p);
    Ok(p)
}

/// Scalar differential element at `params`, in `m^N`
pub fn differential<G: Parametrized + ?Sized>(
    geometry: &G,
    params: &[f64],
    method: DiffMethod,
) -> Result<Quantity<f64>> {
    check_dimension("differential", geometry, params)?;
    let value = differential_value(geometry, params, method)?;
    Ok(Quantity::new(
        value,
        Unit::METER.powi(geometry.paramdim() as i32),
    ))
}

/// Unit-free differential element
pub(crate) fn differential_value<G: Parametrized + ?Sized>(
    geometry: &G,
    params: &[f64],
    method: DiffMethod,
) -> Result<f64> {
    Ok(wedge_magnitude(&jacobian(geometry, params, method)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use math_geometry::{BezierCurve, Circle, Sphere, Tetrahedron, Triangle};
    use std::f64::consts::PI;

    #[test]
    fn test_diff_method_validation() {
        assert!(DiffMethod::finite_difference().validate().is_ok());
        assert!(DiffMethod::Analytical.validate().is_ok());
        for epsilon in [0.0, -1e-6, f64::NAN, f64::INFINITY] {
            let err = DiffMethod::FiniteDifference { epsilon }.validate().unwrap_err();
            assert!(matches!(err, IntegralError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn test_diff_method_serde() {
        let json = serde_json::to_string(&DiffMethod::finite_difference()).unwrap();
        assert!(json.contains(r#""method":"finite_difference""#));
        let back: DiffMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DiffMethod::finite_difference());
        let m: DiffMethod = serde_json::from_str(r#"{"method":"analytical"}"#).unwrap();
        assert_eq!(m, DiffMethod::Analytical);
    }

    #[test]
    fn test_circle_differential() {
        let circle = Circle::xy(Point3D::zero(), 2.5).unwrap();
        for method in [DiffMethod::Analytical, DiffMethod::finite_difference()] {
            for t in [0.0, 0.005, 0.5, 0.995, 1.0] {
                let d = differential(&circle, &[t], method).unwrap();
                assert_relative_eq!(d.value, 5.0 * PI, max_relative = 1e-5);
                assert_eq!(d.unit, Unit::METER);
            }
        }
    }

    #[test]
    fn test_sphere_differential() {
        // dA = 2π² r² sin(πθ) in (θ, φ) ∈ [0,1]²
        let sphere = Sphere::new(Point3D::zero(), 1.0).unwrap();
        let d = differential(&sphere, &[0.5, 0.25], DiffMethod::finite_difference()).unwrap();
        assert_relative_eq!(d.value, 2.0 * PI * PI, max_relative = 1e-6);
        assert_eq!(d.unit, Unit::METER.powi(2));
    }

    #[test]
    fn test_fd_stays_in_domain_for_bezier() {
        let curve = BezierCurve::new(vec![
            Point3D::zero(),
            Point3D::new(1.0, 1.0, 0.0),
            Point3D::new(2.0, 0.0, 0.0),
        ])
        .unwrap();
        for t in [0.0, 1.0] {
            let fd = jacobian(&curve, &[t], DiffMethod::finite_difference()).unwrap();
            let exact = jacobian(&curve, &[t], DiffMethod::Analytical).unwrap();
            assert_relative_eq!(fd[0].x, exact[0].x, epsilon = 1e-5);
            assert_relative_eq!(fd[0].y, exact[0].y, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_fd_stays_in_triangle() {
        let tri = Triangle::new(
            Point3D::zero(),
            Point3D::new(3.0, 0.0, 0.0),
            Point3D::new(0.0, 4.0, 1.0),
        );
        let exact = tri.analytical_jacobian(&[0.2, 0.2]).unwrap();
        let area_element = 2.0 * tri.area();
        for params in [[0.5, 0.5], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0], [0.3, 0.7]] {
            let fd = jacobian(&tri, &params, DiffMethod::finite_difference()).unwrap();
            for (a, b) in fd.iter().zip(&exact) {
                assert_relative_eq!(a.x, b.x, epsilon = 1e-6);
                assert_relative_eq!(a.y, b.y, epsilon = 1e-6);
                assert_relative_eq!(a.z, b.z, epsilon = 1e-6);
            }
            let d = differential(&tri, &params, DiffMethod::finite_difference()).unwrap();
            assert_relative_eq!(d.value, area_element, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_fd_stays_in_tetrahedron() {
        let tet = Tetrahedron::new(
            Point3D::zero(),
            Point3D::new(2.0, 0.0, 0.0),
            Point3D::new(0.0, 3.0, 0.0),
            Point3D::new(0.0, 0.0, 1.0),
        );
        let corners = [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.5, 0.5, 0.0],
            [0.2, 0.3, 0.5],
        ];
        for params in corners {
            let d = differential(&tet, &params, DiffMethod::finite_difference()).unwrap();
            assert_relative_eq!(d.value, 6.0 * tet.volume(), max_relative = 1e-6);
        }
    }

    #[test]
    fn test_fd_outside_domain_still_fails() {
        let tri = Triangle::new(Point3D::zero(), Point3D::unit_x(), Point3D::unit_y());
        let err = jacobian(&tri, &[0.7, 0.7], DiffMethod::finite_difference()).unwrap_err();
        assert!(err.is_domain_error());
        let circle = Circle::xy(Point3D::zero(), 1.0).unwrap();
        assert!(jacobian(&circle, &[1.5], DiffMethod::finite_difference()).is_err());
    }

    #[test]
    fn test_analytical_fallback() {
        let sphere = Sphere::new(Point3D::zero(), 2.0).unwrap();
        let a = jacobian(&sphere, &[0.3, 0.6], DiffMethod::Analytical).unwrap();
        let f = jacobian(&sphere, &[0.3, 0.6], DiffMethod::finite_difference()).unwrap();
        assert_eq!(a, f);
    }

    #[test]
    fn test_dimension_mismatch() {
        let tri = Triangle::new(Point3D::zero(), Point3D::unit_x(), Point3D::unit_y());
        let err = jacobian(&tri, &[0.1], DiffMethod::Analytical).unwrap_err();
        assert!(err.is_dimension_error());
        assert!(differential(&tri, &[0.1, 0.1, 0.1], DiffMethod::Analytical).is_err());
    }

    #[test]
    fn test_tetrahedron_differential() {
        let tet = Tetrahedron::new(
            Point3D::zero(),
            Point3D::new(2.0, 0.0, 0.0),
            Point3D::new(0.0, 3.0, 0.0),
            Point3D::new(0.0, 0.0, 1.0),
        );
        let d = differential(&tet, &[0.2, 0.2, 0.2], DiffMethod::Analytical).unwrap();
        assert_relative_eq!(d.value, 6.0 * tet.volume(), epsilon = 1e-12);
        assert_eq!(d.unit, Unit::METER.powi(3));
    }

    #[test]
    fn test_default_methods() {
        let sphere: Geometry = Sphere::new(Point3D::zero(), 1.0).unwrap().into();
        assert_eq!(default_diff_method(&sphere), DiffMethod::finite_difference());
        let circle: Geometry = Circle::xy(Point3D::zero(), 1.0).unwrap().into();
        assert_eq!(default_diff_method(&circle), DiffMethod::Analytical);
    }
}
