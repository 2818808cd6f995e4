//! Geometries defined by a user-supplied map from `[0, 1]^N`

use crate::error::{Result, check_params, check_unit_box};
use crate::parametrized::Parametrized;
use crate::types::Point3D;
use std::fmt;
use std::sync::Arc;

/// Parametrization closure
pub type PointFn = Arc<dyn Fn(&[f64]) -> Result<Point3D> + Send + Sync>;
/// Closed-form Jacobian closure, one vector per parametric axis
pub type JacobianFn = Arc<dyn Fn(&[f64]) -> Result<Vec<Point3D>> + Send + Sync>;

/// A geometry given by an arbitrary map `[0, 1]^N → ℝ³`
///
/// ```
/// use math_geometry::{ParametricGeometry, Parametrized, Point3D};
///
/// let helix = ParametricGeometry::new(1, |t| {
///     let a = 2.0 * std::f64::consts::PI * t[0];
///     Ok(Point3D::new(a.cos(), a.sin(), t[0]))
/// });
/// assert_eq!(helix.paramdim(), 1);
/// assert!(helix.point(&[0.5]).is_ok());
/// ```
#[derive(Clone)]
pub struct ParametricGeometry {
    dim: usize,
    map: PointFn,
    jacobian: Option<JacobianFn>,
    measure: Option<f64>,
}

impl ParametricGeometry {
    pub fn new<F>(dim: usize, map: F) -> Self
    where
        F: Fn(&[f64]) -> Result<Point3D> + Send + Sync + 'static,
    {
        Self {
            dim,
            map: Arc::new(map),
            jacobian: None,
            measure: None,
        }
    }

    /// Attach a closed-form Jacobian
    pub fn with_jacobian<J>(mut self, jacobian: J) -> Self
    where
        J: Fn(&[f64]) -> Result<Vec<Point3D>> + Send + Sync + 'static,
    {
        self.jacobian = Some(Arc::new(jacobian));
        self
    }

    /// Attach a known length, area or volume
    pub fn with_measure(mut self, measure: f64) -> Self {
        self.measure = Some(measure);
        self
    }
}

impl fmt::Debug for ParametricGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParametricGeometry")
            .field("dim", &self.dim)
            .field("jacobian", &self.jacobian.is_some())
            .field("measure", &self.measure)
            .finish()
    }
}

impl Parametrized for ParametricGeometry {
    fn name(&self) -> &'static str {
        "ParametricGeometry"
    }

    fn paramdim(&self) -> usize {
        self.dim
    }

    fn point(&self, params: &[f64]) -> Result<Point3D> {
        check_unit_box(self.name(), params, self.dim)?;
        (self.map)(params)
    }

    fn has_analytical_jacobian(&self) -> bool {
        self.jacobian.is_some()
    }

    fn analytical_jacobian(&self, params: &[f64]) -> Result<Vec<Point3D>> {
        match &self.jacobian {
            Some(jacobian) => {
                check_params(self.name(), params, self.dim)?;
                jacobian(params)
            }
            None => Err(crate::GeometryError::NoAnalyticalJacobian {
                geometry: self.name(),
            }),
        }
    }

    fn measure(&self) -> Option<f64> {
        self.measure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_checks_domain() {
        let g = ParametricGeometry::new(2, |t| Ok(Point3D::new(t[0], t[1], 0.0)));
        assert!(g.point(&[0.5, 1.0]).is_ok());
        assert!(g.point(&[0.5, 1.5]).unwrap_err().is_domain_error());
        assert!(g.point(&[0.5]).is_err());
        assert!(!g.has_analytical_jacobian());
        assert!(g.analytical_jacobian(&[0.1, 0.1]).is_err());
        assert_eq!(g.measure(), None);
    }

    #[test]
    fn test_wrapper_with_jacobian() {
        let g = ParametricGeometry::new(1, |t| Ok(Point3D::new(3.0 * t[0], 0.0, 0.0)))
            .with_jacobian(|_| Ok(vec![Point3D::new(3.0, 0.0, 0.0)]))
            .with_measure(3.0);
        assert!(g.has_analytical_jacobian());
        assert_eq!(g.analytical_jacobian(&[0.2]).unwrap()[0].x, 3.0);
        assert_eq!(g.measure(), Some(3.0));
        assert!(format!("{:?}", g).contains("jacobian: true"));
    }
}
