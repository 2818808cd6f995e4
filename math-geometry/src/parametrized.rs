//! The parametrization capability shared by every geometry

use crate::error::{GeometryError, Result};
use crate::types::Point3D;
use serde::{Deserialize, Serialize};

/// Classification of a geometry by its parametric dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Curve,
    Surface,
    Solid,
}

impl Rank {
    pub fn from_paramdim(paramdim: usize) -> Option<Rank> {
        match paramdim {
            1 => Some(Rank::Curve),
            2 => Some(Rank::Surface),
            3 => Some(Rank::Solid),
            _ => None,
        }
    }
}

/// A map from a canonical parameter domain into 3-D space.
///
/// The canonical domain is `[0, 1]^N` unless a shape documents otherwise
/// (`Line`, `Ray`, `Plane` are unbounded, `Triangle` and `Tetrahedron` use
/// barycentric coordinates).
pub trait Parametrized {
    /// Type name used in messages
    fn name(&self) -> &'static str;

    /// Number of parameters `N`
    fn paramdim(&self) -> usize;

    /// Evaluate the parametrization
    fn point(&self, params: &[f64]) -> Result<Point3D>;

    /// Whether [`Parametrized::analytical_jacobian`] has a closed form
    fn has_analytical_jacobian(&self) -> bool {
        false
    }

    /// Closed-form partial derivatives, one vector per parametric axis
    fn analytical_jacobian(&self, _params: &[f64]) -> Result<Vec<Point3D>> {
        Err(GeometryError::NoAnalyticalJacobian {
            geometry: self.name(),
        })
    }

    /// Length, area or volume; `f64::INFINITY` for unbounded shapes and
    /// `None` when unknown
    fn measure(&self) -> Option<f64>;

    /// Parameters well inside the canonical domain
    fn interior_params(&self) -> Vec<f64> {
        vec![0.5; self.paramdim()]
    }

    /// A point inside the geometry
    fn interior_point(&self) -> Result<Point3D> {
        self.point(&self.interior_params())
    }

    fn rank(&self) -> Option<Rank> {
        Rank::from_paramdim(self.paramdim())
    }

    fn is_curve(&self) -> bool {
        self.rank() == Some(Rank::Curve)
    }

    fn is_surface(&self) -> bool {
        self.rank() == Some(Rank::Surface)
    }

    fn is_solid(&self) -> bool {
        self.rank() == Some(Rank::Solid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank() {
        assert_eq!(Rank::from_paramdim(1), Some(Rank::Curve));
        assert_eq!(Rank::from_paramdim(3), Some(Rank::Solid));
        assert_eq!(Rank::from_paramdim(0), None);
        assert_eq!(Rank::from_paramdim(4), None);
    }
}
