//! Integration rules
//!
//! Each rule is a configuration object that integrates a component-valued
//! kernel over an axis-aligned parameter box:
//!
//! - [`GaussLegendre`]: fixed tensor-product rule, no error control
//! - [`GaussKronrod`]: adaptive G7-K15 in one dimension, nested in two
//! - [`HAdaptiveCubature`]: adaptive Genz-Malik cubature in any dimension

mod cubature;
mod gauss_kronrod;
mod gauss_legendre;

pub use cubature::HAdaptiveCubature;
pub use gauss_kronrod::GaussKronrod;
pub use gauss_legendre::GaussLegendre;

use crate::error::Result;
use math_quadrature::QuadResult;
use std::fmt;

/// Integrand as seen by a rule: writes the components at a parameter point
pub(crate) type Kernel<'a> = dyn Fn(&[f64], &mut [f64]) -> Result<()> + Sync + 'a;

/// Fieldless tag of an [`IntegrationRule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    GaussKronrod,
    GaussLegendre,
    HAdaptiveCubature,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::GaussKronrod => "GaussKronrod",
            RuleKind::GaussLegendre => "GaussLegendre",
            RuleKind::HAdaptiveCubature => "HAdaptiveCubature",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numerical integration rule
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrationRule {
    GaussKronrod(GaussKronrod),
    GaussLegendre(GaussLegendre),
    HAdaptiveCubature(HAdaptiveCubature),
}

impl IntegrationRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            IntegrationRule::GaussKronrod(_) => RuleKind::GaussKronrod,
            IntegrationRule::GaussLegendre(_) => RuleKind::GaussLegendre,
            IntegrationRule::HAdaptiveCubature(_) => RuleKind::HAdaptiveCubature,
        }
    }

    /// Whether the rule accepts infinite bounds directly
    pub fn handles_infinite_bounds(&self) -> bool {
        matches!(self, IntegrationRule::GaussKronrod(_))
    }

    /// Integrate `kernel` over the box `[lower, upper]`
    pub(crate) fn integrate_box(
        &self,
        kernel: &Kernel<'_>,
        lower: &[f64],
        upper: &[f64],
        ncomp: usize,
    ) -> Result<QuadResult> {
        match self {
            IntegrationRule::GaussKronrod(rule) => rule.integrate_box(kernel, lower, upper, ncomp),
            IntegrationRule::GaussLegendre(rule) => rule.integrate_box(kernel, lower, upper, ncomp),
            IntegrationRule::HAdaptiveCubature(rule) => {
                rule.integrate_box(kernel, lower, upper, ncomp)
            }
        }
    }
}

impl fmt::Display for IntegrationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationRule::GaussLegendre(rule) => write!(f, "GaussLegendre({})", rule.n()),
            other => f.write_str(other.kind().name()),
        }
    }
}

impl From<GaussKronrod> for IntegrationRule {
    fn from(rule: GaussKronrod) -> Self {
        IntegrationRule::GaussKronrod(rule)
    }
}

impl From<GaussLegendre> for IntegrationRule {
    fn from(rule: GaussLegendre) -> Self {
        IntegrationRule::GaussLegendre(rule)
    }
}

impl From<HAdaptiveCubature> for IntegrationRule {
    fn from(rule: HAdaptiveCubature) -> Self {
        IntegrationRule::HAdaptiveCubature(rule)
    }
}

/// Gauss-Kronrod for curves, h-adaptive cubature otherwise
pub fn default_rule(paramdim: usize) -> IntegrationRule {
    if paramdim == 1 {
        GaussKronrod::new().into()
    } else {
        HAdaptiveCubature::new().into()
    }
}

pub(crate) fn check_box(context: &'static str, lower: &[f64], upper: &[f64]) -> Result<()> {
    if lower.len() != upper.len() || lower.is_empty() {
        return Err(math_quadrature::QuadratureError::DimensionMismatch {
            context,
            lower_len: lower.len(),
            upper_len: upper.len(),
        }
        .into());
    }
    Ok(())
}
