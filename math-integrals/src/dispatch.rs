//! Entry points and routing of integrals
//!
//! An integral is resolved in three steps:
//!
//! 1. pick the rule and differentiation method (explicit or default) and
//!    reject unsupported choices before any numerical work;
//! 2. evaluate the integrand once at an interior point to capture the shape
//!    and unit of its values;
//! 3. route the geometry to the generic path or to a specialization, sum the
//!    flat components and rebuild a value carrying the unit `unit(f)·m^N`.

use crate::differential::{DiffMethod, default_diff_method, differential_value, supports_analytical};
use crate::error::{IntegralError, Result};
use crate::integrand::IntegrandValue;
use crate::rules::{IntegrationRule, RuleKind, default_rule};
use crate::specializations::{bezier, composite, discretized, polyline, simplex, unbounded};
use math_geometry::{BezierEvaluation, Geometry, GeometryKind, Parametrized, Point3D, Unit};

/// Optional overrides for an integral
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationOptions {
    /// Rule; defaults to [`default_rule`] of the parametric dimension
    pub rule: Option<IntegrationRule>,
    /// Differentiation method; defaults to [`default_diff_method`]
    pub diff_method: Option<DiffMethod>,
    /// Evaluation algorithm for Bezier curves
    pub bezier_evaluation: BezierEvaluation,
}

impl IntegrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: impl Into<IntegrationRule>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn with_diff_method(mut self, method: DiffMethod) -> Self {
        self.diff_method = Some(method);
        self
    }

    pub fn with_bezier_evaluation(mut self, evaluation: BezierEvaluation) -> Self {
        self.bezier_evaluation = evaluation;
        self
    }
}

/// Integrand with its output flattened to `ncomp` unit-free components
pub(crate) type Sampler<'a> = dyn Fn(&Point3D, &mut [f64]) -> Result<()> + Sync + 'a;

/// Everything a specialization needs to integrate one geometry
pub(crate) struct Context<'a> {
    pub sample: &'a Sampler<'a>,
    pub rule: &'a IntegrationRule,
    pub method: DiffMethod,
    pub bezier: BezierEvaluation,
    pub ncomp: usize,
}

/// How a geometry is integrated with a given rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Generic,
    Unbounded,
    Polyline,
    Bezier,
    Simplex,
    Composite,
    Discretized,
    Unsupported,
}

/// Routing table over geometry kind and rule kind
pub(crate) fn route(kind: GeometryKind, rule: RuleKind, paramdim: usize) -> Route {
    use GeometryKind as G;
    match (kind, rule) {
        (G::Tetrahedron, RuleKind::GaussKronrod) => Route::Unsupported,
        (G::CylinderSurface, RuleKind::GaussLegendre) => Route::Unsupported,
        (G::Line | G::Ray | G::Plane, _) => Route::Unbounded,
        (G::Ring | G::Rope, _) => Route::Polyline,
        (G::BezierCurve, _) => Route::Bezier,
        (G::Triangle | G::Tetrahedron, _) => Route::Simplex,
        (G::CylinderSurface | G::ConeSurface | G::FrustumSurface, _) => Route::Composite,
        (G::PolyArea | G::Mesh | G::Set, _) => Route::Discretized,
        (_, RuleKind::GaussKronrod) if paramdim >= 3 => Route::Unsupported,
        _ => Route::Generic,
    }
}

/// Route `geometry`, failing on unsupported combinations. Domains are
/// checked element by element.
pub(crate) fn check_route(geometry: &Geometry, rule: &IntegrationRule) -> Result<Route> {
    let route = route(geometry.kind(), rule.kind(), geometry.paramdim());
    match route {
        Route::Unsupported => Err(IntegralError::UnsupportedCombination {
            geometry: geometry.name(),
            rule: rule.kind().name(),
        }),
        Route::Discretized if !matches!(geometry, Geometry::PolyArea(_)) => {
            for element in geometry.discretize()? {
                check_route(&element, rule)?;
            }
            Ok(route)
        }
        _ => Ok(route),
    }
}

fn check_diff_method(geometry: &Geometry, method: DiffMethod) -> Result<()> {
    method.validate()?;
    if method == DiffMethod::Analytical && !supports_analytical(geometry) {
        return Err(IntegralError::UnsupportedDiffMethod {
            geometry: geometry.name(),
        });
    }
    Ok(())
}

/// Integrate `f` over `geometry` with default options
///
/// ```
/// use math_geometry::{Circle, Geometry, Point3D};
/// use math_integrals::integral;
///
/// let circle: Geometry = Circle::xy(Point3D::zero(), 2.5).unwrap().into();
/// let length: f64 = integral(|_| 1.0, &circle).unwrap();
/// assert!((length - 5.0 * std::f64::consts::PI).abs() < 1e-10);
/// ```
pub fn integral<F, V>(f: F, geometry: &Geometry) -> Result<V>
where
    F: Fn(&Point3D) -> V + Sync,
    V: IntegrandValue,
{
    integral_with(f, geometry, &IntegrationOptions::default())
}

/// Integrate `f` over `geometry` with explicit options
pub fn integral_with<F, V>(f: F, geometry: &Geometry, options: &IntegrationOptions) -> Result<V>
where
    F: Fn(&Point3D) -> V + Sync,
    V: IntegrandValue,
{
    let paramdim = geometry.paramdim();
    let rule = options
        .rule
        .clone()
        .unwrap_or_else(|| default_rule(paramdim));
    let method = options
        .diff_method
        .unwrap_or_else(|| default_diff_method(geometry));

    check_diff_method(geometry, method)?;
    let route = check_route(geometry, &rule)?;
    log::debug!(
        "integrating {} (paramdim {}) with {} and {}: {:?} route",
        geometry.name(),
        paramdim,
        rule,
        method,
        route
    );

    let template = f(&geometry.interior_point()?);
    let ncomp = template.num_components();

    let sample = |p: &Point3D, out: &mut [f64]| -> Result<()> {
        let value = f(p);
        let n = value.num_components();
        if n != ncomp {
            return Err(IntegralError::InvalidParameter {
                parameter: "integrand",
                message: format!("returned {} components, expected {}", n, ncomp),
            });
        }
        value.write_components(out);
        Ok(())
    };
    let ctx = Context {
        sample: &sample,
        rule: &rule,
        method,
        bezier: options.bezier_evaluation,
        ncomp,
    };

    let components = integrate_routed(&ctx, geometry, route)?;
    let unit = Unit::METER.powi(paramdim as i32);
    Ok(V::from_components(&template, &components).with_measure_unit(unit))
}

/// Integrate one geometry already validated for `ctx.rule`
pub(crate) fn integrate_geometry(ctx: &Context<'_>, geometry: &Geometry) -> Result<Vec<f64>> {
    let route = check_route(geometry, ctx.rule)?;
    integrate_routed(ctx, geometry, route)
}

fn integrate_routed(ctx: &Context<'_>, geometry: &Geometry, route: Route) -> Result<Vec<f64>> {
    match (route, geometry) {
        (Route::Unbounded, Geometry::Line(line)) => unbounded::integrate_line(ctx, line),
        (Route::Unbounded, Geometry::Ray(ray)) => unbounded::integrate_ray(ctx, ray),
        (Route::Unbounded, Geometry::Plane(plane)) => unbounded::integrate_plane(ctx, plane),
        (Route::Polyline, Geometry::Ring(ring)) => polyline::integrate(ctx, &ring.segments()),
        (Route::Polyline, Geometry::Rope(rope)) => polyline::integrate(ctx, &rope.segments()),
        (Route::Bezier, Geometry::BezierCurve(curve)) => bezier::integrate(ctx, curve),
        (Route::Simplex, Geometry::Triangle(triangle)) => simplex::integrate_triangle(ctx, triangle),
        (Route::Simplex, Geometry::Tetrahedron(tet)) => simplex::integrate_tetrahedron(ctx, tet),
        (Route::Composite, _) => composite::integrate(ctx, geometry),
        (Route::Discretized, _) => discretized::integrate(ctx, geometry),
        (Route::Unsupported, _) => Err(IntegralError::UnsupportedCombination {
            geometry: geometry.name(),
            rule: ctx.rule.kind().name(),
        }),
        _ => {
            let axes = vec![Axis::Unit; geometry.paramdim()];
            integrate_parametric(ctx, geometry, &axes)
        }
    }
}

/// Parameter range of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    /// `[0, 1]`
    Unit,
    /// `(-∞, ∞)`
    Real,
    /// `[0, ∞)`
    HalfLine,
}

impl Axis {
    /// Integration bounds in rule space
    fn bounds(self, infinite_ok: bool) -> (f64, f64) {
        match (self, infinite_ok) {
            (Axis::Unit, _) => (0.0, 1.0),
            (Axis::Real, true) => (f64::NEG_INFINITY, f64::INFINITY),
            (Axis::HalfLine, true) => (0.0, f64::INFINITY),
            (Axis::Real, false) => (-1.0, 1.0),
            (Axis::HalfLine, false) => (0.0, 1.0),
        }
    }

    /// Map a rule-space coordinate to the parameter and the Jacobian factor
    /// of the map. Unbounded axes on finite rules use `x = t / (1 - t²)`.
    fn map(self, t: f64, infinite_ok: bool) -> (f64, f64) {
        match (self, infinite_ok) {
            (Axis::Unit, _) | (_, true) => (t, 1.0),
            (Axis::Real | Axis::HalfLine, false) => {
                let d = 1.0 - t * t;
                (t / d, (1.0 + t * t) / (d * d))
            }
        }
    }
}

/// Integrate `t ↦ f(g(t))·differential(g, t)` over the parameter axes
pub(crate) fn integrate_parametric<G>(ctx: &Context<'_>, geometry: &G, axes: &[Axis]) -> Result<Vec<f64>>
where
    G: Parametrized + Sync + ?Sized,
{
    let infinite_ok = ctx.rule.handles_infinite_bounds();
    let (lower, upper): (Vec<f64>, Vec<f64>) = axes.iter().map(|a| a.bounds(infinite_ok)).unzip();

    let kernel = |t: &[f64], out: &mut [f64]| -> Result<()> {
        let mut params = Vec::with_capacity(t.len());
        let mut factor = 1.0;
        for (axis, &ti) in axes.iter().zip(t) {
            let (x, jac) = axis.map(ti, infinite_ok);
            params.push(x);
            factor *= jac;
        }
        let p = geometry.point(&params)?;
        (ctx.sample)(&p, out)?;
        let scale = factor * differential_value(geometry, &params, ctx.method)?;
        out.iter_mut().for_each(|v| *v *= scale);
        Ok(())
    };

    let result = ctx.rule.integrate_box(&kernel, &lower, &upper, ctx.ncomp)?;
    Ok(result.integral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GaussKronrod, GaussLegendre, HAdaptiveCubature};
    use approx::assert_relative_eq;
    use math_geometry::{Ball, Quantity, Segment, Sphere, Tetrahedron};

    #[test]
    fn test_route_table() {
        assert_eq!(route(GeometryKind::Tetrahedron, RuleKind::GaussKronrod, 3), Route::Unsupported);
        assert_eq!(route(GeometryKind::Tetrahedron, RuleKind::GaussLegendre, 3), Route::Simplex);
        assert_eq!(route(GeometryKind::CylinderSurface, RuleKind::GaussLegendre, 2), Route::Unsupported);
        assert_eq!(route(GeometryKind::CylinderSurface, RuleKind::HAdaptiveCubature, 2), Route::Composite);
        assert_eq!(route(GeometryKind::Ball, RuleKind::GaussKronrod, 3), Route::Unsupported);
        assert_eq!(route(GeometryKind::Sphere, RuleKind::GaussKronrod, 2), Route::Generic);
        assert_eq!(route(GeometryKind::Plane, RuleKind::GaussLegendre, 2), Route::Unbounded);
        assert_eq!(route(GeometryKind::Mesh, RuleKind::GaussKronrod, 3), Route::Discretized);
    }

    #[test]
    fn test_axis_map() {
        assert_eq!(Axis::Real.map(0.3, true), (0.3, 1.0));
        let (x, jac) = Axis::Real.map(0.5, false);
        assert_relative_eq!(x, 0.5 / 0.75);
        assert_relative_eq!(jac, 1.25 / 0.5625);
        assert_eq!(Axis::HalfLine.bounds(false), (0.0, 1.0));
    }

    #[test]
    fn test_segment_length_all_rules() {
        let g: Geometry = Segment::new(Point3D::zero(), Point3D::new(3.0, 4.0, 0.0)).into();
        let rules: Vec<IntegrationRule> = vec![
            GaussKronrod::new().into(),
            GaussLegendre::new(5).unwrap().into(),
            HAdaptiveCubature::new().into(),
        ];
        for rule in rules {
            let opts = IntegrationOptions::new().with_rule(rule);
            let length: f64 = integral_with(|_| 1.0, &g, &opts).unwrap();
            assert_relative_eq!(length, 5.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_unit_attached() {
        let g: Geometry = Ball::new(Point3D::zero(), 1.0).unwrap().into();
        let opts = IntegrationOptions::new().with_rule(GaussLegendre::new(8).unwrap());
        let q: Quantity<f64> = integral_with(|_| 2.0 * Unit::KELVIN, &g, &opts).unwrap();
        assert_eq!(q.unit, Unit::KELVIN * Unit::METER.powi(3));
        assert_relative_eq!(q.value, 2.0 * 4.0 / 3.0 * std::f64::consts::PI, max_relative = 1e-6);
    }

    #[test]
    fn test_unsupported_rejected_before_evaluation() {
        let tet: Geometry = Tetrahedron::new(
            Point3D::zero(),
            Point3D::unit_x(),
            Point3D::unit_y(),
            Point3D::unit_z(),
        )
        .into();
        let opts = IntegrationOptions::new().with_rule(GaussKronrod::new());
        let calls = std::sync::atomic::AtomicUsize::new(0);
        let err = integral_with(
            |_| {
                calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                1.0
            },
            &tet,
            &opts,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not supported"));
        assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[test]
    fn test_analytical_rejected_without_closed_form() {
        let g: Geometry = Sphere::new(Point3D::zero(), 1.0).unwrap().into();
        let opts = IntegrationOptions::new().with_diff_method(DiffMethod::Analytical);
        let err = integral_with(|_| 1.0, &g, &opts).unwrap_err();
        assert!(err.to_string().contains("requires diff_method=FiniteDifference"));
    }

    #[test]
    fn test_inconsistent_integrand_output() {
        let g: Geometry = Segment::new(Point3D::zero(), Point3D::unit_x()).into();
        let err = integral(
            |p: &Point3D| ndarray::Array1::<f64>::zeros(if p.x > 0.6 { 3 } else { 2 }),
            &g,
        )
        .unwrap_err();
        assert!(matches!(err, IntegralError::InvalidParameter { parameter: "integrand", .. }));
    }
}
