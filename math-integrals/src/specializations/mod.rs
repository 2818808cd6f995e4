//! Geometry-specific integration paths
//!
//! The generic path integrates over `[0, 1]^N`. Geometries whose parameter
//! domain is not the unit box, that are made of several pieces, or that
//! integrate better with a change of variables are handled here.

pub(crate) mod bezier;
pub(crate) mod composite;
pub(crate) mod discretized;
pub(crate) mod polyline;
pub(crate) mod simplex;
pub(crate) mod unbounded;

/// Add `part` into `total` component-wise
pub(crate) fn accumulate(total: &mut [f64], part: &[f64]) {
    for (t, p) in total.iter_mut().zip(part) {
        *t += p;
    }
}
