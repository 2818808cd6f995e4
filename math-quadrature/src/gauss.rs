//! Gauss-Legendre quadrature points and weights
//!
//! Nodes are the roots of the Legendre polynomial P_n on [-1, 1], found by
//! Newton iteration from Chebyshev initial guesses. An n-point rule integrates
//! polynomials of degree 2n-1 exactly.

use crate::error::{QuadratureError, Result};

const NEWTON_TOLERANCE: f64 = 1e-15;
const NEWTON_MAX_ITER: usize = 100;

/// Gauss-Legendre nodes and weights on [-1, 1], sorted by node.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendreQuadrature {
    /// Quadrature nodes on [-1, 1]
    pub nodes: Vec<f64>,
    /// Quadrature weights (sum to 2)
    pub weights: Vec<f64>,
}

impl GaussLegendreQuadrature {
    /// Compute an `n`-point rule.
    ///
    /// ```
    /// use math_quadrature::GaussLegendreQuadrature;
    ///
    /// let rule = GaussLegendreQuadrature::new(5).unwrap();
    /// let value = rule.integrate(|x| x.powi(4), 0.0, 1.0);
    /// assert!((value - 0.2).abs() < 1e-14);
    /// ```
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(QuadratureError::InvalidParameter {
                parameter: "n",
                message: "need at least 1 quadrature point".to_string(),
            });
        }

        let mut nodes = vec![0.0; n];
        let mut weights = vec![0.0; n];

        // Roots are symmetric, only the non-negative half is searched.
        for i in 0..n.div_ceil(2) {
            let mut x = (std::f64::consts::PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();

            for _ in 0..NEWTON_MAX_ITER {
                let (p, dp) = legendre_eval(n, x);
                let dx = p / dp;
                x -= dx;
                if dx.abs() < NEWTON_TOLERANCE {
                    break;
                }
            }

            let (_, dp) = legendre_eval(n, x);
            let w = 2.0 / ((1.0 - x * x) * dp * dp);

            nodes[i] = -x;
            weights[i] = w;
            nodes[n - 1 - i] = x;
            weights[n - 1 - i] = w;
        }

        if n % 2 == 1 {
            nodes[n / 2] = 0.0;
        }

        Ok(Self { nodes, weights })
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over `(node, weight)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.nodes.iter().copied().zip(self.weights.iter().copied())
    }

    /// Integrate a scalar function over [a, b].
    pub fn integrate<F>(&self, f: F, a: f64, b: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let mid = 0.5 * (a + b);
        let half_width = 0.5 * (b - a);

        let sum: f64 = self.iter().map(|(x, w)| w * f(mid + half_width * x)).sum();
        sum * half_width
    }

    /// Visit every node of the `dim`-fold tensor product rule over `[-1, 1]^dim`.
    ///
    /// The callback receives the node coordinates and the product weight.
    /// Nodes are visited in lexicographic order, last axis fastest.
    pub fn for_each_tensor_node<F>(&self, dim: usize, mut f: F)
    where
        F: FnMut(&[f64], f64),
    {
        self.try_for_each_tensor_node(dim, |coords, weight| {
            f(coords, weight);
            Ok::<(), std::convert::Infallible>(())
        })
        .unwrap_or_else(|never| match never {});
    }

    /// Fallible version of [`Self::for_each_tensor_node`], stopping at the first error.
    pub fn try_for_each_tensor_node<F, E>(&self, dim: usize, mut f: F) -> std::result::Result<(), E>
    where
        F: FnMut(&[f64], f64) -> std::result::Result<(), E>,
    {
        let n = self.len();
        if dim == 0 || n == 0 {
            return Ok(());
        }

        let mut index = vec![0usize; dim];
        let mut coords: Vec<f64> = vec![self.nodes[0]; dim];

        loop {
            let weight: f64 = index.iter().map(|&i| self.weights[i]).product();
            f(&coords, weight)?;

            // Odometer increment
            let mut axis = dim;
            loop {
                if axis == 0 {
                    return Ok(());
                }
                axis -= 1;
                index[axis] += 1;
                if index[axis] < n {
                    coords[axis] = self.nodes[index[axis]];
                    break;
                }
                index[axis] = 0;
                coords[axis] = self.nodes[0];
            }
        }
    }
}

/// Evaluate Legendre polynomial P_n(x) and its derivative P_n'(x).
///
/// Three-term recurrence: (k+1) P_{k+1} = (2k+1) x P_k - k P_{k-1}.
pub fn legendre_eval(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }

    let mut p_prev = 1.0;
    let mut p_curr = x;
    for k in 1..n {
        let kf = k as f64;
        let p_next = ((2.0 * kf + 1.0) * x * p_curr - kf * p_prev) / (kf + 1.0);
        p_prev = p_curr;
        p_curr = p_next;
    }

    // P_n'(x) = n (x P_n - P_{n-1}) / (x^2 - 1)
    let dp = n as f64 * (x * p_curr - p_prev) / (x * x - 1.0);
    (p_curr, dp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_gauss_1d_integrates_polynomials() {
        // 2-point rule should exactly integrate up to degree 3
        let rule = GaussLegendreQuadrature::new(2).unwrap();
        let integral: f64 = rule.iter().map(|(x, w)| x.powi(2) * w).sum();
        assert!((integral - 2.0 / 3.0).abs() < 1e-14);
        let integral: f64 = rule.iter().map(|(x, w)| x.powi(3) * w).sum();
        assert!(integral.abs() < 1e-14);

        // 5-point rule: exact for degree 9
        let rule = GaussLegendreQuadrature::new(5).unwrap();
        let integral = rule.integrate(|x| x.powi(8), -1.0, 1.0);
        assert_relative_eq!(integral, 2.0 / 9.0, epsilon = 1e-14);
    }

    #[test]
    fn test_known_nodes() {
        let rule = GaussLegendreQuadrature::new(3).unwrap();
        assert_relative_eq!(rule.nodes[0], -(0.6_f64).sqrt(), epsilon = 1e-15);
        assert_eq!(rule.nodes[1], 0.0);
        assert_relative_eq!(rule.weights[1], 8.0 / 9.0, epsilon = 1e-15);
        assert_relative_eq!(rule.weights[2], 5.0 / 9.0, epsilon = 1e-15);
    }

    #[test]
    fn test_weights_sum_and_symmetry() {
        for n in [1, 2, 7, 20, 64, 100] {
            let rule = GaussLegendreQuadrature::new(n).unwrap();
            let sum: f64 = rule.weights.iter().sum();
            assert!((sum - 2.0).abs() < 1e-12, "n={}, sum={}", n, sum);

            for i in 0..n / 2 {
                assert!((rule.nodes[i] + rule.nodes[n - 1 - i]).abs() < 1e-13);
                assert!((rule.weights[i] - rule.weights[n - 1 - i]).abs() < 1e-13);
            }
            assert!(rule.nodes.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_zero_points_rejected() {
        let err = GaussLegendreQuadrature::new(0).unwrap_err();
        assert!(err.is_parameter_error());
    }

    #[test]
    fn test_integrate_transcendental() {
        let rule = GaussLegendreQuadrature::new(10).unwrap();
        assert_relative_eq!(rule.integrate(|x| x.sin(), 0.0, PI), 2.0, epsilon = 1e-10);
        assert_relative_eq!(
            rule.integrate(|x| x.exp(), 0.0, 1.0),
            std::f64::consts::E - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_tensor_weights_sum() {
        let rule = GaussLegendreQuadrature::new(4).unwrap();
        for dim in 1..=3 {
            let mut count = 0;
            let mut sum = 0.0;
            rule.for_each_tensor_node(dim, |_, w| {
                count += 1;
                sum += w;
            });
            assert_eq!(count, 4usize.pow(dim as u32));
            // Weights should sum to the volume of [-1,1]^dim
            assert_relative_eq!(sum, 2.0_f64.powi(dim as i32), epsilon = 1e-13);
        }
    }

    #[test]
    fn test_tensor_product_polynomial() {
        // ∫∫ x² y⁴ over [-1,1]² = (2/3)(2/5)
        let rule = GaussLegendreQuadrature::new(3).unwrap();
        let mut sum = 0.0;
        rule.for_each_tensor_node(2, |c, w| sum += w * c[0].powi(2) * c[1].powi(4));
        assert_relative_eq!(sum, 4.0 / 15.0, epsilon = 1e-14);
    }

    #[test]
    fn test_try_for_each_stops_on_error() {
        let rule = GaussLegendreQuadrature::new(3).unwrap();
        let mut visited = 0;
        let result: std::result::Result<(), &str> = rule.try_for_each_tensor_node(2, |_, _| {
            visited += 1;
            if visited == 4 { Err("stop") } else { Ok(()) }
        });
        assert_eq!(result, Err("stop"));
        assert_eq!(visited, 4);
    }
}
