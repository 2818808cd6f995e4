//! Magnitude of the exterior product of tangent vectors
//!
//! For `k` vectors in 3-D the magnitude of `v₁ ∧ … ∧ v_k` is the
//! `k`-dimensional volume of the parallelotope they span.

use math_geometry::Point3D;

/// `|v₁ ∧ … ∧ v_k|`: the norm for one vector, the cross-product norm for two,
/// the absolute triple product for three, and `sqrt(det(G))` of the Gram
/// matrix otherwise.
pub fn wedge_magnitude(vectors: &[Point3D]) -> f64 {
    match vectors {
        [] => 1.0,
        [a] => a.length(),
        [a, b] => a.cross(b).length(),
        [a, b, c] => a.dot(&b.cross(c)).abs(),
        _ => gram_determinant(vectors).max(0.0).sqrt(),
    }
}

/// Determinant of `G[i][j] = vᵢ · vⱼ` by Gaussian elimination with partial
/// pivoting
pub fn gram_determinant(vectors: &[Point3D]) -> f64 {
    let k = vectors.len();
    let mut g: Vec<Vec<f64>> = vectors
        .iter()
        .map(|vi| vectors.iter().map(|vj| vi.dot(vj)).collect())
        .collect();

    let mut det = 1.0;
    for col in 0..k {
        let pivot = (col..k)
            .max_by(|&a, &b| g[a][col].abs().total_cmp(&g[b][col].abs()))
            .unwrap_or(col);
        if g[pivot][col] == 0.0 {
            return 0.0;
        }
        if pivot != col {
            g.swap(pivot, col);
            det = -det;
        }
        det *= g[col][col];
        for row in col + 1..k {
            let factor = g[row][col] / g[col][col];
            for c in col..k {
                g[row][c] -= factor * g[col][c];
            }
        }
    }
    det
}
