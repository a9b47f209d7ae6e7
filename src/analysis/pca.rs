//! Principal component analysis for the 2-D projection chart.
//!
//! The feature dimension is small (a few dozen proportion columns at most),
//! so we take the straightforward route: eigendecompose the covariance
//! matrix of the standardized data with nalgebra's `SymmetricEigen` and keep
//! the two leading eigenvectors.

use nalgebra::{DMatrix, SymmetricEigen};

/// Result of projecting the view onto the leading principal components.
#[derive(Debug, Clone)]
pub struct Projection {
    /// One (pc1, pc2) score pair per input row, in input order.
    pub scores: Vec<[f64; 2]>,
    /// Fraction of total variance captured by each kept component.
    pub explained_variance_ratio: [f64; 2],
}

/// Fit a 2-component PCA on the (already standardized) matrix and return
/// the per-row scores.
///
/// Degenerate shapes are handled without error: with fewer than two rows or
/// columns the missing component is all-zero, and a constant matrix
/// projects every row to the origin.
pub fn project_2d(data: &DMatrix<f64>) -> Projection {
    let n_rows = data.nrows();
    let n_cols = data.ncols();

    if n_rows == 0 || n_cols == 0 {
        return Projection {
            scores: vec![[0.0, 0.0]; n_rows],
            explained_variance_ratio: [0.0, 0.0],
        };
    }

    // The caller standardizes, but center again so the decomposition stays
    // valid for raw input too.
    let mut centered = data.clone();
    for c in 0..n_cols {
        let mean = centered.column(c).iter().sum::<f64>() / n_rows as f64;
        for v in centered.column_mut(c).iter_mut() {
            *v -= mean;
        }
    }

    let (components, explained_variance_ratio) = principal_components(&centered);

    let score_matrix = centered * &components;
    let scores = (0..n_rows)
        .map(|r| [score_matrix[(r, 0)], score_matrix[(r, 1)]])
        .collect();

    Projection {
        scores,
        explained_variance_ratio,
    }
}

/// The two leading eigenvectors of the covariance matrix of `centered`, as
/// the columns of an `n_cols × 2` matrix, plus the fraction of total
/// variance each captures. With a single input column the second component
/// is all-zero.
fn principal_components(centered: &DMatrix<f64>) -> (DMatrix<f64>, [f64; 2]) {
    let n_rows = centered.nrows();
    let n_cols = centered.ncols();

    let denom = (n_rows.max(2) - 1) as f64;
    let cov = (centered.transpose() * centered) / denom;

    let eig = SymmetricEigen::new(cov);
    let total_variance: f64 = eig.eigenvalues.iter().sum();

    // Eigenvalues come out unsorted; rank component indices by descending value.
    let mut order: Vec<usize> = (0..n_cols).collect();
    order.sort_by(|&a, &b| eig.eigenvalues[b].total_cmp(&eig.eigenvalues[a]));

    let mut components = DMatrix::zeros(n_cols, 2);
    let mut ratio = [0.0; 2];
    for (k, &idx) in order.iter().take(2).enumerate() {
        components.set_column(k, &eig.eigenvectors.column(idx));
        if total_variance > 0.0 {
            ratio[k] = eig.eigenvalues[idx].max(0.0) / total_variance;
        }
    }

    (components, ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scaling::{matrix_from_rows, standardize};

    #[test]
    fn score_count_matches_row_count() {
        let rows: Vec<Vec<f64>> = (0..7)
            .map(|i| vec![i as f64, (i * i) as f64, 1.0])
            .collect();
        let mut m = matrix_from_rows(&rows, 3);
        standardize(&mut m);
        let proj = project_2d(&m);
        assert_eq!(proj.scores.len(), 7);
    }

    #[test]
    fn kept_components_are_orthonormal() {
        let rows: Vec<Vec<f64>> = (0..8)
            .map(|i| {
                vec![
                    i as f64,
                    (i * i) as f64 * 0.1,
                    (8 - i) as f64 * 0.3,
                ]
            })
            .collect();
        let m = matrix_from_rows(&rows, 3);
        let (components, _) = principal_components(&m);

        let c1 = components.column(0);
        let c2 = components.column(1);
        assert!((c1.norm() - 1.0).abs() < 1e-9);
        assert!((c2.norm() - 1.0).abs() < 1e-9);
        assert!(c1.dot(&c2).abs() < 1e-9);
    }

    #[test]
    fn first_component_captures_dominant_direction() {
        // Points along y = x: pc1 should capture (almost) all variance.
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, i as f64]).collect();
        let m = matrix_from_rows(&rows, 2);
        let proj = project_2d(&m);
        assert!(proj.explained_variance_ratio[0] > 0.999);
        assert!(proj.explained_variance_ratio[1] < 1e-9);
    }

    #[test]
    fn constant_matrix_projects_to_origin() {
        let rows = vec![vec![0.3, 0.7]; 5];
        let m = matrix_from_rows(&rows, 2);
        let proj = project_2d(&m);
        for s in proj.scores {
            assert!(s[0].abs() < 1e-12 && s[1].abs() < 1e-12);
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let rows: Vec<Vec<f64>> = (0..6)
            .map(|i| vec![(i % 3) as f64, (i % 2) as f64, i as f64 * 0.1])
            .collect();
        let m = matrix_from_rows(&rows, 3);
        let a = project_2d(&m);
        let b = project_2d(&m);
        assert_eq!(a.scores, b.scores);
    }

    #[test]
    fn single_column_gives_zero_second_component() {
        let rows: Vec<Vec<f64>> = (0..4).map(|i| vec![i as f64]).collect();
        let m = matrix_from_rows(&rows, 1);
        let proj = project_2d(&m);
        assert!(proj.scores.iter().all(|s| s[1] == 0.0));
    }
}
