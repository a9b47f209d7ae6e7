use nalgebra::DMatrix;

// ---------------------------------------------------------------------------
// Standardization (zero mean, unit variance per column)
// ---------------------------------------------------------------------------

/// Build a dense matrix from row-major feature vectors, replacing NaN
/// (missing cells) with zero.
pub fn matrix_from_rows(rows: &[Vec<f64>], n_cols: usize) -> DMatrix<f64> {
    DMatrix::from_fn(rows.len(), n_cols, |r, c| {
        let v = rows[r].get(c).copied().unwrap_or(f64::NAN);
        if v.is_finite() { v } else { 0.0 }
    })
}

/// Z-score each column in place: subtract the column mean, divide by the
/// population standard deviation. Zero-variance columns standardize to 0.
pub fn standardize(m: &mut DMatrix<f64>) {
    let n_rows = m.nrows();
    if n_rows == 0 {
        return;
    }
    for c in 0..m.ncols() {
        let mut col = m.column_mut(c);
        let mean = col.iter().sum::<f64>() / n_rows as f64;
        let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n_rows as f64;
        let std = var.sqrt();
        for v in col.iter_mut() {
            *v = if std > 0.0 { (*v - mean) / std } else { 0.0 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_cells_are_zero_filled() {
        let m = matrix_from_rows(&[vec![1.0, f64::NAN], vec![f64::NAN, 2.0]], 2);
        assert_eq!(m[(0, 1)], 0.0);
        assert_eq!(m[(1, 0)], 0.0);
        assert_eq!(m[(0, 0)], 1.0);
    }

    #[test]
    fn standardized_columns_have_zero_mean_unit_variance() {
        let mut m = matrix_from_rows(&[vec![1.0], vec![2.0], vec![3.0], vec![4.0]], 1);
        standardize(&mut m);

        let mean: f64 = m.column(0).iter().sum::<f64>() / 4.0;
        let var: f64 = m.column(0).iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-12);
        assert!((var - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_column_standardizes_to_zero() {
        let mut m = matrix_from_rows(&[vec![0.5], vec![0.5], vec![0.5]], 1);
        standardize(&mut m);
        assert!(m.column(0).iter().all(|&v| v == 0.0));
    }
}
