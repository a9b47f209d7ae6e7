//! Single decision-tree classifier used only for its feature importances.
//!
//! The heatmap ranks proportion features by how much each one helps separate
//! the clusters, measured as the Gini impurity reduction accumulated over a
//! CART fit. The tree is grown to purity with midpoint thresholds and no
//! randomness, so refitting on identical input gives identical importances.

/// A fitted classification tree over row-major feature data.
#[derive(Debug)]
pub struct DecisionTree {
    n_features: usize,
    /// Per-feature accumulated weighted impurity decrease.
    importance: Vec<f64>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    /// Weighted impurity decrease relative to the parent node.
    gain: f64,
}

impl DecisionTree {
    /// Fit on `x` (rows × features, NaN already zero-filled) with integer
    /// class targets `y` (one per row).
    pub fn fit(x: &[Vec<f64>], y: &[u32]) -> Self {
        assert_eq!(x.len(), y.len(), "feature/target row mismatch");
        let n_features = x.first().map_or(0, Vec::len);
        let mut tree = DecisionTree {
            n_features,
            importance: vec![0.0; n_features],
        };

        let all_rows: Vec<usize> = (0..x.len()).collect();
        tree.grow(x, y, &all_rows);
        tree
    }

    /// Normalized impurity-based importances, aligned with the feature
    /// columns of `x`. Sums to 1 when the fit produced any split, all zero
    /// otherwise (single class, empty input, or inseparable data).
    pub fn feature_importances(&self) -> Vec<f64> {
        let total: f64 = self.importance.iter().sum();
        if total > 0.0 {
            self.importance.iter().map(|v| v / total).collect()
        } else {
            vec![0.0; self.n_features]
        }
    }

    /// Recursively split `rows`, accumulating impurity decreases.
    fn grow(&mut self, x: &[Vec<f64>], y: &[u32], rows: &[usize]) {
        if rows.len() < 2 || gini(y, rows) == 0.0 {
            return;
        }
        let Some(split) = self.best_split(x, y, rows) else {
            return;
        };

        self.importance[split.feature] += split.gain * rows.len() as f64;

        let (left, right): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .copied()
            .partition(|&r| x[r][split.feature] <= split.threshold);
        self.grow(x, y, &left);
        self.grow(x, y, &right);
    }

    /// Exhaustive best split: every feature, every midpoint between adjacent
    /// distinct values. Ties keep the first candidate (lowest feature index,
    /// then lowest threshold) so the fit depends only on the input.
    fn best_split(&self, x: &[Vec<f64>], y: &[u32], rows: &[usize]) -> Option<SplitCandidate> {
        let parent_impurity = gini(y, rows);
        let n = rows.len() as f64;
        let mut best: Option<SplitCandidate> = None;

        for feature in 0..self.n_features {
            let mut values: Vec<f64> = rows.iter().map(|&r| x[r][feature]).collect();
            values.sort_by(f64::total_cmp);
            values.dedup();

            for pair in values.windows(2) {
                let threshold = (pair[0] + pair[1]) / 2.0;
                let (left, right): (Vec<usize>, Vec<usize>) = rows
                    .iter()
                    .copied()
                    .partition(|&r| x[r][feature] <= threshold);
                if left.is_empty() || right.is_empty() {
                    continue;
                }

                let weighted = (left.len() as f64 * gini(y, &left)
                    + right.len() as f64 * gini(y, &right))
                    / n;
                let gain = parent_impurity - weighted;

                if gain > best.as_ref().map_or(1e-12, |b| b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        gain,
                    });
                }
            }
        }
        best
    }
}

/// Gini impurity of the class labels at the given rows.
fn gini(y: &[u32], rows: &[usize]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let mut counts: std::collections::BTreeMap<u32, usize> = std::collections::BTreeMap::new();
    for &r in rows {
        *counts.entry(y[r]).or_default() += 1;
    }
    let n = rows.len() as f64;
    1.0 - counts
        .values()
        .map(|&c| (c as f64 / n).powi(2))
        .sum::<f64>()
}

/// The `k` highest-importance features as `(column index, score)` pairs,
/// descending by score, ties broken by column order. Returns fewer than `k`
/// entries only when fewer features exist.
pub fn top_features(importances: &[f64], k: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = importances.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two clusters cleanly separated on feature 0; feature 1 is noise.
    fn separable() -> (Vec<Vec<f64>>, Vec<u32>) {
        let x = vec![
            vec![0.1, 0.5],
            vec![0.2, 0.9],
            vec![0.15, 0.1],
            vec![0.8, 0.5],
            vec![0.9, 0.9],
            vec![0.85, 0.1],
        ];
        let y = vec![0, 0, 0, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn separating_feature_gets_all_importance() {
        let (x, y) = separable();
        let tree = DecisionTree::fit(&x, &y);
        let imp = tree.feature_importances();
        assert!((imp[0] - 1.0).abs() < 1e-12);
        assert_eq!(imp[1], 0.0);
    }

    #[test]
    fn importances_sum_to_one_when_split_exists() {
        let x = vec![
            vec![0.1, 0.9],
            vec![0.2, 0.1],
            vec![0.9, 0.8],
            vec![0.8, 0.2],
        ];
        let y = vec![0, 1, 2, 3];
        let tree = DecisionTree::fit(&x, &y);
        let sum: f64 = tree.feature_importances().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pure_node_yields_zero_importances() {
        let x = vec![vec![0.1], vec![0.9], vec![0.5]];
        let y = vec![2, 2, 2];
        let tree = DecisionTree::fit(&x, &y);
        assert_eq!(tree.feature_importances(), vec![0.0]);
    }

    #[test]
    fn refit_is_deterministic() {
        let (x, y) = separable();
        let a = DecisionTree::fit(&x, &y).feature_importances();
        let b = DecisionTree::fit(&x, &y).feature_importances();
        assert_eq!(a, b);
    }

    #[test]
    fn top_features_returns_exactly_k_descending() {
        let imp = vec![0.1, 0.4, 0.0, 0.3, 0.2];
        let top = top_features(&imp, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0, 1);
        assert_eq!(top[1].0, 3);
        assert_eq!(top[2].0, 4);
        assert!(top[0].1 >= top[1].1 && top[1].1 >= top[2].1);
    }

    #[test]
    fn top_features_caps_at_available() {
        let imp = vec![0.5, 0.5];
        assert_eq!(top_features(&imp, 10).len(), 2);
    }
}
