use serde::{Deserialize, Serialize};

/// Sparse feature vector of fixed dimensionality. `indices` are strictly
/// increasing and parallel to `values`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    indices: Vec<u32>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build from `(index, value)` pairs; zero values are dropped, pairs are
    /// sorted, and indices at or beyond `dim` are discarded.
    pub fn from_pairs(dim: usize, mut pairs: Vec<(u32, f64)>) -> Self {
        pairs.retain(|&(i, v)| (i as usize) < dim && v != 0.0);
        pairs.sort_by_key(|&(i, _)| i);
        pairs.dedup_by_key(|&mut (i, _)| i);
        let (indices, values) = pairs.into_iter().unzip();
        Self {
            dim,
            indices,
            values,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn get(&self, index: u32) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Dot product with a dense weight vector of the same dimensionality.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.iter()
            .map(|(i, v)| dense.get(i as usize).copied().unwrap_or(0.0) * v)
            .sum()
    }

    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}
