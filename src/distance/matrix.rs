//! Dense distance matrix.

use crate::error::{Error, Result};
use crate::models::Stop;

use super::Metric;

/// Tolerance used when validating caller-supplied matrices.
const SYMMETRY_TOL: f64 = 1e-9;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per problem instance and never mutated afterwards. Matrices
/// built from stops are symmetric with a zero diagonal by construction:
/// every pair is measured once and mirrored.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::Stop;
/// use route_optimizer::distance::{DistanceMatrix, Metric};
///
/// let stops = vec![
///     Stop::new("A", 0.0, 0.0),
///     Stop::new("B", 3.0, 4.0),
///     Stop::new("C", 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_stops(&stops, Metric::Euclidean);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Measures every pair of stops with the given metric.
    pub fn from_stops(stops: &[Stop], metric: Metric) -> Self {
        let n = stops.len();
        let mut data = vec![0.0; n * n];
        fill_upper(&mut data, stops, metric);
        for i in 0..n {
            for j in (i + 1)..n {
                data[j * n + i] = data[i * n + j];
            }
        }
        Self { data, size: n }
    }

    /// Creates a matrix from explicit rows.
    ///
    /// Fails with [`Error::InvalidInput`] unless the rows form a square
    /// matrix of finite, non-negative values that is symmetric with a zero
    /// diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(Error::invalid_input(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }

        let dm = Self { data, size };
        for i in 0..size {
            if dm.get(i, i) != 0.0 {
                return Err(Error::invalid_input(format!("diagonal entry {i} is not zero")));
            }
            for j in (i + 1)..size {
                let (a, b) = (dm.get(i, j), dm.get(j, i));
                if !a.is_finite() || a < 0.0 || !b.is_finite() || b < 0.0 {
                    return Err(Error::invalid_input(format!(
                        "entry ({i}, {j}) is negative or not finite"
                    )));
                }
                if (a - b).abs() > SYMMETRY_TOL {
                    return Err(Error::invalid_input(format!(
                        "entries ({i}, {j}) and ({j}, {i}) differ"
                    )));
                }
            }
        }
        Ok(dm)
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds. Use
    /// [`try_get`](Self::try_get) for unchecked input.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Bounds-checked lookup.
    pub fn try_get(&self, from: usize, to: usize) -> Result<f64> {
        for index in [from, to] {
            if index >= self.size {
                return Err(Error::InvalidRoute {
                    index,
                    size: self.size,
                });
            }
        }
        Ok(self.get(from, to))
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// One row of the matrix.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Largest entry, or 0 for an empty matrix.
    pub fn max_entry(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the nearest of `candidates` to `from`; ties go to the
    /// candidate listed first.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }
}

/// Fills the strict upper triangle, one row per worker.
#[cfg(feature = "parallel")]
fn fill_upper(data: &mut [f64], stops: &[Stop], metric: Metric) {
    use rayon::prelude::*;

    let n = stops.len();
    if n == 0 {
        return;
    }
    data.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
        for j in (i + 1)..n {
            row[j] = metric.distance(stops[i].coordinate(), stops[j].coordinate());
        }
    });
}

#[cfg(not(feature = "parallel"))]
fn fill_upper(data: &mut [f64], stops: &[Stop], metric: Metric) {
    let n = stops.len();
    for i in 0..n {
        for j in (i + 1)..n {
            data[i * n + j] = metric.distance(stops[i].coordinate(), stops[j].coordinate());
        }
    }
}
