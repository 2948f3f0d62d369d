//! Rational polyhedral cones cut out of the non-negative orthant, and their
//! Hilbert bases.

use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::error::EngineError;

/// `{ v in Z^dim : A v >= 0, E v = 0 }`, kept as its defining rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cone {
    pub dim: usize,
    pub inequalities: Vec<Vec<i64>>,
    pub equations: Vec<Vec<i64>>,
}

impl Cone {
    pub fn new(inequalities: Vec<Vec<i64>>, equations: Vec<Vec<i64>>) -> Result<Self, EngineError> {
        let dim = inequalities
            .first()
            .or(equations.first())
            .map(Vec::len)
            .unwrap_or(0);
        for row in inequalities.iter().chain(&equations) {
            if row.len() != dim {
                return Err(EngineError::DimensionMismatch {
                    what: "cone row entries",
                    expected: dim,
                    found: row.len(),
                });
            }
        }
        Ok(Self {
            dim,
            inequalities,
            equations,
        })
    }

    /// Does `A` describe exactly the non-negative orthant?
    pub fn is_orthant(&self) -> bool {
        self.inequalities.len() == self.dim
            && self
                .inequalities
                .iter()
                .enumerate()
                .all(|(i, row)| row.iter().enumerate().all(|(j, &a)| a == i64::from(i == j)))
    }

    pub fn contains(&self, v: &[i64]) -> bool {
        v.len() == self.dim
            && self.inequalities.iter().all(|row| dot(row, v) >= 0)
            && self.equations.iter().all(|row| dot(row, v) == 0)
    }

    fn image(&self, v: &[i64]) -> Vec<i64> {
        self.equations.iter().map(|row| dot(row, v)).collect()
    }
}

pub fn identity(n: usize) -> Vec<Vec<i64>> {
    (0..n)
        .map(|i| (0..n).map(|j| i64::from(i == j)).collect())
        .collect()
}

pub fn dot(a: &[i64], b: &[i64]) -> i64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn leq(a: &[i64], b: &[i64]) -> bool {
    a.iter().zip(b).all(|(x, y)| x <= y)
}

/// Minimal non-zero lattice points of an orthant cone, by the
/// Contejean-Devie completion: grow partial vectors one unit at a time,
/// only in directions that move their image `E v` back towards zero.
///
/// Output is sorted in decreasing lexicographic order.
pub fn hilbert_basis(cone: &Cone) -> Result<Vec<Vec<i64>>, EngineError> {
    if !cone.is_orthant() {
        return Err(EngineError::UnsupportedCone);
    }
    let n = cone.dim;
    let unit_images: Vec<Vec<i64>> = identity(n).iter().map(|e| cone.image(e)).collect();
    let mut minimal: Vec<Vec<i64>> = Vec::new();
    let mut frontier: BTreeSet<Vec<i64>> = identity(n).into_iter().collect();
    let mut level = 1usize;
    while !frontier.is_empty() {
        let mut open = Vec::new();
        for v in frontier {
            let img = cone.image(&v);
            if img.iter().all(|&x| x == 0) {
                if !minimal.iter().any(|m| leq(m, &v)) {
                    minimal.push(v);
                }
            } else {
                open.push((v, img));
            }
        }
        let mut next = BTreeSet::new();
        for (v, img) in &open {
            for (j, ej) in unit_images.iter().enumerate() {
                if dot(img, ej) >= 0 {
                    continue;
                }
                let mut w = v.clone();
                w[j] += 1;
                if !minimal.iter().any(|m| leq(m, &w)) {
                    next.insert(w);
                }
            }
        }
        trace!(level, open = open.len(), next = next.len(), found = minimal.len(), "hilbert basis level");
        frontier = next;
        level += 1;
    }
    minimal.sort_by(|a, b| b.cmp(a));
    debug!(dim = n, size = minimal.len(), "hilbert basis");
    Ok(minimal)
}
