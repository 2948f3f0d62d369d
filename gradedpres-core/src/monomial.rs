//! Exponent vectors and the monomial orders used by the Groebner engine.

use std::cmp::Ordering;

/// Exponent vector of a monomial; position i is the exponent of variable i.
pub type Monomial = Vec<u32>;

pub fn one(n_vars: usize) -> Monomial {
    vec![0; n_vars]
}

pub fn var(i: usize, n_vars: usize) -> Monomial {
    let mut m = one(n_vars);
    m[i] = 1;
    m
}

pub fn mul(a: &[u32], b: &[u32]) -> Monomial {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

/// `a / b` when `b` divides `a`.
pub fn div(a: &[u32], b: &[u32]) -> Option<Monomial> {
    if divides(b, a) {
        Some(a.iter().zip(b).map(|(x, y)| x - y).collect())
    } else {
        None
    }
}

/// Does `a` divide `b`?
pub fn divides(a: &[u32], b: &[u32]) -> bool {
    a.iter().zip(b).all(|(x, y)| x <= y)
}

pub fn lcm(a: &[u32], b: &[u32]) -> Monomial {
    a.iter().zip(b).map(|(x, y)| *x.max(y)).collect()
}

pub fn coprime(a: &[u32], b: &[u32]) -> bool {
    a.iter().zip(b).all(|(x, y)| *x == 0 || *y == 0)
}

pub fn weighted_degree(m: &[u32], weights: &[i64]) -> i64 {
    m.iter().zip(weights).map(|(e, w)| i64::from(*e) * w).sum()
}

/// Monomial orders. Weights must be positive for the order to be a
/// well-order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MonomialOrder {
    /// Weighted degree first, reverse lexicographic tie-break.
    WeightedGrevlex(Vec<i64>),
    /// Product order: the first `block` variables are compared with
    /// weighted grevlex first, the remaining ones only break ties.
    Elimination { block: usize, weights: Vec<i64> },
}

impl MonomialOrder {
    pub fn compare(&self, a: &[u32], b: &[u32]) -> Ordering {
        match self {
            MonomialOrder::WeightedGrevlex(w) => grevlex(a, b, w),
            MonomialOrder::Elimination { block, weights } => {
                let (w1, w2) = weights.split_at(*block);
                grevlex(&a[..*block], &b[..*block], w1)
                    .then_with(|| grevlex(&a[*block..], &b[*block..], w2))
            }
        }
    }

    pub fn weights(&self) -> &[i64] {
        match self {
            MonomialOrder::WeightedGrevlex(w) => w,
            MonomialOrder::Elimination { weights, .. } => weights,
        }
    }
}

fn grevlex(a: &[u32], b: &[u32], weights: &[i64]) -> Ordering {
    match weighted_degree(a, weights).cmp(&weighted_degree(b, weights)) {
        Ordering::Equal => {}
        ord => return ord,
    }
    for i in (0..a.len()).rev() {
        match b[i].cmp(&a[i]) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}
