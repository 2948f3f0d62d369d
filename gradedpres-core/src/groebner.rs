//! Buchberger's algorithm over a field.
//!
//! Critical pairs are processed by the normal strategy (smallest weighted
//! degree of the lcm first) and pairs with coprime leading monomials are
//! skipped. The result is a reduced, monic Groebner basis.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

use crate::error::EngineError;
use crate::field::Field;
use crate::monomial::{self, Monomial, MonomialOrder};
use crate::polynomial::Polynomial;

/// Limits on Groebner basis work.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Give up after this many critical pairs have been reduced.
    pub max_pairs: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct GroebnerStats {
    pub pairs_reduced: usize,
    pub pairs_skipped_product: usize,
    pub zero_reductions: usize,
    pub polynomials_added: usize,
}

#[derive(Debug, Clone)]
struct CriticalPair {
    i: usize,
    j: usize,
    degree: i64,
}

impl Ord for CriticalPair {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: invert so the lowest degree pops first.
        other
            .degree
            .cmp(&self.degree)
            .then_with(|| other.j.cmp(&self.j))
            .then_with(|| other.i.cmp(&self.i))
    }
}

impl PartialOrd for CriticalPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CriticalPair {
    fn eq(&self, other: &Self) -> bool {
        self.i == other.i && self.j == other.j
    }
}

impl Eq for CriticalPair {}

/// Full reduction of `p` modulo `basis`: no term of the result is divisible
/// by a leading monomial of the basis.
pub fn reduce(p: &Polynomial, basis: &[Polynomial], order: &MonomialOrder, field: &Field) -> Polynomial {
    let leads: Vec<(Monomial, num_rational::BigRational)> = basis
        .iter()
        .filter_map(|g| g.leading_term(order).map(|(m, c)| (m.clone(), c.clone())))
        .collect();
    let mut work = p.clone();
    let mut remainder = Polynomial::zero(p.n_vars);
    while let Some((lm, lc)) = work.leading_term(order).map(|(m, c)| (m.clone(), c.clone())) {
        let reducer = leads
            .iter()
            .zip(basis)
            .find(|((gm, _), _)| monomial::divides(gm, &lm));
        match reducer {
            Some(((gm, gc), g)) => {
                let shift = monomial::div(&lm, gm).unwrap_or_else(|| monomial::one(lm.len()));
                let factor = field.div(&lc, gc);
                work = work.sub(&g.mul_term(&shift, &factor, field), field);
            }
            None => {
                work.terms.remove(&lm);
                remainder.terms.insert(lm, lc);
            }
        }
    }
    remainder
}

fn s_polynomial(f: &Polynomial, g: &Polynomial, order: &MonomialOrder, field: &Field) -> Polynomial {
    let (fm, fc) = match f.leading_term(order) {
        Some(t) => t,
        None => return Polynomial::zero(f.n_vars),
    };
    let (gm, gc) = match g.leading_term(order) {
        Some(t) => t,
        None => return Polynomial::zero(f.n_vars),
    };
    let l = monomial::lcm(fm, gm);
    let uf = monomial::div(&l, fm).unwrap_or_else(|| monomial::one(l.len()));
    let ug = monomial::div(&l, gm).unwrap_or_else(|| monomial::one(l.len()));
    let a = f.mul_term(&uf, &field.inv(fc), field);
    let b = g.mul_term(&ug, &field.inv(gc), field);
    a.sub(&b, field)
}

/// Compute a reduced Groebner basis of the ideal generated by `generators`.
pub fn groebner_basis(
    generators: &[Polynomial],
    order: &MonomialOrder,
    field: &Field,
    config: &EngineConfig,
) -> Result<Vec<Polynomial>, EngineError> {
    let mut stats = GroebnerStats::default();
    let mut basis: Vec<Polynomial> = generators
        .iter()
        .filter(|g| !g.is_zero())
        .map(|g| g.monic(order, field))
        .collect();
    let mut pairs = BinaryHeap::new();
    for j in 0..basis.len() {
        for i in 0..j {
            push_pair(&basis, i, j, order, &mut pairs, &mut stats);
        }
    }
    while let Some(pair) = pairs.pop() {
        if let Some(limit) = config.max_pairs {
            if stats.pairs_reduced >= limit {
                return Err(EngineError::ResourceLimit { limit });
            }
        }
        stats.pairs_reduced += 1;
        let s = s_polynomial(&basis[pair.i], &basis[pair.j], order, field);
        let h = reduce(&s, &basis, order, field);
        if h.is_zero() {
            stats.zero_reductions += 1;
            continue;
        }
        trace!(degree = pair.degree, terms = h.len(), "new basis element");
        basis.push(h.monic(order, field));
        stats.polynomials_added += 1;
        let j = basis.len() - 1;
        for i in 0..j {
            push_pair(&basis, i, j, order, &mut pairs, &mut stats);
        }
    }
    let reduced = interreduce(basis, order, field);
    debug!(
        size = reduced.len(),
        pairs = stats.pairs_reduced,
        skipped = stats.pairs_skipped_product,
        zero = stats.zero_reductions,
        "groebner basis done"
    );
    Ok(reduced)
}

fn push_pair(
    basis: &[Polynomial],
    i: usize,
    j: usize,
    order: &MonomialOrder,
    pairs: &mut BinaryHeap<CriticalPair>,
    stats: &mut GroebnerStats,
) {
    let (Some(mi), Some(mj)) = (
        basis[i].leading_monomial(order),
        basis[j].leading_monomial(order),
    ) else {
        return;
    };
    if monomial::coprime(mi, mj) {
        stats.pairs_skipped_product += 1;
        return;
    }
    let degree = monomial::weighted_degree(&monomial::lcm(mi, mj), order.weights());
    pairs.push(CriticalPair { i, j, degree });
}

/// Drop elements whose leading monomial is divisible by another's, then
/// reduce every tail. Output is sorted by increasing leading monomial.
fn interreduce(basis: Vec<Polynomial>, order: &MonomialOrder, field: &Field) -> Vec<Polynomial> {
    let mut minimal: Vec<Polynomial> = Vec::new();
    for (k, g) in basis.iter().enumerate() {
        let Some(lm) = g.leading_monomial(order) else {
            continue;
        };
        let redundant = basis.iter().enumerate().any(|(l, h)| {
            if l == k {
                return false;
            }
            match h.leading_monomial(order) {
                // Ties between equal leading monomials keep the first one.
                Some(hm) if hm == lm => l < k,
                Some(hm) => monomial::divides(hm, lm),
                None => false,
            }
        });
        if !redundant {
            minimal.push(g.clone());
        }
    }
    let mut reduced: Vec<Polynomial> = (0..minimal.len())
        .map(|k| {
            let others: Vec<Polynomial> = minimal
                .iter()
                .enumerate()
                .filter(|(l, _)| *l != k)
                .map(|(_, h)| h.clone())
                .collect();
            reduce(&minimal[k], &others, order, field).monic(order, field)
        })
        .collect();
    reduced.sort_by(|a, b| match (a.leading_monomial(order), b.leading_monomial(order)) {
        (Some(x), Some(y)) => order.compare(x, y),
        _ => Ordering::Equal,
    });
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grevlex(n: usize) -> MonomialOrder {
        MonomialOrder::WeightedGrevlex(vec![1; n])
    }

    #[test]
    fn reduction_leaves_standard_monomials() {
        let f = Field::Rationals;
        let order = grevlex(2);
        let x = Polynomial::var(0, 2);
        let y = Polynomial::var(1, 2);
        // x^2 - y^2 reduces x^3 to x*y^2
        let g = x.pow(2, &f).sub(&y.pow(2, &f), &f);
        let r = reduce(&x.pow(3, &f), &[g], &order, &f);
        assert_eq!(r, x.mul(&y.pow(2, &f), &f));
    }

    #[test]
    fn twisted_cubic_basis_has_three_quadrics() {
        let f = Field::Rationals;
        let order = grevlex(4);
        let v: Vec<Polynomial> = (0..4).map(|i| Polynomial::var(i, 4)).collect();
        // 2x2 minors of [[a, b, c], [b, c, d]]
        let minor = |p: usize, q: usize, r: usize, s: usize| {
            v[p].mul(&v[q], &f).sub(&v[r].mul(&v[s], &f), &f)
        };
        let gens = vec![minor(0, 2, 1, 1), minor(0, 3, 1, 2), minor(1, 3, 2, 2)];
        let gb = groebner_basis(&gens, &order, &f, &EngineConfig::default()).unwrap();
        assert_eq!(gb.len(), 3);
        for g in &gens {
            assert!(reduce(g, &gb, &order, &f).is_zero());
        }
    }

    #[test]
    fn inconsistent_system_gives_unit_ideal() {
        let f = Field::Rationals;
        let order = grevlex(1);
        let x = Polynomial::var(0, 1);
        let gens = vec![x.clone(), x.sub(&Polynomial::one(1), &f)];
        let gb = groebner_basis(&gens, &order, &f, &EngineConfig::default()).unwrap();
        assert_eq!(gb, vec![Polynomial::one(1)]);
    }

    #[test]
    fn pair_limit_is_reported() {
        let f = Field::Rationals;
        let order = grevlex(2);
        let x = Polynomial::var(0, 2);
        let y = Polynomial::var(1, 2);
        let gens = vec![x.mul(&y, &f).sub(&Polynomial::one(2), &f), x.pow(2, &f).sub(&y, &f)];
        let config = EngineConfig { max_pairs: Some(0) };
        let err = groebner_basis(&gens, &order, &f, &config).unwrap_err();
        assert_eq!(err, EngineError::ResourceLimit { limit: 0 });
    }
}
