use num_rational::BigRational;
use num_traits::Zero;
use std::collections::BTreeMap;
use tracing::trace;

use crate::field::Field;
use crate::monomial::Monomial;
use crate::polynomial::Polynomial;

/// Dense matrix over a coefficient field, reduced with exact Gaussian
/// elimination.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub rows: Vec<Vec<BigRational>>,
    pub n_cols: usize,
    field: Field,
}

impl LinearSystem {
    pub fn new(rows: Vec<Vec<BigRational>>, field: Field) -> Self {
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        Self {
            rows,
            n_cols,
            field,
        }
    }

    /// Coefficient rows of `polys` in the monomial coordinates they use.
    pub fn from_polynomials(polys: &[&Polynomial], field: &Field) -> Self {
        let mut columns: BTreeMap<&Monomial, usize> = BTreeMap::new();
        for p in polys {
            for m in p.terms.keys() {
                let next = columns.len();
                columns.entry(m).or_insert(next);
            }
        }
        let rows = polys
            .iter()
            .map(|p| {
                let mut row = vec![BigRational::zero(); columns.len()];
                for (m, c) in &p.terms {
                    if let Some(&col) = columns.get(m) {
                        row[col] = c.clone();
                    }
                }
                row
            })
            .collect();
        Self {
            rows,
            n_cols: columns.len(),
            field: field.clone(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.n_cols)
    }

    /// Row echelon form; returns the pivot column of each non-zero row.
    fn echelon(&self) -> (Vec<Vec<BigRational>>, Vec<usize>) {
        let f = &self.field;
        let mut a = self.rows.clone();
        let n_rows = a.len();
        let mut pivots = Vec::new();
        let mut row = 0usize;
        for col in 0..self.n_cols {
            if row >= n_rows {
                break;
            }
            let Some(sel) = (row..n_rows).find(|&r| !a[r][col].is_zero()) else {
                continue;
            };
            a.swap(row, sel);
            let inv = f.inv(&a[row][col]);
            for c in col..self.n_cols {
                a[row][c] = f.mul(&a[row][c], &inv);
            }
            for r in 0..n_rows {
                if r == row || a[r][col].is_zero() {
                    continue;
                }
                let q = a[r][col].clone();
                for c in col..self.n_cols {
                    let t = f.mul(&q, &a[row][c]);
                    a[r][c] = f.sub(&a[r][c], &t);
                }
            }
            pivots.push(col);
            row += 1;
        }
        trace!(rows = n_rows, cols = self.n_cols, rank = pivots.len(), "echelon");
        (a, pivots)
    }

    pub fn rank(&self) -> usize {
        self.echelon().1.len()
    }

    /// Basis of the right nullspace, one vector per free column.
    pub fn nullspace(&self) -> Vec<Vec<BigRational>> {
        let (a, pivots) = self.echelon();
        let free: Vec<usize> = (0..self.n_cols).filter(|c| !pivots.contains(c)).collect();
        free.iter()
            .map(|&fc| {
                let mut sol = vec![BigRational::zero(); self.n_cols];
                sol[fc] = self.field.from_int(1);
                for (r, &pc) in pivots.iter().enumerate() {
                    sol[pc] = self.field.neg(&a[r][fc]);
                }
                sol
            })
            .collect()
    }
}

/// Is `target` a linear combination of `spanning` over `field`?
pub fn in_span(target: &Polynomial, spanning: &[Polynomial], field: &Field) -> bool {
    if target.is_zero() {
        return true;
    }
    let mut all: Vec<&Polynomial> = spanning.iter().collect();
    let base_rank = LinearSystem::from_polynomials(&all, field).rank();
    all.push(target);
    LinearSystem::from_polynomials(&all, field).rank() == base_rank
}
