use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::collections::BTreeMap;
use std::fmt;

use crate::field::Field;
use crate::monomial::{self, Monomial, MonomialOrder};

/// Sparse polynomial: exponent vector -> non-zero coefficient.
///
/// Coefficients are assumed to live in the field passed to each
/// operation; the map never stores zeros.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Polynomial {
    pub n_vars: usize,
    pub terms: BTreeMap<Monomial, BigRational>,
}

impl Polynomial {
    pub fn zero(n_vars: usize) -> Self {
        Self {
            n_vars,
            terms: BTreeMap::new(),
        }
    }

    pub fn one(n_vars: usize) -> Self {
        Self::monomial(monomial::one(n_vars), BigRational::one())
    }

    pub fn var(i: usize, n_vars: usize) -> Self {
        Self::monomial(monomial::var(i, n_vars), BigRational::one())
    }

    pub fn constant(c: BigRational, n_vars: usize) -> Self {
        Self::monomial(monomial::one(n_vars), c)
    }

    pub fn monomial(m: Monomial, c: BigRational) -> Self {
        let n_vars = m.len();
        let mut terms = BTreeMap::new();
        if !c.is_zero() {
            terms.insert(m, c);
        }
        Self { n_vars, terms }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn insert_term(&mut self, m: Monomial, c: BigRational, field: &Field) {
        let sum = match self.terms.get(&m) {
            Some(old) => field.add(old, &c),
            None => c,
        };
        if sum.is_zero() {
            self.terms.remove(&m);
        } else {
            self.terms.insert(m, sum);
        }
    }

    pub fn add(&self, other: &Self, field: &Field) -> Self {
        let mut out = self.clone();
        for (m, c) in &other.terms {
            out.insert_term(m.clone(), c.clone(), field);
        }
        out
    }

    pub fn neg(&self, field: &Field) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(m, c)| (m.clone(), field.neg(c)))
            .collect();
        Self {
            n_vars: self.n_vars,
            terms,
        }
    }

    pub fn sub(&self, other: &Self, field: &Field) -> Self {
        self.add(&other.neg(field), field)
    }

    pub fn mul(&self, other: &Self, field: &Field) -> Self {
        let mut out = Self::zero(self.n_vars);
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                out.insert_term(monomial::mul(m1, m2), field.mul(c1, c2), field);
            }
        }
        out
    }

    /// Multiply by the term `c * m`.
    pub fn mul_term(&self, m: &[u32], c: &BigRational, field: &Field) -> Self {
        if c.is_zero() {
            return Self::zero(self.n_vars);
        }
        let terms = self
            .terms
            .iter()
            .map(|(m1, c1)| (monomial::mul(m1, m), field.mul(c1, c)))
            .filter(|(_, c)| !c.is_zero())
            .collect();
        Self {
            n_vars: self.n_vars,
            terms,
        }
    }

    pub fn scale(&self, c: &BigRational, field: &Field) -> Self {
        self.mul_term(&monomial::one(self.n_vars), c, field)
    }

    pub fn pow(&self, e: u32, field: &Field) -> Self {
        let mut result = Self::one(self.n_vars);
        let mut base = self.clone();
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                result = result.mul(&base, field);
            }
            e >>= 1;
            if e > 0 {
                base = base.mul(&base, field);
            }
        }
        result
    }

    pub fn leading_term(&self, order: &MonomialOrder) -> Option<(&Monomial, &BigRational)> {
        self.terms.iter().max_by(|a, b| order.compare(a.0, b.0))
    }

    pub fn leading_monomial(&self, order: &MonomialOrder) -> Option<&Monomial> {
        self.leading_term(order).map(|(m, _)| m)
    }

    /// Scale so the leading coefficient is one.
    pub fn monic(&self, order: &MonomialOrder, field: &Field) -> Self {
        match self.leading_term(order) {
            Some((_, c)) => {
                let inv = field.inv(c);
                self.scale(&inv, field)
            }
            None => self.clone(),
        }
    }

    /// Weighted degree when every term has the same weighted degree.
    pub fn homogeneous_degree(&self, weights: &[i64]) -> Option<i64> {
        let mut degrees = self
            .terms
            .keys()
            .map(|m| monomial::weighted_degree(m, weights));
        let first = degrees.next()?;
        degrees.all(|d| d == first).then_some(first)
    }

    pub fn is_homogeneous(&self, weights: &[i64]) -> bool {
        self.is_zero() || self.homogeneous_degree(weights).is_some()
    }

    /// Re-embed into `n_vars` variables, placing the current variables at
    /// `offset`.
    pub fn embed(&self, n_vars: usize, offset: usize) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(m, c)| {
                let mut e = monomial::one(n_vars);
                e[offset..offset + m.len()].copy_from_slice(m);
                (e, c.clone())
            })
            .collect();
        Self { n_vars, terms }
    }

    /// Keep variables `range`, assuming the rest have zero exponent.
    pub fn restrict(&self, range: std::ops::Range<usize>) -> Self {
        let n_vars = range.len();
        let terms = self
            .terms
            .iter()
            .map(|(m, c)| (m[range.clone()].to_vec(), c.clone()))
            .collect();
        Self { n_vars, terms }
    }

    /// Substitute `images[i]` for variable `i`.
    pub fn substitute(&self, images: &[Polynomial], target_vars: usize, field: &Field) -> Self {
        let mut out = Self::zero(target_vars);
        for (m, c) in &self.terms {
            let mut term = Self::constant(c.clone(), target_vars);
            for (img, e) in images.iter().zip(m) {
                if *e > 0 {
                    term = term.mul(&img.pow(*e, field), field);
                }
            }
            out = out.add(&term, field);
        }
        out
    }

    pub fn display<'a>(
        &'a self,
        names: &'a [String],
        order: &'a MonomialOrder,
        field: &'a Field,
    ) -> PolyDisplay<'a> {
        PolyDisplay {
            poly: self,
            names,
            order,
            field,
        }
    }
}

/// Display adapter carrying variable names and the ordering used to list
/// terms (leading term first).
pub struct PolyDisplay<'a> {
    poly: &'a Polynomial,
    names: &'a [String],
    order: &'a MonomialOrder,
    field: &'a Field,
}

impl fmt::Display for PolyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.poly.is_zero() {
            return write!(f, "0");
        }
        let mut terms: Vec<_> = self.poly.terms.iter().collect();
        terms.sort_by(|a, b| self.order.compare(b.0, a.0));
        for (k, (m, c)) in terms.into_iter().enumerate() {
            let c = self.field.display(c);
            let negative = c.is_negative();
            let abs = c.abs();
            if k == 0 {
                if negative {
                    write!(f, "-")?;
                }
            } else if negative {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let is_constant = m.iter().all(|e| *e == 0);
            let mut factors: Vec<String> = Vec::new();
            if !abs.is_one() || is_constant {
                factors.push(abs.to_string());
            }
            for (i, e) in m.iter().enumerate() {
                let name = self.names.get(i).map(String::as_str).unwrap_or("?");
                match e {
                    0 => {}
                    1 => factors.push(name.to_string()),
                    _ => factors.push(format!("{}^{}", name, e)),
                }
            }
            write!(f, "{}", factors.join("*"))?;
        }
        Ok(())
    }
}
