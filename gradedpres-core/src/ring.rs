//! Graded polynomial rings and their quotients.

use std::fmt;

use crate::error::EngineError;
use crate::field::Field;
use crate::groebner::{self, EngineConfig};
use crate::monomial::{self, Monomial, MonomialOrder};
use crate::polynomial::Polynomial;

/// `K[x_1..x_n] / I` with a degree vector attached to every variable.
///
/// The Groebner basis of `I` is computed once, at construction, with the
/// weighted grevlex order coming from the grading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradedRing {
    field: Field,
    names: Vec<String>,
    degrees: Vec<Vec<i64>>,
    relations: Vec<Polynomial>,
    groebner: Vec<Polynomial>,
    order: MonomialOrder,
}

/// Element of a `GradedRing`, always stored in normal form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RingElement {
    pub poly: Polynomial,
}

/// Ideal of a ring, given by generators in that ring's variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ideal {
    pub generators: Vec<Polynomial>,
}

impl Ideal {
    pub fn zero() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.generators.iter().all(Polynomial::is_zero)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

/// Weights used by the default order: the unigraded degrees when all are
/// positive, otherwise plain grevlex.
fn order_weights(degrees: &[Vec<i64>]) -> Vec<i64> {
    if degrees.iter().all(|d| d.len() == 1 && d[0] > 0) {
        degrees.iter().map(|d| d[0]).collect()
    } else {
        vec![1; degrees.len()]
    }
}

impl GradedRing {
    /// `K[x_1..x_n]` with the given variable names and degree vectors.
    pub fn polynomial(field: Field, names: Vec<String>, degrees: Vec<Vec<i64>>) -> Result<Self, EngineError> {
        if names.len() != degrees.len() {
            return Err(EngineError::DimensionMismatch {
                what: "variable degrees",
                expected: names.len(),
                found: degrees.len(),
            });
        }
        let order = MonomialOrder::WeightedGrevlex(order_weights(&degrees));
        Ok(Self {
            field,
            names,
            degrees,
            relations: Vec::new(),
            groebner: Vec::new(),
            order,
        })
    }

    /// Unigraded polynomial ring with variables `symbol_1 .. symbol_n`.
    pub fn standard(field: Field, symbol: &str, degrees: &[i64]) -> Self {
        let names = (1..=degrees.len()).map(|i| format!("{}_{}", symbol, i)).collect();
        let degrees: Vec<Vec<i64>> = degrees.iter().map(|d| vec![*d]).collect();
        let order = MonomialOrder::WeightedGrevlex(order_weights(&degrees));
        Self {
            field,
            names,
            degrees,
            relations: Vec::new(),
            groebner: Vec::new(),
            order,
        }
    }

    /// `self / (relations)`. Relations are added to any existing ones.
    pub fn quotient(&self, relations: &[Polynomial], config: &EngineConfig) -> Result<Self, EngineError> {
        for r in relations {
            if r.n_vars != self.n_vars() {
                return Err(EngineError::DimensionMismatch {
                    what: "relation variables",
                    expected: self.n_vars(),
                    found: r.n_vars,
                });
            }
        }
        let mut all = self.relations.clone();
        all.extend(relations.iter().filter(|r| !r.is_zero()).cloned());
        let groebner = groebner::groebner_basis(&all, &self.order, &self.field, config)?;
        Ok(Self {
            relations: all,
            groebner,
            ..self.clone()
        })
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn degrees(&self) -> &[Vec<i64>] {
        &self.degrees
    }

    pub fn relations(&self) -> &[Polynomial] {
        &self.relations
    }

    pub fn groebner_basis(&self) -> &[Polynomial] {
        &self.groebner
    }

    pub fn order(&self) -> &MonomialOrder {
        &self.order
    }

    pub fn weights(&self) -> &[i64] {
        self.order.weights()
    }

    pub fn n_vars(&self) -> usize {
        self.names.len()
    }

    pub fn is_quotient(&self) -> bool {
        !self.relations.is_empty()
    }

    /// Index of the first relation that is not homogeneous for every
    /// component of the grading.
    pub fn first_inhomogeneous_relation(&self) -> Option<usize> {
        let width = self.degrees.first().map(Vec::len).unwrap_or(0);
        if self.degrees.iter().any(|d| d.len() != width) {
            return Some(0);
        }
        (0..width).find_map(|k| {
            let weights: Vec<i64> = self.degrees.iter().map(|d| d[k]).collect();
            self.relations.iter().position(|r| !r.is_homogeneous(&weights))
        })
    }

    pub fn normal_form(&self, p: &Polynomial) -> Polynomial {
        if self.groebner.is_empty() {
            return p.clone();
        }
        groebner::reduce(p, &self.groebner, &self.order, &self.field)
    }

    pub fn element(&self, p: &Polynomial) -> RingElement {
        RingElement {
            poly: self.normal_form(p),
        }
    }

    pub fn generators(&self) -> Vec<RingElement> {
        (0..self.n_vars())
            .map(|i| self.element(&Polynomial::var(i, self.n_vars())))
            .collect()
    }

    pub fn multiply(&self, a: &RingElement, b: &RingElement) -> RingElement {
        self.element(&a.poly.mul(&b.poly, &self.field))
    }

    pub fn power(&self, a: &RingElement, e: u32) -> RingElement {
        let mut result = self.element(&Polynomial::one(self.n_vars()));
        for _ in 0..e {
            result = self.multiply(&result, a);
        }
        result
    }

    /// Degree vector of a homogeneous, non-zero element.
    pub fn degree_of(&self, a: &RingElement) -> Result<Vec<i64>, EngineError> {
        let Some(m) = a.poly.terms.keys().next() else {
            return Err(EngineError::ZeroElement);
        };
        let width = self.degrees.first().map(Vec::len).unwrap_or(0);
        let deg_of = |m: &Monomial| -> Vec<i64> {
            (0..width)
                .map(|k| {
                    m.iter()
                        .zip(&self.degrees)
                        .map(|(e, d)| i64::from(*e) * d[k])
                        .sum()
                })
                .collect()
        };
        let d = deg_of(m);
        if a.poly.terms.keys().any(|m| deg_of(m) != d) {
            return Err(EngineError::NotHomogeneous);
        }
        Ok(d)
    }

    /// Monomials of weighted degree `degree` not divisible by any leading
    /// monomial of the ideal, listed from largest to smallest.
    pub fn standard_monomials(&self, degree: i64) -> Vec<Monomial> {
        let weights = self.weights().to_vec();
        let leads: Vec<&Monomial> = self
            .groebner
            .iter()
            .filter_map(|g| g.leading_monomial(&self.order))
            .collect();
        let mut out = Vec::new();
        let mut current = monomial::one(self.n_vars());
        collect_monomials(&weights, 0, degree, &mut current, &mut out);
        out.retain(|m| !leads.iter().any(|l| monomial::divides(l, m)));
        out.sort_by(|a, b| self.order.compare(b, a));
        out
    }

    pub fn display<'a>(&'a self, a: &'a RingElement) -> impl fmt::Display + 'a {
        a.poly.display(&self.names, &self.order, &self.field)
    }

    pub fn display_poly<'a>(&'a self, p: &'a Polynomial) -> impl fmt::Display + 'a {
        p.display(&self.names, &self.order, &self.field)
    }
}

fn collect_monomials(weights: &[i64], index: usize, remaining: i64, current: &mut Monomial, out: &mut Vec<Monomial>) {
    if index == weights.len() {
        if remaining == 0 {
            out.push(current.clone());
        }
        return;
    }
    let w = weights[index];
    if w <= 0 {
        return;
    }
    let mut e = 0u32;
    while i64::from(e) * w <= remaining {
        current[index] = e;
        collect_monomials(weights, index + 1, remaining - i64::from(e) * w, current, out);
        e += 1;
    }
    current[index] = 0;
}

impl fmt::Display for GradedRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.field, self.names.join(", "))?;
        if self.is_quotient() {
            let rels: Vec<String> = self
                .relations
                .iter()
                .map(|r| self.display_poly(r).to_string())
                .collect();
            write!(f, " / ({})", rels.join(", "))?;
        }
        Ok(())
    }
}

/// Ring homomorphism given by the images of the domain's variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingMap {
    pub domain: GradedRing,
    pub codomain: GradedRing,
    pub images: Vec<RingElement>,
}

impl RingMap {
    /// Evaluate the map on a domain polynomial.
    pub fn apply(&self, p: &Polynomial) -> RingElement {
        let images: Vec<Polynomial> = self.images.iter().map(|e| e.poly.clone()).collect();
        let out = p.substitute(&images, self.codomain.n_vars(), self.codomain.field());
        self.codomain.element(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    fn plane() -> GradedRing {
        GradedRing::polynomial(Field::Rationals, names(&["x", "y"]), vec![vec![1], vec![1]]).unwrap()
    }

    #[test]
    fn standard_ring_names_and_weights() {
        let r = GradedRing::standard(Field::Rationals, "x", &[1, 2, 3]);
        assert_eq!(r.names(), &names(&["x_1", "x_2", "x_3"])[..]);
        assert_eq!(r.degrees(), &[vec![1], vec![2], vec![3]][..]);
        assert_eq!(r.weights(), &[1, 2, 3][..]);
        assert!(!r.is_quotient());
        assert_eq!(r, GradedRing::polynomial(Field::Rationals, names(&["x_1", "x_2", "x_3"]), r.degrees().to_vec()).unwrap());
    }

    #[test]
    fn quotient_normalizes_elements() {
        let r = plane();
        let f = Field::Rationals;
        let x = Polynomial::var(0, 2);
        let y = Polynomial::var(1, 2);
        let q = r
            .quotient(&[x.pow(2, &f).sub(&y.pow(2, &f), &f)], &EngineConfig::default())
            .unwrap();
        assert!(q.is_quotient());
        let gens = q.generators();
        let x2 = q.multiply(&gens[0], &gens[0]);
        let y2 = q.multiply(&gens[1], &gens[1]);
        assert_eq!(x2, y2);
    }

    #[test]
    fn standard_monomials_skip_leading_terms() {
        let r = plane();
        let f = Field::Rationals;
        let x = Polynomial::var(0, 2);
        let y = Polynomial::var(1, 2);
        assert_eq!(r.standard_monomials(2), vec![vec![2, 0], vec![1, 1], vec![0, 2]]);
        let q = r
            .quotient(&[x.pow(2, &f).sub(&y.pow(2, &f), &f)], &EngineConfig::default())
            .unwrap();
        assert_eq!(q.standard_monomials(2), vec![vec![1, 1], vec![0, 2]]);
    }

    #[test]
    fn weighted_standard_monomials() {
        let r = GradedRing::polynomial(Field::Rationals, names(&["x", "y"]), vec![vec![1], vec![2]]).unwrap();
        let ms = r.standard_monomials(4);
        assert_eq!(ms.len(), 3);
        assert!(ms.contains(&vec![4, 0]));
        assert!(ms.contains(&vec![2, 1]));
        assert!(ms.contains(&vec![0, 2]));
        assert!(r.standard_monomials(0) == vec![vec![0, 0]]);
    }

    #[test]
    fn degree_rejects_mixed_elements() {
        let r = plane();
        let f = Field::Rationals;
        let x = Polynomial::var(0, 2);
        let e = r.element(&x.pow(2, &f).add(&x, &f));
        assert_eq!(r.degree_of(&e), Err(EngineError::NotHomogeneous));
        assert_eq!(r.degree_of(&r.element(&Polynomial::zero(2))), Err(EngineError::ZeroElement));
        assert_eq!(r.degree_of(&r.element(&x.pow(3, &f))), Ok(vec![3]));
    }

    #[test]
    fn inhomogeneous_relation_is_found() {
        let r = plane();
        let f = Field::Rationals;
        let x = Polynomial::var(0, 2);
        let y = Polynomial::var(1, 2);
        let q = r.quotient(&[x.pow(2, &f).sub(&y, &f)], &EngineConfig::default()).unwrap();
        assert_eq!(q.first_inhomogeneous_relation(), Some(0));
        assert_eq!(plane().first_inhomogeneous_relation(), None);
    }

    #[test]
    fn display_shows_relations() {
        let r = plane();
        let f = Field::Rationals;
        let x = Polynomial::var(0, 2);
        let y = Polynomial::var(1, 2);
        let q = r.quotient(&[x.mul(&y, &f)], &EngineConfig::default()).unwrap();
        assert_eq!(q.to_string(), "QQ[x, y] / (x*y)");
    }
}
