//! The algebra engine seam.
//!
//! The Segre and Veronese constructions only talk to an [`AlgebraEngine`].
//! [`ExactEngine`] implements it with exact arithmetic and Buchberger's
//! algorithm.

use num_integer::Integer;
use tracing::debug;

use crate::cone::{self, Cone};
use crate::error::EngineError;
use crate::field::Field;
use crate::groebner::{self, EngineConfig};
use crate::linear_system;
use crate::monomial::{self, MonomialOrder};
use crate::polynomial::Polynomial;
use crate::ring::{GradedRing, Ideal, RingElement, RingMap};

pub trait AlgebraEngine {
    // --- inspection ---
    fn is_graded_quotient_or_polynomial_ring(&self, ring: &GradedRing) -> bool;
    fn coefficient_field(&self, ring: &GradedRing) -> Field;
    fn generators(&self, ring: &GradedRing) -> Vec<RingElement>;
    fn degree(&self, ring: &GradedRing, element: &RingElement) -> Result<Vec<i64>, EngineError>;

    // --- construction ---
    fn tensor_product(&self, a: &GradedRing, b: &GradedRing) -> Result<GradedRing, EngineError>;
    fn build_cone_from_inequalities(
        &self,
        inequalities: Vec<Vec<i64>>,
        equations: Vec<Vec<i64>>,
    ) -> Result<Cone, EngineError>;
    fn hilbert_basis(&self, cone: &Cone) -> Result<Vec<Vec<i64>>, EngineError>;
    /// `K[symbol_1 .. symbol_n]` with the given unigraded degrees.
    fn polynomial_ring(&self, field: &Field, symbol: &str, degrees: &[i64]) -> GradedRing;
    fn ring_map(
        &self,
        domain: &GradedRing,
        codomain: &GradedRing,
        images: Vec<RingElement>,
    ) -> Result<RingMap, EngineError>;
    fn kernel(&self, map: &RingMap) -> Result<Ideal, EngineError>;
    fn quotient(&self, ring: &GradedRing, ideal: &Ideal) -> Result<GradedRing, EngineError>;
    fn basis_of_graded_piece(&self, ring: &GradedRing, degree: i64) -> Result<Vec<RingElement>, EngineError>;
    fn lcm(&self, values: &[i64]) -> i64;

    // --- element arithmetic ---
    /// `prod factors[i]^exponents[i]`.
    fn product(&self, ring: &GradedRing, factors: &[RingElement], exponents: &[u32]) -> Result<RingElement, EngineError>;
    fn elements_equal(&self, ring: &GradedRing, a: &RingElement, b: &RingElement) -> bool;
    fn in_linear_span(&self, ring: &GradedRing, target: &RingElement, spanning: &[RingElement]) -> bool;
}

/// Exact engine over `QQ` and prime fields.
#[derive(Clone, Debug, Default)]
pub struct ExactEngine {
    pub config: EngineConfig,
}

impl ExactEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Minimal generators of a homogeneous ideal: walk by degree and drop
    /// anything already in the ideal of the kept generators.
    ///
    /// In degree `d` the ideal of the kept generators is the ideal of the
    /// lower-degree ones plus the span of those of degree `d`, so the basis
    /// is only recomputed when the degree changes and same-degree candidates
    /// are tested by linear span of their normal forms.
    fn trim(&self, gens: Vec<Polynomial>, ring: &GradedRing) -> Result<Vec<Polynomial>, EngineError> {
        let order = ring.order();
        let weights = ring.weights();
        let field = ring.field();
        let mut sorted: Vec<Polynomial> = gens.into_iter().filter(|g| !g.is_zero()).collect();
        sorted.sort_by(|a, b| {
            let da = a.leading_monomial(order).map(|m| monomial::weighted_degree(m, weights));
            let db = b.leading_monomial(order).map(|m| monomial::weighted_degree(m, weights));
            da.cmp(&db).then_with(|| match (a.leading_monomial(order), b.leading_monomial(order)) {
                (Some(x), Some(y)) => order.compare(x, y),
                _ => std::cmp::Ordering::Equal,
            })
        });
        if !sorted.iter().all(|g| g.is_homogeneous(weights)) {
            return self.trim_inhomogeneous(sorted, ring);
        }

        let mut kept: Vec<Polynomial> = Vec::new();
        let mut lower_gb: Vec<Polynomial> = Vec::new();
        // normal forms modulo `lower_gb` of the generators kept in `degree`
        let mut block: Vec<Polynomial> = Vec::new();
        let mut degree = None;
        let mut rebuilds = 0usize;
        for g in sorted {
            let d = g.homogeneous_degree(weights);
            if d != degree {
                if !block.is_empty() {
                    let extended = [lower_gb, std::mem::take(&mut block)].concat();
                    lower_gb = groebner::groebner_basis(&extended, order, field, &self.config)?;
                    rebuilds += 1;
                }
                degree = d;
            }
            let r = groebner::reduce(&g, &lower_gb, order, field);
            if r.is_zero() || linear_system::in_span(&r, &block, field) {
                continue;
            }
            block.push(r);
            kept.push(g);
        }
        debug!(kept = kept.len(), rebuilds, "trimmed generators");
        Ok(kept)
    }

    /// One generator at a time, extending the basis of the kept ones.
    fn trim_inhomogeneous(&self, sorted: Vec<Polynomial>, ring: &GradedRing) -> Result<Vec<Polynomial>, EngineError> {
        let order = ring.order();
        let field = ring.field();
        let mut kept: Vec<Polynomial> = Vec::new();
        let mut kept_gb: Vec<Polynomial> = Vec::new();
        for g in sorted {
            if groebner::reduce(&g, &kept_gb, order, field).is_zero() {
                continue;
            }
            kept_gb.push(g.clone());
            kept_gb = groebner::groebner_basis(&kept_gb, order, field, &self.config)?;
            kept.push(g);
        }
        Ok(kept)
    }
}

impl AlgebraEngine for ExactEngine {
    fn is_graded_quotient_or_polynomial_ring(&self, ring: &GradedRing) -> bool {
        ring.degrees().iter().all(|d| !d.is_empty()) && ring.first_inhomogeneous_relation().is_none()
    }

    fn coefficient_field(&self, ring: &GradedRing) -> Field {
        ring.field().clone()
    }

    fn generators(&self, ring: &GradedRing) -> Vec<RingElement> {
        ring.generators()
    }

    fn degree(&self, ring: &GradedRing, element: &RingElement) -> Result<Vec<i64>, EngineError> {
        ring.degree_of(element)
    }

    fn tensor_product(&self, a: &GradedRing, b: &GradedRing) -> Result<GradedRing, EngineError> {
        if a.field() != b.field() {
            return Err(EngineError::FieldMismatch(a.field().clone(), b.field().clone()));
        }
        let n = a.n_vars() + b.n_vars();
        let names = a.names().iter().chain(b.names()).cloned().collect();
        let degrees = a.degrees().iter().chain(b.degrees()).cloned().collect();
        let relations: Vec<Polynomial> = a
            .relations()
            .iter()
            .map(|r| r.embed(n, 0))
            .chain(b.relations().iter().map(|r| r.embed(n, a.n_vars())))
            .collect();
        let ring = GradedRing::polynomial(a.field().clone(), names, degrees)?;
        if relations.is_empty() {
            Ok(ring)
        } else {
            ring.quotient(&relations, &self.config)
        }
    }

    fn build_cone_from_inequalities(
        &self,
        inequalities: Vec<Vec<i64>>,
        equations: Vec<Vec<i64>>,
    ) -> Result<Cone, EngineError> {
        Cone::new(inequalities, equations)
    }

    fn hilbert_basis(&self, cone: &Cone) -> Result<Vec<Vec<i64>>, EngineError> {
        cone::hilbert_basis(cone)
    }

    fn polynomial_ring(&self, field: &Field, symbol: &str, degrees: &[i64]) -> GradedRing {
        GradedRing::standard(field.clone(), symbol, degrees)
    }

    fn ring_map(
        &self,
        domain: &GradedRing,
        codomain: &GradedRing,
        images: Vec<RingElement>,
    ) -> Result<RingMap, EngineError> {
        if domain.field() != codomain.field() {
            return Err(EngineError::FieldMismatch(domain.field().clone(), codomain.field().clone()));
        }
        if images.len() != domain.n_vars() {
            return Err(EngineError::DimensionMismatch {
                what: "images",
                expected: domain.n_vars(),
                found: images.len(),
            });
        }
        if let Some(bad) = images.iter().find(|e| e.poly.n_vars != codomain.n_vars()) {
            return Err(EngineError::DimensionMismatch {
                what: "image variables",
                expected: codomain.n_vars(),
                found: bad.poly.n_vars,
            });
        }
        let images = images.iter().map(|e| codomain.element(&e.poly)).collect();
        Ok(RingMap {
            domain: domain.clone(),
            codomain: codomain.clone(),
            images,
        })
    }

    /// Eliminate the codomain variables from `I + (y_i - f_i)`.
    fn kernel(&self, map: &RingMap) -> Result<Ideal, EngineError> {
        let target = &map.codomain;
        let source = &map.domain;
        let field = target.field();
        let nx = target.n_vars();
        let ny = source.n_vars();
        let n = nx + ny;

        // y_i is weighted by the degree of its image so the ideal stays
        // homogeneous whenever the images are.
        let mut weights = target.weights().to_vec();
        for (i, img) in map.images.iter().enumerate() {
            let w = img
                .poly
                .homogeneous_degree(target.weights())
                .filter(|d| *d > 0)
                .unwrap_or_else(|| source.weights().get(i).copied().unwrap_or(1));
            weights.push(w);
        }
        let order = MonomialOrder::Elimination { block: nx, weights };

        let mut gens: Vec<Polynomial> = target.groebner_basis().iter().map(|g| g.embed(n, 0)).collect();
        for (i, img) in map.images.iter().enumerate() {
            let y = Polynomial::var(nx + i, n);
            gens.push(y.sub(&img.poly.embed(n, 0), field));
        }
        let gb = groebner::groebner_basis(&gens, &order, field, &self.config)?;
        let eliminated: Vec<Polynomial> = gb
            .iter()
            .filter(|g| g.terms.keys().all(|m| m[..nx].iter().all(|e| *e == 0)))
            .map(|g| g.restrict(nx..n))
            .collect();
        let generators = self.trim(eliminated, source)?;
        debug!(relations = generators.len(), elimination_basis = gb.len(), "kernel");
        Ok(Ideal { generators })
    }

    fn quotient(&self, ring: &GradedRing, ideal: &Ideal) -> Result<GradedRing, EngineError> {
        if ideal.is_zero() {
            return Ok(ring.clone());
        }
        ring.quotient(&ideal.generators, &self.config)
    }

    fn basis_of_graded_piece(&self, ring: &GradedRing, degree: i64) -> Result<Vec<RingElement>, EngineError> {
        if ring.degrees().iter().any(|d| d.len() != 1) {
            return Err(EngineError::DimensionMismatch {
                what: "degree components",
                expected: 1,
                found: ring.degrees().iter().map(Vec::len).max().unwrap_or(0),
            });
        }
        Ok(ring
            .standard_monomials(degree)
            .into_iter()
            .map(|m| RingElement {
                poly: Polynomial::monomial(m, ring.field().from_int(1)),
            })
            .collect())
    }

    fn lcm(&self, values: &[i64]) -> i64 {
        values.iter().fold(1i64, |acc, v| acc.lcm(v))
    }

    fn product(&self, ring: &GradedRing, factors: &[RingElement], exponents: &[u32]) -> Result<RingElement, EngineError> {
        if factors.len() != exponents.len() {
            return Err(EngineError::DimensionMismatch {
                what: "exponents",
                expected: factors.len(),
                found: exponents.len(),
            });
        }
        let mut acc = ring.element(&Polynomial::one(ring.n_vars()));
        for (f, &e) in factors.iter().zip(exponents) {
            if e > 0 {
                acc = ring.multiply(&acc, &ring.power(f, e));
            }
        }
        Ok(acc)
    }

    fn elements_equal(&self, ring: &GradedRing, a: &RingElement, b: &RingElement) -> bool {
        ring.normal_form(&a.poly) == ring.normal_form(&b.poly)
    }

    fn in_linear_span(&self, ring: &GradedRing, target: &RingElement, spanning: &[RingElement]) -> bool {
        let span: Vec<Polynomial> = spanning.iter().map(|e| ring.normal_form(&e.poly)).collect();
        linear_system::in_span(&ring.normal_form(&target.poly), &span, ring.field())
    }
}
