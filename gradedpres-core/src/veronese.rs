//! Veronese subrings.
//!
//! The n-th Veronese subring of R is spanned by the elements of R whose
//! degree is a multiple of n. Generators are searched for in degrees
//! `n, 2n, .., lcm(n, deg g_1, .., deg g_r)`; past that bound every graded
//! piece is spanned by products of lower ones.

use tracing::{debug, info, trace};

use crate::engine::AlgebraEngine;
use crate::error::{InputError, Result};
use crate::presentation::{self, Presentation};
use crate::ring::{GradedRing, RingElement};
use crate::validation::{ensure_graded, unigraded_degrees};

/// How a candidate generator is judged redundant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RedundancyTest {
    /// Equal to a single product of accepted generators.
    #[default]
    ProductMatch,
    /// In the linear span of all such products.
    LinearSpan,
}

impl std::str::FromStr for RedundancyTest {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "product" | "product-match" => Ok(RedundancyTest::ProductMatch),
            "span" | "linear-span" => Ok(RedundancyTest::LinearSpan),
            other => Err(format!("unknown redundancy test {:?}", other)),
        }
    }
}

/// Tuning for [`veronese_presentation_with`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VeroneseOptions {
    pub redundancy: RedundancyTest,
}

/// Result of a Veronese construction: a ring without generators is its own
/// Veronese subring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VeroneseOutcome {
    Unchanged(GradedRing),
    Presented(Presentation),
}

impl VeroneseOutcome {
    pub fn presentation(&self) -> Option<&Presentation> {
        match self {
            VeroneseOutcome::Presented(p) => Some(p),
            VeroneseOutcome::Unchanged(_) => None,
        }
    }
}

/// Number of degree blocks to scan: `lcm(n, degrees) / n`.
pub fn period<E: AlgebraEngine + ?Sized>(engine: &E, n: i64, degrees: &[i64]) -> Result<i64> {
    if n <= 0 {
        return Err(InputError::NonPositiveDivisor(n).into());
    }
    let mut values = Vec::with_capacity(degrees.len() + 1);
    values.push(n);
    values.extend_from_slice(degrees);
    Ok(engine.lcm(&values) / n)
}

/// Lazy enumeration of every exponent tuple `e` with
/// `sum e_i * degrees[i] == target`.
///
/// Tuples come out in lexicographic order of the exponents, the last index
/// varying fastest. The last exponent is never searched: it is forced by the
/// remaining degree.
#[derive(Clone, Debug)]
pub struct ExponentTuples {
    degrees: Vec<i64>,
    target: i64,
    exponents: Vec<u32>,
    started: bool,
    done: bool,
}

impl ExponentTuples {
    pub fn new(degrees: Vec<i64>, target: i64) -> Result<Self> {
        if degrees.is_empty() {
            return Err(InputError::EmptyProductList.into());
        }
        if target <= 0 {
            return Err(InputError::NonPositiveTarget(target).into());
        }
        if let Some((index, &degree)) = degrees.iter().enumerate().find(|(_, d)| **d <= 0) {
            return Err(InputError::NonPositiveDegree {
                which: "product list",
                index,
                degree,
            }
            .into());
        }
        let k = degrees.len();
        Ok(Self {
            degrees,
            target,
            exponents: vec![0; k],
            started: false,
            done: false,
        })
    }

    /// Start over from the first tuple.
    pub fn restart(&mut self) {
        self.exponents.iter_mut().for_each(|e| *e = 0);
        self.started = false;
        self.done = false;
    }

    fn used_through(&self, index: usize) -> i64 {
        self.exponents[..=index]
            .iter()
            .zip(&self.degrees)
            .map(|(e, d)| i64::from(*e) * d)
            .sum()
    }

    /// Move to the next assignment of the free (non-last) indices.
    fn advance(&mut self) -> bool {
        let last = self.degrees.len() - 1;
        for i in (0..last).rev() {
            if self.used_through(i) + self.degrees[i] <= self.target {
                self.exponents[i] += 1;
                self.exponents[i + 1..].iter_mut().for_each(|e| *e = 0);
                return true;
            }
        }
        false
    }

    /// Fill in the last exponent if the remaining degree divides evenly.
    fn close(&mut self) -> Option<Vec<u32>> {
        let last = self.degrees.len() - 1;
        let used = if last == 0 { 0 } else { self.used_through(last - 1) };
        let rest = self.target - used;
        let d = self.degrees[last];
        if rest % d != 0 {
            return None;
        }
        self.exponents[last] = u32::try_from(rest / d).ok()?;
        Some(self.exponents.clone())
    }
}

impl Iterator for ExponentTuples {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        loop {
            if self.done {
                return None;
            }
            if !self.started {
                self.started = true;
            } else {
                self.exponents[self.degrees.len() - 1] = 0;
                if !self.advance() {
                    self.done = true;
                    return None;
                }
            }
            if let Some(t) = self.close() {
                return Some(t);
            }
        }
    }
}

/// Products of `elements` of total degree exactly `target`, one per
/// exponent tuple.
pub struct DegreeBoundedProducts<'a, E: AlgebraEngine + ?Sized> {
    engine: &'a E,
    ring: &'a GradedRing,
    elements: &'a [RingElement],
    tuples: ExponentTuples,
}

impl<'a, E: AlgebraEngine + ?Sized> DegreeBoundedProducts<'a, E> {
    pub fn new(
        engine: &'a E,
        ring: &'a GradedRing,
        elements: &'a [RingElement],
        degrees: &[i64],
        target: i64,
    ) -> Result<Self> {
        if elements.len() != degrees.len() {
            return Err(crate::error::Error::Consistency {
                what: "element degrees",
                expected: elements.len(),
                found: degrees.len(),
            });
        }
        Ok(Self {
            engine,
            ring,
            elements,
            tuples: ExponentTuples::new(degrees.to_vec(), target)?,
        })
    }

    pub fn restart(&mut self) {
        self.tuples.restart();
    }
}

impl<E: AlgebraEngine + ?Sized> Iterator for DegreeBoundedProducts<'_, E> {
    type Item = Result<RingElement>;

    fn next(&mut self) -> Option<Self::Item> {
        let exponents = self.tuples.next()?;
        Some(
            self.engine
                .product(self.ring, self.elements, &exponents)
                .map_err(Into::into),
        )
    }
}

/// Generators accepted so far, with their degrees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateGenerators {
    pub elements: Vec<RingElement>,
    pub degrees: Vec<i64>,
}

impl CandidateGenerators {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Is `candidate` (of degree `degree`) already produced by the accepted
    /// generators?
    pub fn generates<E: AlgebraEngine + ?Sized>(
        &self,
        engine: &E,
        ring: &GradedRing,
        candidate: &RingElement,
        degree: i64,
        test: RedundancyTest,
    ) -> Result<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        let products = DegreeBoundedProducts::new(engine, ring, &self.elements, &self.degrees, degree)?;
        match test {
            RedundancyTest::ProductMatch => {
                for p in products {
                    if engine.elements_equal(ring, &p?, candidate) {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            RedundancyTest::LinearSpan => {
                let span = products.collect::<Result<Vec<_>>>()?;
                Ok(engine.in_linear_span(ring, candidate, &span))
            }
        }
    }

    fn push(&mut self, element: RingElement, degree: i64) {
        self.elements.push(element);
        self.degrees.push(degree);
    }
}

/// Greedy generator search over the degree blocks `n, 2n, .., blocks * n`.
pub fn select_generators<E: AlgebraEngine + ?Sized>(
    engine: &E,
    ring: &GradedRing,
    n: i64,
    blocks: i64,
    test: RedundancyTest,
) -> Result<CandidateGenerators> {
    let mut accepted = CandidateGenerators::default();
    for i in 1..=blocks {
        let degree = i * n;
        let spanning = engine.basis_of_graded_piece(ring, degree)?;
        trace!(degree, candidates = spanning.len(), "degree block");
        for e in spanning {
            if accepted.generates(engine, ring, &e, degree, test)? {
                trace!(element = %ring.display(&e), "redundant");
                continue;
            }
            debug!(degree, element = %ring.display(&e), "accepted generator");
            accepted.push(e, degree);
        }
    }
    Ok(accepted)
}

/// Presentation of the n-th Veronese subring of `ring`, using the default
/// product-match redundancy test.
pub fn veronese_presentation<E: AlgebraEngine + ?Sized>(
    engine: &E,
    ring: &GradedRing,
    n: i64,
) -> Result<VeroneseOutcome> {
    veronese_presentation_with(engine, ring, n, &VeroneseOptions::default())
}

/// [`veronese_presentation`] with an explicit redundancy test for the
/// generator search.
pub fn veronese_presentation_with<E: AlgebraEngine + ?Sized>(
    engine: &E,
    ring: &GradedRing,
    n: i64,
    options: &VeroneseOptions,
) -> Result<VeroneseOutcome> {
    if n <= 0 {
        return Err(InputError::NonPositiveDivisor(n).into());
    }
    ensure_graded(engine, ring, "input")?;
    if engine.generators(ring).is_empty() {
        return Ok(VeroneseOutcome::Unchanged(ring.clone()));
    }
    let degrees = unigraded_degrees(engine, ring, "input")?;
    let blocks = period(engine, n, &degrees)?;
    info!(n, blocks, "veronese period");

    let accepted = select_generators(engine, ring, n, blocks, options.redundancy)?;
    let field = engine.coefficient_field(ring);
    let ambient_degrees: Vec<i64> = accepted.degrees.iter().map(|d| d / n).collect();
    let ambient = engine.polynomial_ring(&field, "x", &ambient_degrees);
    let presentation = presentation::assemble(engine, &ambient, ring, accepted.elements)?;
    Ok(VeroneseOutcome::Presented(presentation))
}
