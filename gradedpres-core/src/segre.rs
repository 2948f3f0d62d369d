//! Segre products.
//!
//! The Segre product of R and S is the balanced part of `R (x) S`. With
//! generator degrees `a_1..a_m` of R and `b_1..b_n` of S, its monomials are
//! the lattice points of `{v >= 0 : a.v_R - b.v_S = 0}`, so the Hilbert
//! basis of that cone is a generating set.

use tracing::{debug, info};

use crate::cone;
use crate::engine::AlgebraEngine;
use crate::error::{Error, InputError, Result};
use crate::presentation::{self, Presentation};
use crate::ring::{GradedRing, RingElement};
use crate::validation::{ensure_graded, unigraded_degrees};

/// Degrees of R's generators followed by the negated degrees of S's.
pub fn weight_vector(left: &[i64], right: &[i64]) -> Vec<i64> {
    left.iter().copied().chain(right.iter().map(|d| -d)).collect()
}

/// Check both rings and return their generator degrees.
pub fn validate_pair<E: AlgebraEngine + ?Sized>(
    engine: &E,
    r: &GradedRing,
    s: &GradedRing,
) -> Result<(Vec<i64>, Vec<i64>)> {
    ensure_graded(engine, r, "first")?;
    ensure_graded(engine, s, "second")?;
    let (kr, ks) = (engine.coefficient_field(r), engine.coefficient_field(s));
    if kr != ks {
        return Err(InputError::FieldMismatch { left: kr, right: ks }.into());
    }
    let left = unigraded_degrees(engine, r, "first")?;
    let right = unigraded_degrees(engine, s, "second")?;
    Ok((left, right))
}

/// Hilbert basis of `{v >= 0 : weights.v = 0}`.
pub fn weight_cone_hilbert_basis<E: AlgebraEngine + ?Sized>(engine: &E, weights: &[i64]) -> Result<Vec<Vec<i64>>> {
    let cone = engine.build_cone_from_inequalities(cone::identity(weights.len()), vec![weights.to_vec()])?;
    let basis = engine.hilbert_basis(&cone)?;
    debug!(?weights, size = basis.len(), "weight cone hilbert basis");
    Ok(basis)
}

/// One monomial `prod tensor_gens[i]^v[i]` per basis vector, in basis order.
pub fn hilbert_basis_to_monomials<E: AlgebraEngine + ?Sized>(
    engine: &E,
    tensor: &GradedRing,
    basis: &[Vec<i64>],
    expected_generators: usize,
) -> Result<Vec<RingElement>> {
    let gens = engine.generators(tensor);
    if gens.len() != expected_generators {
        return Err(Error::Consistency {
            what: "tensor ring generator count",
            expected: expected_generators,
            found: gens.len(),
        });
    }
    basis
        .iter()
        .map(|v| {
            if v.len() != gens.len() {
                return Err(Error::Consistency {
                    what: "hilbert basis vector length",
                    expected: gens.len(),
                    found: v.len(),
                });
            }
            let exponents: Vec<u32> = v.iter().filter_map(|&e| u32::try_from(e).ok()).collect();
            if exponents.len() != v.len() {
                return Err(Error::Consistency {
                    what: "non-negative hilbert basis entries",
                    expected: v.len(),
                    found: exponents.len(),
                });
            }
            Ok(engine.product(tensor, &gens, &exponents)?)
        })
        .collect()
}

/// Presentation of the Segre product of `r` and `s` as a quotient of
/// `K[s_1..s_l]`, one variable per Hilbert basis vector.
pub fn segre_presentation<E: AlgebraEngine + ?Sized>(
    engine: &E,
    r: &GradedRing,
    s: &GradedRing,
) -> Result<Presentation> {
    let (left, right) = validate_pair(engine, r, s)?;
    let weights = weight_vector(&left, &right);
    let basis = weight_cone_hilbert_basis(engine, &weights)?;

    let tensor = engine.tensor_product(r, s)?;
    let monomials = hilbert_basis_to_monomials(engine, &tensor, &basis, left.len() + right.len())?;

    // s_k has the common degree of its R-side and S-side factors.
    let degrees: Vec<i64> = basis
        .iter()
        .map(|v| v.iter().zip(&left).map(|(e, d)| e * d).sum())
        .collect();
    let field = engine.coefficient_field(r);
    let ambient = engine.polynomial_ring(&field, "s", &degrees);
    info!(
        left = left.len(),
        right = right.len(),
        generators = monomials.len(),
        "segre generators"
    );
    presentation::assemble(engine, &ambient, &tensor, monomials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_negate_the_second_ring() {
        assert_eq!(weight_vector(&[1, 2], &[3]), vec![1, 2, -3]);
        assert_eq!(weight_vector(&[], &[1]), vec![-1]);
    }
}
