use crate::engine::AlgebraEngine;
use crate::error::{EngineError, InputError, Result};
use crate::ring::GradedRing;

pub(crate) fn ensure_graded<E: AlgebraEngine + ?Sized>(
    engine: &E,
    ring: &GradedRing,
    which: &'static str,
) -> Result<()> {
    if engine.is_graded_quotient_or_polynomial_ring(ring) {
        Ok(())
    } else {
        Err(InputError::NotGraded { which }.into())
    }
}

/// Degrees of the ring's generators, each required to be a single positive
/// integer.
pub(crate) fn unigraded_degrees<E: AlgebraEngine + ?Sized>(
    engine: &E,
    ring: &GradedRing,
    which: &'static str,
) -> Result<Vec<i64>> {
    let mut out = Vec::new();
    for (index, g) in engine.generators(ring).iter().enumerate() {
        let degree = match engine.degree(ring, g) {
            Ok(d) => d,
            // A generator that vanishes in the quotient still carries the
            // degree of its variable.
            Err(EngineError::ZeroElement) => ring.degrees()[index].clone(),
            Err(e) => return Err(e.into()),
        };
        if degree.len() != 1 {
            return Err(InputError::NotUnigraded {
                which,
                index,
                degree,
            }
            .into());
        }
        let d = degree[0];
        if d <= 0 {
            return Err(InputError::NonPositiveDegree {
                which,
                index,
                degree: d,
            }
            .into());
        }
        out.push(d);
    }
    Ok(out)
}
