use serde::Serialize;
use tracing::info;

use crate::engine::AlgebraEngine;
use crate::error::Result;
use crate::ring::{GradedRing, RingElement, RingMap};

/// A ring given as `ambient / ker(map)`, together with the map into the
/// ring it presents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub map: RingMap,
    pub ring: GradedRing,
}

/// Serializable summary of a presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PresentationReport {
    pub field: String,
    pub ambient: String,
    pub target: String,
    pub variables: Vec<VariableReport>,
    pub relations: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VariableReport {
    pub name: String,
    pub degree: Vec<i64>,
    pub image: String,
}

impl Presentation {
    /// Number of ambient variables.
    pub fn generator_count(&self) -> usize {
        self.map.domain.n_vars()
    }

    pub fn relation_count(&self) -> usize {
        self.ring.relations().len()
    }

    /// Every defining relation maps to zero in the target.
    pub fn verify(&self) -> bool {
        self.ring
            .relations()
            .iter()
            .all(|r| self.map.apply(r).poly.is_zero())
    }

    pub fn report(&self) -> PresentationReport {
        let domain = &self.map.domain;
        let codomain = &self.map.codomain;
        let variables = domain
            .names()
            .iter()
            .zip(domain.degrees())
            .zip(&self.map.images)
            .map(|((name, degree), image)| VariableReport {
                name: name.clone(),
                degree: degree.clone(),
                image: codomain.display(image).to_string(),
            })
            .collect();
        let relations = self
            .ring
            .relations()
            .iter()
            .map(|r| self.ring.display_poly(r).to_string())
            .collect();
        PresentationReport {
            field: domain.field().to_string(),
            ambient: domain.to_string(),
            target: codomain.to_string(),
            variables,
            relations,
        }
    }
}

/// Build the map `ambient -> target` sending variable i to `images[i]`,
/// compute its kernel and return the quotient.
pub fn assemble<E: AlgebraEngine + ?Sized>(
    engine: &E,
    ambient: &GradedRing,
    target: &GradedRing,
    images: Vec<RingElement>,
) -> Result<Presentation> {
    let map = engine.ring_map(ambient, target, images)?;
    let kernel = engine.kernel(&map)?;
    let ring = engine.quotient(ambient, &kernel)?;
    info!(
        generators = ambient.n_vars(),
        relations = kernel.len(),
        "presentation assembled"
    );
    Ok(Presentation { map, ring })
}
