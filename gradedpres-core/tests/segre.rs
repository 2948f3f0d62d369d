use gradedpres_core::groebner;
use gradedpres_core::{
    segre_presentation, AlgebraEngine, EngineConfig, ExactEngine, Field, GradedRing, Polynomial,
    RingDescription,
};

fn ring(json: &str) -> GradedRing {
    RingDescription::from_json(json).unwrap().build(&EngineConfig::default()).unwrap()
}

fn line(symbol: &str) -> GradedRing {
    GradedRing::standard(Field::Rationals, symbol, &[1, 1])
}

#[test]
fn product_of_two_lines_is_the_quadric_surface() {
    let engine = ExactEngine::default();
    let p = segre_presentation(&engine, &line("x"), &line("y")).unwrap();

    assert_eq!(p.generator_count(), 4);
    assert_eq!(p.relation_count(), 1);
    assert!(p.verify());

    // x_i * y_j for every pair, each of degree 1
    let target = &p.map.codomain;
    let mut images: Vec<String> = p.map.images.iter().map(|e| target.display(e).to_string()).collect();
    images.sort();
    assert_eq!(images, vec!["x_1*y_1", "x_1*y_2", "x_2*y_1", "x_2*y_2"]);
    assert!(p.map.domain.degrees().iter().all(|d| d == &vec![1]));

    // the single relation is a 2x2 determinant: two terms of degree 2
    let rel = &p.ring.relations()[0];
    assert_eq!(rel.len(), 2);
    assert_eq!(rel.homogeneous_degree(&[1, 1, 1, 1]), Some(2));
}

#[test]
fn product_of_one_variable_rings_has_no_relations() {
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "x", &[1]);
    let s = GradedRing::standard(Field::Rationals, "y", &[1]);
    let p = segre_presentation(&engine, &r, &s).unwrap();

    assert_eq!(p.generator_count(), 1);
    assert_eq!(p.relation_count(), 0);
    assert_eq!(p.map.codomain.display(&p.map.images[0]).to_string(), "x_1*y_1");
}

#[test]
fn line_times_plane_gives_three_quadrics() {
    let engine = ExactEngine::default();
    let plane = GradedRing::standard(Field::Rationals, "y", &[1, 1, 1]);
    let p = segre_presentation(&engine, &line("x"), &plane).unwrap();

    assert_eq!(p.generator_count(), 6);
    assert_eq!(p.relation_count(), 3);
    assert!(p.verify());
}

#[test]
fn unequal_degrees_balance_through_the_hilbert_basis() {
    // R = K[a] with deg a = 2, S = K[b] with deg b = 1: only a*b^2 is balanced
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "a", &[2]);
    let s = GradedRing::standard(Field::Rationals, "b", &[1]);
    let p = segre_presentation(&engine, &r, &s).unwrap();

    assert_eq!(p.generator_count(), 1);
    assert_eq!(p.map.domain.degrees(), &[vec![2]][..]);
    assert_eq!(p.map.codomain.display(&p.map.images[0]).to_string(), "a_1*b_1^2");
    assert_eq!(p.relation_count(), 0);
}

#[test]
fn quotient_factors_carry_their_relations_into_the_product() {
    // R = K[x, y] / (x^2), S = K[z]
    let engine = ExactEngine::default();
    let r = ring(r#"{ "variables": ["x", "y"], "relations": ["x^2"] }"#);
    let s = ring(r#"{ "variables": ["z"] }"#);
    let p = segre_presentation(&engine, &r, &s).unwrap();

    // generators x*z and y*z, related by (x*z)^2 = 0
    assert_eq!(p.generator_count(), 2);
    assert_eq!(p.relation_count(), 1);
    assert!(p.verify());
    let rel = &p.ring.relations()[0];
    assert_eq!(rel.len(), 1);
    assert_eq!(p.ring.display_poly(rel).to_string(), "s_1^2");
}

#[test]
fn field_factor_gives_the_empty_presentation() {
    let engine = ExactEngine::default();
    let k = GradedRing::standard(Field::Rationals, "x", &[]);
    let p = segre_presentation(&engine, &k, &line("y")).unwrap();
    assert_eq!(p.generator_count(), 0);
    assert_eq!(p.relation_count(), 0);
    assert!(p.map.images.is_empty());
}

#[test]
fn weighted_product_has_minimal_relations() {
    // R = K[x_1, x_2] with degrees 1 and 2, S = K[y_1, y_2]: a cubic scroll
    // cut out by three relations, none in the ideal of the other two.
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "x", &[1, 2]);
    let p = segre_presentation(&engine, &r, &line("y")).unwrap();

    assert_eq!(p.generator_count(), 5);
    assert_eq!(p.relation_count(), 3);
    assert!(p.verify());

    let relations = p.ring.relations();
    let config = EngineConfig::default();
    for (i, rel) in relations.iter().enumerate() {
        let others: Vec<Polynomial> = relations
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, g)| g.clone())
            .collect();
        let gb = groebner::groebner_basis(&others, p.ring.order(), p.ring.field(), &config).unwrap();
        assert!(!groebner::reduce(rel, &gb, p.ring.order(), p.ring.field()).is_zero());
    }
}

#[test]
fn works_over_prime_fields() {
    let engine = ExactEngine::default();
    let f = Field::prime(5).unwrap();
    let r = GradedRing::standard(f.clone(), "x", &[1, 1]);
    let s = GradedRing::standard(f.clone(), "y", &[1, 1]);
    let p = segre_presentation(&engine, &r, &s).unwrap();

    assert_eq!(p.ring.field(), &f);
    assert_eq!(p.relation_count(), 1);
    assert!(p.verify());
}

#[test]
fn relations_generate_the_whole_kernel_in_degree_two() {
    // Every degree-2 kernel element of the quadric surface is a multiple of
    // the one relation: the quadric ring has dimension 9 in degree 2.
    let engine = ExactEngine::default();
    let p = segre_presentation(&engine, &line("x"), &line("y")).unwrap();
    let basis = engine.basis_of_graded_piece(&p.ring, 2).unwrap();
    assert_eq!(basis.len(), 9);

    // and the images of those monomials are linearly independent
    let images: Vec<Polynomial> = basis.iter().map(|m| p.map.apply(&m.poly).poly).collect();
    let refs: Vec<&Polynomial> = images.iter().collect();
    let system = gradedpres_core::LinearSystem::from_polynomials(&refs, &Field::Rationals);
    assert_eq!(system.rank(), 9);
}
