use gradedpres_core::veronese::select_generators;
use gradedpres_core::{
    veronese_presentation, veronese_presentation_with, EngineConfig, ExactEngine, Field, GradedRing,
    Presentation, RedundancyTest, RingDescription, VeroneseOptions, VeroneseOutcome,
};

fn ring(json: &str) -> GradedRing {
    RingDescription::from_json(json).unwrap().build(&EngineConfig::default()).unwrap()
}

fn presented(outcome: VeroneseOutcome) -> Presentation {
    match outcome {
        VeroneseOutcome::Presented(p) => p,
        VeroneseOutcome::Unchanged(r) => panic!("expected a presentation, ring {} came back unchanged", r),
    }
}

fn images(p: &Presentation) -> Vec<String> {
    p.map.images.iter().map(|e| p.map.codomain.display(e).to_string()).collect()
}

#[test]
fn second_veronese_of_the_plane_is_a_conic() {
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "x", &[1, 1]);
    let p = presented(veronese_presentation(&engine, &r, 2).unwrap());

    assert_eq!(images(&p), vec!["x_1^2", "x_1*x_2", "x_2^2"]);
    assert!(p.map.domain.degrees().iter().all(|d| d == &vec![1]));
    assert_eq!(p.relation_count(), 1);
    assert!(p.verify());
}

#[test]
fn third_veronese_of_the_plane_is_the_twisted_cubic() {
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "x", &[1, 1]);
    let p = presented(veronese_presentation(&engine, &r, 3).unwrap());

    assert_eq!(p.generator_count(), 4);
    assert_eq!(p.relation_count(), 3);
    assert!(p.verify());
    for rel in p.ring.relations() {
        assert_eq!(rel.homogeneous_degree(&[1, 1, 1, 1]), Some(2));
    }
}

#[test]
fn first_veronese_keeps_the_variables() {
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "x", &[1, 1, 1]);
    let p = presented(veronese_presentation(&engine, &r, 1).unwrap());

    assert_eq!(images(&p), vec!["x_1", "x_2", "x_3"]);
    assert_eq!(p.relation_count(), 0);
}

#[test]
fn generator_search_runs_up_to_the_lcm() {
    // deg x = 3, n = 2: degrees 2 and 4 are empty, x^2 appears in degree 6
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "x", &[3]);
    let p = presented(veronese_presentation(&engine, &r, 2).unwrap());

    assert_eq!(images(&p), vec!["x_1^2"]);
    assert_eq!(p.map.domain.degrees(), &[vec![3]][..]);
    assert_eq!(p.relation_count(), 0);
}

#[test]
fn weighted_plane_skips_products_of_accepted_generators() {
    // deg x = 1, deg y = 2, n = 1: x^2 in degree 2 is a product of x
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "x", &[1, 2]);
    let p = presented(veronese_presentation(&engine, &r, 1).unwrap());

    let mut shown = images(&p);
    shown.sort();
    assert_eq!(shown, vec!["x_1", "x_2"]);
    assert_eq!(p.relation_count(), 0);
}

#[test]
fn quotient_rings_are_reduced_before_selection() {
    // x^2 = y^2 leaves x*y and y^2 as the degree two monomials
    let engine = ExactEngine::default();
    let r = ring(r#"{ "variables": ["x", "y"], "relations": ["x^2 - y^2"] }"#);
    let p = presented(veronese_presentation(&engine, &r, 2).unwrap());

    assert_eq!(images(&p), vec!["x*y", "y^2"]);
    assert_eq!(p.relation_count(), 1);
    assert!(p.verify());
    assert_eq!(p.ring.relations()[0].len(), 2);
}

#[test]
fn ring_without_generators_comes_back_unchanged() {
    let engine = ExactEngine::default();
    let k = GradedRing::standard(Field::Rationals, "x", &[]);
    match veronese_presentation(&engine, &k, 4).unwrap() {
        VeroneseOutcome::Unchanged(r) => assert_eq!(r, k),
        VeroneseOutcome::Presented(_) => panic!("a field has no Veronese generators to choose"),
    }
}

#[test]
fn redundancy_tests_agree_when_candidates_are_single_products() {
    let engine = ExactEngine::default();
    let r = ring(r#"{ "variables": ["x", "y"], "relations": ["x^2 - y^2"] }"#);
    let by_product = presented(veronese_presentation(&engine, &r, 1).unwrap());
    let by_span = presented(
        veronese_presentation_with(
            &engine,
            &r,
            1,
            &VeroneseOptions {
                redundancy: RedundancyTest::LinearSpan,
            },
        )
        .unwrap(),
    );
    assert_eq!(images(&by_product), vec!["x", "y"]);
    assert_eq!(images(&by_span), vec!["x", "y"]);
    assert_eq!(by_product.relation_count(), 1);
}

#[test]
fn linear_span_drops_combinations_of_products() {
    // x^2 = y + z, so z = x^2 - y lies in the span of products of x and y
    // without equalling any single one of them.
    let engine = ExactEngine::default();
    let r = ring(r#"{ "variables": ["x", "y", "z"], "degrees": [1, 2, 2], "relations": ["x^2 - y - z"] }"#);

    let by_product = presented(veronese_presentation(&engine, &r, 1).unwrap());
    assert_eq!(images(&by_product), vec!["x", "y", "z"]);
    assert_eq!(by_product.relation_count(), 1);
    assert!(by_product.verify());

    let options = VeroneseOptions {
        redundancy: RedundancyTest::LinearSpan,
    };
    let by_span = presented(veronese_presentation_with(&engine, &r, 1, &options).unwrap());
    assert_eq!(images(&by_span), vec!["x", "y"]);
    assert_eq!(by_span.relation_count(), 0);
}

#[test]
fn prime_field_veronese() {
    let engine = ExactEngine::default();
    let r = ring(r#"{ "field": "ZZ/3", "variables": ["x", "y"] }"#);
    let p = presented(veronese_presentation(&engine, &r, 2).unwrap());
    assert_eq!(p.generator_count(), 3);
    assert_eq!(p.relation_count(), 1);
    assert_eq!(p.ring.field(), &Field::Prime(3));
}

#[test]
fn accepted_generators_are_new_and_in_multiples_of_n() {
    let engine = ExactEngine::default();
    let r = GradedRing::standard(Field::Rationals, "x", &[1, 3]);
    // lcm(2, 1, 3) / 2 = 3 blocks: degrees 2, 4 and 6
    let accepted = select_generators(&engine, &r, 2, 3, RedundancyTest::ProductMatch).unwrap();
    assert!(!accepted.is_empty());
    assert!(accepted.degrees.iter().all(|d| d % 2 == 0));

    let shown: Vec<String> = accepted.elements.iter().map(|e| r.display(e).to_string()).collect();
    assert_eq!(shown, vec!["x_1^2", "x_1*x_2", "x_2^2"]);
    assert_eq!(accepted.degrees, vec![2, 4, 6]);

    for k in 1..accepted.len() {
        let earlier = gradedpres_core::veronese::CandidateGenerators {
            elements: accepted.elements[..k].to_vec(),
            degrees: accepted.degrees[..k].to_vec(),
        };
        let redundant = earlier
            .generates(&engine, &r, &accepted.elements[k], accepted.degrees[k], RedundancyTest::ProductMatch)
            .unwrap();
        assert!(!redundant);
    }
}
