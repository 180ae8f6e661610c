//! End-to-end simulation scenarios with analytically known outcomes.

use spermsim::meiosis::{meiose, ProteomeSampler};
use spermsim::proteome::ReferenceProteome;
use spermsim::simulation::SimulationBuilder;
use std::sync::Arc;

fn two_protein_reference() -> ReferenceProteome {
    ReferenceProteome::new([("A", 100.0), ("B", 100.0)]).unwrap()
}

#[test]
fn test_noise_free_founder_is_exact() {
    let reference = Arc::new(two_protein_reference());
    let sampler = ProteomeSampler::new(reference, 0.0).unwrap();
    let mut rng = rand::rng();

    let founder = sampler.sample(&mut rng);
    assert_eq!(founder.get("A"), Some(100));
    assert_eq!(founder.get("B"), Some(100));
}

#[test]
fn test_scenario_harsh_cutoff_yields_almost_no_viable_gametes() {
    // Each gamete count is Binomial(100, 0.25) per protein; reaching the
    // cutoff of 50 copies has probability ~6.6e-8, so viable gametes are
    // essentially impossible.
    let result = SimulationBuilder::new()
        .reference(two_protein_reference())
        .cutoff(0.5)
        .crucial_prot(1.0)
        .cv(0.0)
        .trials(10_000)
        .seed(42)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(result.total_gametes, 40_000);
    assert!(
        result.viable_fraction() < 0.001,
        "fraction {} unexpectedly high",
        result.viable_fraction()
    );
}

#[test]
fn test_scenario_matches_analytic_band() {
    // With cv = 0 the founder is exactly {A: 100, B: 100}. A gamete's count
    // per protein is Binomial(100, 0.25); P(count >= 20) = 0.90047, and the
    // two proteins segregate independently, so the expected viable fraction
    // is 0.90047^2 = 0.8108. 40,000 gametes put the observed fraction well
    // inside +-0.03 of that.
    let result = SimulationBuilder::new()
        .reference(two_protein_reference())
        .cutoff(0.2)
        .crucial_prot(1.0)
        .cv(0.0)
        .trials(10_000)
        .seed(42)
        .build()
        .unwrap()
        .run()
        .unwrap();

    let fraction = result.viable_fraction();
    assert!(
        (0.78..=0.84).contains(&fraction),
        "fraction {fraction} outside analytic band around 0.8108"
    );
}

#[test]
fn test_scenario_zero_count_reference() {
    // cutoff * 0 = 0 and 0 >= 0: a protein absent from the reference is
    // always functional, so every gamete is viable.
    let reference = ReferenceProteome::new([("A", 0.0)]).unwrap();

    let result = SimulationBuilder::new()
        .reference(reference)
        .cutoff(0.9)
        .crucial_prot(1.0)
        .cv(0.3)
        .trials(100)
        .seed(42)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(result.total_gametes, 400);
    assert_eq!(result.viable_gametes, 400);
}

#[test]
fn test_meiosis_conserves_protein_copies_end_to_end() {
    let reference = Arc::new(two_protein_reference());
    let sampler = ProteomeSampler::new(reference, 0.2).unwrap();
    let mut rng = rand::rng();

    for _ in 0..20 {
        let founder = sampler.sample(&mut rng);
        let gametes = meiose(&founder, &mut rng);

        assert_eq!(gametes.len(), 4);
        for protein in ["A", "B"] {
            let leaf_sum: u64 = gametes.iter().map(|g| g.get(protein).unwrap()).sum();
            assert_eq!(leaf_sum, founder.get(protein).unwrap());
        }
    }
}
