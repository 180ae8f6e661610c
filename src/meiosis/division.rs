//! Cell division operators: binomial segregation and two-round meiosis.
//!
//! Division models each protein copy independently choosing one of the two
//! daughter cells with equal probability. The copy count a daughter receives
//! for protein `i` with parent count `n` is therefore `Binomial(n, 0.5)`,
//! and the other daughter receives the exact complement. Total copy number
//! is conserved at every division.

use crate::proteome::Cell;
use rand::Rng;
use rand_distr::{Binomial, Distribution};

/// Split a parent cell into two daughters via independent binomial draws.
///
/// For each protein with parent count `n`, daughter A receives
/// `k ~ Binomial(n, 0.5)` copies and daughter B receives `n - k`. A zero
/// parent count yields zero in both daughters without consuming randomness.
/// Pure function of the parent and the rng; the parent is never mutated.
pub fn split<R: Rng + ?Sized>(parent: &Cell, rng: &mut R) -> (Cell, Cell) {
    let mut counts_a = Vec::with_capacity(parent.len());
    let mut counts_b = Vec::with_capacity(parent.len());

    for &n in parent.counts() {
        let k = if n == 0 {
            0
        } else {
            // p = 0.5 is always a valid probability. Unlike the founder
            // sampler there is nothing to precompute here: the trial count
            // `n` follows the parent cell, so the distribution is rebuilt
            // per protein.
            Binomial::new(n, 0.5).expect("valid binomial").sample(rng)
        };
        counts_a.push(k);
        counts_b.push(n - k);
    }

    let reference = parent.reference().clone();
    (
        Cell::with_counts(reference.clone(), counts_a),
        Cell::with_counts(reference, counts_b),
    )
}

/// Run one founder through two rounds of division, producing four gametes.
///
/// The founder splits into (c1, c2); c1 splits into (s1, s2) and c2 into
/// (s3, s4). The gametes are returned in the fixed order `[s1, s2, s3, s4]`.
/// The two-level structure models meiosis I followed by meiosis II and is
/// not configurable.
pub fn meiose<R: Rng + ?Sized>(founder: &Cell, rng: &mut R) -> [Cell; 4] {
    let (c1, c2) = split(founder, rng);
    let (s1, s2) = split(&c1, rng);
    let (s3, s4) = split(&c2, rng);
    [s1, s2, s3, s4]
}
