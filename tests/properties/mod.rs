//! # Algebraic properties
//!
//! Laws that hold for all lists and tableaus, checked over deterministic pseudo-random inputs with
//! exact integer arithmetic.
use sparse_tableau::{List, Tableau};

#[allow(missing_docs)]
mod test;

type T = i64;

/// Linear congruential generator, so that every run sees the same inputs.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }
}

/// Sparse list over `0..len` with roughly a third of the positions filled with values in
/// `-4..=4`, zeros excluded.
fn sparse_list(seed: u64, len: usize) -> List<T> {
    let mut generator = Lcg(seed);
    let mut list = List::new();
    for index in 0..len {
        let draw = generator.next();
        let value = (draw % 9) as T - 4;
        if draw % 3 == 0 && value != 0 {
            list.append(index, value);
        }
    }

    list
}

/// Values of a tableau read through whichever view it stores.
fn values(tableau: &Tableau<T>) -> Vec<Vec<T>> {
    (0..tableau.nr_rows())
        .map(|i| (0..tableau.nr_columns()).map(|j| tableau.at(i, j)).collect())
        .collect()
}
