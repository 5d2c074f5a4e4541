//! Bit-vector genetic operators.
//!
//! # Crossover
//!
//! - [`two_point_crossover`]: swap the segment between two random cut points
//!
//! # Mutation
//!
//! - [`bit_flip_mutation`]: independent per-gene Bernoulli flip
//!
//! Both operate on plain `bool` slices so that baselines and tests can use
//! them without building an [`Individual`](super::Individual).

use rand::seq::index;
use rand::Rng;

/// Two-point crossover.
///
/// Picks two distinct cut points `c1 < c2` in `0..n` and returns
///
/// - child1 = `p1[..c1] + p2[c1..c2] + p1[c2..]`
/// - child2 = `p2[..c1] + p1[c1..c2] + p2[c2..]`
///
/// Each child is freshly allocated.
///
/// # Panics
/// Panics if the parents differ in length or are shorter than 2 genes.
pub fn two_point_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n >= 2, "two-point crossover needs at least 2 genes, got {n}");

    let (c1, c2) = cut_points(n, rng);
    (
        splice(parent1, parent2, c1, c2),
        splice(parent2, parent1, c1, c2),
    )
}

/// Builds `outer[..c1] + inner[c1..c2] + outer[c2..]`.
fn splice(outer: &[bool], inner: &[bool], c1: usize, c2: usize) -> Vec<bool> {
    let mut child = Vec::with_capacity(outer.len());
    child.extend_from_slice(&outer[..c1]);
    child.extend_from_slice(&inner[c1..c2]);
    child.extend_from_slice(&outer[c2..]);
    child
}

/// Two distinct indices in `0..n`, sorted.
fn cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    let (a, b) = (picked.index(0), picked.index(1));
    (a.min(b), a.max(b))
}

/// Flips each gene with probability `rate`.
///
/// A gene flips when a uniform draw in `[0, 1)` is below `rate`, so a rate
/// of 0 never flips and a rate of 1 always flips.
pub fn bit_flip_mutation<R: Rng>(genome: &mut [bool], rate: f64, rng: &mut R) {
    for gene in genome.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = !*gene;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_cut_points_distinct_and_sorted() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (a, b) = cut_points(10, &mut rng);
            assert!(a < b && b < 10);
        }
    }

    #[test]
    fn test_cut_points_two_genes() {
        let mut rng = create_rng(1);
        assert_eq!(cut_points(2, &mut rng), (0, 1));
    }

    #[test]
    fn test_children_are_complementary() {
        let p1 = vec![true; 12];
        let p2 = vec![false; 12];
        let mut rng = create_rng(42);

        for _ in 0..200 {
            let (c1, c2) = two_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), 12);
            assert_eq!(c2.len(), 12);
            for i in 0..12 {
                // Every position is taken from opposite parents in the two children
                assert_ne!(c1[i], c2[i]);
            }
        }
    }

    #[test]
    fn test_segment_structure() {
        let p1 = vec![true; 10];
        let p2 = vec![false; 10];
        let mut rng = create_rng(7);

        let (child, _) = two_point_crossover(&p1, &p2, &mut rng);
        // child1 is ones, then a non-empty block of zeros, then ones
        let first_zero = child.iter().position(|&b| !b);
        let last_zero = child.iter().rposition(|&b| !b);
        let (start, end) = (first_zero.unwrap(), last_zero.unwrap());
        assert!(child[start..=end].iter().all(|&b| !b));
    }

    #[test]
    fn test_identical_parents() {
        let p = vec![true, false, true, true, false];
        let mut rng = create_rng(3);
        let (c1, c2) = two_point_crossover(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    #[should_panic(expected = "two-point crossover needs at least 2 genes")]
    fn test_single_gene_panics() {
        let mut rng = create_rng(1);
        two_point_crossover(&[true], &[false], &mut rng);
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_length_mismatch_panics() {
        let mut rng = create_rng(1);
        two_point_crossover(&[true, false], &[false, true, true], &mut rng);
    }

    #[test]
    fn test_mutation_rate_zero() {
        let mut rng = create_rng(42);
        let mut genome = vec![true, false, true, false, false, true];
        let before = genome.clone();
        for _ in 0..100 {
            bit_flip_mutation(&mut genome, 0.0, &mut rng);
        }
        assert_eq!(genome, before);
    }

    #[test]
    fn test_mutation_rate_one_flips_all() {
        let mut rng = create_rng(42);
        let mut genome = vec![true, false, true, false, false, true];
        bit_flip_mutation(&mut genome, 1.0, &mut rng);
        assert_eq!(genome, vec![false, true, false, true, true, false]);
    }

    #[test]
    fn test_mutation_rate_is_per_gene() {
        let mut rng = create_rng(42);
        let mut genome = vec![false; 10_000];
        bit_flip_mutation(&mut genome, 0.1, &mut rng);
        let flipped = genome.iter().filter(|&&b| b).count();
        assert!(
            (800..1200).contains(&flipped),
            "expected about 1000 flips, got {flipped}"
        );
    }
}
