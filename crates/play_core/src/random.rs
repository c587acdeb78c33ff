//! Seeded randomness
//!
//! Every bit of "organic" irregularity in a sketch comes from one [`Rng`]
//! owned by the drawing surface. Two generators built from the same seed and
//! driven by the same sequence of calls produce identical results, so the
//! number of underlying draws each method consumes is part of its contract:
//!
//! | method | uniform draws |
//! |---|---|
//! | `uniform`, `uniform_int`, `polarity`, `sample`, `chance`, `proportionately` | 1 |
//! | `samples(n, ..)` | n |
//! | `shuffle(items)` | `items.len()` |
//! | `gaussian` | 2 |
//! | `poisson` | result + 1 |

use std::f64::consts::TAU;

use rand::{Rng as _, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{PlayError, PlayResult};

/// Integer range for [`Rng::uniform_int`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntRange {
    pub from: i64,
    pub to: i64,
    pub inclusive: bool,
}

impl IntRange {
    /// Inclusive range `[from, to]`
    pub const fn new(from: i64, to: i64) -> Self {
        Self {
            from,
            to,
            inclusive: true,
        }
    }

    /// Inclusive range `[0, to]`
    pub const fn to(to: i64) -> Self {
        Self::new(0, to)
    }

    /// Exclude the upper bound
    pub const fn exclusive(mut self) -> Self {
        self.inclusive = false;
        self
    }
}

/// Parameters for [`Rng::gaussian`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaussian {
    pub mean: f64,
    pub sd: f64,
}

impl Default for Gaussian {
    fn default() -> Self {
        Self { mean: 0.0, sd: 1.0 }
    }
}

impl Gaussian {
    pub const fn new(mean: f64, sd: f64) -> Self {
        Self { mean, sd }
    }
}

/// Deterministic, reseedable random source
#[derive(Clone, Debug)]
pub struct Rng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator with a fresh seed
    ///
    /// The seed is still observable through [`Rng::seed`] so a lucky run can be
    /// reproduced.
    pub fn from_entropy() -> Self {
        let seed = rand::random::<u64>();
        tracing::debug!(seed, "seeded generator from entropy");
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from a new seed
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Uniform draw in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform draw in `[from, to)`
    pub fn uniform_range(&mut self, from: f64, to: f64) -> f64 {
        from + self.uniform() * (to - from)
    }

    /// Uniform integer in `[from, to]`, or `[from, to)` when exclusive
    pub fn uniform_int(&mut self, range: IntRange) -> PlayResult<i64> {
        let IntRange { from, to, inclusive } = range;
        if to < from {
            return Err(PlayError::InvalidRange { from, to });
        }
        // A full i64 range spans 2^64 values
        let span = i128::from(to) - i128::from(from) + i128::from(inclusive);
        if span == 0 {
            return Err(PlayError::EmptyRange { from, to });
        }
        let offset = ((self.uniform() * span as f64).floor() as i128).clamp(0, span - 1);
        i64::try_from(i128::from(from) + offset).map_err(|_| PlayError::InvalidRange { from, to })
    }

    /// `+1.0` or `-1.0` with equal probability
    pub fn polarity(&mut self) -> f64 {
        if self.uniform() > 0.5 {
            1.0
        } else {
            -1.0
        }
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Call `f` with probability `p`
    pub fn do_proportion<F: FnOnce()>(&mut self, p: f64, f: F) {
        if self.chance(p) {
            f();
        }
    }

    /// One item chosen uniformly
    pub fn sample<'a, T>(&mut self, items: &'a [T]) -> PlayResult<&'a T> {
        if items.is_empty() {
            return Err(PlayError::EmptySample);
        }
        let index = (self.uniform() * items.len() as f64).floor() as usize;
        Ok(&items[index.min(items.len() - 1)])
    }

    /// `n` items chosen uniformly, with replacement
    pub fn samples<'a, T>(&mut self, n: usize, items: &'a [T]) -> PlayResult<Vec<&'a T>> {
        if items.is_empty() {
            return Err(PlayError::EmptySample);
        }
        (0..n).map(|_| self.sample(items)).collect()
    }

    /// In-place Fisher–Yates shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let mut current = items.len();
        while current != 0 {
            let random = (self.uniform() * current as f64).floor() as usize;
            current -= 1;
            items.swap(current, random.min(current));
        }
    }

    /// Normally distributed value (Box–Muller)
    ///
    /// Always consumes exactly two uniform draws. The first draw is reflected
    /// into `(0, 1]` so the logarithm is always finite.
    pub fn gaussian(&mut self, params: Gaussian) -> f64 {
        let u1 = 1.0 - self.uniform();
        let u2 = self.uniform();
        let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
        params.mean + params.sd * z
    }

    /// Poisson distributed count (Knuth's multiplication method)
    pub fn poisson(&mut self, lambda: f64) -> PlayResult<u64> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(PlayError::InvalidParameter(format!(
                "poisson lambda must be finite and non-negative, got {lambda}"
            )));
        }
        let limit = (-lambda).exp();
        let mut product = 1.0;
        let mut count = 0u64;
        loop {
            product *= self.uniform();
            if product <= limit {
                return Ok(count);
            }
            count += 1;
        }
    }

    /// Weighted choice between cases
    ///
    /// One draw is scaled to the total weight, then the cases are scanned in
    /// order; the first case whose weight exceeds what is left of the draw is
    /// chosen. Weights need not sum to one.
    pub fn proportionately<'a, T>(&mut self, cases: &'a [(f64, T)]) -> PlayResult<&'a T> {
        let total: f64 = cases.iter().map(|(weight, _)| weight).sum();
        if !(total > 0.0) {
            return Err(PlayError::NonPositiveWeight(total));
        }

        let mut remaining = self.uniform() * total;
        for (weight, case) in cases {
            if *weight > remaining {
                return Ok(case);
            }
            remaining -= weight;
        }

        // Rounding can leave a sliver past the last weight
        cases
            .iter()
            .rev()
            .find(|(weight, _)| *weight > 0.0)
            .map(|(_, case)| case)
            .ok_or(PlayError::NonPositiveWeight(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        let items = [1, 2, 3, 4, 5, 6, 7];

        for _ in 0..50 {
            assert_eq!(a.uniform(), b.uniform());
            assert_eq!(
                a.uniform_int(IntRange::new(-3, 9)).unwrap(),
                b.uniform_int(IntRange::new(-3, 9)).unwrap()
            );
            assert_eq!(a.gaussian(Gaussian::default()), b.gaussian(Gaussian::default()));
            assert_eq!(a.poisson(3.0).unwrap(), b.poisson(3.0).unwrap());
            assert_eq!(a.sample(&items).unwrap(), b.sample(&items).unwrap());
            assert_eq!(a.samples(3, &items).unwrap(), b.samples(3, &items).unwrap());
            assert_eq!(a.polarity(), b.polarity());

            let mut xs = items;
            let mut ys = items;
            a.shuffle(&mut xs);
            b.shuffle(&mut ys);
            assert_eq!(xs, ys);
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(43);
        let xs: Vec<f64> = (0..8).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.uniform()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_reseed_restarts_stream() {
        let mut rng = Rng::new(7);
        let first: Vec<f64> = (0..4).map(|_| rng.uniform()).collect();
        rng.reseed(7);
        let again: Vec<f64> = (0..4).map(|_| rng.uniform()).collect();
        assert_eq!(first, again);
        assert_eq!(rng.seed(), 7);
    }

    #[test]
    fn test_uniform_in_unit_interval() {
        let mut rng = Rng::new(1);
        for _ in 0..10_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_uniform_range_follows_uniform() {
        let mut a = Rng::new(3);
        let mut b = Rng::new(3);
        for _ in 0..1_000 {
            let u = a.uniform();
            let v = b.uniform_range(-2.0, 6.0);
            assert!((-2.0..6.0).contains(&v));
            assert!((v - (-2.0 + 8.0 * u)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_uniform_int_inclusive_coverage() {
        let mut rng = Rng::new(2);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let n = rng.uniform_int(IntRange::new(1, 5)).unwrap();
            assert!((1..=5).contains(&n));
            seen.insert(n);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_uniform_int_exclusive_coverage() {
        let mut rng = Rng::new(3);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let n = rng.uniform_int(IntRange::new(1, 5).exclusive()).unwrap();
            assert!((1..5).contains(&n));
            seen.insert(n);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_uniform_int_errors() {
        let mut rng = Rng::new(4);
        assert_eq!(
            rng.uniform_int(IntRange::new(5, 1)),
            Err(PlayError::InvalidRange { from: 5, to: 1 })
        );
        assert_eq!(
            rng.uniform_int(IntRange::new(3, 3).exclusive()),
            Err(PlayError::EmptyRange { from: 3, to: 3 })
        );
        assert_eq!(rng.uniform_int(IntRange::new(3, 3)), Ok(3));
        assert!(rng.uniform_int(IntRange::to(0)).is_ok());
    }

    #[test]
    fn test_uniform_int_wide_range() {
        let mut rng = Rng::new(4);
        let ranges = [
            IntRange::new(0, i64::MAX),
            IntRange::new(-10, i64::MAX - 5),
            IntRange::new(i64::MIN, i64::MAX),
            IntRange::new(i64::MIN, 0).exclusive(),
        ];
        for range in ranges {
            for _ in 0..50 {
                let value = rng.uniform_int(range).unwrap();
                assert!(value >= range.from && value <= range.to, "{value} outside {range:?}");
                if !range.inclusive {
                    assert!(value < range.to);
                }
            }
        }
    }

    #[test]
    fn test_polarity_both_signs() {
        let mut rng = Rng::new(5);
        let values: HashSet<i64> = (0..200).map(|_| rng.polarity() as i64).collect();
        assert_eq!(values, HashSet::from([1, -1]));
    }

    #[test]
    fn test_sample_empty_is_error() {
        let mut rng = Rng::new(6);
        let empty: [u8; 0] = [];
        assert_eq!(rng.sample(&empty), Err(PlayError::EmptySample));
        assert_eq!(rng.samples(2, &empty), Err(PlayError::EmptySample));
    }

    #[test]
    fn test_samples_with_replacement() {
        let mut rng = Rng::new(8);
        let picked = rng.samples(20, &["only"]).unwrap();
        assert_eq!(picked.len(), 20);
        assert!(picked.iter().all(|s| **s == "only"));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = Rng::new(9);
        let mut items: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted);

        let mut empty: Vec<u32> = Vec::new();
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_shuffle_consumes_one_draw_per_item() {
        let mut a = Rng::new(10);
        let mut b = Rng::new(10);
        let mut items = [0; 6];
        a.shuffle(&mut items);
        for _ in 0..6 {
            b.uniform();
        }
        assert_eq!(a.uniform(), b.uniform());
    }

    #[test]
    fn test_gaussian_consumes_two_draws() {
        let mut a = Rng::new(11);
        let mut b = Rng::new(11);
        a.gaussian(Gaussian::default());
        b.uniform();
        b.uniform();
        assert_eq!(a.uniform(), b.uniform());
    }

    #[test]
    fn test_gaussian_moments() {
        let mut rng = Rng::new(12);
        let n = 20_000;
        let xs: Vec<f64> = (0..n).map(|_| rng.gaussian(Gaussian::new(3.0, 2.0))).collect();
        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        assert!((mean - 3.0).abs() < 0.1, "mean was {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "sd was {}", var.sqrt());
        assert!(xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_poisson() {
        let mut rng = Rng::new(13);
        assert_eq!(rng.poisson(0.0), Ok(0));
        assert!(rng.poisson(-1.0).is_err());
        assert!(rng.poisson(f64::NAN).is_err());

        let n = 10_000;
        let total: u64 = (0..n).map(|_| rng.poisson(4.0).unwrap()).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 4.0).abs() < 0.15, "mean was {mean}");
    }

    #[test]
    fn test_poisson_draw_count() {
        let mut a = Rng::new(14);
        let mut b = Rng::new(14);
        let k = a.poisson(2.5).unwrap();
        for _ in 0..=k {
            b.uniform();
        }
        assert_eq!(a.uniform(), b.uniform());
    }

    #[test]
    fn test_proportionately() {
        let mut rng = Rng::new(15);
        let cases = [(1.0, 'a'), (3.0, 'b'), (0.0, 'c')];
        let mut counts = [0usize; 3];
        for _ in 0..8000 {
            match rng.proportionately(&cases).unwrap() {
                'a' => counts[0] += 1,
                'b' => counts[1] += 1,
                _ => counts[2] += 1,
            }
        }
        assert_eq!(counts[2], 0);
        let ratio = counts[1] as f64 / counts[0] as f64;
        assert!((ratio - 3.0).abs() < 0.35, "ratio was {ratio}");
    }

    #[test]
    fn test_proportionately_skips_zero_weight_first() {
        let mut rng = Rng::new(16);
        let cases = [(0.0, "never"), (2.0, "always")];
        for _ in 0..100 {
            assert_eq!(*rng.proportionately(&cases).unwrap(), "always");
        }
    }

    #[test]
    fn test_proportionately_rejects_non_positive_total() {
        let mut rng = Rng::new(17);
        assert_eq!(
            rng.proportionately(&[(0.0, 1), (0.0, 2)]),
            Err(PlayError::NonPositiveWeight(0.0))
        );
        let empty: [(f64, u8); 0] = [];
        assert!(rng.proportionately(&empty).is_err());
        assert!(rng.proportionately(&[(-1.0, 1)]).is_err());
    }

    #[test]
    fn test_do_proportion() {
        let mut rng = Rng::new(18);
        let mut hits = 0;
        for _ in 0..1000 {
            rng.do_proportion(0.0, || hits += 1);
        }
        assert_eq!(hits, 0);
        for _ in 0..1000 {
            rng.do_proportion(1.0, || hits += 1);
        }
        assert_eq!(hits, 1000);
    }
}
