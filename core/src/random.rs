use serde::{Deserialize, Serialize};

use crate::*;

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233280;

/// Linear-congruential generator used for mine placement.
///
/// Every game owns its own generator, so two games built from the same seed
/// produce the same sequence no matter how they are interleaved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u32) -> Result<Self> {
        if seed == 0 {
            return Err(GameError::InvalidArgument("random seed must not be zero"));
        }
        Ok(Self {
            state: u64::from(seed),
        })
    }

    /// Advances the generator and returns a value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }

    /// Advances the generator and scales the result into `0..bound`.
    pub fn next_below(&mut self, bound: Coord) -> Coord {
        let scaled = (self.next_unit() * f64::from(bound)) as Coord;
        // guard against rounding pushing the value onto the bound
        scaled.min(bound.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_rejected() {
        assert_eq!(
            Lcg::new(0),
            Err(GameError::InvalidArgument("random seed must not be zero"))
        );
    }

    #[test]
    fn follows_the_recurrence() {
        let mut rng = Lcg::new(6).unwrap();
        // (6 * 9301 + 49297) % 233280 = 105103
        assert_eq!(rng.next_unit(), 105103.0 / 233280.0);
        // (105103 * 9301 + 49297) % 233280 = 169100
        assert_eq!(rng.next_unit(), 169100.0 / 233280.0);
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let mut rng = Lcg::new(123_456).unwrap();
        for _ in 0..10_000 {
            let value = rng.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Lcg::new(42).unwrap();
        let mut b = Lcg::new(42).unwrap();
        for _ in 0..100 {
            assert_eq!(a.next_below(30), b.next_below(30));
        }
    }

    #[test]
    fn next_below_stays_under_bound() {
        let mut rng = Lcg::new(7).unwrap();
        for _ in 0..1_000 {
            assert!(rng.next_below(3) < 3);
        }
    }
}
