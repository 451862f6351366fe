use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Factor applied to every raw reading by the transform stage
pub const SCALE: f64 = PI;

/// Quantized raw reading from the simulated sensor, in `[0, Sample::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sample(u16);

impl Sample {
    pub const MAX: u16 = 1023;

    pub fn new(raw: u16) -> Option<Self> {
        (raw <= Self::MAX).then_some(Self(raw))
    }

    /// Draw a reading uniformly over the whole domain
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..=Self::MAX))
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    pub fn process(self) -> f64 {
        f64::from(self.0) * SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_domain_bounds() {
        assert_eq!(Sample::new(0).map(Sample::raw), Some(0));
        assert_eq!(Sample::new(1023).map(Sample::raw), Some(1023));
        assert!(Sample::new(1024).is_none());
    }

    #[test]
    fn test_random_stays_in_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            assert!(Sample::random(&mut rng).raw() <= Sample::MAX);
        }
    }

    #[test]
    fn test_process_scales_by_pi() {
        let sample = Sample::new(2).unwrap();
        assert_eq!(sample.process(), 2.0 * PI);
    }
}
