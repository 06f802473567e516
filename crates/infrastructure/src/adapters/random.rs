//! Random number generator adapters.
//!
//! Two implementations of the [`RandomGenerator`] port:
//!
//! - [`SystemRandomGenerator`]: system-entropy seeds for production
//! - [`DeterministicRandomGenerator`]: counter-based seeds for tests
//!
//! Both step the same pure LCG, so a recorded seed replays the exact combat
//! regardless of which generator produced it.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use skirmish_domain::common::{RandomSeed, Roll};
use skirmish_workflow::ports::RandomGenerator;

// =============================================================================
// SystemRandomGenerator
// =============================================================================

/// System entropy-based random generator for production use.
///
/// Seeds are derived from the current system time in nanoseconds; the roll
/// sequence from a seed is fully deterministic, which keeps sessions
/// replayable from their recorded seeds.
#[derive(Clone, Debug, Default)]
pub struct SystemRandomGenerator;

impl SystemRandomGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RandomGenerator for SystemRandomGenerator {
    async fn generate_seed(&self) -> RandomSeed {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        RandomSeed::new(duration.as_nanos() as u64)
    }

    fn next_roll(&self, seed: &RandomSeed) -> (Roll, RandomSeed) {
        lcg_next_roll(seed)
    }
}

// =============================================================================
// DeterministicRandomGenerator
// =============================================================================

/// Deterministic random generator for testing purposes.
///
/// Seeds come from an internal counter, so a test knows in advance exactly
/// which roll sequence each operation will consume.
#[derive(Debug)]
pub struct DeterministicRandomGenerator {
    counter: AtomicU64,
}

impl DeterministicRandomGenerator {
    #[must_use]
    pub fn new(initial: u64) -> Self {
        Self {
            counter: AtomicU64::new(initial),
        }
    }
}

impl Clone for DeterministicRandomGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

#[async_trait]
impl RandomGenerator for DeterministicRandomGenerator {
    async fn generate_seed(&self) -> RandomSeed {
        RandomSeed::new(self.counter.fetch_add(1, Ordering::SeqCst))
    }

    fn next_roll(&self, seed: &RandomSeed) -> (Roll, RandomSeed) {
        lcg_next_roll(seed)
    }
}

// =============================================================================
// Shared LCG Implementation
// =============================================================================

/// The LCG multiplier/increment pair from the classic C standard library
/// generator.
const LCG_MULTIPLIER: u64 = 1_103_515_245;
const LCG_INCREMENT: u64 = 12_345;

fn lcg_step(state: u64) -> u64 {
    state.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT)
}

/// Produces a uniform roll in `[0, 1)` from two LCG steps.
///
/// Each step contributes the middle 15 bits of its state (bits 16-30, which
/// have better statistical properties than the low bits), giving 30 bits of
/// resolution per roll.
fn lcg_next_roll(seed: &RandomSeed) -> (Roll, RandomSeed) {
    let first = lcg_step(seed.value());
    let second = lcg_step(first);

    let high = (first >> 16) & 0x7FFF;
    let low = (second >> 16) & 0x7FFF;
    let bits = (high << 15) | low;

    let value = bits as f64 / f64::from(1u32 << 30);
    // bits < 2^30, so the fraction is always strictly below 1.
    let roll = Roll::new(value).unwrap_or_else(|_| Roll::zero());

    (roll, RandomSeed::new(second))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod system_random_generator {
        use super::*;

        #[rstest]
        #[tokio::test]
        async fn generate_seed_returns_different_values() {
            let generator = SystemRandomGenerator::new();

            let seed1 = generator.generate_seed().await;
            std::thread::sleep(std::time::Duration::from_millis(1));
            let seed2 = generator.generate_seed().await;

            assert_ne!(seed1, seed2);
        }

        #[rstest]
        fn next_roll_is_deterministic() {
            let generator = SystemRandomGenerator::new();
            let seed = RandomSeed::new(12_345);

            let (roll1, next1) = generator.next_roll(&seed);
            let (roll2, next2) = generator.next_roll(&seed);

            assert_eq!(roll1, roll2);
            assert_eq!(next1, next2);
        }

        #[rstest]
        fn next_roll_produces_a_sequence() {
            let generator = SystemRandomGenerator::new();
            let seed = RandomSeed::new(42);

            let (roll1, seed1) = generator.next_roll(&seed);
            let (roll2, seed2) = generator.next_roll(&seed1);
            let (roll3, _) = generator.next_roll(&seed2);

            assert_ne!(roll1, roll2);
            assert_ne!(roll2, roll3);
        }
    }

    mod deterministic_random_generator {
        use super::*;

        #[rstest]
        #[tokio::test]
        async fn generate_seed_counts_up_from_the_initial_value() {
            let generator = DeterministicRandomGenerator::new(100);

            assert_eq!(generator.generate_seed().await.value(), 100);
            assert_eq!(generator.generate_seed().await.value(), 101);
            assert_eq!(generator.generate_seed().await.value(), 102);
        }

        #[rstest]
        fn rolls_match_the_system_generator() {
            let deterministic = DeterministicRandomGenerator::new(0);
            let system = SystemRandomGenerator::new();
            let seed = RandomSeed::new(42);

            assert_eq!(deterministic.next_roll(&seed), system.next_roll(&seed));
        }

        #[rstest]
        fn clone_copies_the_current_counter() {
            let generator = DeterministicRandomGenerator::new(100);
            let _ = generator.counter.fetch_add(5, Ordering::SeqCst);

            let cloned = generator.clone();
            assert_eq!(cloned.counter.load(Ordering::SeqCst), 105);
        }
    }

    mod lcg_algorithm {
        use super::*;

        #[rstest]
        fn rolls_stay_inside_the_unit_interval() {
            let mut seed = RandomSeed::new(0);
            for _ in 0..10_000 {
                let (roll, next) = lcg_next_roll(&seed);
                assert!(roll.value() >= 0.0);
                assert!(roll.value() < 1.0);
                seed = next;
            }
        }

        #[rstest]
        fn rolls_cover_the_interval_roughly_uniformly() {
            let mut seed = RandomSeed::new(42);
            let mut buckets = [0u32; 10];
            let samples = 100_000;

            for _ in 0..samples {
                let (roll, next) = lcg_next_roll(&seed);
                let bucket = (roll.value() * 10.0) as usize;
                buckets[bucket.min(9)] += 1;
                seed = next;
            }

            for count in buckets {
                let share = f64::from(count) / f64::from(samples);
                assert!((share - 0.1).abs() < 0.02, "bucket share {}", share);
            }
        }
    }
}
