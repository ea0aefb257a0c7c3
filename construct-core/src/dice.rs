//! d20 check rolling.
//!
//! The game resolves checks with a single d20 plus an additive modifier.
//! Every rolling function has a `_with_rng` variant so tests can inject
//! a seeded generator.

use rand::Rng;

/// Roll a d20 check: uniform in [1, 20] plus `modifier`.
pub fn roll_check(modifier: i32) -> i32 {
    roll_check_with_rng(modifier, &mut rand::thread_rng())
}

/// Roll a d20 check with a specific RNG.
pub fn roll_check_with_rng<R: Rng>(modifier: i32, rng: &mut R) -> i32 {
    rng.gen_range(1..=20) + modifier
}

/// Roll a d20 check and render it as a player-visible message.
pub fn roll_message(modifier: i32) -> String {
    roll_message_with_rng(modifier, &mut rand::thread_rng())
}

/// Render a d20 check message with a specific RNG.
pub fn roll_message_with_rng<R: Rng>(modifier: i32, rng: &mut R) -> String {
    let total = roll_check_with_rng(modifier, rng);
    format!("Dice Roll (d20 + {modifier}): {total}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_range() {
        for _ in 0..1000 {
            let result = roll_check(0);
            assert!((1..=20).contains(&result));
        }
    }

    #[test]
    fn test_roll_with_modifier() {
        for modifier in [-5, 0, 3, 10] {
            for _ in 0..200 {
                let result = roll_check(modifier);
                assert!((1..=20).contains(&(result - modifier)));
            }
        }
    }

    #[test]
    fn test_roll_distribution() {
        // With 10,000 rolls each face expects 500 hits. A chi-square
        // statistic above 43.8 rejects uniformity at p < 0.001 for 19
        // degrees of freedom.
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [0u32; 20];
        for _ in 0..10_000 {
            let result = roll_check_with_rng(0, &mut rng);
            counts[(result - 1) as usize] += 1;
        }

        let expected = 500.0_f64;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(chi_square < 43.8, "chi-square statistic too high: {chi_square}");
        assert!(counts.iter().all(|&c| c > 0), "some face never rolled");
    }

    #[test]
    fn test_roll_message_format() {
        let mut rng = StdRng::seed_from_u64(7);
        let message = roll_message_with_rng(2, &mut rng);
        assert!(message.starts_with("Dice Roll (d20 + 2): "));

        let total: i32 = message
            .rsplit(": ")
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap();
        assert!((3..=22).contains(&total));
    }
}
