//! Shiny determination: the 1-in-N roll that ends a hunt.

use rand::Rng;

/// Outcome of one shiny check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShinyRoll {
    pub is_shiny: bool,
    /// Cosmetic "you sense something rare nearby" hint, rolled independently
    /// when the encounter is not shiny.
    pub heard_flavor: bool,
}

/// Rolls shininess at 1-in-`rate` odds.
///
/// `rate` of 1 means every encounter is shiny. The flavor hint uses
/// 1-in-(rate / 5) odds with integer division, denominator clamped to 1 —
/// the truncation is part of the observable behavior and is kept as-is.
pub fn roll_shiny(rate: u32, rng: &mut impl Rng) -> ShinyRoll {
    let rate = rate.max(1);

    if rng.gen_range(1..=rate) == 1 {
        return ShinyRoll {
            is_shiny: true,
            heard_flavor: false,
        };
    }

    let flavor_range = (rate / 5).max(1);
    ShinyRoll {
        is_shiny: false,
        heard_flavor: rng.gen_range(1..=flavor_range) == 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rate_one_is_always_shiny() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let roll = roll_shiny(1, &mut rng);
            assert!(roll.is_shiny);
            assert!(!roll.heard_flavor);
        }
    }

    #[test]
    fn test_rate_zero_is_clamped_to_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(roll_shiny(0, &mut rng).is_shiny);
    }

    #[test]
    fn test_empirical_frequency_near_one_in_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let trials = 50_000;
        let mut shinies = 0;
        for _ in 0..trials {
            if roll_shiny(100, &mut rng).is_shiny {
                shinies += 1;
            }
        }

        // Expected 500; allow a wide band for a seeded run.
        assert!(shinies > 400 && shinies < 600, "shinies: {shinies}");
    }

    #[test]
    fn test_small_rate_flavor_denominator_clamps() {
        // rate 4 / 5 truncates to 0, clamped to 1: every non-shiny
        // encounter hears the hint.
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1000 {
            let roll = roll_shiny(4, &mut rng);
            if !roll.is_shiny {
                assert!(roll.heard_flavor);
            }
        }
    }

    #[test]
    fn test_flavor_hint_is_independent_of_shiny_roll() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let trials = 50_000;
        let mut hints = 0;
        let mut non_shiny = 0;
        for _ in 0..trials {
            let roll = roll_shiny(1000, &mut rng);
            if !roll.is_shiny {
                non_shiny += 1;
                if roll.heard_flavor {
                    hints += 1;
                }
            }
        }

        // Hint odds are 1-in-200 among non-shiny encounters.
        let expected = non_shiny / 200;
        assert!(
            hints > expected / 2 && hints < expected * 2,
            "hints: {hints}, expected around {expected}"
        );
    }
}
