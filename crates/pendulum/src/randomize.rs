use rand::{Rng, SeedableRng, distributions::Uniform, rngs::StdRng};

use crate::SimulationConfig;

const ANGLE_DEG: (f64, f64) = (0.0, 90.0);
const ANGULAR_VELOCITY: (f64, f64) = (-5.0, 5.0);
const TOTAL_TIME: (f64, f64) = (5.0, 15.0);
const GRAVITY: (f64, f64) = (9.5, 10.5);
const LENGTH: (f64, f64) = (0.5, 1.5);

/// Draws a random candidate config.
///
/// Each physical field is sampled uniformly from its range:
///
/// | field                      | range        |
/// |----------------------------|--------------|
/// | `initial_angle_deg`        | 0 to 90      |
/// | `initial_angular_velocity` | -5 to 5      |
/// | `total_time`               | 5 to 15      |
/// | `gravity`                  | 9.5 to 10.5  |
/// | `length`                   | 0.5 to 1.5   |
///
/// Solver tolerances are left unset.
pub fn randomize<R: Rng + ?Sized>(rng: &mut R) -> SimulationConfig {
    let mut draw = |(low, high): (f64, f64)| rng.sample(Uniform::new_inclusive(low, high));

    SimulationConfig {
        initial_angle_deg: draw(ANGLE_DEG),
        initial_angular_velocity: draw(ANGULAR_VELOCITY),
        total_time: draw(TOTAL_TIME),
        gravity: draw(GRAVITY),
        length: draw(LENGTH),
        ..SimulationConfig::default()
    }
}

/// Draws a reproducible candidate config from `seed`.
#[must_use]
pub fn randomize_seeded(seed: u64) -> SimulationConfig {
    randomize(&mut StdRng::seed_from_u64(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(value: f64, (low, high): (f64, f64)) -> bool {
        (low..=high).contains(&value)
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let config = randomize(&mut rng);
            assert!(within(config.initial_angle_deg, ANGLE_DEG));
            assert!(within(config.initial_angular_velocity, ANGULAR_VELOCITY));
            assert!(within(config.total_time, TOTAL_TIME));
            assert!(within(config.gravity, GRAVITY));
            assert!(within(config.length, LENGTH));
            assert_eq!(config.rel_tol, None);
            assert_eq!(config.abs_tol, None);
        }
    }

    #[test]
    fn seeded_draws_repeat() {
        assert_eq!(randomize_seeded(42), randomize_seeded(42));
        assert_ne!(randomize_seeded(1), randomize_seeded(2));
    }

    #[test]
    fn random_configs_are_valid_scenarios() {
        for seed in 0..20 {
            assert!(randomize_seeded(seed).scenario().is_ok());
        }
    }
}
