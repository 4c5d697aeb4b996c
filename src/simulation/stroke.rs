use rand::Rng;

use super::OperationMode;

pub const MIN_EXTENSION: f64 = 0.0;
pub const MAX_EXTENSION: f64 = 100.0;

/// Per-tick movement parameters for the automatic modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeProfile {
    /// Travel per Extend/Retract tick [%].
    pub step: f64,
    /// Half-width of the Auto mode random walk [%].
    pub jitter: f64,
}

/// Clamp a travel value into `[0, 100]`.
pub fn clamp_extension(value: f64) -> f64 {
    value.clamp(MIN_EXTENSION, MAX_EXTENSION)
}

/// Compute the extension after one tick of `mode`.
///
/// - Auto: random walk by a uniform draw in `[-jitter, jitter)`, clamped.
/// - Extend / Retract: fixed step towards the end stop, saturating there.
/// - Manual: no tick runs, extension is returned unchanged.
pub fn advance(
    mode: OperationMode,
    extension: f64,
    profile: StrokeProfile,
    rng: &mut impl Rng,
) -> f64 {
    match mode {
        OperationMode::Manual => extension,
        OperationMode::Auto => {
            let delta = (rng.gen::<f64>() - 0.5) * 2.0 * profile.jitter;
            clamp_extension(extension + delta)
        }
        OperationMode::Extend => (extension + profile.step).min(MAX_EXTENSION),
        OperationMode::Retract => (extension - profile.step).max(MIN_EXTENSION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const PROFILE: StrokeProfile = StrokeProfile {
        step: 2.0,
        jitter: 5.0,
    };

    #[test]
    fn test_extend_saturates_at_full_travel() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(advance(OperationMode::Extend, 50.0, PROFILE, &mut rng), 52.0);
        assert_eq!(advance(OperationMode::Extend, 99.0, PROFILE, &mut rng), 100.0);
        assert_eq!(advance(OperationMode::Extend, 100.0, PROFILE, &mut rng), 100.0);
    }

    #[test]
    fn test_retract_saturates_at_zero() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(advance(OperationMode::Retract, 50.0, PROFILE, &mut rng), 48.0);
        assert_eq!(advance(OperationMode::Retract, 1.0, PROFILE, &mut rng), 0.0);
        assert_eq!(advance(OperationMode::Retract, 0.0, PROFILE, &mut rng), 0.0);
    }

    #[test]
    fn test_manual_does_not_move() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(advance(OperationMode::Manual, 37.5, PROFILE, &mut rng), 37.5);
    }

    #[test]
    fn test_auto_lower_edge_of_walk() {
        // A zero draw maps to the lower edge of the jitter window.
        let mut rng = StepRng::new(0, 0);
        assert_eq!(advance(OperationMode::Auto, 50.0, PROFILE, &mut rng), 45.0);
        assert_eq!(advance(OperationMode::Auto, 3.0, PROFILE, &mut rng), 0.0);
    }

    #[test]
    fn test_auto_stays_in_window_and_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut extension = 50.0;
        for _ in 0..1000 {
            let next = advance(OperationMode::Auto, extension, PROFILE, &mut rng);
            assert!((MIN_EXTENSION..=MAX_EXTENSION).contains(&next));
            assert!((next - extension).abs() <= PROFILE.jitter);
            extension = next;
        }
    }

    #[test]
    fn test_clamp_extension() {
        assert_eq!(clamp_extension(-3.0), 0.0);
        assert_eq!(clamp_extension(150.0), 100.0);
        assert_eq!(clamp_extension(42.5), 42.5);
    }
}
