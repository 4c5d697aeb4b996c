use rand::Rng;

/// Pressure with the rod fully retracted, before noise [PSI].
pub const BASE_PRESSURE_PSI: f64 = 1000.0;
/// Pressure added per percent of travel [PSI/%].
pub const PRESSURE_PER_PERCENT: f64 = 15.0;
/// Width of the uniform pressure noise [PSI].
pub const PRESSURE_NOISE_PSI: f64 = 100.0;

pub const BASE_FLOW_GPM: f64 = 2.5;
pub const FLOW_NOISE_GPM: f64 = 1.5;

pub const AMBIENT_TEMPERATURE_F: f64 = 68.0;
pub const TEMPERATURE_PER_PERCENT: f64 = 0.3;
pub const TEMPERATURE_NOISE_F: f64 = 5.0;

pub const BASE_LOAD_LBS: f64 = 500.0;
pub const LOAD_PER_PERCENT: f64 = 25.0;

/// Line pressure for a given travel.
///
/// p = 1000 + 15 * extension + U[0, 100)
pub fn pressure(extension: f64, rng: &mut impl Rng) -> f64 {
    BASE_PRESSURE_PSI + extension * PRESSURE_PER_PERCENT + rng.gen::<f64>() * PRESSURE_NOISE_PSI
}

/// Pump flow while an automatic mode is driving the rod.
///
/// q = 2.5 + U[0, 1.5)
pub fn flow_rate(rng: &mut impl Rng) -> f64 {
    BASE_FLOW_GPM + rng.gen::<f64>() * FLOW_NOISE_GPM
}

/// Fluid temperature while an automatic mode is driving the rod.
///
/// T = 68 + 0.3 * extension + U[0, 5)
pub fn temperature(extension: f64, rng: &mut impl Rng) -> f64 {
    AMBIENT_TEMPERATURE_F + extension * TEMPERATURE_PER_PERCENT + rng.gen::<f64>() * TEMPERATURE_NOISE_F
}

/// Load on the rod [lbs]. Deterministic, derived from travel only.
pub fn load(extension: f64) -> f64 {
    extension * LOAD_PER_PERCENT + BASE_LOAD_LBS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_noise_gives_base_curves() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(pressure(0.0, &mut rng), 1000.0);
        assert_eq!(pressure(45.0, &mut rng), 1675.0);
        assert_eq!(flow_rate(&mut rng), 2.5);
        assert_eq!(temperature(0.0, &mut rng), 68.0);
    }

    #[test]
    fn test_noise_stays_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for i in 0..=100 {
            let extension = i as f64;
            let p = pressure(extension, &mut rng);
            let base = BASE_PRESSURE_PSI + extension * PRESSURE_PER_PERCENT;
            assert!(p >= base && p < base + PRESSURE_NOISE_PSI);

            let q = flow_rate(&mut rng);
            assert!((BASE_FLOW_GPM..BASE_FLOW_GPM + FLOW_NOISE_GPM).contains(&q));

            let t = temperature(extension, &mut rng);
            let t_base = AMBIENT_TEMPERATURE_F + extension * TEMPERATURE_PER_PERCENT;
            assert!(t >= t_base && t < t_base + TEMPERATURE_NOISE_F);
        }
    }

    #[test]
    fn test_load_is_linear_in_travel() {
        assert_eq!(load(0.0), 500.0);
        assert_eq!(load(100.0), 3000.0);
        assert_eq!(load(45.0), 1625.0);
    }
}
