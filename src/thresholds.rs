//! Severity thresholds for the status readouts.
//!
//! Thresholds are constants with compile-time ordering checks, shared by the
//! classifiers and the view's colour choices.

// =============================================================================
// Pressure [PSI]
// =============================================================================

/// At or above this the pressure is Elevated. Below it is Normal.
pub const PRESSURE_ELEVATED_PSI: f64 = 1000.0;

/// At or above this the pressure is High.
pub const PRESSURE_HIGH_PSI: f64 = 1500.0;

/// At or above this the pressure is Critical.
pub const PRESSURE_CRITICAL_PSI: f64 = 2000.0;

const _: () = assert!(PRESSURE_ELEVATED_PSI < PRESSURE_HIGH_PSI);
const _: () = assert!(PRESSURE_HIGH_PSI < PRESSURE_CRITICAL_PSI);

// =============================================================================
// Fluid temperature [°F]
// =============================================================================

/// Strictly above this the fluid is Warm.
pub const TEMPERATURE_WARM_F: f64 = 75.0;

/// Strictly above this the fluid is Hot.
pub const TEMPERATURE_HOT_F: f64 = 80.0;

const _: () = assert!(TEMPERATURE_WARM_F < TEMPERATURE_HOT_F);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressureBand {
    Normal,
    Elevated,
    High,
    Critical,
}

impl PressureBand {
    pub fn label(self) -> &'static str {
        match self {
            PressureBand::Normal => "Normal",
            PressureBand::Elevated => "Elevated",
            PressureBand::High => "High",
            PressureBand::Critical => "Critical",
        }
    }

    /// CSS colour used by the status panel.
    pub fn color(self) -> &'static str {
        match self {
            PressureBand::Normal => "#4ade80",
            PressureBand::Elevated => "#facc15",
            PressureBand::High => "#fb923c",
            PressureBand::Critical => "#f87171",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Normal,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn color(self) -> &'static str {
        match self {
            TemperatureBand::Normal => "#4ade80",
            TemperatureBand::Warm => "#facc15",
            TemperatureBand::Hot => "#f87171",
        }
    }
}

/// Step function over the pressure thresholds; lower bounds are inclusive.
pub fn classify_pressure(pressure: f64) -> PressureBand {
    if pressure < PRESSURE_ELEVATED_PSI {
        PressureBand::Normal
    } else if pressure < PRESSURE_HIGH_PSI {
        PressureBand::Elevated
    } else if pressure < PRESSURE_CRITICAL_PSI {
        PressureBand::High
    } else {
        PressureBand::Critical
    }
}

pub fn classify_temperature(temperature: f64) -> TemperatureBand {
    if temperature > TEMPERATURE_HOT_F {
        TemperatureBand::Hot
    } else if temperature > TEMPERATURE_WARM_F {
        TemperatureBand::Warm
    } else {
        TemperatureBand::Normal
    }
}
