pub mod stroke;
pub mod telemetry;

use std::fmt;

use rand::Rng;

use crate::config::CylinderConfig;
use crate::error::{CylinderError, CylinderResult};
use stroke::StrokeProfile;

/// Control strategy currently governing extension changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationMode {
    #[default]
    Manual,
    Auto,
    Extend,
    Retract,
}

impl OperationMode {
    pub const ALL: [OperationMode; 4] = [
        OperationMode::Manual,
        OperationMode::Auto,
        OperationMode::Extend,
        OperationMode::Retract,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OperationMode::Manual => "Manual",
            OperationMode::Auto => "Auto",
            OperationMode::Extend => "Extend",
            OperationMode::Retract => "Retract",
        }
    }

    pub fn is_manual(self) -> bool {
        self == OperationMode::Manual
    }

    /// Period of the tick that drives this mode, `None` for Manual.
    pub fn tick_period_ms(self, config: &CylinderConfig) -> Option<u32> {
        match self {
            OperationMode::Manual => None,
            OperationMode::Auto => Some(config.auto_period_ms),
            OperationMode::Extend | OperationMode::Retract => Some(config.stroke_period_ms),
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Simulated hydraulic cylinder.
///
/// Pressure, flow rate and temperature are never written directly: they are
/// recomputed from extension and mode whenever either one actually changes.
/// In Manual mode the flow rate is forced to zero and the temperature keeps
/// its last value.
#[derive(Debug, Clone)]
pub struct Cylinder {
    extension: f64,
    pressure: f64,
    flow_rate: f64,
    temperature: f64,
    mode: OperationMode,
    is_operating: bool,
    stroke: StrokeProfile,
}

impl Cylinder {
    /// Create a cylinder holding the configured start values, in Manual mode.
    ///
    /// No derived recompute happens here, so `pressure` still reads the
    /// configured initial value until [`Cylinder::refresh`] or a transition.
    pub fn new(config: &CylinderConfig) -> Self {
        Cylinder {
            extension: stroke::clamp_extension(config.initial_extension),
            pressure: config.initial_pressure,
            flow_rate: 0.0,
            temperature: config.initial_temperature,
            mode: OperationMode::Manual,
            is_operating: false,
            stroke: StrokeProfile {
                step: config.stroke_step,
                jitter: config.auto_jitter,
            },
        }
    }

    pub fn extension(&self) -> f64 {
        self.extension
    }

    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn flow_rate(&self) -> f64 {
        self.flow_rate
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    pub fn is_operating(&self) -> bool {
        self.is_operating
    }

    /// Load on the rod [lbs].
    pub fn load(&self) -> f64 {
        telemetry::load(self.extension)
    }

    /// Switch the operating mode. Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: OperationMode, rng: &mut impl Rng) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.refresh(rng);
        true
    }

    /// Apply a manual extension command.
    ///
    /// Only accepted in Manual mode. Finite values are clamped to `[0, 100]`;
    /// the operating flag is raised even when the value is unchanged.
    pub fn apply_manual(&mut self, value: f64, rng: &mut impl Rng) -> CylinderResult<()> {
        if !self.mode.is_manual() {
            return Err(CylinderError::NotManual { mode: self.mode });
        }
        if !value.is_finite() {
            return Err(CylinderError::InvalidExtension { value });
        }
        self.is_operating = true;
        self.move_to(stroke::clamp_extension(value), rng);
        Ok(())
    }

    /// Advance one tick of the current mode. Returns whether extension moved.
    pub fn tick(&mut self, rng: &mut impl Rng) -> bool {
        let next = stroke::advance(self.mode, self.extension, self.stroke, rng);
        self.move_to(next, rng)
    }

    /// Drop to Manual and fully retract.
    pub fn emergency_stop(&mut self, rng: &mut impl Rng) {
        let changed = self.mode != OperationMode::Manual || self.extension != 0.0;
        self.mode = OperationMode::Manual;
        self.extension = 0.0;
        if changed {
            self.refresh(rng);
        }
    }

    pub fn clear_operating(&mut self) {
        self.is_operating = false;
    }

    /// Recompute the derived quantities from extension and mode.
    pub fn refresh(&mut self, rng: &mut impl Rng) {
        self.pressure = telemetry::pressure(self.extension, rng);
        if self.mode.is_manual() {
            self.flow_rate = 0.0;
        } else {
            self.flow_rate = telemetry::flow_rate(rng);
            self.temperature = telemetry::temperature(self.extension, rng);
        }
    }

    fn move_to(&mut self, extension: f64, rng: &mut impl Rng) -> bool {
        if extension == self.extension {
            return false;
        }
        self.extension = extension;
        self.refresh(rng);
        true
    }
}
