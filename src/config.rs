use crate::error::{CylinderError, CylinderResult};

/// Which copy of the indicator to build.
///
/// `Full` starts at 45% travel and renders the status panel, `Compact` starts
/// at 70% and leaves the panel out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Full,
    Compact,
}

/// How the "operating" indicator reacts to rapid manual input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatingResetPolicy {
    /// Only the most recent input's reset timer survives, so the indicator
    /// stays on until the hold has elapsed after the last input.
    #[default]
    Coalesce,
    /// Every input arms its own reset; the first one to expire clears the flag.
    Independent,
}

/// Tunables for one cylinder indicator instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderConfig {
    /// Starting travel in percent.
    pub initial_extension: f64,
    /// Pressure shown before the first derived recompute [PSI].
    pub initial_pressure: f64,
    /// Temperature shown before the first non-manual recompute [°F].
    pub initial_temperature: f64,
    pub auto_period_ms: u32,
    /// Tick period for both Extend and Retract.
    pub stroke_period_ms: u32,
    /// Travel per Extend/Retract tick [%].
    pub stroke_step: f64,
    /// Auto mode moves by a uniform draw in `[-auto_jitter, auto_jitter)`.
    pub auto_jitter: f64,
    /// How long the "operating" indicator stays on after manual input.
    pub operating_hold_ms: u32,
    pub reset_policy: OperatingResetPolicy,
    pub show_status_panel: bool,
}

impl Default for CylinderConfig {
    fn default() -> Self {
        Self {
            initial_extension: 45.0,
            initial_pressure: 1250.0,
            initial_temperature: 68.0,
            auto_period_ms: 2000,
            stroke_period_ms: 100,
            stroke_step: 2.0,
            auto_jitter: 5.0,
            operating_hold_ms: 500,
            reset_policy: OperatingResetPolicy::default(),
            show_status_panel: true,
        }
    }
}

impl CylinderConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Full => Self::default(),
            Variant::Compact => Self {
                initial_extension: 70.0,
                show_status_panel: false,
                ..Self::default()
            },
        }
    }

    /// Check that the config describes a runnable cylinder.
    pub fn validate(&self) -> CylinderResult<()> {
        if !self.initial_extension.is_finite()
            || !(0.0..=100.0).contains(&self.initial_extension)
        {
            return Err(CylinderError::InvalidConfig {
                what: "initial_extension must be within [0, 100]",
            });
        }
        if !self.initial_pressure.is_finite() || self.initial_pressure < 0.0 {
            return Err(CylinderError::InvalidConfig {
                what: "initial_pressure must be non-negative",
            });
        }
        if !self.initial_temperature.is_finite() {
            return Err(CylinderError::InvalidConfig {
                what: "initial_temperature must be finite",
            });
        }
        if self.auto_period_ms == 0 || self.stroke_period_ms == 0 {
            return Err(CylinderError::InvalidConfig {
                what: "tick periods must be positive",
            });
        }
        if !self.stroke_step.is_finite() || self.stroke_step <= 0.0 {
            return Err(CylinderError::InvalidConfig {
                what: "stroke_step must be positive",
            });
        }
        if !self.auto_jitter.is_finite() || self.auto_jitter < 0.0 {
            return Err(CylinderError::InvalidConfig {
                what: "auto_jitter must be non-negative",
            });
        }
        Ok(())
    }
}
