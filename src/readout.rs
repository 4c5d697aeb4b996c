use crate::simulation::{Cylinder, OperationMode};
use crate::thresholds::{classify_pressure, classify_temperature, PressureBand, TemperatureBand};

/// Read-only snapshot of a cylinder, as handed to the view.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderReadout {
    pub extension: f64,
    pub pressure: f64,
    pub pressure_band: PressureBand,
    pub flow_rate: f64,
    pub temperature: f64,
    pub temperature_band: TemperatureBand,
    pub load: f64,
    pub mode: OperationMode,
    pub is_operating: bool,
}

pub fn read_cylinder(cylinder: &Cylinder) -> CylinderReadout {
    CylinderReadout {
        extension: cylinder.extension(),
        pressure: cylinder.pressure(),
        pressure_band: classify_pressure(cylinder.pressure()),
        flow_rate: cylinder.flow_rate(),
        temperature: cylinder.temperature(),
        temperature_band: classify_temperature(cylinder.temperature()),
        load: cylinder.load(),
        mode: cylinder.mode(),
        is_operating: cylinder.is_operating(),
    }
}
