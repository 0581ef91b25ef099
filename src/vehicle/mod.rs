pub mod params;

pub use params::{InitialConditions, VehicleBuilder, VehicleParameters};

// ---------------------------------------------------------------------------
// Preset vehicles
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// Single-stage booster: 1255 kg at ignition, 20 kg/s at 2800 m/s for
    /// 30 s, launched at 85° from the ground at 10 m/s.
    pub fn reference_booster() -> (VehicleParameters, InitialConditions) {
        (VehicleParameters::default(), InitialConditions::default())
    }
}
