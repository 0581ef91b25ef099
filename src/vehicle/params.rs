use serde::Deserialize;

use crate::error::SimError;
use crate::physics::gravity::G0;

// ---------------------------------------------------------------------------
// Single-stage booster with constant mass flow and exhaust velocity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VehicleParameters {
    pub mass_flow: f64,         // kg/s, ṁ
    pub exhaust_velocity: f64,  // m/s, effective W
    pub initial_mass: f64,      // kg
    pub burn_duration: f64,     // s
    pub reference_area: f64,    // m^2, aerodynamic S_m
    pub stability_margin: f64,  // m, moment-of-inertia proxy (not used by the pitch model)
    pub nozzle_exit_area: f64,  // m^2 (not used by the thrust model)
}

impl Default for VehicleParameters {
    fn default() -> Self {
        Self {
            mass_flow: 20.0,
            exhaust_velocity: 2_800.0,
            initial_mass: 1_255.0,
            burn_duration: 30.0,
            reference_area: 0.231,
            stability_margin: 0.215,
            nozzle_exit_area: 0.14,
        }
    }
}

impl VehicleParameters {
    /// Thrust, N. Independent of altitude in this model.
    pub fn thrust(&self) -> f64 {
        self.mass_flow * self.exhaust_velocity
    }

    pub fn propellant_burned(&self) -> f64 {
        self.mass_flow * self.burn_duration
    }

    pub fn final_mass(&self) -> f64 {
        self.initial_mass - self.propellant_burned()
    }

    /// Thrust-to-weight ratio at ignition.
    pub fn twr(&self) -> f64 {
        self.thrust() / (self.initial_mass * G0)
    }

    /// Ideal delta-v over the burn (Tsiolkovsky), or `None` if the burn
    /// would exhaust the whole vehicle.
    pub fn delta_v(&self) -> Option<f64> {
        let mf = self.final_mass();
        (mf > 0.0).then(|| self.exhaust_velocity * (self.initial_mass / mf).ln())
    }

    pub fn validate(&self) -> Result<(), SimError> {
        positive("mass flow rate", self.mass_flow)?;
        positive("burn duration", self.burn_duration)?;
        positive("initial mass", self.initial_mass)?;
        positive("reference area", self.reference_area)?;
        finite("exhaust velocity", self.exhaust_velocity)?;
        finite("stability margin", self.stability_margin)?;
        finite("nozzle exit area", self.nozzle_exit_area)?;
        Ok(())
    }
}

pub(crate) fn positive(name: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must be positive, got {value}")))
    }
}

pub(crate) fn finite(name: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must be finite, got {value}")))
    }
}

// ---------------------------------------------------------------------------
// Initial conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialConditions {
    pub velocity: f64,          // m/s
    pub flight_path_angle: f64, // deg
    pub altitude: f64,          // m
    pub pitch_rate: f64,        // 1/s
    pub pitch_angle: f64,       // deg
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            velocity: 10.0,
            flight_path_angle: 85.0,
            altitude: 0.0,
            pitch_rate: 0.0,
            pitch_angle: 85.0,
        }
    }
}

impl InitialConditions {
    pub fn validate(&self) -> Result<(), SimError> {
        finite("initial velocity", self.velocity)?;
        finite("initial flight-path angle", self.flight_path_angle)?;
        finite("initial altitude", self.altitude)?;
        finite("initial pitch rate", self.pitch_rate)?;
        finite("initial pitch angle", self.pitch_angle)?;
        if self.velocity < 0.0 {
            return Err(SimError::invalid("initial velocity must not be negative"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Starts from the reference booster.
pub struct VehicleBuilder {
    params: VehicleParameters,
}

impl Default for VehicleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleBuilder {
    pub fn new() -> Self {
        Self { params: VehicleParameters::default() }
    }

    pub fn mass_flow(mut self, v: f64) -> Self { self.params.mass_flow = v; self }
    pub fn exhaust_velocity(mut self, v: f64) -> Self { self.params.exhaust_velocity = v; self }
    pub fn initial_mass(mut self, v: f64) -> Self { self.params.initial_mass = v; self }
    pub fn burn_duration(mut self, v: f64) -> Self { self.params.burn_duration = v; self }
    pub fn reference_area(mut self, v: f64) -> Self { self.params.reference_area = v; self }
    pub fn stability_margin(mut self, v: f64) -> Self { self.params.stability_margin = v; self }
    pub fn nozzle_exit_area(mut self, v: f64) -> Self { self.params.nozzle_exit_area = v; self }

    pub fn build(self) -> Result<VehicleParameters, SimError> {
        self.params.validate()?;
        Ok(self.params)
    }
}
