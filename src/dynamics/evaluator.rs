use log::trace;

use crate::dynamics::state::{AlphaLaw, StateDerivative, VehicleState};
use crate::dynamics::EquationsOfMotion;
use crate::physics::aerodynamics::{self, AeroTable, MACH_MAX, MACH_MIN};
use crate::physics::atmosphere::StandardAtmosphere;
use crate::physics::gravity::G0;
use crate::vehicle::VehicleParameters;

// ---------------------------------------------------------------------------
// Equations of motion (planar point mass, powered)
// ---------------------------------------------------------------------------

const FALLBACK_DENSITY: f64 = 1.225; // kg/m^3
const FALLBACK_SOUND_SPEED: f64 = 340.0; // m/s

/// Mass never drops below this fraction of ignition mass inside the RHS.
pub const MASS_FLOOR_FRACTION: f64 = 0.01;

/// Below this speed the flight-path angle is held constant.
pub const MIN_TURN_SPEED: f64 = 1.0; // m/s

/// Everything computed on the way to a derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub gravity: f64,          // m/s^2
    pub density: f64,          // kg/m^3
    pub sound_speed: f64,      // m/s
    pub atmosphere_fallback: bool,
    pub mach: f64,             // V/a, unclamped
    pub cxa: f64,
    pub cya_alpha: f64,
    pub alpha: f64,            // deg
    pub dynamic_pressure: f64, // Pa
    pub drag: f64,             // N
    pub lift: f64,             // N
    pub thrust: f64,           // N
    pub derivative: StateDerivative,
}

/// Right-hand side of the ascent equations.
///
/// Holds only shared read-only references, so one evaluator can serve any
/// number of runs.
#[derive(Debug, Clone, Copy)]
pub struct DerivativeEvaluator<'a> {
    atmosphere: &'a StandardAtmosphere,
    aero: &'a AeroTable,
    vehicle: &'a VehicleParameters,
    alpha_law: AlphaLaw,
}

impl<'a> DerivativeEvaluator<'a> {
    pub fn new(
        atmosphere: &'a StandardAtmosphere,
        aero: &'a AeroTable,
        vehicle: &'a VehicleParameters,
        alpha_law: AlphaLaw,
    ) -> Self {
        Self { atmosphere, aero, vehicle, alpha_law }
    }

    pub fn alpha_law(&self) -> AlphaLaw {
        self.alpha_law
    }

    /// Full evaluation at `state`. Total: every input yields finite forces
    /// as long as the state itself is finite.
    pub fn evaluate(&self, _t: f64, state: &VehicleState) -> Evaluation {
        let v = state.velocity;
        let m = state.mass.max(MASS_FLOOR_FRACTION * self.vehicle.initial_mass);
        let theta_c = state.flight_path_angle.to_radians();

        let (gravity, density, sound_speed, atmosphere_fallback) =
            match self.atmosphere.compute_state(state.altitude.max(0.0)) {
                Ok(atm) => (atm.gravity, atm.density, atm.sound_speed, false),
                Err(e) => {
                    trace!("atmosphere fallback: {e}");
                    (G0, FALLBACK_DENSITY, FALLBACK_SOUND_SPEED, true)
                }
            };

        let mach = v / sound_speed;
        let coeffs = self.aero.lookup(mach.clamp(MACH_MIN, MACH_MAX));

        let alpha_deg = self.alpha_law.angle_of_attack(state);
        let alpha = alpha_deg.to_radians();

        let q = aerodynamics::dynamic_pressure(density, v);
        let area = self.vehicle.reference_area;
        let drag = aerodynamics::drag_force(q, area, coeffs.cxa);
        let lift = match self.alpha_law {
            AlphaLaw::Zero => 0.0,
            AlphaLaw::ThetaMinusThetaC => aerodynamics::lift_force(q, area, coeffs.cya_alpha, alpha),
        };
        let thrust = self.vehicle.thrust();

        let dflight_path_angle = if v > MIN_TURN_SPEED {
            ((thrust * alpha.sin() + lift) / (m * v) - gravity * theta_c.cos() / v).to_degrees()
        } else {
            0.0
        };

        let derivative = StateDerivative {
            dvelocity: (thrust * alpha.cos() - drag) / m - gravity * theta_c.sin(),
            dflight_path_angle,
            ddownrange: v * theta_c.cos(),
            daltitude: v * theta_c.sin(),
            // No pitching-moment model.
            dpitch_rate: 0.0,
            dpitch_angle: state.pitch_rate,
            dmass: -self.vehicle.mass_flow,
        };

        Evaluation {
            gravity,
            density,
            sound_speed,
            atmosphere_fallback,
            mach,
            cxa: coeffs.cxa,
            cya_alpha: coeffs.cya_alpha,
            alpha: alpha_deg,
            dynamic_pressure: q,
            drag,
            lift,
            thrust,
            derivative,
        }
    }
}

impl EquationsOfMotion for DerivativeEvaluator<'_> {
    fn derivative(&self, t: f64, state: &VehicleState) -> StateDerivative {
        self.evaluate(t, state).derivative
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
