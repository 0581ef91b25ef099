use serde::Serialize;

use crate::dynamics::evaluator::Evaluation;
use crate::dynamics::state::VehicleState;

/// Snapshot of the run at one output instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub time: f64, // s
    pub state: VehicleState,
    pub mach: f64,
    pub cxa: f64,
    pub cya_alpha: f64,
    pub alpha: f64,            // deg
    pub thrust: f64,           // N
    pub gravity: f64,          // m/s^2
    pub dynamic_pressure: f64, // Pa
    pub dvelocity: f64,        // m/s^2
    pub horizontal_velocity: f64, // m/s, dx/dt
    pub vertical_velocity: f64,   // m/s, dy/dt
}

impl TrajectorySample {
    pub fn new(time: f64, state: VehicleState, eval: &Evaluation) -> Self {
        Self {
            time,
            state,
            mach: eval.mach,
            cxa: eval.cxa,
            cya_alpha: eval.cya_alpha,
            alpha: eval.alpha,
            thrust: eval.thrust,
            gravity: eval.gravity,
            dynamic_pressure: eval.dynamic_pressure,
            dvelocity: eval.derivative.dvelocity,
            horizontal_velocity: eval.derivative.ddownrange,
            vertical_velocity: eval.derivative.daltitude,
        }
    }
}
