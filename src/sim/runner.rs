use log::debug;

use crate::dynamics::evaluator::DerivativeEvaluator;
use crate::dynamics::state::{AlphaLaw, VehicleState};
use crate::error::SimError;
use crate::physics::aerodynamics::{self, AeroTable};
use crate::physics::atmosphere::{self, StandardAtmosphere};
use crate::vehicle::params::{positive, InitialConditions, VehicleParameters};

use super::event::{Termination, TerminationCheck};
use super::integrator::IntegrationMethod;
use super::sample::TrajectorySample;

/// Samples are recorded on multiples of this interval.
pub const OUTPUT_INTERVAL: f64 = 0.1; // s

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationConfig {
    pub method: IntegrationMethod,
    pub alpha_law: AlphaLaw,
    pub dt: f64,       // s
    pub duration: f64, // s
}

impl IntegrationConfig {
    pub fn new(method: IntegrationMethod, alpha_law: AlphaLaw, dt: f64, duration: f64) -> Self {
        Self { method, alpha_law, dt, duration }
    }

    /// Run for the whole burn of `vehicle`.
    pub fn for_vehicle(vehicle: &VehicleParameters, method: IntegrationMethod, alpha_law: AlphaLaw, dt: f64) -> Self {
        Self::new(method, alpha_law, dt, vehicle.burn_duration)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        positive("step size", self.dt)?;
        positive("run duration", self.duration)?;
        Ok(())
    }
}

/// Study plan: Euler at three step sizes, modified Euler at two, RK4 at
/// one, each under both angle-of-attack laws.
pub fn reference_matrix(duration: f64) -> Vec<IntegrationConfig> {
    let plan: [(IntegrationMethod, &[f64]); 3] = [
        (IntegrationMethod::Euler, &[0.1, 0.01, 0.001]),
        (IntegrationMethod::ModifiedEuler, &[0.1, 0.01]),
        (IntegrationMethod::Rk4, &[0.1]),
    ];
    plan.iter()
        .flat_map(|&(method, steps)| {
            steps.iter().flat_map(move |&dt| {
                [AlphaLaw::ThetaMinusThetaC, AlphaLaw::Zero]
                    .into_iter()
                    .map(move |law| IntegrationConfig::new(method, law, dt, duration))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Trajectory {
    pub config: IntegrationConfig,
    /// Time-ordered; never empty.
    pub samples: Vec<TrajectorySample>,
    pub termination: Termination,
    pub steps: usize,
}

impl Trajectory {
    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }

    pub fn final_time(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.time)
    }
}

// ---------------------------------------------------------------------------
// Simulation loop
// ---------------------------------------------------------------------------

/// True when the step ending at `t` covers a multiple of the output
/// interval within half a step either side.
fn on_output_cadence(t: f64, dt: f64) -> bool {
    let lo = ((t - 0.5 * dt) / OUTPUT_INTERVAL).floor();
    let hi = ((t + 0.5 * dt) / OUTPUT_INTERVAL).floor();
    hi > lo
}

/// Run from the initial conditions until the duration elapses or the mass
/// floor is reached, against explicit model instances.
pub fn simulate_with(
    atmosphere: &StandardAtmosphere,
    aero: &AeroTable,
    vehicle: &VehicleParameters,
    initial: &InitialConditions,
    config: &IntegrationConfig,
) -> Result<Trajectory, SimError> {
    vehicle.validate()?;
    initial.validate()?;
    config.validate()?;

    debug!(
        "run start: {}, {}, dt={} s, duration={} s",
        config.method, config.alpha_law, config.dt, config.duration
    );

    let eom = DerivativeEvaluator::new(atmosphere, aero, vehicle, config.alpha_law);
    let stop = TerminationCheck::new(vehicle.initial_mass, config.duration, config.dt);

    let mut state = VehicleState {
        velocity: initial.velocity,
        flight_path_angle: initial.flight_path_angle,
        downrange: 0.0,
        altitude: initial.altitude,
        pitch_rate: initial.pitch_rate,
        pitch_angle: initial.pitch_angle,
        mass: vehicle.initial_mass,
    };

    let capacity = (config.duration / config.dt.max(OUTPUT_INTERVAL)) as usize + 2;
    let mut samples = Vec::with_capacity(capacity.min(100_000));
    samples.push(TrajectorySample::new(0.0, state, &eom.evaluate(0.0, &state)));

    let mut t = 0.0;
    let mut steps = 0usize;

    let termination = loop {
        if let Some(reason) = stop.check(t, &state) {
            break reason;
        }

        // Last step is shortened so the run lands on the duration exactly.
        let h = config.dt.min(config.duration - t);
        state = config.method.step(&eom, t, &state, h);
        steps += 1;
        t = if h < config.dt { config.duration } else { steps as f64 * config.dt };

        if on_output_cadence(t, h) {
            samples.push(TrajectorySample::new(t, state, &eom.evaluate(t, &state)));
        }
    };

    if samples.last().map_or(true, |s| s.time != t) {
        samples.push(TrajectorySample::new(t, state, &eom.evaluate(t, &state)));
    }

    debug!(
        "run end: {termination} at t={t:.3} s after {steps} steps, {} samples",
        samples.len()
    );

    Ok(Trajectory {
        config: *config,
        samples,
        termination,
        steps,
    })
}

/// Run against the shared standard atmosphere and booster aerodynamics.
pub fn simulate(
    vehicle: &VehicleParameters,
    initial: &InitialConditions,
    config: &IntegrationConfig,
) -> Result<Trajectory, SimError> {
    simulate_with(
        atmosphere::standard(),
        aerodynamics::booster_table(),
        vehicle,
        initial,
        config,
    )
}

/// Sample sequence of one run.
pub fn run_trajectory(
    initial: &InitialConditions,
    vehicle: &VehicleParameters,
    config: &IntegrationConfig,
) -> Result<Vec<TrajectorySample>, SimError> {
    simulate(vehicle, initial, config).map(|run| run.samples)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
